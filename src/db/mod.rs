// Options Module
// Resolves provider settings from explicit sets and raw configuration,
// then hands each provider's services to the host

pub mod drivers;
pub mod raw;
pub mod registry;
pub mod relational;
pub mod strings;
pub mod traits;

// ============================================================================
// Re-exports
// ============================================================================

pub use drivers::{SqlServerOptionsExtension, SqliteOptionsExtension};
pub use raw::{configuration_key, RawConfiguration, KEY_DELIMITER};
pub use registry::{ServiceCollection, ServiceDescriptor, ServiceLifetime, ServiceSink, ServiceType};
pub use relational::{resolve_relational_settings, RelationalOptions, RelationalResolution};
pub use traits::{
    Connection, OptionsError, OptionsErrorKind, OptionsExtension, OptionsState, ProviderKind,
};
