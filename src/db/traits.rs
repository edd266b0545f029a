// Options Extension Traits
// Defines the core abstraction every relational provider's options implement

use crate::db::raw::RawConfiguration;
use crate::db::registry::ServiceSink;
use crate::db::relational::RelationalOptions;

/// Supported provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    SqlServer,
    Sqlite,
}

impl ProviderKind {
    /// Display name for diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::SqlServer => "Microsoft SQL Server",
            ProviderKind::Sqlite => "SQLite",
        }
    }

    /// Short name used to namespace provider keys in raw configuration
    /// (e.g. `SqlServer:MaxBatchSize`)
    pub fn config_prefix(&self) -> &'static str {
        match self {
            ProviderKind::SqlServer => "SqlServer",
            ProviderKind::Sqlite => "Sqlite",
        }
    }
}

/// Coarse classification of [`OptionsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsErrorKind {
    InvalidArgument,
    InvalidConfigurationFormat,
    InvalidConfigurationValue,
}

/// Common options error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// An explicit setter received a value outside the field's domain.
    #[error("{message} (parameter '{argument}')")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    /// A raw configuration value could not be parsed.
    #[error("The configuration value for '{key}' is not formatted correctly: '{value}'.")]
    InvalidConfigurationFormat { key: String, value: String },

    /// A raw configuration value parsed but is outside the field's domain.
    #[error("The configuration value for '{key}' is not valid: '{value}'. {message}")]
    InvalidConfigurationValue {
        key: String,
        value: String,
        message: String,
    },
}

impl OptionsError {
    pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        OptionsError::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> OptionsErrorKind {
        match self {
            OptionsError::InvalidArgument { .. } => OptionsErrorKind::InvalidArgument,
            OptionsError::InvalidConfigurationFormat { .. } => {
                OptionsErrorKind::InvalidConfigurationFormat
            }
            OptionsError::InvalidConfigurationValue { .. } => {
                OptionsErrorKind::InvalidConfigurationValue
            }
        }
    }
}

/// Connection trait - an open, caller-owned connection handed to the options
/// instead of a connection string
pub trait Connection: Send + Sync {
    /// Get the connection ID
    fn connection_id(&self) -> &str;

    /// Allow downcasting for driver-specific operations
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Lifecycle of a provider options extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsState {
    Unconfigured,
    Configured,
    ServicesApplied,
}

/// Options extension trait - every provider's options must implement this
///
/// Implementations embed a [`RelationalOptions`] and call its shared
/// resolution from their own `configure`, then resolve their provider keys.
pub trait OptionsExtension {
    // --- Metadata ---
    /// Get the provider these options belong to
    fn provider(&self) -> ProviderKind;

    /// Get the display name for this provider
    fn provider_name(&self) -> &'static str {
        self.provider().display_name()
    }

    /// Shared relational settings
    fn relational(&self) -> &RelationalOptions;

    /// Mutable access to the shared relational settings
    fn relational_mut(&mut self) -> &mut RelationalOptions;

    /// Current lifecycle state
    fn state(&self) -> OptionsState;

    // --- Resolution ---
    /// Fill every unset field from raw configuration.
    ///
    /// Fields already holding a value are left alone. Nothing is stored when
    /// an error is returned.
    fn configure(&mut self, raw: &RawConfiguration) -> Result<(), OptionsError>;

    // --- Services ---
    /// Register the provider's services into the sink. Call once, after
    /// `configure`.
    fn apply_services(&mut self, services: &mut dyn ServiceSink);
}
