// SQLite Options Extension
// SQLite uses only the relational settings; it adds its own service wiring

use crate::db::raw::RawConfiguration;
use crate::db::registry::{ServiceDescriptor, ServiceSink};
use crate::db::relational::RelationalOptions;
use crate::db::traits::{OptionsError, OptionsExtension, OptionsState, ProviderKind};
use tracing::warn;

/// Advertises the SQLite store to the host
pub struct SqliteDataStoreSource;
/// SQLite data store
pub struct SqliteDataStore;
/// Connection bound to the resolved connection settings
pub struct SqliteConnection;

/// SQLite options
#[derive(Debug, Clone)]
pub struct SqliteOptionsExtension {
    relational: RelationalOptions,
    state: OptionsState,
}

impl SqliteOptionsExtension {
    pub fn new() -> Self {
        Self {
            relational: RelationalOptions::new(),
            state: OptionsState::Unconfigured,
        }
    }
}

impl Default for SqliteOptionsExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsExtension for SqliteOptionsExtension {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Sqlite
    }

    fn relational(&self) -> &RelationalOptions {
        &self.relational
    }

    fn relational_mut(&mut self) -> &mut RelationalOptions {
        &mut self.relational
    }

    fn state(&self) -> OptionsState {
        self.state
    }

    fn configure(&mut self, raw: &RawConfiguration) -> Result<(), OptionsError> {
        self.relational.configure(raw)?;
        if self.state == OptionsState::Unconfigured {
            self.state = OptionsState::Configured;
        }
        Ok(())
    }

    fn apply_services(&mut self, services: &mut dyn ServiceSink) {
        if self.state == OptionsState::ServicesApplied {
            warn!(provider = self.provider_name(), "Services already applied, skipping");
            return;
        }

        services.register(ServiceDescriptor::singleton::<SqliteDataStoreSource, SqliteDataStoreSource>());
        services.register(ServiceDescriptor::scoped::<SqliteDataStore, SqliteDataStore>());
        services.register(ServiceDescriptor::scoped::<SqliteConnection, SqliteConnection>());

        self.state = OptionsState::ServicesApplied;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::registry::ServiceCollection;

    #[test]
    fn test_driver_type() {
        let options = SqliteOptionsExtension::new();
        assert_eq!(options.provider(), ProviderKind::Sqlite);
        assert_eq!(options.state(), OptionsState::Unconfigured);
    }

    #[test]
    fn test_configure_resolves_base_settings() {
        let raw: RawConfiguration = [("ConnectionString", "Data Source=app.db"), ("CommandTimeout", "0")]
            .into_iter()
            .collect();
        let mut options = SqliteOptionsExtension::new();

        options.configure(&raw).unwrap();

        assert_eq!(options.relational().connection_string(), Some("Data Source=app.db"));
        assert_eq!(options.relational().command_timeout(), Some(0));
    }

    #[test]
    fn test_ignores_other_provider_keys() {
        let raw: RawConfiguration = [("SqlServer:MaxBatchSize", "one")].into_iter().collect();
        let mut options = SqliteOptionsExtension::new();

        assert!(options.configure(&raw).is_ok());
    }

    #[test]
    fn test_apply_services() {
        let mut services = ServiceCollection::new();
        let mut options = SqliteOptionsExtension::new();

        options.apply_services(&mut services);

        assert!(services.contains_service::<SqliteDataStore>());
        assert_eq!(services.len(), 3);
        assert_eq!(options.state(), OptionsState::ServicesApplied);
    }
}
