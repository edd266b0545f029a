// MS-SQL Options Extension
// SQL Server settings on top of the relational options, plus its service wiring

use crate::db::raw::{configuration_key, RawConfiguration};
use crate::db::registry::{ServiceDescriptor, ServiceSink};
use crate::db::relational::RelationalOptions;
use crate::db::strings;
use crate::db::traits::{OptionsError, OptionsExtension, OptionsState, ProviderKind};
use tracing::{debug, warn};

pub const MAX_BATCH_SIZE_KEY: &str = "MaxBatchSize";

// Services the host container resolves for a SQL Server context. The types
// only identify registrations here; their behavior lives with the host.

/// Advertises the SQL Server store to the host
pub struct SqlServerDataStoreSource;
/// Renders SQL Server statements
pub struct SqlServerSqlGenerator;
/// SQL Server data store
pub struct SqlServerDataStore;
/// Connection bound to the resolved connection settings
pub struct SqlServerConnection;
/// Executes modification command batches
pub struct SqlServerBatchExecutor;
/// Splits modifications into batches of at most `MaxBatchSize` commands
pub struct SqlServerModificationCommandBatchFactory;
/// Creates and drops SQL Server databases
pub struct SqlServerDataStoreCreator;

/// SQL Server options
#[derive(Debug, Clone)]
pub struct SqlServerOptionsExtension {
    relational: RelationalOptions,
    max_batch_size: Option<i32>,
    state: OptionsState,
}

impl SqlServerOptionsExtension {
    pub fn new() -> Self {
        Self {
            relational: RelationalOptions::new(),
            max_batch_size: None,
            state: OptionsState::Unconfigured,
        }
    }

    /// Raw configuration key for the batch size, e.g. `SqlServer:MaxBatchSize`
    pub fn max_batch_size_key() -> String {
        configuration_key(&[ProviderKind::SqlServer.config_prefix(), MAX_BATCH_SIZE_KEY])
    }

    pub fn max_batch_size(&self) -> Option<i32> {
        self.max_batch_size
    }

    /// Must be positive; `None` clears the value.
    pub fn set_max_batch_size(&mut self, value: Option<i32>) -> Result<(), OptionsError> {
        if let Some(size) = value {
            validate_max_batch_size(size)
                .map_err(|message| OptionsError::invalid_argument("max_batch_size", message))?;
        }
        self.max_batch_size = value;
        Ok(())
    }

    fn resolve_max_batch_size(&self, raw: &RawConfiguration) -> Result<Option<i32>, OptionsError> {
        if self.max_batch_size.is_some() {
            return Ok(None);
        }

        let key = Self::max_batch_size_key();
        let Some(size) = raw.get_i32(&key)? else {
            return Ok(None);
        };

        validate_max_batch_size(size).map_err(|message| OptionsError::InvalidConfigurationValue {
            value: raw.get(&key).unwrap_or_default().to_string(),
            key,
            message: message.to_string(),
        })?;

        Ok(Some(size))
    }
}

impl Default for SqlServerOptionsExtension {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsExtension for SqlServerOptionsExtension {
    fn provider(&self) -> ProviderKind {
        ProviderKind::SqlServer
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
        // Resolve everything before storing anything
        let relational = self.relational.resolve(raw)?;
        let max_batch_size = self.resolve_max_batch_size(raw)?;

        self.relational.commit(relational);
        if let Some(size) = max_batch_size {
            debug!(key = %Self::max_batch_size_key(), size, "Resolved from raw configuration");
            self.max_batch_size = Some(size);
        }

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

        services.register(ServiceDescriptor::singleton::<SqlServerDataStoreSource, SqlServerDataStoreSource>());
        services.register(ServiceDescriptor::singleton::<SqlServerSqlGenerator, SqlServerSqlGenerator>());
        services.register(ServiceDescriptor::scoped::<SqlServerDataStore, SqlServerDataStore>());
        services.register(ServiceDescriptor::scoped::<SqlServerConnection, SqlServerConnection>());
        services.register(ServiceDescriptor::scoped::<SqlServerBatchExecutor, SqlServerBatchExecutor>());
        services.register(ServiceDescriptor::scoped::<
            SqlServerModificationCommandBatchFactory,
            SqlServerModificationCommandBatchFactory,
        >());
        services.register(ServiceDescriptor::scoped::<SqlServerDataStoreCreator, SqlServerDataStoreCreator>());

        self.state = OptionsState::ServicesApplied;
    }
}

fn validate_max_batch_size(size: i32) -> Result<(), &'static str> {
    if size <= 0 {
        return Err(strings::MAX_BATCH_SIZE_MUST_BE_POSITIVE);
    }
    Ok(())
}
