// Relational Options
// Generic settings shared by every relational provider and their raw-configuration fallback

use crate::db::raw::RawConfiguration;
use crate::db::strings;
use crate::db::traits::{Connection, OptionsError};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const CONNECTION_STRING_KEY: &str = "ConnectionString";
pub const COMMAND_TIMEOUT_KEY: &str = "CommandTimeout";

/// Settings common to all relational providers.
///
/// Each field is `None` until set explicitly or resolved from raw
/// configuration. A stored `Some(0)` command timeout is a real value and is
/// never replaced by raw configuration.
#[derive(Clone, Default)]
pub struct RelationalOptions {
    connection: Option<Arc<dyn Connection>>,
    connection_string: Option<String>,
    command_timeout: Option<i32>,
}

/// Values read from raw configuration that have not been stored yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationalResolution {
    pub connection_string: Option<String>,
    pub command_timeout: Option<i32>,
}

impl RelationalResolution {
    pub fn is_empty(&self) -> bool {
        self.connection_string.is_none() && self.command_timeout.is_none()
    }
}

impl RelationalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection(&self) -> Option<&Arc<dyn Connection>> {
        self.connection.as_ref()
    }

    /// Use an already open connection. `None` is rejected.
    pub fn set_connection(
        &mut self,
        connection: Option<Arc<dyn Connection>>,
    ) -> Result<(), OptionsError> {
        let connection = connection
            .ok_or_else(|| OptionsError::invalid_argument("connection", strings::CONNECTION_REQUIRED))?;
        self.connection = Some(connection);
        Ok(())
    }

    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string.as_deref()
    }

    /// `None` is rejected; any text, including an empty string, is stored as is.
    pub fn set_connection_string(&mut self, value: Option<&str>) -> Result<(), OptionsError> {
        let value = value.ok_or_else(|| {
            OptionsError::invalid_argument("connection_string", strings::CONNECTION_STRING_REQUIRED)
        })?;
        self.connection_string = Some(value.to_string());
        Ok(())
    }

    pub fn command_timeout(&self) -> Option<i32> {
        self.command_timeout
    }

    /// Timeout in seconds. Negative values are rejected, `None` clears it.
    pub fn set_command_timeout(&mut self, value: Option<i32>) -> Result<(), OptionsError> {
        if let Some(seconds) = value {
            validate_command_timeout(seconds)
                .map_err(|message| OptionsError::invalid_argument("command_timeout", message))?;
        }
        self.command_timeout = value;
        Ok(())
    }

    /// Resolve unset fields from raw configuration without storing anything.
    pub fn resolve(&self, raw: &RawConfiguration) -> Result<RelationalResolution, OptionsError> {
        resolve_relational_settings(self, raw)
    }

    /// Store a resolution. Fields set since it was computed keep their value.
    pub fn commit(&mut self, resolution: RelationalResolution) {
        if self.connection_string.is_none() {
            if let Some(connection_string) = resolution.connection_string {
                debug!(key = CONNECTION_STRING_KEY, "Resolved from raw configuration");
                self.connection_string = Some(connection_string);
            }
        }
        if self.command_timeout.is_none() {
            if let Some(seconds) = resolution.command_timeout {
                debug!(key = COMMAND_TIMEOUT_KEY, seconds, "Resolved from raw configuration");
                self.command_timeout = Some(seconds);
            }
        }
    }

    /// Resolve and store in one step. On error nothing is stored.
    pub fn configure(&mut self, raw: &RawConfiguration) -> Result<(), OptionsError> {
        let resolution = self.resolve(raw)?;
        self.commit(resolution);
        Ok(())
    }
}

impl fmt::Debug for RelationalOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationalOptions")
            .field("connection", &self.connection.as_ref().map(|c| c.connection_id()))
            .field("connection_string", &self.connection_string)
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}

/// Shared resolution step every provider runs before its own keys.
///
/// Only fields still unset on `options` are looked up. A parsed command
/// timeout is taken as is; only a malformed one is an error.
pub fn resolve_relational_settings(
    options: &RelationalOptions,
    raw: &RawConfiguration,
) -> Result<RelationalResolution, OptionsError> {
    let mut resolution = RelationalResolution::default();

    if options.connection_string.is_none() {
        resolution.connection_string = raw.get(CONNECTION_STRING_KEY).map(str::to_string);
    }

    if options.command_timeout.is_none() {
        resolution.command_timeout = raw.get_i32(COMMAND_TIMEOUT_KEY)?;
    }

    Ok(resolution)
}

fn validate_command_timeout(seconds: i32) -> Result<(), &'static str> {
    if seconds < 0 {
        return Err(strings::INVALID_COMMAND_TIMEOUT);
    }
    Ok(())
}
