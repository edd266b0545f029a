// Message Resources
// Fixed user-facing texts shared by the options extensions

/// Explicit `CommandTimeout` was negative.
pub const INVALID_COMMAND_TIMEOUT: &str =
    "Invalid command timeout: the CommandTimeout value must be zero or greater.";

/// Explicit or raw `MaxBatchSize` was zero or negative.
pub const MAX_BATCH_SIZE_MUST_BE_POSITIVE: &str =
    "Max batch size must be positive: the MaxBatchSize value must be greater than zero.";

/// Connection handle was set to nothing.
pub const CONNECTION_REQUIRED: &str = "A connection must be provided.";

/// Connection string was set to nothing.
pub const CONNECTION_STRING_REQUIRED: &str = "A connection string must be provided.";
