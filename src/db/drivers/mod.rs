// Provider Options Extensions (SQL Server, SQLite)
// Contains the options extension for each supported provider

pub mod mssql;
pub mod sqlite;

// Re-export extensions
pub use mssql::SqlServerOptionsExtension;
pub use sqlite::SqliteOptionsExtension;
