//! Configuration error types

use std::path::PathBuf;

/// Errors raised while building a [`Config`](crate::Config) or deriving
/// request URLs from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured certificate file does not exist.
    #[error("PEM file not found: {}", .0.display())]
    PemFileMissing(PathBuf),

    /// The host and port do not form a valid URL.
    #[error("Invalid host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    /// A request URL was requested but no database is configured.
    #[error("No database configured")]
    MissingDatabase,

    /// A query was started from the config but no default layout is set.
    #[error("No default layout configured")]
    MissingLayout,
}
