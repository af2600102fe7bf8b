//! Error types for report I/O and configuration.

/// Errors raised while writing a report or loading its configuration.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The sink could not be created, truncated or appended to.
    #[error("report I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The current working directory could not be resolved.
    #[error("unable to resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// A JSON payload failed to serialize.
    #[error("json payload error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unable to read config {path}: {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
