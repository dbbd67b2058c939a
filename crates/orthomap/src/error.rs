//! Error types for orthomap
//!
//! Failures from the remote BioMart service are passed through as-is; the
//! mapper never retries or downgrades them.

use thiserror::Error;

/// Result type alias for orthomap operations
pub type Result<T> = std::result::Result<T, OrthoError>;

/// Main error type for orthomap
#[derive(Error, Debug)]
pub enum OrthoError {
    /// HTTP transport failed (unreachable host, timeout, non-2xx status)
    #[error("BioMart request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the query (unknown attribute or filter, bad dataset)
    #[error("BioMart query error: {0}")]
    Query(String),

    /// Response body could not be decoded or was truncated
    #[error("Malformed BioMart response: {0}")]
    MalformedResponse(String),

    #[error("Mart '{0}' not found in the BioMart registry")]
    MartNotFound(String),

    #[error("Dataset '{dataset}' not found in mart '{mart}'")]
    DatasetNotFound { mart: String, dataset: String },

    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    #[error("Row has {actual} cells but the table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    /// Mapper or server configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrthoError {
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }

    pub fn dataset_not_found(mart: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self::DatasetNotFound {
            mart: mart.into(),
            dataset: dataset.into(),
        }
    }
}
