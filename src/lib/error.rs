use std::path::PathBuf;

use thiserror::Error;

/// Main error type for kcost
#[derive(Error, Debug)]
pub enum KcostError {
    /// Kubernetes API errors
    #[error("{0}")]
    Kubernetes(#[from] KubernetesError),

    /// Pricing rate errors
    #[error("{0}")]
    Rates(#[from] RatesError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors while writing a report
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding errors
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Kubernetes-specific errors
#[derive(Error, Debug)]
pub enum KubernetesError {
    /// Neither in-cluster nor kubeconfig credentials were usable
    #[error("failed to create kubernetes client: {0}")]
    ConnectionFailed(String),

    /// A list call was rejected by the API server
    #[error("failed to list {resource}: {message}")]
    ListFailed { resource: String, message: String },
}

/// Rate file errors
#[derive(Error, Debug)]
pub enum RatesError {
    /// Rate file could not be read
    #[error("failed to read rates file {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rate file content or embedded date is malformed
    #[error("failed to parse rates file {}: {message}", .path.display())]
    ParseFailed { path: PathBuf, message: String },

    /// A rate is outside the allowed range
    #[error("invalid rate: {0}")]
    InvalidValue(String),

    /// No "Last updated" marker in the rate file
    #[error("no 'Last updated' date found in {}", .0.display())]
    NotFound(PathBuf),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value or flag combination
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Helper type alias for Results
pub type Result<T> = std::result::Result<T, KcostError>;
