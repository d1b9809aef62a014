// Error types for the data provider.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors a caller of the provider has to handle
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The caller's cancellation token fired before the call finished
    #[error("operation cancelled")]
    Cancelled,

    /// There was no record to pick from
    #[error("no monkeys available")]
    EmptyDataset,
}

/// Reasons a remote fetch was abandoned. Never surfaced past the
/// provider; they only trigger the seed fallback and get logged.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection, timeout or transport failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// Body was not a JSON array of records
    #[error("invalid payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Body was a valid but empty array
    #[error("remote returned no monkeys")]
    EmptyPayload,
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
