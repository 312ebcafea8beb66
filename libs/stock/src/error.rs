use reqwest::StatusCode;
use thiserror::Error;

/// Failure while retrieving a quote or a prediction from the remote API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status} for {target}")]
    Status { target: String, status: StatusCode },

    #[error("invalid response payload: {0}")]
    Payload(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please log in first.")]
    MissingToken,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised by a [`Storage`](crate::Storage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("failed to encode stored value: {0}")]
    Encode(#[source] serde_json::Error),

    /// Persisted content could not be read back. The watchlist store recovers
    /// from this locally by starting empty.
    #[error("failed to decode stored value: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid watchlist entry: {0}")]
    InvalidEntry(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("no quote preview to add")]
    NoPreview,

    #[error(transparent)]
    Store(#[from] StoreError),
}
