//! Error types for trust-store operations.

use thiserror::Error;

/// Errors from the durable CRL cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// An I/O error while reading or writing a record.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a single CRL refresh.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The HTTP download failed.
    #[error("CRL download failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The downloaded bytes could not be persisted.
    #[error("CRL persistence failed: {0}")]
    Cache(#[from] CacheError),
}

/// Errors constructing the trust store itself.
#[derive(Debug, Error)]
pub enum TrustStoreError {
    /// The HTTP client could not be built from the configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
