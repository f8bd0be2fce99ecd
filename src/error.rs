//! Error types for the studio core

use thiserror::Error;

/// Result type alias for studio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the studio core
#[derive(Error, Debug)]
pub enum Error {
    /// The camera (or other capture hardware) could not be acquired
    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// A capture attempt failed after the stream was opened
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Delivery of a submission did not complete
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    /// The design studio backend rejected or could not serve a request
    #[error("Design studio error: {0}")]
    Designer(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Malformed content, artifact, or payload data
    #[error("Invalid data: {0}")]
    DataError(String),

    /// The session worker is no longer running
    #[error("Session closed: {0}")]
    SessionClosed(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
