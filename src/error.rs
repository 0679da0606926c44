//! Error types for device communication.
//!
//! All failures surfaced by this crate fall into four categories:
//!
//! - **Unreachable**: the device never answered the startup reachability
//!   probe within the configured retry budget. Fatal: nothing works
//!   without a live device, so the embedding process is expected to exit.
//! - **Decode**: the supplied bytes are not a valid image. Nothing has been
//!   sent to the device when this is returned.
//! - **Transport**: an HTTP send failed mid-operation. For animations this
//!   means frames already on the device stay there; the partial stream is
//!   an accepted degraded outcome.
//! - **Timeout**: a single call exceeded its bound. A transport-class
//!   failure; never retried automatically inside this crate.
//!
//! ## Retry classification
//!
//! ```rust
//! use lumatrix::PanelError;
//!
//! let error = PanelError::transport("frame upload rejected");
//! if error.is_retryable() {
//!     println!("caller may retry this operation");
//! }
//! ```

use std::time::Duration;
use thiserror::Error;

/// Result type alias for panel operations.
pub type Result<T, E = PanelError> = std::result::Result<T, E>;

/// Main error type for panel operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PanelError {
    #[error("Device at {address} unreachable after {attempts} probe attempts")]
    Unreachable { address: String, attempts: u32 },

    #[error("Failed to decode image: {details}")]
    Decode {
        details: String,
        #[source]
        source: Option<image::ImageError>,
    },

    #[error("Transport failure: {context}")]
    Transport {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Call timed out after {duration:?}")]
    Timeout { duration: Duration },
}

impl PanelError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// `Unreachable` is terminal by contract: the startup probe loop has
    /// already exhausted its retry budget. `Decode` failures are
    /// deterministic; the same bytes will fail again.
    pub fn is_retryable(&self) -> bool {
        match self {
            PanelError::Unreachable { .. } => false,
            PanelError::Decode { .. } => false,
            PanelError::Transport { .. } => true,
            PanelError::Timeout { .. } => true,
        }
    }

    /// Helper constructor for decode errors without an underlying codec error.
    pub fn decode(details: impl Into<String>) -> Self {
        PanelError::Decode { details: details.into(), source: None }
    }

    /// Helper constructor for transport errors.
    pub fn transport(context: impl Into<String>) -> Self {
        PanelError::Transport { context: context.into(), source: None }
    }

    /// Helper constructor for transport errors with an underlying cause.
    pub fn transport_with_source(
        context: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        PanelError::Transport { context: context.into(), source: Some(source) }
    }
}

impl From<image::ImageError> for PanelError {
    fn from(err: image::ImageError) -> Self {
        PanelError::Decode { details: err.to_string(), source: Some(err) }
    }
}

impl From<reqwest::Error> for PanelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured bound on the error;
            // transport::CALL_TIMEOUT is the only one we set.
            PanelError::Timeout { duration: crate::transport::CALL_TIMEOUT }
        } else {
            PanelError::Transport { context: err.to_string(), source: Some(Box::new(err)) }
        }
    }
}
