//! Error types for the TeleGods client
//!
//! Conditions that have no numeric code on the wire. Everything the
//! services (or local validation) report as a number is carried in a
//! [`Reply`](crate::catalog::Reply) instead.

use std::io;

use thiserror::Error;

use crate::catalog::ErrorCode;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Not connected to a server")]
    NotConnected,

    #[error("No endpoint to reconnect to")]
    NoEndpoint,

    #[error("Connection closed by peer")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Response line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    // -------------------------------------------------------------------------
    // Payload Errors
    // -------------------------------------------------------------------------
    #[error("Catalogue error: {0}")]
    Catalogue(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether this error is a socket timeout
    ///
    /// Unix reports an elapsed read timeout as `WouldBlock`, Windows as `TimedOut`.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ClientError::Io(e)
                if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
        )
    }

    /// Whether this error means the connection is no longer usable
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Io(_) | ClientError::ConnectionClosed | ClientError::NotConnected
        )
    }

    /// Numeric rendering for callers that only deal in codes
    ///
    /// Timeouts map to 131, other transport failures to 130. Protocol and
    /// payload errors have no code.
    pub fn code(&self) -> Option<ErrorCode> {
        if self.is_timeout() {
            Some(ErrorCode::CONNECT_TIMEOUT)
        } else if self.is_transport() || matches!(self, ClientError::NoEndpoint) {
            Some(ErrorCode::CONNECTION_REFUSED)
        } else {
            None
        }
    }
}
