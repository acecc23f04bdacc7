//! Error types for rediswire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for rediswire operations
#[derive(Debug, Error)]
pub enum WireError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The server closed the connection cleanly before any reply byte arrived.
    /// Distinct from an EOF in the middle of a frame, which is `Protocol`.
    #[error("Connection closed by server")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Server Errors
    // -------------------------------------------------------------------------
    /// A well-formed error reply from the server (e.g. WRONGTYPE).
    #[error("Server error: {0}")]
    Server(String),
}

impl WireError {
    /// Whether this error is a read timeout on the underlying socket.
    ///
    /// Unix reports `WouldBlock` for a timed-out socket read, Windows
    /// reports `TimedOut`.
    pub fn is_timeout(&self) -> bool {
        match self {
            WireError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}
