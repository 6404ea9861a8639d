//! Client error types.

use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ssdpc_protocol::ProtocolError),

    #[error("not connected")]
    NotConnected,

    #[error("connection already open")]
    AlreadyOpen,
}
