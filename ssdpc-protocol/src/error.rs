//! Protocol error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding wire data.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid length: {0}")]
    InvalidLength(i64),

    #[error("length prefix exceeds {} bytes", crate::MAX_LENGTH_BYTES)]
    LengthTooLong,

    #[error("invalid UTF-8 in field")]
    InvalidUtf8,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
