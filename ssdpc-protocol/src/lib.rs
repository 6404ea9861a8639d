//! # ssdpc-protocol
//!
//! Wire protocol for minissdpd's Unix socket interface.
//!
//! This crate provides:
//! - The 7-bit varint length-prefix codec
//! - Length-prefixed string helpers
//! - Service record encoding (registration) and decoding (query responses)
//! - Request-kind constants

pub mod error;
pub mod length;
pub mod service;

pub use error::ProtocolError;
pub use length::{decode_length, encode_length, MAX_LENGTH, MAX_LENGTH_BYTES};
pub use service::{decode_services, decode_string, encode_string, Service};

/// First byte of every request, telling the daemon which exchange follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestKind {
    /// Query services matching a type filter.
    ByType = 1,
    /// Query services matching a USN filter.
    ByUsn = 2,
    /// Query all known services.
    All = 3,
    /// Register a new service. The daemon sends no response.
    Register = 4,
}

impl RequestKind {
    /// Wire value of the request kind.
    pub fn byte(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_wire_values() {
        assert_eq!(RequestKind::ByType.byte(), 1);
        assert_eq!(RequestKind::ByUsn.byte(), 2);
        assert_eq!(RequestKind::All.byte(), 3);
        assert_eq!(RequestKind::Register.byte(), 4);
    }
}
