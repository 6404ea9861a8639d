//! Service records and their wire representation.
//!
//! Registration encodes four fields (Type, USN, Server, Location); query
//! responses carry only three (Location, Type, USN) and never include
//! Server. The asymmetry is part of the daemon's wire format and is
//! preserved here.

use crate::error::ProtocolError;
use crate::length::{decode_length, encode_length};
use bytes::BytesMut;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};

/// A service advertised by (or registered with) the discovery daemon.
///
/// Services are value objects: equality is field equality, and a record is
/// never mutated once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Service {
    /// Service or device type URN.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Unique Service Name.
    pub usn: String,
    /// Implementation/version banner. Empty in decoded query responses.
    pub server: String,
    /// URL where the service's description can be fetched.
    pub location: String,
}

impl Service {
    /// Encodes the record for a registration request: Type, USN, Server,
    /// Location, each length-prefixed. Returns the total bytes appended.
    pub fn encode_to(&self, buf: &mut BytesMut) -> Result<usize, ProtocolError> {
        let mut written = 0;
        for field in [&self.service_type, &self.usn, &self.server, &self.location] {
            written += encode_string(field, buf)?;
        }
        Ok(written)
    }
}

/// Appends a length-prefixed string to `buf`, returning the total bytes
/// appended (prefix plus payload).
pub fn encode_string(s: &str, buf: &mut BytesMut) -> Result<usize, ProtocolError> {
    let prefix = encode_length(s.len() as i64, buf)?;
    buf.extend_from_slice(s.as_bytes());
    Ok(prefix + s.len())
}

/// Reads one length-prefixed string from `r`.
pub async fn decode_string<R: AsyncRead + Unpin>(r: &mut R) -> Result<String, ProtocolError> {
    let len = decode_length(r).await? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf).await?;
    String::from_utf8(buf).map_err(|_| ProtocolError::InvalidUtf8)
}

/// Decodes a query response: one leading count byte, then per record three
/// length-prefixed fields in the order Location, Type, USN.
///
/// Any mid-stream failure aborts the whole call; no partial list is
/// returned.
pub async fn decode_services<R: AsyncRead + Unpin>(
    r: &mut R,
) -> Result<Vec<Service>, ProtocolError> {
    let count = r.read_u8().await?;
    let mut services = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let location = decode_string(r).await?;
        let service_type = decode_string(r).await?;
        let usn = decode_string(r).await?;
        services.push(Service {
            service_type,
            usn,
            server: String::new(),
            location,
        });
    }

    Ok(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;

    /// The literal three-record stream a daemon returns for a query that
    /// matches three services.
    fn three_service_stream() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(3);
        for i in 1..=3u8 {
            for field in [
                format!("http://127.0.0.1:800{}", i),
                format!("urn:Type{}:device:controllee:1", i),
                format!("uuid:0000-0000-0000-000{}", i),
            ] {
                buf.push(field.len() as u8);
                buf.extend_from_slice(field.as_bytes());
            }
        }
        buf
    }

    #[test]
    fn test_register_record_layout() {
        let svc = Service {
            service_type: "dummytype".into(),
            usn: "1".repeat(128),
            server: "dummy 1.0".into(),
            location: "http://127.0.0.1/setup.xml".into(),
        };

        let mut buf = BytesMut::new();
        let written = svc.encode_to(&mut buf).unwrap();
        assert_eq!(written, buf.len());

        let mut expected = BytesMut::new();
        expected.put_u8(9);
        expected.extend_from_slice(b"dummytype");
        // A 128-byte USN needs the two-byte length form.
        expected.extend_from_slice(&[0x81, 0x00]);
        expected.extend_from_slice("1".repeat(128).as_bytes());
        expected.put_u8(9);
        expected.extend_from_slice(b"dummy 1.0");
        expected.put_u8(26);
        expected.extend_from_slice(b"http://127.0.0.1/setup.xml");

        assert_eq!(buf, expected);
    }

    #[test]
    fn test_encode_string_counts_prefix() {
        let mut buf = BytesMut::new();
        let n = encode_string("minissdp", &mut buf).unwrap();
        assert_eq!(n, "minissdp".len() + 1);
        assert_eq!(&buf[..], b"\x08minissdp");
    }

    #[tokio::test]
    async fn test_decode_three_services() {
        let stream = three_service_stream();
        let mut input: &[u8] = &stream;

        let services = decode_services(&mut input).await.unwrap();
        assert_eq!(services.len(), 3);
        assert!(input.is_empty());

        for (i, svc) in services.iter().enumerate() {
            let i = i + 1;
            assert_eq!(svc.location, format!("http://127.0.0.1:800{}", i));
            assert_eq!(svc.service_type, format!("urn:Type{}:device:controllee:1", i));
            assert_eq!(svc.usn, format!("uuid:0000-0000-0000-000{}", i));
            assert_eq!(svc.server, "", "Server is never present in responses");
        }
    }

    #[tokio::test]
    async fn test_decode_zero_services() {
        let mut input: &[u8] = &[0x00];
        let services = decode_services(&mut input).await.unwrap();
        assert!(services.is_empty());
    }

    #[tokio::test]
    async fn test_decode_truncated_record() {
        let mut stream = three_service_stream();
        stream.truncate(stream.len() - 10);
        let mut input: &[u8] = &stream;

        let err = decode_services(&mut input).await.unwrap_err();
        assert!(matches!(err, ProtocolError::Io(_)));
    }

    #[tokio::test]
    async fn test_decode_rejects_invalid_utf8() {
        let mut input: &[u8] = &[0x01, 0x02, 0xff, 0xfe];
        let err = decode_services(&mut input).await.unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidUtf8));
    }

    #[tokio::test]
    async fn test_decoded_record_roundtrips_through_string_codec() {
        let mut buf = BytesMut::new();
        encode_string("urn:Dummy:device:controllee:1", &mut buf).unwrap();

        let mut input: &[u8] = &buf;
        let s = decode_string(&mut input).await.unwrap();
        assert_eq!(s, "urn:Dummy:device:controllee:1");
    }
}
