//! Connection management and the four protocol exchanges.

use crate::error::ClientError;
use bytes::{BufMut, BytesMut};
use ssdpc_protocol::{decode_services, encode_string, RequestKind, Service, MAX_LENGTH_BYTES};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;

/// Socket path minissdpd listens on by default.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/minissdpd.sock";

/// A client for the discovery daemon's Unix socket.
///
/// Owns at most one connection at a time. Every operation is a single
/// request-then-response exchange; the client never pipelines and never
/// retries. A failed operation may have left bytes on the wire, so callers
/// should treat the connection as suspect and reconnect.
pub struct Client {
    socket_path: PathBuf,
    conn: Option<UnixStream>,
}

impl Client {
    /// Creates a client for the given socket path, not yet connected.
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            conn: None,
        }
    }

    /// Returns the socket path this client dials.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Returns whether a connection is open.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Dials the daemon's socket.
    ///
    /// Fails with [`ClientError::AlreadyOpen`] if a connection is already
    /// established; the existing connection is kept. After a successful
    /// `close` the same client can connect again.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        if self.conn.is_some() {
            return Err(ClientError::AlreadyOpen);
        }

        tracing::debug!("connecting to {}", self.socket_path.display());
        let stream = UnixStream::connect(&self.socket_path).await?;
        self.conn = Some(stream);
        Ok(())
    }

    /// Closes the connection. A no-op on a closed client.
    pub async fn close(&mut self) -> Result<(), ClientError> {
        if let Some(mut conn) = self.conn.take() {
            tracing::debug!("closing connection");
            conn.shutdown().await.ok();
        }
        Ok(())
    }

    fn conn_mut(&mut self) -> Result<&mut UnixStream, ClientError> {
        self.conn.as_mut().ok_or(ClientError::NotConnected)
    }

    /// Writes raw bytes to the connection.
    pub async fn write(&mut self, buf: &[u8]) -> Result<usize, ClientError> {
        let conn = self.conn_mut()?;
        conn.write_all(buf).await?;
        Ok(buf.len())
    }

    /// Writes a length-prefixed string, returning the total bytes written
    /// (prefix plus payload).
    pub async fn write_string(&mut self, s: &str) -> Result<usize, ClientError> {
        let mut buf = BytesMut::with_capacity(s.len() + MAX_LENGTH_BYTES);
        encode_string(s, &mut buf)?;
        self.write(&buf).await
    }

    /// Registers a service with the daemon.
    ///
    /// Fire-and-forget: the daemon sends no response to a registration.
    pub async fn register_service(&mut self, service: &Service) -> Result<(), ClientError> {
        let mut buf = BytesMut::new();
        buf.put_u8(RequestKind::Register.byte());
        service.encode_to(&mut buf)?;

        tracing::debug!("registering service {}", service.usn);
        self.write(&buf).await?;
        Ok(())
    }

    /// Queries services whose type matches `filter`.
    pub async fn get_services_by_type(
        &mut self,
        filter: &str,
    ) -> Result<Vec<Service>, ClientError> {
        self.query(RequestKind::ByType, filter).await
    }

    /// Queries services whose USN matches `filter`.
    pub async fn get_services_by_usn(
        &mut self,
        filter: &str,
    ) -> Result<Vec<Service>, ClientError> {
        self.query(RequestKind::ByUsn, filter).await
    }

    /// Queries all services the daemon knows about.
    pub async fn get_services_all(&mut self) -> Result<Vec<Service>, ClientError> {
        // The kind byte is followed by the daemon's empty dual-filter
        // marker: two literal bytes, not a length-prefixed string.
        self.write(&[RequestKind::All.byte(), 0x01, 0x00]).await?;

        let conn = self.conn_mut()?;
        let services = decode_services(conn).await?;
        tracing::debug!("daemon listed {} services", services.len());
        Ok(services)
    }

    async fn query(
        &mut self,
        kind: RequestKind,
        filter: &str,
    ) -> Result<Vec<Service>, ClientError> {
        let mut buf = BytesMut::with_capacity(1 + filter.len() + MAX_LENGTH_BYTES);
        buf.put_u8(kind.byte());
        encode_string(filter, &mut buf)?;

        tracing::debug!("querying {:?} with filter {:?}", kind, filter);
        self.write(&buf).await?;

        let conn = self.conn_mut()?;
        let services = decode_services(conn).await?;
        tracing::debug!("query matched {} services", services.len());
        Ok(services)
    }
}

impl Default for Client {
    /// A client for [`DEFAULT_SOCKET_PATH`], not yet connected.
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}
