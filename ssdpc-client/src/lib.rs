//! # ssdpc-client
//!
//! Client library for the minissdpd service-discovery daemon.
//!
//! This crate provides:
//! - A Unix-socket client owning one persistent connection
//! - The four protocol exchanges: register, query by type, query by USN,
//!   query all
//!
//! The protocol is strictly request-then-response on a single stream, so
//! operations take `&mut self`; callers that need concurrency use one
//! client per caller. The client applies no timeouts of its own - callers
//! needing deadlines wrap each call externally.

pub mod client;
pub mod error;

pub use client::{Client, DEFAULT_SOCKET_PATH};
pub use error::ClientError;
