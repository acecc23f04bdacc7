//! Connection Module
//!
//! The transport abstraction and the command dispatchers that drive the
//! codec over it. One connection carries at most one in-flight
//! command/reply pair; callers needing concurrency must hand out
//! exclusive connections (e.g. from an external pool).

mod transport;
mod client;

pub use transport::{TcpTransport, Transport};
pub use client::Connection;
