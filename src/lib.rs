//! # rediswire
//!
//! A binary-safe client engine for the Redis protocol:
//! - RESP multi-bulk wire codec (encode requests, decode replies)
//! - Command dispatch over a persistent connection
//! - Blocking commands with scoped read-timeout override
//! - Parameter builders for optional command modifiers (NX/XX, EX/PX/...)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Caller                                │
//! │        (typed wrappers, CLI, pipelines — out of scope)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command + binary args
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Connection (dispatch)                       │
//! │        send / send_blocking / pipeline                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ RESP Codec  │          │  Transport  │
//!   │ (encode/    │          │ (TcpStream, │
//!   │  decode)    │          │  timeouts)  │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! One connection carries at most one in-flight request/reply pair;
//! callers wanting concurrency hand out exclusive connections from an
//! external pool.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod connection;
pub mod params;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, WireError};
pub use config::Config;
pub use connection::{Connection, TcpTransport, Transport};
pub use protocol::{Command, CommandName, Reply};
pub use params::{GetExParams, SetParams};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rediswire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
