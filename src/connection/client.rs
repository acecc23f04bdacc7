//! Command dispatch
//!
//! Drives the codec over a transport: one encoded request out, one decoded
//! reply back. A top-level error reply becomes a typed failure; transport
//! failures propagate unchanged. No retries, no reconnection.

use std::io::Write;
use std::net::ToSocketAddrs;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Result, WireError};
use crate::protocol::{encode_command, read_reply, write_command, Command, Reply};
use super::{TcpTransport, Transport};

/// A single-connection command dispatcher
///
/// At most one command/reply pair is in flight at a time. The connection
/// is not safe for concurrent use from multiple logical callers without
/// external mutual exclusion.
pub struct Connection<T: Transport> {
    transport: T,

    /// Safety margin added to blocking command timeouts
    blocking_margin: Duration,
}

impl Connection<TcpTransport> {
    /// Connect to a server over TCP
    pub fn connect(addr: impl ToSocketAddrs, config: &Config) -> Result<Self> {
        let transport = TcpTransport::connect(addr, config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> Connection<T> {
    /// Wrap an already-established transport
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            blocking_margin: config.blocking_margin,
        }
    }

    /// Send a command and read back one reply
    ///
    /// A decoded top-level `Reply::Error` is converted into
    /// `WireError::Server`; every other reply shape is returned as-is.
    /// Accepts any command name and arguments, including ones this crate
    /// has no variant for (`CommandName::Other`) — validation is the
    /// server's job.
    pub fn send(&mut self, command: &Command) -> Result<Reply> {
        tracing::trace!("Sending command: {}", command.name());
        self.dispatch(command)
    }

    /// Send a command whose execution may block server-side
    ///
    /// `timeout_secs` is the command's own timeout argument: 0 means the
    /// server may wait indefinitely, so the socket read timeout is lifted
    /// entirely; otherwise the socket timeout is widened to the command
    /// timeout plus the configured margin. The prior read timeout is
    /// restored on every exit path — success, server error, protocol
    /// error, or transport failure — so a later ordinary call on this
    /// connection is never left with the widened deadline.
    ///
    /// A timed-out socket read surfaces as an I/O failure
    /// (`WireError::is_timeout`), never as a nil reply; a nil reply means
    /// the server answered "no data" within the wait.
    pub fn send_blocking(&mut self, command: &Command, timeout_secs: u64) -> Result<Reply> {
        let previous = self.transport.read_timeout();

        let widened = if timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(timeout_secs) + self.blocking_margin)
        };

        tracing::trace!(
            "Sending blocking command: {} (timeout {}s)",
            command.name(),
            timeout_secs
        );
        self.transport.set_read_timeout(widened)?;

        let result = self.dispatch(command);

        // Mandatory restore, regardless of how the dispatch ended. When
        // both the dispatch and the restore fail, the dispatch error wins.
        let restored = self.transport.set_read_timeout(previous);
        let reply = result?;
        restored?;

        Ok(reply)
    }

    /// Send several commands in one flush, then read one reply each
    ///
    /// The codec reused N times: all frames are written back-to-back and
    /// flushed once, then exactly `commands.len()` replies are decoded in
    /// order. Per-command error replies stay in place as `Reply::Error`
    /// values so the caller can match replies to commands; transport and
    /// protocol failures abort the whole batch.
    pub fn pipeline(&mut self, commands: &[Command]) -> Result<Vec<Reply>> {
        for command in commands {
            let frame = encode_command(command);
            self.transport.write_all(&frame)?;
        }
        self.transport.flush()?;

        let mut replies = Vec::with_capacity(commands.len());
        for _ in commands {
            replies.push(read_reply(&mut self.transport)?);
        }
        Ok(replies)
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Write one request and decode one reply, raising top-level errors
    fn dispatch(&mut self, command: &Command) -> Result<Reply> {
        write_command(&mut self.transport, command)?;

        match read_reply(&mut self.transport)? {
            Reply::Error(message) => Err(WireError::Server(message)),
            reply => Ok(reply),
        }
    }
}
