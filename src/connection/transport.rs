//! Transport abstraction
//!
//! A duplex byte stream with a switchable read timeout. The crate never
//! opens pools or reconnects; one transport is one exclusive connection.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{Result, WireError};

/// A duplex byte stream the dispatcher can drive
///
/// `BufRead + Write` supply the read/write primitives the codec needs;
/// the timeout methods let the blocking dispatcher widen and restore the
/// read deadline around a call.
pub trait Transport: BufRead + Write {
    /// Set the read timeout. `None` means wait forever.
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()>;

    /// The currently configured read timeout
    fn read_timeout(&self) -> Option<Duration>;
}

/// TCP-backed transport with buffered reader and writer
pub struct TcpTransport {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Currently configured read timeout, tracked for restore
    read_timeout: Option<Duration>,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    /// Connect to `addr`, applying the config's timeouts
    ///
    /// Disables Nagle's algorithm and splits the stream into separate
    /// buffered read/write handles.
    pub fn connect(addr: impl ToSocketAddrs, config: &Config) -> Result<Self> {
        let socket_addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| WireError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "address resolved to nothing",
            )))?;

        let stream = TcpStream::connect_timeout(&socket_addr, config.connect_timeout)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;
        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            read_timeout: config.read_timeout,
            peer_addr,
        })
    }

    /// The peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Read for TcpTransport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for TcpTransport {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

impl Write for TcpTransport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl Transport for TcpTransport {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.reader.get_ref().set_read_timeout(timeout)?;
        self.read_timeout = timeout;
        Ok(())
    }

    fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}
