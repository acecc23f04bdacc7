//! Configuration for rediswire connections
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

/// Configuration for a single connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Connect Configuration
    // -------------------------------------------------------------------------
    /// TCP connect timeout
    pub connect_timeout: Duration,

    // -------------------------------------------------------------------------
    // I/O Configuration
    // -------------------------------------------------------------------------
    /// Read timeout applied to ordinary (non-blocking) commands.
    /// `None` means wait forever.
    pub read_timeout: Option<Duration>,

    /// Write timeout. `None` means wait forever.
    pub write_timeout: Option<Duration>,

    // -------------------------------------------------------------------------
    // Blocking Command Configuration
    // -------------------------------------------------------------------------
    /// Safety margin added to a blocking command's own timeout when
    /// widening the socket read timeout around the call. Covers network
    /// and server scheduling jitter so a server that replies exactly at
    /// its deadline is not misread as a socket timeout.
    pub blocking_margin: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Some(Duration::from_secs(5)),
            write_timeout: Some(Duration::from_secs(5)),
            blocking_margin: Duration::from_millis(500),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the read timeout for ordinary commands (`None` = wait forever)
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Set the write timeout (`None` = wait forever)
    pub fn write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    /// Set the safety margin added to blocking command timeouts
    pub fn blocking_margin(mut self, margin: Duration) -> Self {
        self.config.blocking_margin = margin;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
