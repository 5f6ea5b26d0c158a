//! Configuration for the TeleGods client
//!
//! Centralized configuration with the defaults the services expect.

use std::time::Duration;

/// Main configuration for a protocol client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Timeouts
    // -------------------------------------------------------------------------
    /// TCP connect timeout (zero waits for the OS)
    pub connect_timeout: Duration,

    /// Socket read timeout (applies to every response line; zero blocks)
    pub read_timeout: Duration,

    /// Socket write timeout
    pub write_timeout: Duration,

    // -------------------------------------------------------------------------
    // Framing
    // -------------------------------------------------------------------------
    /// Max length of a single response line, terminator included (in bytes)
    pub max_line_len: usize,

    // -------------------------------------------------------------------------
    // Endpoint Defaults
    // -------------------------------------------------------------------------
    /// Host used by front-ends when the operator leaves the field empty
    pub default_host: String,

    /// Port used by front-ends when the operator leaves the field empty
    pub default_port: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(3),
            write_timeout: Duration::from_secs(3),
            max_line_len: 1024 * 1024, // 1 MB
            default_host: "127.0.0.1".to_string(),
            default_port: "8888".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve an operator-supplied host, falling back to the default when empty
    pub fn host_or_default<'a>(&'a self, host: &'a str) -> &'a str {
        if host.is_empty() {
            &self.default_host
        } else {
            host
        }
    }

    /// Resolve an operator-supplied port, falling back to the default when empty
    pub fn port_or_default<'a>(&'a self, port: &'a str) -> &'a str {
        if port.is_empty() {
            &self.default_port
        } else {
            port
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the connect, read and write timeouts at once
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self.config.read_timeout = timeout;
        self.config.write_timeout = timeout;
        self
    }

    /// Set the TCP connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the read timeout
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Set the write timeout
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    /// Set the maximum response line length (in bytes)
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    /// Set the fallback host
    pub fn default_host(mut self, host: impl Into<String>) -> Self {
        self.config.default_host = host.into();
        self
    }

    /// Set the fallback port
    pub fn default_port(mut self, port: impl Into<String>) -> Self {
        self.config.default_port = port.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
