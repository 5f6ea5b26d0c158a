//! Connection Manager
//!
//! Owns the TCP stream to a service.
//!
//! ## State Machine
//! ```text
//!   Disconnected ──connect──▶ Connected
//!        ▲                        │
//!        └──────disconnect────────┘
//! ```
//! Any transport failure (I/O error, timeout, peer close) while Connected
//! also drops back to Disconnected.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::catalog::{ErrorCode, Reply};
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::protocol::{read_response, write_command, Command, Response};

use super::Endpoint;

/// Lifecycle state of the managed connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// An open stream with buffered halves
struct Link {
    /// TCP stream reader (buffered so a response line can be scanned)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered so a frame goes out in one write)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Link {
    /// Wrap a connected stream
    fn new(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Frames are tiny and strictly paired; don't let Nagle hold them back
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure socket timeouts; a zero duration leaves the timeout unset
    fn set_timeouts(&mut self, read: Duration, write: Duration) -> Result<()> {
        if !read.is_zero() {
            self.reader.get_ref().set_read_timeout(Some(read))?;
        }
        if !write.is_zero() {
            self.writer.get_ref().set_write_timeout(Some(write))?;
        }
        Ok(())
    }

    /// Write one command frame
    fn send(&mut self, command: &Command) -> Result<()> {
        tracing::trace!("Sending {} to {}", command.verb(), self.peer_addr);
        write_command(&mut self.writer, command)
    }

    /// Write one command frame and read exactly one response line
    fn exchange(&mut self, command: &Command, max_line_len: usize) -> Result<Response> {
        self.send(command)?;
        let response = read_response(&mut self.reader, max_line_len)?;
        tracing::trace!(
            "Received {:?} from {} for {}",
            response.status,
            self.peer_addr,
            command.verb()
        );
        Ok(response)
    }

    /// Close both directions; errors are irrelevant once we are tearing down
    fn close(self) {
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }
}

/// Owns at most one live connection to a service
pub struct ConnectionManager {
    /// Timeouts and framing limits
    config: Config,

    /// Last endpoint that passed validation (target of `reconnect`)
    endpoint: Option<Endpoint>,

    /// Open stream, present only while Connected
    link: Option<Link>,
}

impl ConnectionManager {
    /// Create a disconnected manager
    pub fn new(config: Config) -> Self {
        Self {
            config,
            endpoint: None,
            link: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        if self.link.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Last endpoint used by `connect`, if any
    pub fn endpoint(&self) -> Option<Endpoint> {
        self.endpoint
    }

    /// Connect and identify the service
    ///
    /// 1. Validate host (128) and port (129) without touching a socket
    /// 2. Close any existing connection
    /// 3. Open TCP with the connect timeout
    /// 4. Send the probe and read one line
    ///
    /// Refusal gives 130, timeout 131. On success the payload is the
    /// service name from the probe reply; matching it against the intended
    /// target is left to the caller.
    pub fn connect(&mut self, host: &str, port: &str) -> Result<Reply> {
        let endpoint = match Endpoint::parse(host, port) {
            Ok(endpoint) => endpoint,
            Err(code) => {
                tracing::debug!("Rejected endpoint {:?}:{:?} with code {}", host, port, code.0);
                return Ok(Reply::failure(code));
            }
        };

        self.connect_endpoint(endpoint)
    }

    /// Close the current connection and connect again to the last endpoint
    pub fn reconnect(&mut self) -> Result<Reply> {
        let endpoint = self.endpoint.ok_or(ClientError::NoEndpoint)?;
        self.disconnect();
        self.connect_endpoint(endpoint)
    }

    /// Close the connection; a no-op when already Disconnected
    pub fn disconnect(&mut self) {
        if let Some(link) = self.link.take() {
            tracing::debug!("Disconnecting from {}", link.peer_addr);
            link.close();
        }
    }

    /// Send a command without waiting for a reply
    pub fn send(&mut self, command: &Command) -> Result<()> {
        let link = self.link.as_mut().ok_or(ClientError::NotConnected)?;
        let result = link.send(command);
        self.check(result)
    }

    /// Send a command and block for its response line
    pub fn request(&mut self, command: &Command) -> Result<Response> {
        let max_line_len = self.config.max_line_len;
        let link = self.link.as_mut().ok_or(ClientError::NotConnected)?;
        let result = link.exchange(command, max_line_len);
        self.check(result)
    }

    fn connect_endpoint(&mut self, endpoint: Endpoint) -> Result<Reply> {
        self.disconnect();
        self.endpoint = Some(endpoint);

        tracing::debug!("Connecting to {}", endpoint);

        match self.open(endpoint) {
            Ok(link) => self.link = Some(link),
            Err(e) => return Self::connect_failure(endpoint, e),
        }

        let response = match self.request(&Command::Probe) {
            Ok(response) => response,
            Err(e) => {
                self.disconnect();
                return Self::connect_failure(endpoint, e);
            }
        };

        if !response.is_ok() {
            tracing::warn!(
                "Probe to {} rejected with {:?} {:?}",
                endpoint,
                response.status,
                response.body
            );
            self.disconnect();
            return Ok(Reply::failure(ErrorCode::CONNECTION_REFUSED));
        }

        let service = response.first().unwrap_or_default();
        tracing::info!("Connected to {} ({})", endpoint, service);
        Ok(Reply::with_payload(service))
    }

    fn open(&self, endpoint: Endpoint) -> Result<Link> {
        // Zero means no timeout, as it does for reads and writes
        let addr = endpoint.socket_addr();
        let stream = if self.config.connect_timeout.is_zero() {
            TcpStream::connect(addr)?
        } else {
            TcpStream::connect_timeout(&addr, self.config.connect_timeout)?
        };
        let mut link = Link::new(stream)?;
        link.set_timeouts(self.config.read_timeout, self.config.write_timeout)?;
        Ok(link)
    }

    /// Map a failed connect attempt to 130/131; protocol errors stay errors
    fn connect_failure(endpoint: Endpoint, error: ClientError) -> Result<Reply> {
        match error.code() {
            Some(code) => {
                tracing::warn!("Connect to {} failed ({}): {}", endpoint, code.0, error);
                Ok(Reply::failure(code))
            }
            None => Err(error),
        }
    }

    /// Drop the connection after a failure that leaves the stream unusable
    fn check<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_transport() || matches!(e, ClientError::LineTooLong { .. }) {
                tracing::warn!("Connection lost: {}", e);
                self.disconnect();
            }
        }
        result
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}
