//! Endpoint validation
//!
//! Hosts must be IP literals and ports integers in `[1, 65535]`. No name
//! resolution is performed. Surrounding whitespace is allowed on the port
//! but not on the host, and IPv6 zone suffixes (`%eth0`) are rejected.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::catalog::ErrorCode;

/// A validated server address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub ip: IpAddr,
    pub port: u16,
}

impl Endpoint {
    /// Validate host and port strings
    ///
    /// The host is checked first, so a bad host reports 128 even when the
    /// port is also invalid.
    pub fn parse(host: &str, port: &str) -> Result<Self, ErrorCode> {
        let ip = parse_ip(host).ok_or(ErrorCode::INVALID_IP)?;
        let port = parse_port(port).ok_or(ErrorCode::INVALID_PORT)?;
        Ok(Self { ip, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

fn parse_ip(host: &str) -> Option<IpAddr> {
    host.parse().ok()
}

fn parse_port(port: &str) -> Option<u16> {
    match port.trim().parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}

/// Check that `host` is an IPv4 or IPv6 literal
///
/// Returns 0 on success, 128 otherwise.
pub fn validate_ip(host: &str) -> ErrorCode {
    match parse_ip(host) {
        Some(_) => ErrorCode::SUCCESS,
        None => ErrorCode::INVALID_IP,
    }
}

/// Check that `port` is an integer in `[1, 65535]`
///
/// Returns 0 on success, 129 otherwise.
pub fn validate_port(port: &str) -> ErrorCode {
    match parse_port(port) {
        Some(_) => ErrorCode::SUCCESS,
        None => ErrorCode::INVALID_PORT,
    }
}
