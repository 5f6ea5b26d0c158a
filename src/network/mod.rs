//! Network Module
//!
//! TCP connection handling for the client side.
//!
//! ## Architecture
//! - One blocking TCP stream per manager
//! - Buffered reader and writer over cloned handles
//! - Fixed connect/read/write timeouts from `Config`

mod endpoint;
mod connection;

pub use endpoint::{validate_ip, validate_port, Endpoint};
pub use connection::{ConnectionManager, ConnectionState};
