//! Services and sessions
//!
//! The client never stores a session itself; callers keep the `Session`
//! returned from a successful login and pass its UUID back in.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Reply;

/// The remote services a client can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Bank,
    LiquorStore,
}

impl Service {
    /// Name the service announces in its probe reply
    pub fn wire_name(self) -> &'static str {
        match self {
            Service::Bank => "bank",
            Service::LiquorStore => "liquor_store",
        }
    }

    /// Whether a probe payload identifies this service
    pub fn matches(self, announced: &str) -> bool {
        self.wire_name() == announced
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank" => Ok(Service::Bank),
            "liquor_store" | "liquor-store" | "liquor" => Ok(Service::LiquorStore),
            other => Err(format!("unknown service: {}", other)),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque identifier handed out by the bank
    pub uuid: String,

    /// Username that logged in
    pub username: String,
}

impl Session {
    /// Build a session from a login reply, if it succeeded
    pub fn from_login(username: impl Into<String>, reply: &Reply) -> Option<Self> {
        if !reply.is_success() || reply.payload.is_empty() {
            return None;
        }
        Some(Self {
            uuid: reply.payload.clone(),
            username: username.into(),
        })
    }
}
