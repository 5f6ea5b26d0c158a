//! # TeleGods
//!
//! A terminal client for the TeleGods bank and liquor store:
//! - Line-oriented text protocol over a single TCP connection
//! - Strict request/response pairing (one outstanding request)
//! - Fixed connect/read timeouts
//! - Numeric result codes shared with the remote services
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  REPL (telegods-cli)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ (code, payload)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  ProtocolClient                              │
//! │        (login / balance / transfer / logout ...)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Connection  │          │   Catalog   │
//!   │  Manager    │          │  (codes)    │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ Wire Codec  │
//!   │  (lines)    │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod catalog;
pub mod protocol;
pub mod network;
pub mod client;
pub mod session;
pub mod liquor;
pub mod form;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClientError, Result};
pub use config::Config;
pub use catalog::{Category, ErrorCode, Reply};
pub use client::ProtocolClient;
pub use session::{Service, Session};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the TeleGods client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
