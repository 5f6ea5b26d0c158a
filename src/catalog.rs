//! Error Catalog
//!
//! Numeric result codes shared by the client and the remote services.
//!
//! | Code | Meaning                                 | Origin |
//! |------|-----------------------------------------|--------|
//! | 0    | success                                 | both   |
//! | 1    | invalid login                           | remote |
//! | 2    | registration conflict                   | remote |
//! | 3    | insufficient funds                      | remote |
//! | 128  | malformed IP address                    | local  |
//! | 129  | malformed port                          | local  |
//! | 130  | connection refused / identity mismatch  | local  |
//! | 131  | connect timed out                       | local  |
//! | 252  | unknown recipient identifier            | remote |
//!
//! The table is open-ended: codes not listed here are carried through
//! unchanged and classified as [`Category::Unrecognized`].

use std::fmt;

/// A numeric result code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ErrorCode(pub u32);

/// Coarse classification of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Code 0
    Success,

    /// Rejected before touching the network (128, 129)
    LocalValidation,

    /// Could not establish or identify the connection (130, 131)
    Connection,

    /// Known failure reported by the service (1, 2, 3, 252)
    Business,

    /// Any other code; rendering is up to the caller
    Unrecognized,
}

impl ErrorCode {
    pub const SUCCESS: ErrorCode = ErrorCode(0);
    pub const INVALID_LOGIN: ErrorCode = ErrorCode(1);
    pub const REGISTRATION_CONFLICT: ErrorCode = ErrorCode(2);
    pub const INSUFFICIENT_FUNDS: ErrorCode = ErrorCode(3);
    pub const INVALID_IP: ErrorCode = ErrorCode(128);
    pub const INVALID_PORT: ErrorCode = ErrorCode(129);
    pub const CONNECTION_REFUSED: ErrorCode = ErrorCode(130);
    pub const CONNECT_TIMEOUT: ErrorCode = ErrorCode(131);
    pub const UNKNOWN_RECIPIENT: ErrorCode = ErrorCode(252);

    /// Raw numeric value
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Classify this code
    pub fn category(self) -> Category {
        match self {
            Self::SUCCESS => Category::Success,
            Self::INVALID_IP | Self::INVALID_PORT => Category::LocalValidation,
            Self::CONNECTION_REFUSED | Self::CONNECT_TIMEOUT => Category::Connection,
            Self::INVALID_LOGIN
            | Self::REGISTRATION_CONFLICT
            | Self::INSUFFICIENT_FUNDS
            | Self::UNKNOWN_RECIPIENT => Category::Business,
            _ => Category::Unrecognized,
        }
    }

    /// Operator-facing message for known codes
    pub fn description(self) -> Option<&'static str> {
        let text = match self {
            Self::SUCCESS => "Success",
            Self::INVALID_LOGIN => "Invalid login (User not found or incorrect password)",
            Self::REGISTRATION_CONFLICT => "Invalid registration (User already registered)",
            Self::INSUFFICIENT_FUNDS => "Insufficient funds",
            Self::INVALID_IP => "The IP address you entered is invalid",
            Self::INVALID_PORT => "The port you entered is invalid",
            Self::CONNECTION_REFUSED => {
                "Couldn't connect to the specified server, please check the address and try again..."
            }
            Self::CONNECT_TIMEOUT => "Connection to the server timed out",
            Self::UNKNOWN_RECIPIENT => "UUID not found, please check the value and try again...",
            _ => return None,
        };
        Some(text)
    }
}

impl From<u32> for ErrorCode {
    fn from(value: u32) -> Self {
        ErrorCode(value)
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(text) => write!(f, "{} ({})", self.0, text),
            None => write!(f, "{}", self.0),
        }
    }
}

// =============================================================================
// Reply
// =============================================================================

/// The `(code, payload)` pair every client operation produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Result code; 0 means success
    pub code: ErrorCode,

    /// Operation-specific payload (empty on failure)
    pub payload: String,
}

impl Reply {
    /// Success with no payload
    pub fn success() -> Self {
        Self {
            code: ErrorCode::SUCCESS,
            payload: String::new(),
        }
    }

    /// Success carrying a payload
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::SUCCESS,
            payload: payload.into(),
        }
    }

    /// Failure with the given code and an empty payload
    pub fn failure(code: impl Into<ErrorCode>) -> Self {
        Self {
            code: code.into(),
            payload: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Split into the raw `(code, payload)` tuple
    pub fn into_parts(self) -> (u32, String) {
        (self.code.0, self.payload)
    }
}

impl From<ErrorCode> for Reply {
    fn from(code: ErrorCode) -> Self {
        Self {
            code,
            payload: String::new(),
        }
    }
}

impl From<Reply> for (u32, String) {
    fn from(reply: Reply) -> Self {
        reply.into_parts()
    }
}
