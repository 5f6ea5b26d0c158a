//! Response definitions
//!
//! Represents a decoded response line.

use crate::catalog::ErrorCode;

/// Response status, decoded once from the leading token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// `OK`
    Ok,

    /// A bare numeric code, e.g. `3`
    Code(u32),

    /// `ERR`, with the code in the first payload token
    Err,

    /// Any other leading token
    Unrecognized(String),
}

impl Status {
    /// Classify a leading token
    pub fn from_token(token: &str) -> Self {
        match token {
            "OK" => Status::Ok,
            "ERR" => Status::Err,
            other => match other.parse::<u32>() {
                Ok(code) => Status::Code(code),
                Err(_) => Status::Unrecognized(other.to_string()),
            },
        }
    }
}

/// A decoded response line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status from the first token
    pub status: Status,

    /// Remaining whitespace-separated tokens
    pub payload: Vec<String>,

    /// Text after the status token, verbatim apart from surrounding whitespace
    pub body: String,
}

impl Response {
    /// Create an OK response with the given payload tokens
    pub fn ok<I, S>(payload: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let payload: Vec<String> = payload.into_iter().map(Into::into).collect();
        let body = payload.join(" ");
        Self {
            status: Status::Ok,
            payload,
            body,
        }
    }

    /// Create a bare numeric code response
    pub fn code(code: u32) -> Self {
        Self {
            status: Status::Code(code),
            payload: Vec::new(),
            body: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// First payload token, if any
    pub fn first(&self) -> Option<&str> {
        self.payload.first().map(String::as_str)
    }

    /// Result code carried by this response
    ///
    /// `OK` is 0; `ERR <n>` and bare `<n>` are n. Returns `None` when the
    /// status carries no usable code.
    pub fn result_code(&self) -> Option<ErrorCode> {
        match &self.status {
            Status::Ok => Some(ErrorCode::SUCCESS),
            Status::Code(code) => Some(ErrorCode(*code)),
            Status::Err => self
                .first()
                .and_then(|token| token.parse::<u32>().ok())
                .map(ErrorCode),
            Status::Unrecognized(_) => None,
        }
    }
}
