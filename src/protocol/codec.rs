//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬───┬──────────┬───┬─────┬──────────┐
//! │  VERB    │ ␠ │  arg1    │ ␠ │ ... │   \r\n   │
//! └──────────┴───┴──────────┴───┴─────┴──────────┘
//! ```
//!
//! Responses use the same framing with a status token in place of the verb.
//! Decoding tolerates a bare `\n` terminator and surrounding whitespace.

use std::io::{BufRead, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::{Command, Response, Status, Verb};
use crate::error::{ClientError, Result};

/// Line terminator for every frame
pub const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Token separator
const SEPARATOR: u8 = b' ';

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a command to bytes
///
/// Format: verb, then each argument preceded by one space, then `\r\n`.
/// Arguments are not escaped.
pub fn encode_command(command: &Command) -> Bytes {
    let verb = command.verb().as_str();
    let args = command.args();

    let args_len: usize = args.iter().map(|a| a.len() + 1).sum();
    let mut frame = BytesMut::with_capacity(verb.len() + args_len + LINE_TERMINATOR.len());

    frame.put_slice(verb.as_bytes());
    for arg in args {
        frame.put_u8(SEPARATOR);
        frame.put_slice(arg.as_bytes());
    }
    frame.put_slice(LINE_TERMINATOR);

    frame.freeze()
}

/// Decode a request line into a command
pub fn decode_command(bytes: &[u8]) -> Result<Command> {
    let line = std::str::from_utf8(bytes)
        .map_err(|e| ClientError::MalformedRequest(format!("invalid UTF-8: {}", e)))?;

    let mut tokens = line.split_whitespace();
    let verb: Verb = tokens
        .next()
        .ok_or_else(|| ClientError::MalformedRequest("empty request".to_string()))?
        .parse()?;

    let args = tokens.map(str::to_string).collect();
    Command::from_parts(verb, args)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: status token, then the body (if any), then `\r\n`
pub fn encode_response(response: &Response) -> Bytes {
    let status = match &response.status {
        Status::Ok => "OK".to_string(),
        Status::Code(code) => code.to_string(),
        Status::Err => "ERR".to_string(),
        Status::Unrecognized(token) => token.clone(),
    };

    let mut frame =
        BytesMut::with_capacity(status.len() + 1 + response.body.len() + LINE_TERMINATOR.len());
    frame.put_slice(status.as_bytes());
    if !response.body.is_empty() {
        frame.put_u8(SEPARATOR);
        frame.put_slice(response.body.as_bytes());
    }
    frame.put_slice(LINE_TERMINATOR);

    frame.freeze()
}

/// Decode a response line
///
/// The first whitespace-separated token becomes the status, the rest the
/// payload. An empty line or invalid UTF-8 is a malformed response.
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let line = std::str::from_utf8(bytes)
        .map_err(|e| ClientError::MalformedResponse(format!("invalid UTF-8: {}", e)))?;

    let line = line.trim();
    if line.is_empty() {
        return Err(ClientError::MalformedResponse(
            "empty response line".to_string(),
        ));
    }

    let (status_token, body) = match line.split_once(char::is_whitespace) {
        Some((status, rest)) => (status, rest.trim()),
        None => (line, ""),
    };

    Ok(Response {
        status: Status::from_token(status_token),
        payload: body.split_whitespace().map(str::to_string).collect(),
        body: body.to_string(),
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one `\n`-terminated line from a stream, terminator included
///
/// Blocks until the terminator arrives, the peer closes, or the underlying
/// read times out. A line cut short by EOF is returned as-is; EOF before any
/// byte is `ConnectionClosed`.
pub fn read_line<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Vec<u8>> {
    let mut line = Vec::new();

    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            if line.is_empty() {
                return Err(ClientError::ConnectionClosed);
            }
            tracing::debug!("Peer closed mid-line after {} bytes", line.len());
            return Ok(line);
        }

        let (chunk_len, done) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };

        if line.len() + chunk_len > max_len {
            return Err(ClientError::LineTooLong { limit: max_len });
        }

        line.extend_from_slice(&available[..chunk_len]);
        reader.consume(chunk_len);

        if done {
            return Ok(line);
        }
    }
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let frame = encode_command(command);
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Response> {
    let line = read_line(reader, max_len)?;
    decode_response(&line)
}
