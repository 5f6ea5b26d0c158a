//! Protocol Module
//!
//! Defines the wire protocol spoken by the bank and the liquor store.
//!
//! ## Protocol Format (text, one line per message)
//!
//! ### Request Format
//! ```text
//! <VERB> <arg1> <arg2> ...\r\n
//! ```
//! Tokens are separated by a single space. Arguments are framed as-is;
//! a value containing whitespace or a line break desynchronizes the stream.
//!
//! ### Verbs
//! - CONNECT                              probe, answers with the service name
//! - LOGIN <user> <pass>
//! - REGISTER <user> <pass>
//! - LOGOUT
//! - BALANCE
//! - DEPOSIT <uuid> <amount>
//! - WITH <uuid> <amount>
//! - TRANSFER <sender> <recv> <amount>
//! - CHPASSWD <uuid> <old> <new>
//! - LIST                                 liquor store catalogue
//!
//! ### Response Format
//! ```text
//! <STATUS> <payload tokens...>\r\n
//! ```
//!
//! ### Status Tokens
//! - OK:     success, payload follows
//! - <n>:    numeric result code
//! - ERR <n>: result code carried in the first payload token

mod command;
mod response;
mod codec;

pub use command::{Command, Verb};
pub use response::{Response, Status};
pub use codec::{
    decode_command, decode_response, encode_command, encode_response, read_line,
    read_response, write_command, LINE_TERMINATOR,
};
