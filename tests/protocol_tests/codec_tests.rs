//! Codec Tests
//!
//! Tests for command framing and response decoding.

use std::io::Cursor;

use telegods::protocol::{
    decode_command, decode_response, encode_command, encode_response, read_line, read_response,
    write_command, Command, Response, Status, Verb,
};
use telegods::{ClientError, ErrorCode};

fn transfer() -> Command {
    Command::Transfer {
        sender: "a-1".to_string(),
        recipient: "b-2".to_string(),
        amount: "25".to_string(),
    }
}

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_probe_has_no_arguments() {
    assert_eq!(&encode_command(&Command::Probe)[..], b"CONNECT\r\n");
}

#[test]
fn test_encode_login() {
    let cmd = Command::Login {
        username: "alice".to_string(),
        password: "s3cret".to_string(),
    };
    assert_eq!(&encode_command(&cmd)[..], b"LOGIN alice s3cret\r\n");
}

#[test]
fn test_encode_withdraw_uses_short_verb() {
    let cmd = Command::Withdraw {
        uuid: "abc".to_string(),
        amount: "10".to_string(),
    };
    assert_eq!(&encode_command(&cmd)[..], b"WITH abc 10\r\n");
}

#[test]
fn test_encode_transfer_argument_order() {
    assert_eq!(&encode_command(&transfer())[..], b"TRANSFER a-1 b-2 25\r\n");
}

#[test]
fn test_encode_chpasswd_argument_order() {
    let cmd = Command::ChangePassword {
        uuid: "u".to_string(),
        old_password: "old".to_string(),
        new_password: "new".to_string(),
    };
    assert_eq!(&encode_command(&cmd)[..], b"CHPASSWD u old new\r\n");
}

#[test]
fn test_encode_does_not_escape_whitespace() {
    let cmd = Command::Deposit {
        uuid: "u".to_string(),
        amount: "1 2".to_string(),
    };
    assert_eq!(&encode_command(&cmd)[..], b"DEPOSIT u 1 2\r\n");
}

#[test]
fn test_encode_utf8_arguments() {
    let cmd = Command::Register {
        username: "zoë".to_string(),
        password: "ñ".to_string(),
    };
    assert_eq!(encode_command(&cmd).to_vec(), "REGISTER zoë ñ\r\n".as_bytes());
}

#[test]
fn test_every_command_decodes_back_to_itself() {
    let commands = vec![
        Command::Probe,
        Command::Login {
            username: "u".to_string(),
            password: "p".to_string(),
        },
        Command::Register {
            username: "u".to_string(),
            password: "p".to_string(),
        },
        Command::Logout,
        Command::Balance,
        Command::Deposit {
            uuid: "id".to_string(),
            amount: "5".to_string(),
        },
        Command::Withdraw {
            uuid: "id".to_string(),
            amount: "7".to_string(),
        },
        transfer(),
        Command::ChangePassword {
            uuid: "id".to_string(),
            old_password: "a".to_string(),
            new_password: "b".to_string(),
        },
        Command::List,
    ];

    for cmd in commands {
        let decoded = decode_command(&encode_command(&cmd)).unwrap();
        assert_eq!(decoded, cmd);
    }
}

// =============================================================================
// Command Decoding Errors
// =============================================================================

#[test]
fn test_decode_unknown_verb() {
    let result = decode_command(b"FLY away\r\n");
    assert!(matches!(result, Err(ClientError::MalformedRequest(_))));
    assert!(result.unwrap_err().to_string().contains("unknown verb"));
}

#[test]
fn test_decode_wrong_arity() {
    let result = decode_command(b"LOGIN onlyuser\r\n");
    assert!(result.unwrap_err().to_string().contains("expects 2 arguments"));
}

#[test]
fn test_decode_empty_request() {
    assert!(decode_command(b"\r\n").is_err());
}

#[test]
fn test_verb_parse_matches_wire_spelling() {
    for verb in [Verb::Probe, Verb::Withdraw, Verb::ChangePassword, Verb::List] {
        assert_eq!(verb.as_str().parse::<Verb>().unwrap(), verb);
    }
}

// =============================================================================
// Response Decoding Tests
// =============================================================================

#[test]
fn test_decode_ok_with_payload() {
    let resp = decode_response(b"OK abc-123\r\n").unwrap();
    assert_eq!(resp.status, Status::Ok);
    assert_eq!(resp.payload, vec!["abc-123".to_string()]);
    assert_eq!(resp.first(), Some("abc-123"));
    assert_eq!(resp.result_code(), Some(ErrorCode::SUCCESS));
}

#[test]
fn test_decode_bare_ok() {
    let resp = decode_response(b"OK\r\n").unwrap();
    assert!(resp.is_ok());
    assert!(resp.payload.is_empty());
    assert_eq!(resp.body, "");
}

#[test]
fn test_decode_numeric_status() {
    let resp = decode_response(b"252\r\n").unwrap();
    assert_eq!(resp.status, Status::Code(252));
    assert_eq!(resp.result_code(), Some(ErrorCode::UNKNOWN_RECIPIENT));
}

#[test]
fn test_decode_err_with_code() {
    let resp = decode_response(b"ERR 3\r\n").unwrap();
    assert_eq!(resp.status, Status::Err);
    assert_eq!(resp.result_code(), Some(ErrorCode::INSUFFICIENT_FUNDS));
}

#[test]
fn test_decode_err_without_code_has_no_result() {
    let resp = decode_response(b"ERR\r\n").unwrap();
    assert_eq!(resp.result_code(), None);
}

#[test]
fn test_decode_unrecognized_status() {
    let resp = decode_response(b"HELLO there\r\n").unwrap();
    assert_eq!(resp.status, Status::Unrecognized("HELLO".to_string()));
    assert_eq!(resp.result_code(), None);
}

#[test]
fn test_decode_accepts_bare_newline() {
    let resp = decode_response(b"OK 42\n").unwrap();
    assert_eq!(resp.first(), Some("42"));
}

#[test]
fn test_decode_keeps_body_verbatim() {
    let resp = decode_response(b"OK [\"Old  Tom\", 3]\r\n").unwrap();
    assert_eq!(resp.body, "[\"Old  Tom\", 3]");
    assert_eq!(resp.payload.len(), 3);
}

#[test]
fn test_decode_empty_line_is_malformed() {
    let result = decode_response(b"\r\n");
    assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
}

#[test]
fn test_decode_whitespace_only_is_malformed() {
    assert!(matches!(
        decode_response(b"   \t \r\n"),
        Err(ClientError::MalformedResponse(_))
    ));
}

#[test]
fn test_decode_invalid_utf8_is_malformed() {
    let result = decode_response(&[b'O', b'K', b' ', 0xFF, 0xFE, b'\r', b'\n']);
    assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    assert!(result.unwrap_err().to_string().contains("UTF-8"));
}

#[test]
fn test_encode_response_matches_wire() {
    assert_eq!(&encode_response(&Response::ok(["bank"]))[..], b"OK bank\r\n");
    assert_eq!(&encode_response(&Response::code(3))[..], b"3\r\n");
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_write_command_to_buffer() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &Command::Balance).unwrap();
    assert_eq!(buffer, b"BALANCE\r\n");
}

#[test]
fn test_read_response_one_line_at_a_time() {
    let mut reader = Cursor::new(b"OK first\r\n3\r\n".to_vec());

    let first = read_response(&mut reader, 1024).unwrap();
    assert_eq!(first.first(), Some("first"));

    let second = read_response(&mut reader, 1024).unwrap();
    assert_eq!(second.status, Status::Code(3));
}

#[test]
fn test_read_line_eof_before_data() {
    let mut reader = Cursor::new(Vec::new());
    assert!(matches!(
        read_line(&mut reader, 1024),
        Err(ClientError::ConnectionClosed)
    ));
}

#[test]
fn test_read_line_returns_partial_line_at_eof() {
    let mut reader = Cursor::new(b"OK 12".to_vec());
    assert_eq!(read_line(&mut reader, 1024).unwrap(), b"OK 12");
}

#[test]
fn test_read_line_too_long() {
    let mut reader = Cursor::new(vec![b'A'; 64]);
    assert!(matches!(
        read_line(&mut reader, 16),
        Err(ClientError::LineTooLong { limit: 16 })
    ));
}

#[test]
fn test_read_line_limit_includes_terminator() {
    let mut reader = Cursor::new(b"OK\r\n".to_vec());
    assert_eq!(read_line(&mut reader, 4).unwrap(), b"OK\r\n");

    let mut reader = Cursor::new(b"OK\r\n".to_vec());
    assert!(read_line(&mut reader, 3).is_err());
}
