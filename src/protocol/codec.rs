//! Protocol codec
//!
//! Encoding and decoding functions for the RESP wire protocol.
//!
//! ## Wire Format
//!
//! ### Request (Command) Format
//! ```text
//! ┌──────────────┬──────────────────┬──────────────────┬─────┐
//! │ *<n>\r\n     │ $<len>\r\n name  │ $<len>\r\n arg0  │ ... │
//! └──────────────┴──────────────────┴──────────────────┴─────┘
//! ```
//! where `n = 1 + argc`. Each element is a length-prefixed blob followed by
//! CRLF; the payload itself is never inspected, so any byte value is safe.
//!
//! ### Reply Format
//! One marker byte, then:
//! - `+<line>\r\n`            status
//! - `-<line>\r\n`            error
//! - `:<decimal>\r\n`         signed 64-bit integer
//! - `$<len>\r\n<bytes>\r\n`  bulk; `$-1\r\n` is nil
//! - `*<count>\r\n<elems>`    array, recursive; `*-1\r\n` is nil

use std::io::{BufRead, Read, Write};

use bytes::Bytes;

use crate::error::{Result, WireError};
use super::{Command, Reply};

/// Maximum accepted bulk payload (512 MB, the server-side limit)
pub const MAX_BULK_SIZE: u64 = 512 * 1024 * 1024;

/// Maximum accepted array nesting depth
pub const MAX_ARRAY_DEPTH: usize = 64;

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to its multi-bulk wire form
///
/// Format: `*<1 + argc>\r\n` then each of name and arguments as
/// `$<len>\r\n<bytes>\r\n`. Numeric arguments must already be in decimal
/// ASCII form (see `Command::arg_int`).
pub fn encode_command(command: &Command) -> Vec<u8> {
    let name = command.name().as_bytes();
    let args = command.arg_list();

    // Rough capacity: framing overhead is ~15 bytes per element
    let payload_len: usize = name.len() + args.iter().map(|a| a.len()).sum::<usize>();
    let mut frame = Vec::with_capacity(payload_len + 15 * (args.len() + 2));

    frame.push(b'*');
    frame.extend_from_slice((1 + args.len()).to_string().as_bytes());
    frame.extend_from_slice(b"\r\n");

    encode_bulk(&mut frame, name);
    for arg in args {
        encode_bulk(&mut frame, arg);
    }

    frame
}

/// Append one `$<len>\r\n<bytes>\r\n` element
fn encode_bulk(frame: &mut Vec<u8>, payload: &[u8]) {
    frame.push(b'$');
    frame.extend_from_slice(payload.len().to_string().as_bytes());
    frame.extend_from_slice(b"\r\n");
    frame.extend_from_slice(payload);
    frame.extend_from_slice(b"\r\n");
}

/// Write a command to a stream and flush
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let frame = encode_command(command);
    writer.write_all(&frame)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Read one complete reply from a stream
///
/// Blocks until a full reply is received or an error occurs. A clean
/// connection close before the first byte yields `ConnectionClosed`; an EOF
/// anywhere after that is a `Protocol` error (truncated frame).
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Reply> {
    read_reply_at_depth(reader, 0)
}

fn read_reply_at_depth<R: BufRead>(reader: &mut R, depth: usize) -> Result<Reply> {
    if depth > MAX_ARRAY_DEPTH {
        return Err(WireError::Protocol(format!(
            "Array nesting exceeds {} levels",
            MAX_ARRAY_DEPTH
        )));
    }

    let marker = match read_byte(reader) {
        Ok(b) => b,
        Err(WireError::Protocol(_)) if depth == 0 => {
            // EOF before any byte of a top-level reply: the server closed
            // the connection between frames, not inside one.
            return Err(WireError::ConnectionClosed);
        }
        Err(e) => return Err(e),
    };

    match marker {
        b'+' => {
            let line = read_line(reader)?;
            Ok(Reply::Status(String::from_utf8_lossy(&line).into_owned()))
        }
        b'-' => {
            let line = read_line(reader)?;
            Ok(Reply::Error(String::from_utf8_lossy(&line).into_owned()))
        }
        b':' => {
            let line = read_line(reader)?;
            Ok(Reply::Integer(parse_i64(&line, "integer reply")?))
        }
        b'$' => read_bulk_body(reader),
        b'*' => read_array_body(reader, depth),
        other => Err(WireError::Protocol(format!(
            "Unknown reply marker: 0x{:02x}",
            other
        ))),
    }
}

/// Read the `<len>\r\n<bytes>\r\n` remainder of a bulk reply
fn read_bulk_body<R: BufRead>(reader: &mut R) -> Result<Reply> {
    let line = read_line(reader)?;
    let len = parse_i64(&line, "bulk length")?;

    if len == -1 {
        return Ok(Reply::Bulk(None));
    }
    if len < 0 {
        return Err(WireError::Protocol(format!("Negative bulk length: {}", len)));
    }
    if len as u64 > MAX_BULK_SIZE {
        return Err(WireError::Protocol(format!(
            "Bulk payload too large: {} bytes (max {})",
            len, MAX_BULK_SIZE
        )));
    }

    let mut payload = vec![0u8; len as usize];
    read_exact(reader, &mut payload)?;

    // The two bytes after the payload must be the CRLF terminator; anything
    // else means the declared length was wrong.
    let mut terminator = [0u8; 2];
    read_exact(reader, &mut terminator)?;
    if terminator != *b"\r\n" {
        return Err(WireError::Protocol(format!(
            "Bulk length {} does not match terminator position",
            len
        )));
    }

    Ok(Reply::Bulk(Some(Bytes::from(payload))))
}

/// Read the `<count>\r\n<elements>` remainder of an array reply
///
/// Elements are decoded recursively; an error element becomes a
/// `Reply::Error` value in place, it does not fail the whole array.
fn read_array_body<R: BufRead>(reader: &mut R, depth: usize) -> Result<Reply> {
    let line = read_line(reader)?;
    let count = parse_i64(&line, "array count")?;

    if count == -1 {
        return Ok(Reply::Array(None));
    }
    if count < 0 {
        return Err(WireError::Protocol(format!("Negative array count: {}", count)));
    }

    let mut elements = Vec::with_capacity(count.min(1024) as usize);
    for _ in 0..count {
        elements.push(read_reply_at_depth(reader, depth + 1)?);
    }

    Ok(Reply::Array(Some(elements)))
}

// =============================================================================
// Stream primitives
// =============================================================================

/// Read a single byte
fn read_byte<R: BufRead>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    read_exact(reader, &mut byte)?;
    Ok(byte[0])
}

/// Read one CRLF-terminated line, returning it without the terminator
fn read_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    let n = reader.read_until(b'\n', &mut line)?;

    if n == 0 {
        return Err(WireError::Protocol(
            "Unexpected end of stream inside a frame".to_string(),
        ));
    }
    if !line.ends_with(b"\r\n") {
        return Err(WireError::Protocol(
            "Reply line missing CRLF terminator".to_string(),
        ));
    }

    line.truncate(line.len() - 2);
    Ok(line)
}

/// `read_exact` with mid-frame EOF reported as a protocol error
fn read_exact<R: BufRead>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            WireError::Protocol("Unexpected end of stream inside a frame".to_string())
        } else {
            WireError::Io(e)
        }
    })
}

/// Parse a decimal ASCII signed 64-bit integer
fn parse_i64(line: &[u8], what: &str) -> Result<i64> {
    std::str::from_utf8(line)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            WireError::Protocol(format!(
                "Invalid {}: {:?}",
                what,
                String::from_utf8_lossy(line)
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CommandName;
    use std::io::Cursor;

    #[test]
    fn test_encode_no_args() {
        let cmd = Command::new(CommandName::Ping);
        assert_eq!(encode_command(&cmd), b"*1\r\n$4\r\nPING\r\n");
    }

    #[test]
    fn test_encode_with_args() {
        let cmd = Command::new(CommandName::Set).arg_str("x").arg_str("1");
        assert_eq!(
            encode_command(&cmd),
            b"*3\r\n$3\r\nSET\r\n$1\r\nx\r\n$1\r\n1\r\n"
        );
    }

    #[test]
    fn test_encode_binary_arg_with_crlf() {
        // Embedded CRLF must pass through unescaped; only the length prefix
        // frames the payload.
        let cmd = Command::new(CommandName::Set)
            .arg_str("k")
            .arg(b"a\r\nb\0c".to_vec());
        assert_eq!(
            encode_command(&cmd),
            b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$6\r\na\r\nb\0c\r\n"
        );
    }

    #[test]
    fn test_decode_status() {
        let mut cursor = Cursor::new(b"+OK\r\n".to_vec());
        assert_eq!(read_reply(&mut cursor).unwrap(), Reply::Status("OK".into()));
    }

    #[test]
    fn test_decode_error_at_top_level_is_a_value() {
        // The codec returns errors as values; the dispatcher raises them.
        let mut cursor = Cursor::new(b"-ERR boom\r\n".to_vec());
        assert_eq!(
            read_reply(&mut cursor).unwrap(),
            Reply::Error("ERR boom".into())
        );
    }

    #[test]
    fn test_decode_integer() {
        let mut cursor = Cursor::new(b":-9223372036854775808\r\n".to_vec());
        assert_eq!(read_reply(&mut cursor).unwrap(), Reply::Integer(i64::MIN));
    }

    #[test]
    fn test_decode_bulk_terminator_mismatch() {
        let mut cursor = Cursor::new(b"$3\r\nabcd\r\n".to_vec());
        let err = read_reply(&mut cursor).unwrap_err();
        assert!(err.to_string().contains("does not match terminator"));
    }

    #[test]
    fn test_decode_unknown_marker() {
        let mut cursor = Cursor::new(b"!oops\r\n".to_vec());
        let err = read_reply(&mut cursor).unwrap_err();
        assert!(err.to_string().contains("Unknown reply marker"));
    }

    #[test]
    fn test_clean_eof_vs_truncated_frame() {
        let mut empty = Cursor::new(Vec::new());
        assert!(matches!(
            read_reply(&mut empty).unwrap_err(),
            WireError::ConnectionClosed
        ));

        let mut truncated = Cursor::new(b"$10\r\nabc".to_vec());
        assert!(matches!(
            read_reply(&mut truncated).unwrap_err(),
            WireError::Protocol(_)
        ));
    }
}
