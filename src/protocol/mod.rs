//! Protocol Module
//!
//! Defines the RESP wire protocol for client-server communication.
//!
//! ## Request Format (multi-bulk)
//! ```text
//! *<argc + 1>\r\n
//! $<len>\r\n<command name>\r\n
//! $<len>\r\n<arg 0>\r\n
//! ...
//! ```
//! Every element is a length-prefixed binary blob; payload bytes are never
//! inspected or escaped, so arguments may contain any byte value including
//! CR, LF and NUL.
//!
//! ## Reply Format
//! One leading marker byte selects the reply shape:
//! - `+` status line     (`+OK\r\n`)
//! - `-` error line      (`-ERR unknown command\r\n`)
//! - `:` signed integer  (`:42\r\n`)
//! - `$` bulk payload    (`$5\r\nhello\r\n`, nil as `$-1\r\n`)
//! - `*` array of replies (`*2\r\n...`, nil as `*-1\r\n`), recursive
//!
//! Nil bulk (`$-1`) and empty bulk (`$0`) are distinct values, as are nil
//! array (`*-1`) and empty array (`*0`).

mod command;
mod reply;
mod codec;

pub use command::{Command, CommandName};
pub use reply::Reply;
pub use codec::{encode_command, read_reply, write_command, MAX_BULK_SIZE, MAX_ARRAY_DEPTH};
