//! Command definitions
//!
//! A command is a name plus an ordered list of opaque binary arguments.
//! Argument order is significant and preserved exactly; arguments carry no
//! implied encoding.

use std::fmt;

/// Command vocabulary
///
/// The fixed variants cover the commands this crate's tests and CLI
/// exercise; `Other` is the escape hatch for anything else, preserving
/// forward compatibility with commands the client has no name for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandName {
    Get,
    Set,
    SetNx,
    SetEx,
    PSetEx,
    GetSet,
    GetDel,
    GetEx,
    MGet,
    MSet,
    Del,
    Exists,
    Incr,
    IncrBy,
    Decr,
    DecrBy,
    Append,
    Strlen,
    Ttl,
    PTtl,
    Expire,
    Persist,
    RPush,
    LPush,
    LRange,
    LPop,
    RPop,
    BLPop,
    BRPop,
    Ping,
    Echo,
    Select,
    FlushDb,

    /// Arbitrary command name, sent verbatim
    Other(String),
}

impl CommandName {
    /// Canonical wire form of the command name
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            CommandName::Get => b"GET",
            CommandName::Set => b"SET",
            CommandName::SetNx => b"SETNX",
            CommandName::SetEx => b"SETEX",
            CommandName::PSetEx => b"PSETEX",
            CommandName::GetSet => b"GETSET",
            CommandName::GetDel => b"GETDEL",
            CommandName::GetEx => b"GETEX",
            CommandName::MGet => b"MGET",
            CommandName::MSet => b"MSET",
            CommandName::Del => b"DEL",
            CommandName::Exists => b"EXISTS",
            CommandName::Incr => b"INCR",
            CommandName::IncrBy => b"INCRBY",
            CommandName::Decr => b"DECR",
            CommandName::DecrBy => b"DECRBY",
            CommandName::Append => b"APPEND",
            CommandName::Strlen => b"STRLEN",
            CommandName::Ttl => b"TTL",
            CommandName::PTtl => b"PTTL",
            CommandName::Expire => b"EXPIRE",
            CommandName::Persist => b"PERSIST",
            CommandName::RPush => b"RPUSH",
            CommandName::LPush => b"LPUSH",
            CommandName::LRange => b"LRANGE",
            CommandName::LPop => b"LPOP",
            CommandName::RPop => b"RPOP",
            CommandName::BLPop => b"BLPOP",
            CommandName::BRPop => b"BRPOP",
            CommandName::Ping => b"PING",
            CommandName::Echo => b"ECHO",
            CommandName::Select => b"SELECT",
            CommandName::FlushDb => b"FLUSHDB",
            CommandName::Other(name) => name.as_bytes(),
        }
    }

    /// Parse a command name, case-insensitively.
    ///
    /// Names outside the fixed vocabulary become `Other`, carrying the
    /// caller's exact spelling (the server treats names case-insensitively
    /// anyway).
    pub fn parse(name: &str) -> CommandName {
        match name.to_ascii_uppercase().as_str() {
            "GET" => CommandName::Get,
            "SET" => CommandName::Set,
            "SETNX" => CommandName::SetNx,
            "SETEX" => CommandName::SetEx,
            "PSETEX" => CommandName::PSetEx,
            "GETSET" => CommandName::GetSet,
            "GETDEL" => CommandName::GetDel,
            "GETEX" => CommandName::GetEx,
            "MGET" => CommandName::MGet,
            "MSET" => CommandName::MSet,
            "DEL" => CommandName::Del,
            "EXISTS" => CommandName::Exists,
            "INCR" => CommandName::Incr,
            "INCRBY" => CommandName::IncrBy,
            "DECR" => CommandName::Decr,
            "DECRBY" => CommandName::DecrBy,
            "APPEND" => CommandName::Append,
            "STRLEN" => CommandName::Strlen,
            "TTL" => CommandName::Ttl,
            "PTTL" => CommandName::PTtl,
            "EXPIRE" => CommandName::Expire,
            "PERSIST" => CommandName::Persist,
            "RPUSH" => CommandName::RPush,
            "LPUSH" => CommandName::LPush,
            "LRANGE" => CommandName::LRange,
            "LPOP" => CommandName::LPop,
            "RPOP" => CommandName::RPop,
            "BLPOP" => CommandName::BLPop,
            "BRPOP" => CommandName::BRPop,
            "PING" => CommandName::Ping,
            "ECHO" => CommandName::Echo,
            "SELECT" => CommandName::Select,
            "FLUSHDB" => CommandName::FlushDb,
            _ => CommandName::Other(name.to_string()),
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

/// A command ready to encode: name + ordered binary arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: CommandName,
    args: Vec<Vec<u8>>,
}

impl Command {
    /// Create a command with no arguments
    pub fn new(name: CommandName) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    /// Append a binary argument
    pub fn arg(mut self, arg: impl Into<Vec<u8>>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a UTF-8 string argument
    pub fn arg_str(self, arg: &str) -> Self {
        self.arg(arg.as_bytes().to_vec())
    }

    /// Append a numeric argument as its canonical decimal ASCII form
    pub fn arg_int(self, arg: i64) -> Self {
        self.arg(arg.to_string().into_bytes())
    }

    /// Append several binary arguments in order
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Vec<u8>>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The command name
    pub fn name(&self) -> &CommandName {
        &self.name
    }

    /// The ordered argument list
    pub fn arg_list(&self) -> &[Vec<u8>] {
        &self.args
    }
}
