//! Reply definitions
//!
//! The tagged union of every reply shape the decoder can produce.

use bytes::Bytes;

/// A decoded server reply
///
/// `Bulk(None)` and `Array(None)` are the protocol's nil markers; they are
/// distinct from `Bulk(Some(empty))` and `Array(Some(vec![]))` and the
/// distinction is load-bearing (missing key vs. empty string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// One-line textual acknowledgement, e.g. "OK"
    Status(String),

    /// Signed 64-bit integer
    Integer(i64),

    /// Binary payload, or nil
    Bulk(Option<Bytes>),

    /// Error message from the server. Inside an array this is a value;
    /// at the top level the dispatcher converts it into a failure.
    Error(String),

    /// Ordered sequence of replies, or nil. Elements may be any variant,
    /// including nested arrays and errors.
    Array(Option<Vec<Reply>>),
}

impl Reply {
    /// Nil bulk reply (`$-1`)
    pub const NIL: Reply = Reply::Bulk(None);

    /// Whether this is a nil bulk or nil array
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Bulk(None) | Reply::Array(None))
    }

    /// The status line, if this is a status reply
    pub fn as_status(&self) -> Option<&str> {
        match self {
            Reply::Status(s) => Some(s),
            _ => None,
        }
    }

    /// The integer value, if this is an integer reply
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Consume into the bulk payload.
    ///
    /// Returns `Some(None)` for a nil bulk and `None` for any other variant.
    pub fn into_bulk(self) -> Option<Option<Bytes>> {
        match self {
            Reply::Bulk(payload) => Some(payload),
            _ => None,
        }
    }

    /// Consume into the array elements.
    ///
    /// Returns `Some(None)` for a nil array and `None` for any other variant.
    pub fn into_array(self) -> Option<Option<Vec<Reply>>> {
        match self {
            Reply::Array(elements) => Some(elements),
            _ => None,
        }
    }
}
