//! SET command modifiers
//!
//! Existence group (NX | XX) and expiry group (EX | PX | EXAT | PXAT |
//! KEEPTTL), each at-most-one with last-write-wins.

use super::Expiry;

/// Existence constraint for SET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Existence {
    /// NX — set only if the key does not exist
    IfAbsent,

    /// XX — set only if the key already exists
    IfPresent,
}

/// Expiry selection for SET, including TTL preservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetExpiry {
    At(Expiry),

    /// KEEPTTL — retain the key's existing TTL
    KeepTtl,
}

/// Optional modifiers for the SET command
///
/// ```
/// use rediswire::SetParams;
///
/// let args = SetParams::new().nx().ex(2).to_args();
/// assert_eq!(args, vec![b"NX".to_vec(), b"EX".to_vec(), b"2".to_vec()]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetParams {
    existence: Option<Existence>,
    expiry: Option<SetExpiry>,
}

impl SetParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set only if the key does not exist (NX)
    pub fn nx(mut self) -> Self {
        self.existence = Some(Existence::IfAbsent);
        self
    }

    /// Set only if the key already exists (XX)
    pub fn xx(mut self) -> Self {
        self.existence = Some(Existence::IfPresent);
        self
    }

    /// Expire after `seconds` (EX)
    pub fn ex(mut self, seconds: u64) -> Self {
        self.expiry = Some(SetExpiry::At(Expiry::Seconds(seconds)));
        self
    }

    /// Expire after `millis` (PX)
    pub fn px(mut self, millis: u64) -> Self {
        self.expiry = Some(SetExpiry::At(Expiry::Millis(millis)));
        self
    }

    /// Expire at unix timestamp `seconds` (EXAT)
    pub fn ex_at(mut self, seconds: u64) -> Self {
        self.expiry = Some(SetExpiry::At(Expiry::SecondsAt(seconds)));
        self
    }

    /// Expire at unix timestamp `millis` (PXAT)
    pub fn px_at(mut self, millis: u64) -> Self {
        self.expiry = Some(SetExpiry::At(Expiry::MillisAt(millis)));
        self
    }

    /// Retain the key's existing TTL (KEEPTTL)
    pub fn keepttl(mut self) -> Self {
        self.expiry = Some(SetExpiry::KeepTtl);
        self
    }

    /// Flatten into the argument tokens to append after key and value
    ///
    /// Canonical order: existence token first, then expiry tokens,
    /// independent of the order the setters were called in.
    pub fn to_args(&self) -> Vec<Vec<u8>> {
        let mut args = Vec::new();

        match self.existence {
            Some(Existence::IfAbsent) => args.push(b"NX".to_vec()),
            Some(Existence::IfPresent) => args.push(b"XX".to_vec()),
            None => {}
        }

        match self.expiry {
            Some(SetExpiry::At(expiry)) => expiry.push_args(&mut args),
            Some(SetExpiry::KeepTtl) => args.push(b"KEEPTTL".to_vec()),
            None => {}
        }

        args
    }
}
