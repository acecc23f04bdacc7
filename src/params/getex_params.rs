//! GETEX command modifiers
//!
//! One group: EX | PX | EXAT | PXAT | PERSIST, at-most-one with
//! last-write-wins.

use super::Expiry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GetExExpiry {
    At(Expiry),

    /// PERSIST — clear any existing TTL
    Persist,
}

/// Optional modifiers for the GETEX command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetExParams {
    expiry: Option<GetExExpiry>,
}

impl GetExParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire after `seconds` (EX)
    pub fn ex(mut self, seconds: u64) -> Self {
        self.expiry = Some(GetExExpiry::At(Expiry::Seconds(seconds)));
        self
    }

    /// Expire after `millis` (PX)
    pub fn px(mut self, millis: u64) -> Self {
        self.expiry = Some(GetExExpiry::At(Expiry::Millis(millis)));
        self
    }

    /// Expire at unix timestamp `seconds` (EXAT)
    pub fn ex_at(mut self, seconds: u64) -> Self {
        self.expiry = Some(GetExExpiry::At(Expiry::SecondsAt(seconds)));
        self
    }

    /// Expire at unix timestamp `millis` (PXAT)
    pub fn px_at(mut self, millis: u64) -> Self {
        self.expiry = Some(GetExExpiry::At(Expiry::MillisAt(millis)));
        self
    }

    /// Clear any existing TTL (PERSIST)
    pub fn persist(mut self) -> Self {
        self.expiry = Some(GetExExpiry::Persist);
        self
    }

    /// Flatten into the argument tokens to append after the key
    pub fn to_args(&self) -> Vec<Vec<u8>> {
        let mut args = Vec::new();

        match self.expiry {
            Some(GetExExpiry::At(expiry)) => expiry.push_args(&mut args),
            Some(GetExExpiry::Persist) => args.push(b"PERSIST".to_vec()),
            None => {}
        }

        args
    }
}
