//! Parameter Builders
//!
//! Value objects assembling optional command modifiers into canonical
//! argument lists. Within a mutually-exclusive group the last setter call
//! wins; `to_args()` always flattens in a fixed order, so two identically
//! configured builders produce byte-identical argument sequences no matter
//! the order their setters were called in.

mod set_params;
mod getex_params;

pub use set_params::SetParams;
pub use getex_params::GetExParams;

/// Expiry modifier shared by SET-family commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expiry {
    /// EX — relative, seconds
    Seconds(u64),

    /// PX — relative, milliseconds
    Millis(u64),

    /// EXAT — absolute unix timestamp, seconds
    SecondsAt(u64),

    /// PXAT — absolute unix timestamp, milliseconds
    MillisAt(u64),
}

impl Expiry {
    /// Append this expiry's keyword/value token pair
    pub(crate) fn push_args(&self, args: &mut Vec<Vec<u8>>) {
        let (keyword, value) = match self {
            Expiry::Seconds(s) => ("EX", s),
            Expiry::Millis(ms) => ("PX", ms),
            Expiry::SecondsAt(ts) => ("EXAT", ts),
            Expiry::MillisAt(ts) => ("PXAT", ts),
        };
        args.push(keyword.as_bytes().to_vec());
        args.push(value.to_string().into_bytes());
    }
}
