//! Error type for address parsing and range collection input.

use thiserror::Error;

/// Errors raised while turning user input into ranges.
///
/// `InvalidAddress` and `InvalidCidr` are the format errors a request
/// handler rejects before touching the collection. `InvalidRange` is only
/// produced when rebuilding a collection from a caller supplied snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Dotted-decimal address text could not be parsed.
    #[error("invalid IPv4 address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// CIDR block text could not be parsed.
    #[error("invalid CIDR block '{input}': {reason}")]
    InvalidCidr { input: String, reason: String },

    /// A snapshot entry whose start lies after its end.
    #[error("invalid range {start}-{end}: start is after end")]
    InvalidRange { start: u32, end: u32 },
}

impl RangeError {
    pub(crate) fn address(input: &str, reason: impl Into<String>) -> Self {
        RangeError::InvalidAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn cidr(input: &str, reason: impl Into<String>) -> Self {
        RangeError::InvalidCidr {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// True for malformed address or CIDR text.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            RangeError::InvalidAddress { .. } | RangeError::InvalidCidr { .. }
        )
    }
}
