//! IPv4 to allow-list key encoding.

use super::error::{AccessControlError, AccessControlResult};

/// Allow-list key: the 32-bit encoding of an IPv4 address.
///
/// Stores receive it as its decimal string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllowListKey(u32);

impl AllowListKey {
    /// Encode a dotted-quad address.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` unless the address is exactly four decimal
    /// octets in `0..=255` with no sign and no leading zeros.
    pub fn from_address(address: &str) -> AccessControlResult<Self> {
        encode_ipv4(address).map(Self)
    }

    /// The raw encoded value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for AllowListKey {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for AllowListKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fold a dotted-quad address into a `u32`, most significant octet first.
///
/// # Errors
///
/// Returns `MalformedInput` for anything that is not a canonical dotted quad.
pub fn encode_ipv4(address: &str) -> AccessControlResult<u32> {
    let parts: Vec<&str> = address.split('.').collect();

    if parts.len() != 4 {
        return Err(AccessControlError::MalformedInput(format!(
            "expected 4 octets, got {} in '{address}'",
            parts.len()
        )));
    }

    parts.iter().try_fold(0u32, |acc, part| {
        let octet = parse_octet(part).ok_or_else(|| {
            AccessControlError::MalformedInput(format!("invalid octet '{part}' in '{address}'"))
        })?;
        Ok((acc << 8) + u32::from(octet))
    })
}

fn parse_octet(part: &str) -> Option<u8> {
    let canonical = !part.is_empty()
        && part.len() <= 3
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'));

    if canonical {
        part.parse().ok()
    } else {
        None
    }
}
