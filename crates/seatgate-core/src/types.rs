use crate::{Result, constants::CARD_UID_LENGTH, error::Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use subtle::ConstantTimeEq;

/// Proximity card identifier (fixed 4-byte UID).
///
/// Equality is exact and byte-wise; there are no ordering semantics.
///
/// # Security
/// Comparison is constant-time to avoid leaking, through timing, how many
/// leading bytes of a presented card match an enrolled one.
#[derive(Debug, Clone, Copy, Eq)]
pub struct CardUid([u8; CARD_UID_LENGTH]);

impl CardUid {
    /// Create a card identifier from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; CARD_UID_LENGTH]) -> Self {
        CardUid(bytes)
    }

    /// Parse a card identifier from hex notation.
    ///
    /// Accepts exactly 8 hex digits; spaces and colons between byte pairs
    /// are tolerated ("13A35011", "13 A3 50 11", "13:a3:50:11").
    ///
    /// # Errors
    /// Returns `Error::InvalidCardFormat` if the input does not decode to
    /// exactly [`CARD_UID_LENGTH`] bytes.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits: String = s.chars().filter(|c| !matches!(c, ' ' | ':')).collect();

        if digits.len() != CARD_UID_LENGTH * 2 {
            return Err(Error::InvalidCardFormat(format!(
                "Card UID must be {} hex digits, got {}",
                CARD_UID_LENGTH * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; CARD_UID_LENGTH];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &digits[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| Error::InvalidCardFormat(format!("Invalid hex digits: {pair}")))?;
        }

        Ok(CardUid(bytes))
    }

    /// Get the raw UID bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; CARD_UID_LENGTH] {
        &self.0
    }

    /// Format as contiguous uppercase hex ("13A35011").
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02X}")).collect()
    }
}

impl fmt::Display for CardUid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for CardUid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CardUid::from_hex(s)
    }
}

impl From<[u8; CARD_UID_LENGTH]> for CardUid {
    fn from(bytes: [u8; CARD_UID_LENGTH]) -> Self {
        CardUid(bytes)
    }
}

/// Constant-time comparison implementation for CardUid.
impl PartialEq for CardUid {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

/// Hash implementation for CardUid, for use in hash-based collections.
impl std::hash::Hash for CardUid {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Serialized as a hex string so config files stay human-editable.
impl Serialize for CardUid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CardUid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CardUid::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
