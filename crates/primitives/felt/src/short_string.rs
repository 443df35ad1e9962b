//! Cairo short strings: up to 31 ASCII characters packed big-endian into one felt.

use crate::{FeltError, FieldElement};

/// Maximum number of characters of a Cairo short string.
pub const MAX_SHORT_STRING_LEN: usize = 31;

impl FieldElement {
    /// Encodes an ASCII string of at most 31 characters.
    ///
    /// # Errors
    ///
    /// [`FeltError::InputTooLong`] above 31 bytes, [`FeltError::InvalidEncoding`] for
    /// non ASCII input.
    pub fn from_short_string(value: &str) -> Result<Self, FeltError> {
        if !value.is_ascii() {
            return Err(FeltError::InvalidEncoding(format!("short string {value:?} is not ASCII")));
        }
        if value.len() > MAX_SHORT_STRING_LEN {
            return Err(FeltError::InputTooLong { max: MAX_SHORT_STRING_LEN, actual: value.len() });
        }
        Self::from_byte_slice_be(value.as_bytes())
    }

    /// Decodes the element as a short string, leading zero bytes are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FeltError::InvalidEncoding`] when the value spans 32 bytes or is not ASCII.
    pub fn to_short_string(&self) -> Result<String, FeltError> {
        let bytes = self.to_bytes_be();
        if bytes[0] != 0 {
            return Err(FeltError::InvalidEncoding(format!("{self} is too large for a short string")));
        }
        let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        let text = &bytes[start..];
        if !text.is_ascii() {
            return Err(FeltError::InvalidEncoding(format!("{self} is not an ASCII short string")));
        }
        Ok(text.iter().map(|b| *b as char).collect())
    }
}
