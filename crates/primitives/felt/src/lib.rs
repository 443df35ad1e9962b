//! # Felt - Starknet field element.
//!
//! The Starknet base type is an element of the prime field of order
//! `P = 2^251 + 17 * 2^192 + 1`. [`FieldElement`] always stores the canonical
//! representative in `[0, P)`: every constructor reduces its input and no
//! method mutates a value in place.
//!
//! Arithmetic is carried on a 256-bit integer ([`U256`]), products are reduced
//! through a 512-bit intermediate and division is multiplication by the
//! modular inverse `a^(P - 2)`.

mod error;
mod short_string;
mod with_serde;

#[cfg(test)]
mod tests;

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

pub use error::FeltError;
pub use primitive_types::{H160, U256};
use primitive_types::U512;

/// `2^251 + 17 * 2^192 + 1` as little-endian limbs.
const MODULUS: U256 = U256([1, 0, 0, 0x0800_0000_0000_0011]);

/// Element of the Starknet prime field.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldElement(U256);

impl FieldElement {
    /// Field element constant that's equal to 0
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));
    /// Field element constant that's equal to 1
    pub const ONE: Self = Self(U256([1, 0, 0, 0]));
    /// Field element constant that's equal to 2
    pub const TWO: Self = Self(U256([2, 0, 0, 0]));
    /// Field element constant that's equal to 3
    pub const THREE: Self = Self(U256([3, 0, 0, 0]));
    /// Field element constant that's equal to 2^251 + 17 * 2^192
    pub const MAX: Self = Self(U256([0, 0, 0, 0x0800_0000_0000_0011]));

    /// The field modulus `P`.
    pub const fn modulus() -> U256 {
        MODULUS
    }

    /// Builds a constant from little-endian `u64` limbs.
    ///
    /// The limbs must already describe a value below the modulus; this is only meant for
    /// compile-time constants such as chain ids.
    pub const fn from_raw(limbs: [u64; 4]) -> Self {
        Self(U256(limbs))
    }

    /// Reduces an arbitrary 256-bit integer into the field.
    pub fn from_u256(value: U256) -> Self {
        Self(value % MODULUS)
    }

    /// Reduces a big-endian 32-byte integer into the field.
    pub fn from_bytes_be(bytes: &[u8; 32]) -> Self {
        Self::from_u256(U256::from_big_endian(bytes))
    }

    /// Reduces a little-endian 32-byte integer into the field.
    pub fn from_bytes_le(bytes: &[u8; 32]) -> Self {
        Self::from_u256(U256::from_little_endian(bytes))
    }

    /// Reads a big-endian integer of at most 32 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FeltError::InputTooLong`] for slices longer than 32 bytes.
    pub fn from_byte_slice_be(bytes: &[u8]) -> Result<Self, FeltError> {
        if bytes.len() > 32 {
            return Err(FeltError::InputTooLong { max: 32, actual: bytes.len() });
        }
        Ok(Self::from_u256(U256::from_big_endian(bytes)))
    }

    /// Initializes from a hex string.
    ///
    /// # Arguments
    ///
    /// * `value` - A hex string, with or without the `0x` prefix and padding zeros.
    ///
    /// # Errors
    ///
    /// Returns [`FeltError::InvalidEncoding`] if the string is empty, contains a non hex
    /// character or holds more than 64 digits.
    pub fn from_hex_be(value: &str) -> Result<Self, FeltError> {
        let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value);
        if digits.is_empty() {
            return Err(FeltError::InvalidEncoding(format!("empty hex string {value:?}")));
        }
        if digits.len() > 64 {
            return Err(FeltError::InvalidEncoding(format!("hex string {value:?} exceeds 32 bytes")));
        }

        let padded = format!("{digits:0>64}");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(padded, &mut bytes)
            .map_err(|e| FeltError::InvalidEncoding(format!("invalid hex string {value:?}: {e}")))?;

        Ok(Self::from_bytes_be(&bytes))
    }

    /// Initializes from a decimal string.
    ///
    /// # Errors
    ///
    /// Returns [`FeltError::InvalidEncoding`] on empty input, invalid digits or values
    /// that do not fit in 256 bits.
    pub fn from_dec_str(value: &str) -> Result<Self, FeltError> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FeltError::InvalidEncoding(format!("invalid decimal string {value:?}")));
        }
        let value = U256::from_dec_str(value)
            .map_err(|e| FeltError::InvalidEncoding(format!("invalid decimal string {value:?}: {e:?}")))?;
        Ok(Self::from_u256(value))
    }

    /// Big-endian, left zero padded bytes.
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let mut buf = [0u8; 32];
        self.0.to_big_endian(&mut buf);
        buf
    }

    /// Little-endian, right zero padded bytes.
    pub fn to_bytes_le(&self) -> [u8; 32] {
        let mut buf = [0u8; 32];
        self.0.to_little_endian(&mut buf);
        buf
    }

    pub fn to_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Number of significant bits.
    pub fn bits(&self) -> usize {
        self.0.bits()
    }

    /// Raises the element to `exponent` by square-and-multiply.
    pub fn pow(&self, exponent: U256) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;
        for i in 0..exponent.bits() {
            if exponent.bit(i) {
                result *= base;
            }
            base *= base;
        }
        result
    }

    /// Multiplicative inverse computed as `self^(P - 2)`.
    ///
    /// # Errors
    ///
    /// Returns [`FeltError::DivisionByZero`] for zero.
    pub fn inverse(&self) -> Result<Self, FeltError> {
        if self.is_zero() {
            return Err(FeltError::DivisionByZero);
        }
        Ok(self.pow(MODULUS - U256::from(2u8)))
    }

    /// Field division.
    ///
    /// # Errors
    ///
    /// Returns [`FeltError::DivisionByZero`] when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, FeltError> {
        Ok(*self * rhs.inverse()?)
    }

    /// Integer remainder of the canonical representative by `modulus`.
    ///
    /// # Errors
    ///
    /// Returns [`FeltError::DivisionByZero`] when `modulus` is zero.
    pub fn mod_floor(&self, modulus: U256) -> Result<Self, FeltError> {
        if modulus.is_zero() {
            return Err(FeltError::DivisionByZero);
        }
        Ok(Self(self.0 % modulus))
    }

    /// Minimal `0x` prefixed lowercase hex representation (`0x0` for zero).
    pub fn to_hex_string(&self) -> String {
        let encoded = hex::encode(self.to_bytes_be());
        let trimmed = encoded.trim_start_matches('0');
        if trimmed.is_empty() { "0x0".to_string() } else { format!("0x{trimmed}") }
    }

    /// `0x` prefixed hex representation padded to 64 digits.
    pub fn to_fixed_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes_be()))
    }
}

fn mul_mod(a: U256, b: U256) -> U256 {
    let modulus = U512([MODULUS.0[0], MODULUS.0[1], MODULUS.0[2], MODULUS.0[3], 0, 0, 0, 0]);
    let product = a.full_mul(b) % modulus;
    let mut buf = [0u8; 64];
    product.to_big_endian(&mut buf);
    U256::from_big_endian(&buf[32..])
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        // Both operands are below 2^252, the sum cannot overflow 256 bits.
        let sum = self.0 + rhs.0;
        if sum >= MODULUS { Self(sum - MODULUS) } else { Self(sum) }
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        if self.0 >= rhs.0 { Self(self.0 - rhs.0) } else { Self(MODULUS - (rhs.0 - self.0)) }
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(mul_mod(self.0, rhs.0))
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

macro_rules! from_unsigned {
    ($($t:ty),+) => {
        $(
            impl From<$t> for FieldElement {
                fn from(value: $t) -> Self {
                    Self(U256::from(value))
                }
            }
        )+
    };
}

from_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! try_into_unsigned {
    ($($t:ty),+) => {
        $(
            impl TryFrom<FieldElement> for $t {
                type Error = FeltError;

                fn try_from(value: FieldElement) -> Result<Self, Self::Error> {
                    if value.0 > U256::from(<$t>::MAX) {
                        return Err(FeltError::ValueTooLarge);
                    }
                    Ok(value.0.low_u128() as $t)
                }
            }
        )+
    };
}

try_into_unsigned!(u8, u16, u32, u64, u128, usize);

impl From<bool> for FieldElement {
    fn from(value: bool) -> Self {
        if value { Self::ONE } else { Self::ZERO }
    }
}

/// [`FieldElement`] from [`U256`], reduced modulo `P`.
impl From<U256> for FieldElement {
    fn from(value: U256) -> Self {
        Self::from_u256(value)
    }
}

impl From<FieldElement> for U256 {
    fn from(felt: FieldElement) -> Self {
        felt.0
    }
}

/// Ethereum addresses always fit in a field element.
impl From<H160> for FieldElement {
    fn from(address: H160) -> Self {
        Self(U256::from_big_endian(address.as_bytes()))
    }
}

/// [`FieldElement`] to an Ethereum address.
/// Fails with [`FeltError::ValueTooLarge`] when the value needs more than 160 bits.
impl TryFrom<FieldElement> for H160 {
    type Error = FeltError;

    fn try_from(felt: FieldElement) -> Result<Self, Self::Error> {
        if felt.bits() > 160 {
            return Err(FeltError::ValueTooLarge);
        }
        Ok(H160::from_slice(&felt.to_bytes_be()[12..]))
    }
}

impl From<FieldElement> for [u8; 32] {
    fn from(felt: FieldElement) -> Self {
        felt.to_bytes_be()
    }
}

impl FromStr for FieldElement {
    type Err = FeltError;

    /// Hex when `0x` prefixed, decimal otherwise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") { Self::from_hex_be(s) } else { Self::from_dec_str(s) }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({})", self.to_hex_string())
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex_string();
        if f.alternate() { f.write_str(&hex) } else { f.write_str(&hex[2..]) }
    }
}
