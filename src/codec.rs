//! Byte order and width handling for scalar values.
//!
//! This module provides the pure, I/O-free half of the read/write engine: converting
//! between byte sequences and typed scalar values in both little-endian and big-endian
//! order. It is built around the [`crate::codec::Scalar`] trait which provides a unified
//! interface over all fixed-width primitive types, plus a family of variable-width
//! two's-complement routines for integers of 1 to 8 bytes.
//!
//! # Key Components
//!
//! ## Core Trait
//! - [`crate::codec::Scalar`] - Endian-aware conversion for `u8`/`i8` through `u64`/`i64`,
//!   `f32` and `f64`
//!
//! ## Fixed-Width Helpers
//! - [`crate::codec::decode_le`] / [`crate::codec::decode_be`] - Decode a `Scalar` from
//!   the start of a buffer
//! - [`crate::codec::encode_le`] / [`crate::codec::encode_be`] - Encode a `Scalar` into
//!   a freshly allocated buffer
//!
//! ## Variable-Width Routines
//! - [`crate::codec::decode_int`] / [`crate::codec::decode_uint`] - Sign-extending and
//!   zero-extending decode of 1..=8 byte integers
//! - [`crate::codec::encode_int`] / [`crate::codec::encode_uint`] - Range-checked encode
//!   of 1..=8 byte integers
//!
//! # Usage Examples
//!
//! ```rust
//! use binfile::codec::{decode_be, decode_int, ByteOrder};
//!
//! let data = [0x12, 0x34, 0x56, 0x78];
//! let value: u32 = decode_be(&data)?;
//! assert_eq!(value, 0x1234_5678);
//!
//! // A 3-byte negative two's-complement integer, sign-extended to i64
//! let value = decode_int(&[0xFF, 0xFF, 0xFE], ByteOrder::Big)?;
//! assert_eq!(value, -2);
//! # Ok::<(), binfile::Error>(())
//! ```
//!
//! # Error Handling
//!
//! The fixed-width helpers return [`crate::Error::TornIo`] when the buffer is not exactly
//! as long as the target type. The variable-width routines return
//! [`crate::Error::UnsupportedWidth`] for widths outside `1..=8` and, on the encode side,
//! [`crate::Error::ValueOutOfRange`] when the value does not fit in the requested width.
//! All checks happen before anything is read or produced.

use crate::{Error, Result};

/// Byte order of a multi-byte scalar on disk.
///
/// The byte layouts produced and consumed by this crate are exactly the standard
/// two's-complement and IEEE-754 encodings in one of these two orders - no custom framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

/// Trait for implementing type-specific, endian-aware scalar conversion.
///
/// This trait provides a unified interface for converting primitive types to and from
/// fixed-size byte arrays in both little-endian and big-endian formats. It is implemented
/// for all integer widths from 1 to 8 bytes in both signednesses, plus IEEE-754 single
/// and double precision floats.
///
/// Each implementation defines a `Bytes` associated type that represents the fixed-size
/// byte array for that particular type (e.g. `[u8; 4]` for `u32`). Through this trait,
/// every fixed-width typed accessor on [`crate::FileReader`] and [`crate::FileWriter`]
/// is a thin instantiation of one generic routine rather than a hand-written method
/// per width and order.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::Scalar;
///
/// let bytes = [0x00, 0x00, 0x00, 0x01];
/// assert_eq!(<u32 as Scalar>::from_be_bytes(bytes), 1);
/// assert_eq!(1u32.to_be_bytes(), bytes);
/// ```
pub trait Scalar: Sized {
    /// Fixed-size byte array type holding the on-disk form of this scalar.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Decode `Self` from its little-endian byte representation
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Decode `Self` from its big-endian byte representation
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Encode `self` into its little-endian byte representation
    fn to_le_bytes(self) -> Self::Bytes;
    /// Encode `self` into its big-endian byte representation
    fn to_be_bytes(self) -> Self::Bytes;
}

macro_rules! impl_scalar {
    ($($ty:ty => $len:literal),* $(,)?) => {
        $(
            impl Scalar for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_scalar! {
    u8 => 1, i8 => 1,
    u16 => 2, i16 => 2,
    u32 => 4, i32 => 4,
    u64 => 8, i64 => 8,
    f32 => 4, f64 => 8,
}

/// Decode a value of type `T` from a buffer in little-endian byte order.
///
/// The buffer must be exactly `size_of::<T>()` bytes long; the callers in this crate
/// obtain it from a bounds-checked read of that exact length.
///
/// # Arguments
/// * `data` - The bytes holding the on-disk form of the value
///
/// # Errors
/// Returns [`crate::Error::TornIo`] if `data` is not exactly the width of `T`.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::decode_le;
///
/// let data = [0x01, 0x00, 0x00, 0x00];
/// let value: u32 = decode_le(&data)?;
/// assert_eq!(value, 1);
/// # Ok::<(), binfile::Error>(())
/// ```
pub fn decode_le<T: Scalar>(data: &[u8]) -> Result<T> {
    Ok(T::from_le_bytes(exact_bytes::<T>(data)?))
}

/// Decode a value of type `T` from a buffer in big-endian byte order.
///
/// # Arguments
/// * `data` - The bytes holding the on-disk form of the value
///
/// # Errors
/// Returns [`crate::Error::TornIo`] if `data` is not exactly the width of `T`.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::decode_be;
///
/// let data = [0x00, 0x00, 0x00, 0x01];
/// let value: u32 = decode_be(&data)?;
/// assert_eq!(value, 1);
/// # Ok::<(), binfile::Error>(())
/// ```
pub fn decode_be<T: Scalar>(data: &[u8]) -> Result<T> {
    Ok(T::from_be_bytes(exact_bytes::<T>(data)?))
}

/// Encode a value of type `T` into a freshly allocated buffer in little-endian byte order.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::encode_le;
///
/// assert_eq!(encode_le(1u32), vec![0x01, 0x00, 0x00, 0x00]);
/// ```
#[must_use]
pub fn encode_le<T: Scalar>(value: T) -> Vec<u8> {
    value.to_le_bytes().as_ref().to_vec()
}

/// Encode a value of type `T` into a freshly allocated buffer in big-endian byte order.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::encode_be;
///
/// assert_eq!(encode_be(1u32), vec![0x00, 0x00, 0x00, 0x01]);
/// ```
#[must_use]
pub fn encode_be<T: Scalar>(value: T) -> Vec<u8> {
    value.to_be_bytes().as_ref().to_vec()
}

fn exact_bytes<T: Scalar>(data: &[u8]) -> Result<T::Bytes> {
    let type_len = std::mem::size_of::<T>();
    let Ok(bytes) = T::Bytes::try_from(data) else {
        return Err(Error::TornIo {
            expected: type_len,
            actual: data.len(),
        });
    };

    Ok(bytes)
}

/// Decode an unsigned two's-complement integer of 1 to 8 bytes.
///
/// The width is taken from the length of `data`. This is the parameterized core that
/// the variable-width accessors of [`crate::FileReader`] delegate to.
///
/// # Arguments
/// * `data` - The encoded integer; its length selects the width
/// * `order` - Byte order of the encoding
///
/// # Errors
/// Returns [`crate::Error::UnsupportedWidth`] if the width is outside `1..=8`.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::{decode_uint, ByteOrder};
///
/// let value = decode_uint(&[0x12, 0x34, 0x56], ByteOrder::Big)?;
/// assert_eq!(value, 0x12_3456);
/// # Ok::<(), binfile::Error>(())
/// ```
pub fn decode_uint(data: &[u8], order: ByteOrder) -> Result<u64> {
    let width = data.len();
    check_width("decode_uint", width)?;

    let mut value = 0u64;
    match order {
        ByteOrder::Big => {
            for byte in data {
                value = (value << 8) | u64::from(*byte);
            }
        }
        ByteOrder::Little => {
            for byte in data.iter().rev() {
                value = (value << 8) | u64::from(*byte);
            }
        }
    }

    Ok(value)
}

/// Decode a signed two's-complement integer of 1 to 8 bytes, sign-extending to `i64`.
///
/// # Arguments
/// * `data` - The encoded integer; its length selects the width
/// * `order` - Byte order of the encoding
///
/// # Errors
/// Returns [`crate::Error::UnsupportedWidth`] if the width is outside `1..=8`.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::{decode_int, ByteOrder};
///
/// let value = decode_int(&[0xFE, 0xFF], ByteOrder::Little)?;
/// assert_eq!(value, -2);
/// # Ok::<(), binfile::Error>(())
/// ```
pub fn decode_int(data: &[u8], order: ByteOrder) -> Result<i64> {
    let width = data.len();
    check_width("decode_int", width)?;

    let raw = decode_uint(data, order)?;
    if width < 8 {
        let shift = width * 8;
        if raw & (1 << (shift - 1)) != 0 {
            // Negative value, extend the sign bits into the upper bytes.
            return Ok((raw | (u64::MAX << shift)) as i64);
        }
    }

    Ok(raw as i64)
}

/// Encode an unsigned integer into 1 to 8 bytes.
///
/// # Arguments
/// * `value` - The value to encode
/// * `width` - Number of bytes to produce
/// * `order` - Byte order of the encoding
///
/// # Errors
/// Returns [`crate::Error::UnsupportedWidth`] if the width is outside `1..=8`, or
/// [`crate::Error::ValueOutOfRange`] if `value` does not fit in `width` bytes.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::{encode_uint, ByteOrder};
///
/// let bytes = encode_uint(0x12_3456, 3, ByteOrder::Big)?;
/// assert_eq!(bytes, vec![0x12, 0x34, 0x56]);
/// # Ok::<(), binfile::Error>(())
/// ```
pub fn encode_uint(value: u64, width: usize, order: ByteOrder) -> Result<Vec<u8>> {
    check_width("encode_uint", width)?;
    if width < 8 && value >> (width * 8) != 0 {
        return Err(Error::ValueOutOfRange { width });
    }

    Ok(raw_bytes(value, width, order))
}

/// Encode a signed integer into 1 to 8 bytes of two's complement.
///
/// # Arguments
/// * `value` - The value to encode
/// * `width` - Number of bytes to produce
/// * `order` - Byte order of the encoding
///
/// # Errors
/// Returns [`crate::Error::UnsupportedWidth`] if the width is outside `1..=8`, or
/// [`crate::Error::ValueOutOfRange`] if `value` does not fit in `width` bytes.
///
/// # Examples
///
/// ```rust
/// use binfile::codec::{encode_int, ByteOrder};
///
/// let bytes = encode_int(-2, 2, ByteOrder::Little)?;
/// assert_eq!(bytes, vec![0xFE, 0xFF]);
/// # Ok::<(), binfile::Error>(())
/// ```
pub fn encode_int(value: i64, width: usize, order: ByteOrder) -> Result<Vec<u8>> {
    check_width("encode_int", width)?;
    if width < 8 {
        let bits = width as u32 * 8;
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        if value < min || value > max {
            return Err(Error::ValueOutOfRange { width });
        }
    }

    Ok(raw_bytes(value as u64, width, order))
}

pub(crate) fn check_width(operation: &'static str, width: usize) -> Result<()> {
    if width == 0 || width > 8 {
        return Err(Error::UnsupportedWidth { operation, width });
    }
    Ok(())
}

fn raw_bytes(value: u64, width: usize, order: ByteOrder) -> Vec<u8> {
    let full = value.to_be_bytes();
    match order {
        ByteOrder::Big => full[8 - width..].to_vec(),
        ByteOrder::Little => full[8 - width..].iter().rev().copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn decode_le_u16() {
        let result = decode_le::<u16>(&TEST_BUFFER[..2]).unwrap();
        assert_eq!(result, 0x0201);
    }

    #[test]
    fn decode_le_u32() {
        let result = decode_le::<u32>(&TEST_BUFFER[..4]).unwrap();
        assert_eq!(result, 0x0403_0201);
    }

    #[test]
    fn decode_le_u64() {
        let result = decode_le::<u64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0807_0605_0403_0201);
    }

    #[test]
    fn decode_be_u16() {
        let result = decode_be::<u16>(&TEST_BUFFER[..2]).unwrap();
        assert_eq!(result, 0x0102);
    }

    #[test]
    fn decode_be_i32() {
        let result = decode_be::<i32>(&TEST_BUFFER[..4]).unwrap();
        assert_eq!(result, 0x0102_0304);
    }

    #[test]
    fn decode_be_u64() {
        let result = decode_be::<u64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0102_0304_0506_0708);
    }

    #[test]
    fn decode_f64_round_trip() {
        let bytes = encode_le(1234.5678_f64);
        let result = decode_le::<f64>(&bytes).unwrap();
        assert_eq!(result, 1234.5678);
    }

    #[test]
    fn decode_f32_round_trip() {
        let bytes = encode_be(-0.5_f32);
        let result = decode_be::<f32>(&bytes).unwrap();
        assert_eq!(result, -0.5);
    }

    #[test]
    fn decode_wrong_length() {
        let result = decode_le::<u32>(&TEST_BUFFER[..3]);
        assert!(matches!(
            result,
            Err(Error::TornIo {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn encode_le_i16() {
        assert_eq!(encode_le(-2i16), vec![0xFE, 0xFF]);
    }

    #[test]
    fn encode_be_u32() {
        assert_eq!(encode_be(0x1234_5678u32), vec![0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn uint_be_all_widths() {
        for width in 1..=8usize {
            let bytes = encode_uint(0x01, width, ByteOrder::Big).unwrap();
            assert_eq!(bytes.len(), width);
            assert_eq!(decode_uint(&bytes, ByteOrder::Big).unwrap(), 0x01);
        }
    }

    #[test]
    fn uint_le_all_widths() {
        for width in 1..=8usize {
            let max = if width < 8 {
                (1u64 << (width * 8)) - 1
            } else {
                u64::MAX
            };
            let bytes = encode_uint(max, width, ByteOrder::Little).unwrap();
            assert_eq!(decode_uint(&bytes, ByteOrder::Little).unwrap(), max);
        }
    }

    #[test]
    fn int_sign_extension() {
        let value = decode_int(&[0xFF], ByteOrder::Big).unwrap();
        assert_eq!(value, -1);

        let value = decode_int(&[0xFF, 0xFF, 0xFE], ByteOrder::Big).unwrap();
        assert_eq!(value, -2);

        let value = decode_int(&[0x7F, 0xFF], ByteOrder::Big).unwrap();
        assert_eq!(value, 0x7FFF);
    }

    #[test]
    fn int_round_trip_all_widths() {
        for width in 1..=8usize {
            let min = if width < 8 {
                -(1i64 << (width * 8 - 1))
            } else {
                i64::MIN
            };
            for order in [ByteOrder::Big, ByteOrder::Little] {
                let bytes = encode_int(min, width, order).unwrap();
                assert_eq!(decode_int(&bytes, order).unwrap(), min);

                let bytes = encode_int(-1, width, order).unwrap();
                assert_eq!(decode_int(&bytes, order).unwrap(), -1);
            }
        }
    }

    #[test]
    fn uint_width_gate() {
        assert!(matches!(
            decode_uint(&[0u8; 9], ByteOrder::Big),
            Err(Error::UnsupportedWidth {
                operation: "decode_uint",
                width: 9
            })
        ));
        assert!(matches!(
            encode_uint(1, 0, ByteOrder::Big),
            Err(Error::UnsupportedWidth {
                operation: "encode_uint",
                width: 0
            })
        ));
        assert!(matches!(
            decode_int(&[], ByteOrder::Little),
            Err(Error::UnsupportedWidth { width: 0, .. })
        ));
    }

    #[test]
    fn encode_uint_range_check() {
        assert!(encode_uint(0xFF, 1, ByteOrder::Big).is_ok());
        assert!(matches!(
            encode_uint(0x100, 1, ByteOrder::Big),
            Err(Error::ValueOutOfRange { width: 1 })
        ));
        assert!(encode_uint(u64::MAX, 8, ByteOrder::Big).is_ok());
    }

    #[test]
    fn encode_int_range_check() {
        assert!(encode_int(127, 1, ByteOrder::Big).is_ok());
        assert!(encode_int(-128, 1, ByteOrder::Big).is_ok());
        assert!(matches!(
            encode_int(128, 1, ByteOrder::Big),
            Err(Error::ValueOutOfRange { width: 1 })
        ));
        assert!(matches!(
            encode_int(-129, 1, ByteOrder::Big),
            Err(Error::ValueOutOfRange { width: 1 })
        ));
        assert!(encode_int(i64::MIN, 8, ByteOrder::Big).is_ok());
    }

    #[test]
    fn mixed_order_disagrees() {
        let be = encode_uint(0x0102, 2, ByteOrder::Big).unwrap();
        let le = encode_uint(0x0102, 2, ByteOrder::Little).unwrap();
        assert_eq!(be, vec![0x01, 0x02]);
        assert_eq!(le, vec![0x02, 0x01]);
    }
}
