//! Fixed-width ASCII-hex decoding.
//!
//! The UART wire format carries every numeric field as ASCII hex, and the
//! checksum is computed over decoded byte pairs. These helpers decode
//! directly from payload bytes — no intermediate strings, no locale or
//! prefix handling — so width and overflow behavior are explicit and
//! independently testable.

use crate::constants::MAX_HEX_DIGITS;
use crate::error::{Error, Result};

/// Decode up to [`MAX_HEX_DIGITS`] ASCII-hex digits into a `u64`.
///
/// Digits are interpreted most-significant first. Both cases are accepted.
///
/// # Errors
///
/// Returns [`Error::HexOverflow`] when `digits` is longer than
/// [`MAX_HEX_DIGITS`], or [`Error::InvalidHexDigit`] on the first byte that
/// is not a hex digit.
///
/// # Examples
///
/// ```
/// use tagport_core::hex::decode_hex;
///
/// assert_eq!(decode_hex(b"0200").unwrap(), 0x0200);
/// assert_eq!(decode_hex(b"001a2b").unwrap(), 0x001A2B);
/// assert!(decode_hex(b"12G4").is_err());
/// ```
pub fn decode_hex(digits: &[u8]) -> Result<u64> {
    if digits.len() > MAX_HEX_DIGITS {
        return Err(Error::HexOverflow {
            len: digits.len(),
            max: MAX_HEX_DIGITS,
        });
    }

    let mut value = 0u64;
    for (offset, &byte) in digits.iter().enumerate() {
        value = (value << 4) | u64::from(hex_digit(byte, offset)?);
    }
    Ok(value)
}

/// Decode one byte from a pair of ASCII-hex digits.
///
/// This is the unit the frame checksum is XOR-folded over.
///
/// # Errors
///
/// Returns [`Error::InvalidHexDigit`] if either byte is not a hex digit.
///
/// # Examples
///
/// ```
/// use tagport_core::hex::decode_hex_pair;
///
/// assert_eq!(decode_hex_pair(b'2', b'B').unwrap(), 0x2B);
/// ```
pub fn decode_hex_pair(hi: u8, lo: u8) -> Result<u8> {
    Ok((hex_digit(hi, 0)? << 4) | hex_digit(lo, 1)?)
}

fn hex_digit(byte: u8, offset: usize) -> Result<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(Error::InvalidHexDigit { byte, offset }),
    }
}
