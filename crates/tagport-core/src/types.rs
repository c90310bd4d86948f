use crate::constants::{PAYLOAD_LENGTH, WIEGAND_26_BITS, WIEGAND_35_BITS};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported Wiegand frame lengths.
///
/// Only the standard 26-bit format and the 35-bit HID Corporate 1000
/// format are decodable. Constructing a decoder with any other length
/// would silently starve — the bit counter could never equal the expected
/// frame length — so [`WiegandFormat::from_bits`] rejects it up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WiegandFormat {
    /// Standard 26-bit frame: two parity bits around a 24-bit payload.
    Bits26,
    /// 35-bit HID Corporate 1000 frame: 12-bit facility code and 20-bit
    /// card code.
    Bits35,
}

impl WiegandFormat {
    /// Create a format from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFrameLength`] for any length other than
    /// 26 or 35.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagport_core::WiegandFormat;
    ///
    /// assert_eq!(WiegandFormat::from_bits(26).unwrap(), WiegandFormat::Bits26);
    /// assert!(WiegandFormat::from_bits(34).is_err());
    /// ```
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            WIEGAND_26_BITS => Ok(WiegandFormat::Bits26),
            WIEGAND_35_BITS => Ok(WiegandFormat::Bits35),
            _ => Err(Error::UnsupportedFrameLength { bits }),
        }
    }

    /// Number of bits in a complete frame of this format.
    #[must_use]
    pub fn bit_count(self) -> usize {
        match self {
            WiegandFormat::Bits26 => WIEGAND_26_BITS as usize,
            WiegandFormat::Bits35 => WIEGAND_35_BITS as usize,
        }
    }
}

impl fmt::Display for WiegandFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bit_count())
    }
}

/// A decoded tag, produced by either decoder.
///
/// The record starts each decode cycle in the all-zero invalid state
/// ([`TagRecord::default`]) and `valid` flips to true only after the
/// decoder's validation step (checksum or parity) succeeds — never
/// speculatively. Callers must check `valid` before trusting
/// `manufacturer_code` or `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagRecord {
    /// Manufacturer code (2 bytes). Meaningful in UART mode; in 35-bit
    /// Wiegand mode the facility code is carried here instead.
    pub manufacturer_code: u16,

    /// Card/tag identifier (up to 3 bytes).
    pub id: u32,

    /// Declared frame checksum. Meaningful only in UART mode.
    pub checksum: u8,

    /// True only after checksum (UART) or parity (Wiegand) validation
    /// succeeded.
    pub valid: bool,

    /// The undecoded hex payload, for diagnostics. Populated only in UART
    /// mode; all zero otherwise.
    pub raw: [u8; PAYLOAD_LENGTH],
}

impl TagRecord {
    /// Whether the validation step of the producing decoder succeeded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The raw payload as a string slice, when one was captured.
    ///
    /// Returns `None` for records produced in Wiegand mode (the buffer is
    /// all zero) or if the captured bytes are not printable ASCII.
    #[must_use]
    pub fn raw_str(&self) -> Option<&str> {
        if self.raw.iter().all(|b| b.is_ascii_graphic()) {
            std::str::from_utf8(&self.raw).ok()
        } else {
            None
        }
    }
}

impl fmt::Display for TagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TagRecord[mfr={:04X}, id={:06X}, chk={:02X}, valid={}]",
            self.manufacturer_code, self.id, self.checksum, self.valid
        )
    }
}
