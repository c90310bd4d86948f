//! Wire-format constants for the supported reader protocols.
//!
//! This module defines the byte- and bit-level geometry of the two
//! identifier encodings emitted by low-cost RFID reader modules:
//!
//! # UART frame layout
//!
//! Readers on the serial transport emit one delimited ASCII-hex frame per
//! tag presentation:
//!
//! ```text
//! <STX> MMMM IIIIII CC <ETX>
//! 0x02  4 hex 6 hex 2 hex 0x03
//! ```
//!
//! Where `MMMM` is the manufacturer code, `IIIIII` the tag id and `CC` the
//! declared checksum: the XOR of the five byte-pair values decoded from the
//! first 10 hex characters.
//!
//! # Wiegand frame layout
//!
//! Readers on the two-line pulse interface emit one bit per line
//! transition, up to the configured frame length. Only the 26-bit and
//! 35-bit frame lengths are understood; any other length can never
//! complete a decode cycle and is rejected at configuration time.

// ============================================================================
// Frame Markers
// ============================================================================

/// Start of text marker (STX).
///
/// ASCII control character opening every UART frame. Any byte equal to
/// this value restarts payload capture, discarding a partially read frame.
pub const START_BYTE: u8 = 0x02; // STX

/// End of text marker (ETX).
///
/// ASCII control character closing a UART frame. Only a frame that
/// captured exactly [`PAYLOAD_LENGTH`] payload bytes is finalized.
pub const END_BYTE: u8 = 0x03; // ETX

/// Total bytes used for frame markers ([`START_BYTE`] + [`END_BYTE`]).
pub const FRAME_OVERHEAD: usize = 2;

// ============================================================================
// UART Payload Geometry
// ============================================================================

/// Number of ASCII-hex payload characters between the frame markers.
///
/// The payload splits into [`MANUFACTURER_HEX_DIGITS`] +
/// [`ID_HEX_DIGITS`] + [`CHECKSUM_HEX_DIGITS`] characters.
///
/// # Examples
///
/// ```
/// use tagport_core::constants::*;
///
/// assert_eq!(
///     PAYLOAD_LENGTH,
///     MANUFACTURER_HEX_DIGITS + ID_HEX_DIGITS + CHECKSUM_HEX_DIGITS
/// );
/// ```
pub const PAYLOAD_LENGTH: usize = 12;

/// Hex characters encoding the manufacturer code (2 bytes).
pub const MANUFACTURER_HEX_DIGITS: usize = 4;

/// Hex characters encoding the tag id (3 bytes).
pub const ID_HEX_DIGITS: usize = 6;

/// Hex characters encoding the declared checksum (1 byte).
pub const CHECKSUM_HEX_DIGITS: usize = 2;

/// Byte pairs covered by the checksum.
///
/// The checksum is the XOR of the five 8-bit values decoded from the
/// manufacturer-code and id characters (the first 10 payload characters).
pub const CHECKSUM_PAIR_COUNT: usize = 5;

// ============================================================================
// Wiegand Geometry
// ============================================================================

/// Capacity of the bit buffer, in bits.
///
/// Bits arriving once the buffer is full are dropped; the cycle is already
/// unrecoverable at that point and a reset starts fresh.
pub const MAX_DATA_BITS: usize = 100;

/// Standard 26-bit Wiegand frame length.
pub const WIEGAND_26_BITS: u8 = 26;

/// 35-bit HID Corporate 1000 frame length.
pub const WIEGAND_35_BITS: u8 = 35;

/// Frame length emitted by the common RFID "electronic brick" readers.
pub const DEFAULT_WIEGAND_BITS: u8 = WIEGAND_26_BITS;

// ============================================================================
// Serial Defaults
// ============================================================================

/// Baud rate the UART reader modules are fixed at.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

// ============================================================================
// Hex Utility Bounds
// ============================================================================

/// Maximum number of hex digits the conversion utility accepts.
///
/// 16 digits fill a `u64` exactly, which is wider than any field in either
/// wire format; longer inputs are rejected instead of silently truncated.
pub const MAX_HEX_DIGITS: usize = 16;
