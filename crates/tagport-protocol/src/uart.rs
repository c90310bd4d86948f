//! Frame decoder for the serial ASCII-hex wire format.
//!
//! Readers on the UART transport emit one delimited frame per tag
//! presentation:
//!
//! ```text
//! STX  MMMM IIIIII CC  ETX
//! 0x02 <12 hex characters> 0x03
//! ```
//!
//! The decoder consumes one byte at a time and extracts complete frames
//! with a state machine that detects the STX/ETX markers.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐   STX byte    ┌─────────┐  ETX after 12 bytes  ┌─────────────┐
//! │ Idle │──────────────>│ Reading │─────────────────────>│Record ready │
//! └──────┘               └─────────┘                      └─────────────┘
//!    ^  │                     │ │                                │
//!    │  │ non-STX bytes       │ │ STX (restart capture)          │
//!    │  │ (discarded)         │ │ ETX at any other count         │
//!    │  └─────────────────────┘ │ (frame discarded)              │
//!    │                          │                                │
//!    └──────────────────────────┴────────────────────────────────┘
//!                                          take_result() called
//! ```
//!
//! Payload capture is bounded at exactly twelve bytes. A thirteenth
//! non-marker byte writes nowhere and poisons the cycle; the closing
//! marker then discards the frame instead of finalizing garbage.
//!
//! # Usage
//!
//! ```
//! use tagport_protocol::UartFrameDecoder;
//!
//! let mut decoder = UartFrameDecoder::new();
//!
//! let mut frame = vec![0x02];
//! frame.extend_from_slice(b"0200001A2B33");
//! frame.push(0x03);
//!
//! let mut complete = false;
//! for byte in frame {
//!     complete = decoder.feed(byte);
//! }
//! assert!(complete);
//!
//! let tag = decoder.take_result();
//! assert!(tag.valid);
//! assert_eq!(tag.manufacturer_code, 0x0200);
//! assert_eq!(tag.id, 0x001A2B);
//! ```

use tagport_core::TagRecord;
use tagport_core::constants::{
    CHECKSUM_PAIR_COUNT, END_BYTE, ID_HEX_DIGITS, MANUFACTURER_HEX_DIGITS, PAYLOAD_LENGTH,
    START_BYTE,
};
use tagport_core::hex;
use tracing::{debug, trace, warn};

/// State machine states for frame capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Waiting for the STX (0x02) start marker. Anything else is garbage
    /// and is discarded.
    Idle,

    /// Accumulating payload bytes until the ETX (0x03) end marker.
    Reading,
}

/// Stateful byte-at-a-time decoder for the serial wire format.
///
/// The decoder owns a fixed 12-byte payload buffer; there is no dynamic
/// allocation anywhere on the feed path. One record is held between
/// finalization and [`take_result`](UartFrameDecoder::take_result); a new
/// start marker discards it along with any partial capture.
#[derive(Debug)]
pub struct UartFrameDecoder {
    state: FrameState,

    /// Payload bytes captured since the last start marker.
    payload: [u8; PAYLOAD_LENGTH],

    /// Number of payload bytes captured so far.
    captured: usize,

    /// Set when a non-marker byte arrived with the payload already full.
    overflowed: bool,

    /// The record produced by the last finalized frame.
    tag: TagRecord,

    /// Whether `tag` holds an unconsumed finalized record.
    available: bool,
}

impl UartFrameDecoder {
    /// Create a decoder in the idle state.
    pub fn new() -> Self {
        Self {
            state: FrameState::Idle,
            payload: [0u8; PAYLOAD_LENGTH],
            captured: 0,
            overflowed: false,
            tag: TagRecord::default(),
            available: false,
        }
    }

    /// Current state of the capture state machine.
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Whether a finalized record is waiting to be taken.
    pub fn is_ready(&self) -> bool {
        self.available
    }

    /// Consume one byte from the transport.
    ///
    /// Returns true exactly when this byte completed a 12-byte frame and
    /// the record was finalized — valid or not; a frame whose checksum
    /// fails verification is still handed to the caller, which must
    /// inspect [`TagRecord::valid`]. Short and overlong frames are
    /// discarded silently and return false.
    pub fn feed(&mut self, byte: u8) -> bool {
        match byte {
            START_BYTE => {
                self.begin_frame();
                false
            }
            END_BYTE if self.state == FrameState::Reading => self.finish_frame(),
            _ => {
                self.capture(byte);
                false
            }
        }
    }

    /// Take the pending record, leaving the zeroed invalid record behind.
    ///
    /// Safe to call with nothing pending; the reset record is returned.
    pub fn take_result(&mut self) -> TagRecord {
        self.available = false;
        std::mem::take(&mut self.tag)
    }

    /// Abandon the current cycle: discard any partial capture and any
    /// unconsumed record, returning to the idle state.
    pub fn reset_cycle(&mut self) {
        self.state = FrameState::Idle;
        self.captured = 0;
        self.overflowed = false;
        self.available = false;
        self.tag = TagRecord::default();
    }

    /// Start a fresh capture cycle, discarding any partially-read frame
    /// and any unconsumed record.
    fn begin_frame(&mut self) {
        trace!("frame start marker");
        self.captured = 0;
        self.overflowed = false;
        self.tag = TagRecord::default();
        self.available = false;
        self.state = FrameState::Reading;
    }

    /// Append a payload byte, bounded at the fixed frame length.
    fn capture(&mut self, byte: u8) {
        if self.state != FrameState::Reading {
            return;
        }
        if self.captured < PAYLOAD_LENGTH {
            self.payload[self.captured] = byte;
            self.captured += 1;
        } else {
            self.overflowed = true;
        }
    }

    /// Handle the end marker: finalize a well-formed frame, discard the
    /// rest.
    fn finish_frame(&mut self) -> bool {
        self.state = FrameState::Idle;

        if self.overflowed || self.captured != PAYLOAD_LENGTH {
            warn!(
                captured = self.captured,
                overflowed = self.overflowed,
                "discarding malformed frame"
            );
            self.captured = 0;
            self.overflowed = false;
            return false;
        }

        self.tag = finalize(&self.payload);
        self.available = true;
        true
    }
}

impl Default for UartFrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode and verify a complete 12-character payload.
///
/// The first 4 hex characters are the manufacturer code, the next 6 the
/// id, the final 2 the declared checksum. The verification checksum is the
/// XOR of the five byte pairs decoded from the first 10 characters. A
/// payload containing a non-hex digit produces an invalid record with only
/// the raw buffer populated.
fn finalize(payload: &[u8; PAYLOAD_LENGTH]) -> TagRecord {
    let mut tag = TagRecord {
        raw: *payload,
        ..TagRecord::default()
    };

    let id_end = MANUFACTURER_HEX_DIGITS + ID_HEX_DIGITS;
    let decoded = hex::decode_hex(&payload[..MANUFACTURER_HEX_DIGITS]).and_then(|mfr| {
        let id = hex::decode_hex(&payload[MANUFACTURER_HEX_DIGITS..id_end])?;
        let declared = hex::decode_hex_pair(payload[id_end], payload[id_end + 1])?;
        Ok((mfr as u16, id as u32, declared))
    });

    let (manufacturer_code, id, declared) = match decoded {
        Ok(fields) => fields,
        Err(err) => {
            warn!(%err, "frame payload is not valid hex");
            return tag;
        }
    };

    let mut computed = 0u8;
    for pair in 0..CHECKSUM_PAIR_COUNT {
        // Pairs are known-good hex at this point; the id decode above
        // covered the same bytes.
        match hex::decode_hex_pair(payload[2 * pair], payload[2 * pair + 1]) {
            Ok(value) => computed ^= value,
            Err(_) => return tag,
        }
    }

    tag.manufacturer_code = manufacturer_code;
    tag.id = id;
    tag.checksum = declared;

    if computed == declared {
        tag.valid = true;
        debug!(%tag, "frame verified");
    } else {
        warn!(declared, computed, "checksum mismatch");
    }

    tag
}
