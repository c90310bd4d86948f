//! Bit-event decoder for the two-line Wiegand interface.
//!
//! Wiegand readers signal each bit as a falling edge on one of two data
//! lines: an edge on D0 contributes a 0-bit, an edge on D1 a 1-bit, in
//! arrival order. Edges arrive from an asynchronous, high-priority context
//! that may interrupt the polling caller at any point — including mid-read
//! of the bit buffer.
//!
//! The decoder therefore keeps the bit buffer and counter behind a single
//! lock, owned by the decoder instance. Edge entry points acquire it for
//! an O(1) append and never decode; a poll copies the whole line state out
//! under the lock and decodes from that consistent snapshot. Handlers for
//! registration with the platform's edge-trigger facility are bound
//! closures over the shared state, so multiple independent decoders can
//! coexist.
//!
//! # Usage
//!
//! ```
//! use tagport_core::WiegandFormat;
//! use tagport_protocol::WiegandBitDecoder;
//!
//! let mut decoder = WiegandBitDecoder::new(WiegandFormat::Bits35);
//!
//! // 2 leading bits, 12 facility bits, 20 card bits, 1 trailing bit.
//! decoder.on_zero_bit();
//! decoder.on_zero_bit();
//! for _ in 0..12 {
//!     decoder.on_one_bit();
//! }
//! for _ in 0..20 {
//!     decoder.on_one_bit();
//! }
//! decoder.on_zero_bit();
//!
//! assert!(decoder.check_complete());
//! let tag = decoder.take_result();
//! assert!(tag.valid);
//! assert_eq!(tag.manufacturer_code, 0xFFF);
//! assert_eq!(tag.id, 0xFFFFF);
//! ```

use bitvec::prelude::*;
use std::sync::{Arc, Mutex, PoisonError};
use tagport_core::constants::MAX_DATA_BITS;
use tagport_core::transport::{EdgeHandler, EdgeInput};
use tagport_core::{Result, TagRecord, WiegandFormat};
use tracing::{debug, warn};

// 35-bit HID Corporate 1000 layout.
const FACILITY_RANGE_35: core::ops::Range<usize> = 2..14;
const CARD_RANGE_35: core::ops::Range<usize> = 14..34;

// Standard 26-bit layout: even parity bit, 24 data bits, odd parity bit.
const EVEN_PARITY_BIT_26: usize = 0;
const ODD_PARITY_BIT_26: usize = 25;
const CARD_RANGE_26: core::ops::Range<usize> = 1..25;
const EVEN_PARITY_RANGE_26: core::ops::Range<usize> = 1..13;
const ODD_PARITY_RANGE_26: core::ops::Range<usize> = 13..25;

type LineBits = BitArr!(for MAX_DATA_BITS, in u8, Msb0);

/// Bit buffer and counter, the only state shared with the edge context.
#[derive(Debug, Clone)]
struct LineState {
    bits: LineBits,
    count: usize,
}

impl LineState {
    fn new() -> Self {
        Self {
            bits: BitArray::ZERO,
            count: 0,
        }
    }

    /// Append one bit in arrival order. Saturates at capacity: the cycle
    /// is already unrecoverable once the buffer is full, so extra edges
    /// are dropped rather than wrapping or writing out of bounds.
    fn push(&mut self, bit: bool) {
        if self.count < MAX_DATA_BITS {
            self.bits.set(self.count, bit);
            self.count += 1;
        }
    }

    fn clear(&mut self) {
        self.bits = BitArray::ZERO;
        self.count = 0;
    }
}

/// Decoder accumulating line-edge bit events into tag records.
///
/// Configured once with a [`WiegandFormat`]; unsupported lengths never get
/// this far (see [`WiegandFormat::from_bits`]). Decoding happens only on
/// [`check_complete`](WiegandBitDecoder::check_complete) — the edge entry
/// points do nothing but append.
#[derive(Debug)]
pub struct WiegandBitDecoder {
    line: Arc<Mutex<LineState>>,
    format: WiegandFormat,
    tag: TagRecord,
    available: bool,
}

impl WiegandBitDecoder {
    /// Create a decoder for the given frame format, with an empty buffer.
    pub fn new(format: WiegandFormat) -> Self {
        Self {
            line: Arc::new(Mutex::new(LineState::new())),
            format,
            tag: TagRecord::default(),
            available: false,
        }
    }

    /// The configured frame format.
    pub fn format(&self) -> WiegandFormat {
        self.format
    }

    /// Record a 0-bit (falling edge on the D0 line). O(1), no decoding.
    pub fn on_zero_bit(&self) {
        push_bit(&self.line, false);
    }

    /// Record a 1-bit (falling edge on the D1 line). O(1), no decoding.
    pub fn on_one_bit(&self) {
        push_bit(&self.line, true);
    }

    /// A bound handler for the 0-bit line, for edge-trigger registration.
    pub fn zero_edge_handler(&self) -> EdgeHandler {
        let line = Arc::clone(&self.line);
        Box::new(move || push_bit(&line, false))
    }

    /// A bound handler for the 1-bit line, for edge-trigger registration.
    pub fn one_edge_handler(&self) -> EdgeHandler {
        let line = Arc::clone(&self.line);
        Box::new(move || push_bit(&line, true))
    }

    /// Register both handlers with their edge-triggered input lines.
    ///
    /// # Errors
    ///
    /// Propagates registration errors from the platform facility.
    pub fn attach<Z, O>(&self, zero_line: &mut Z, one_line: &mut O) -> Result<()>
    where
        Z: EdgeInput,
        O: EdgeInput,
    {
        zero_line.on_falling_edge(self.zero_edge_handler())?;
        one_line.on_falling_edge(self.one_edge_handler())
    }

    /// Number of bits accumulated in the current cycle.
    pub fn bit_count(&self) -> usize {
        self.line
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .count
    }

    /// Whether a decoded record is waiting to be taken.
    pub fn is_ready(&self) -> bool {
        self.available
    }

    /// Decode the buffered bits if a complete frame has arrived.
    ///
    /// Returns true when the bit counter matches the configured frame
    /// length *and* validation succeeded (the 35-bit format has no parity
    /// and validates unconditionally). On a parity failure the record
    /// stays invalid and the bit buffer is left untouched — it persists
    /// until the caller resets the cycle.
    ///
    /// The line state is copied out under the lock, so a poll always
    /// observes a consistent counter/buffer pair even while edges keep
    /// arriving.
    pub fn check_complete(&mut self) -> bool {
        let snapshot = self
            .line
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if snapshot.count != self.format.bit_count() {
            return false;
        }

        self.tag = TagRecord::default();
        match self.format {
            WiegandFormat::Bits35 => self.extract_35(&snapshot.bits),
            WiegandFormat::Bits26 => self.extract_26(&snapshot.bits),
        }
        self.available = self.tag.valid;
        self.available
    }

    /// Take the pending record, leaving the zeroed invalid record behind.
    pub fn take_result(&mut self) -> TagRecord {
        self.available = false;
        std::mem::take(&mut self.tag)
    }

    /// Clear the bit buffer and counter, readying the next cycle.
    pub fn reset_cycle(&mut self) {
        self.line
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.tag = TagRecord::default();
        self.available = false;
    }

    /// 35-bit HID Corporate 1000: 12-bit facility code in positions
    /// [2, 14), 20-bit card code in [14, 34). The format defines no parity
    /// check; a complete frame is valid as-is.
    fn extract_35(&mut self, bits: &LineBits) {
        let facility = fold_bits(&bits[FACILITY_RANGE_35]) as u16;
        let card = fold_bits(&bits[CARD_RANGE_35]);

        self.tag.manufacturer_code = facility;
        self.tag.id = card;
        self.tag.valid = true;
        debug!(facility, card, "35-bit frame complete");
    }

    /// Standard 26-bit: the 24 bits between the parity bits fold into a
    /// single card code — this format carries no separate facility code
    /// through to the record. Position 0 carries even parity over
    /// positions [1, 13); position 25 carries odd parity over [13, 25).
    fn extract_26(&mut self, bits: &LineBits) {
        let card = fold_bits(&bits[CARD_RANGE_26]);

        let even_bit = bits[EVEN_PARITY_BIT_26];
        let odd_bit = bits[ODD_PARITY_BIT_26];
        let even_count = bits[EVEN_PARITY_RANGE_26].count_ones();
        let odd_count = bits[ODD_PARITY_RANGE_26].count_ones();

        if even_count % 2 == usize::from(even_bit) && odd_count % 2 != usize::from(odd_bit) {
            self.tag.id = card;
            self.tag.valid = true;
            debug!(card, "26-bit frame complete");
        } else {
            warn!(
                even_count,
                odd_count,
                even_bit = u8::from(even_bit),
                odd_bit = u8::from(odd_bit),
                "parity mismatch"
            );
        }
    }
}

/// Shared append path for the edge entry points and bound handlers.
fn push_bit(line: &Arc<Mutex<LineState>>, bit: bool) {
    line.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(bit);
}

/// Fold a bit slice into an integer, most-significant bit first.
fn fold_bits(bits: &BitSlice<u8, Msb0>) -> u32 {
    bits.iter()
        .by_vals()
        .fold(0u32, |acc, bit| (acc << 1) | u32::from(bit))
}
