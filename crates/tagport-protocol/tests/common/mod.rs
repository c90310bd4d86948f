//! Common test utilities for the decoder integration tests.
//!
//! Builders for well-formed (and deliberately malformed) frames in both
//! wire formats, shared across the integration and property suites.

use tagport_core::constants::{END_BYTE, START_BYTE};
use tagport_protocol::WiegandBitDecoder;

/// XOR checksum over the five payload bytes of a frame carrying the given
/// manufacturer code and id.
pub fn checksum_for(manufacturer: u16, id: u32) -> u8 {
    let bytes = [
        (manufacturer >> 8) as u8,
        manufacturer as u8,
        (id >> 16) as u8,
        (id >> 8) as u8,
        id as u8,
    ];
    bytes.iter().fold(0u8, |acc, &b| acc ^ b)
}

/// Encode the 12-character ASCII-hex payload for a manufacturer code and
/// a 24-bit id, checksum included.
pub fn encode_payload(manufacturer: u16, id: u32) -> Vec<u8> {
    assert!(id <= 0xFF_FFFF, "id must fit 6 hex digits");
    format!(
        "{manufacturer:04X}{id:06X}{:02X}",
        checksum_for(manufacturer, id)
    )
    .into_bytes()
}

/// Wrap a payload in the start/end frame markers.
pub fn framed(payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(payload.len() + 2);
    bytes.push(START_BYTE);
    bytes.extend_from_slice(payload);
    bytes.push(END_BYTE);
    bytes
}

/// A complete framed transmission for a manufacturer code and id.
pub fn encode_frame(manufacturer: u16, id: u32) -> Vec<u8> {
    framed(&encode_payload(manufacturer, id))
}

/// Build a 26-bit frame with correct parity around a 24-bit card code:
/// even parity bit, 24 data bits most-significant first, odd parity bit.
pub fn wiegand_26(card: u32) -> Vec<bool> {
    assert!(card <= 0xFF_FFFF, "card code must fit 24 bits");
    let data: Vec<bool> = (0..24).rev().map(|i| card >> i & 1 == 1).collect();
    let even_ones = data[..12].iter().filter(|&&b| b).count();
    let odd_ones = data[12..].iter().filter(|&&b| b).count();

    let mut bits = vec![even_ones % 2 == 1];
    bits.extend(&data);
    bits.push(odd_ones % 2 == 0);
    bits
}

/// Build a 35-bit frame: 12-bit facility code at [2, 14), 20-bit card
/// code at [14, 34). Bits outside the code ranges take the `pad` value.
pub fn wiegand_35(facility: u16, card: u32, pad: bool) -> Vec<bool> {
    assert!(facility <= 0xFFF, "facility code must fit 12 bits");
    assert!(card <= 0xF_FFFF, "card code must fit 20 bits");

    let mut bits = vec![pad, pad];
    bits.extend((0..12).rev().map(|i| facility >> i & 1 == 1));
    bits.extend((0..20).rev().map(|i| card >> i & 1 == 1));
    bits.push(pad);
    bits
}

/// Feed bits through the decoder's edge entry points in arrival order.
pub fn feed_bits(decoder: &WiegandBitDecoder, bits: &[bool]) {
    for &bit in bits {
        if bit {
            decoder.on_one_bit();
        } else {
            decoder.on_zero_bit();
        }
    }
}
