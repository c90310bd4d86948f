//! Reader facade over the two decoding strategies.
//!
//! A [`TagReader`] holds exactly one decoder, chosen at construction, and
//! exposes the uniform poll/consume contract the calling loop works
//! against: [`is_id_available`](TagReader::is_id_available) then
//! [`read_id`](TagReader::read_id). Which strategy gets built is a runtime
//! decision (typically driven by
//! [`ReaderConfig`](tagport_core::config::ReaderConfig)), so both modes
//! compile, run and test side by side.
//!
//! Dispatch uses an internal enum over the concrete decoders rather than a
//! trait object — the two strategies have different input paths (bytes
//! pulled from a transport vs. bit events pushed by edge handlers), and
//! the enum keeps each arm's extra surface reachable.

use std::fmt;

use tagport_core::transport::SerialTransport;
use tagport_core::{TagRecord, WiegandFormat};
use tracing::{debug, warn};

use crate::uart::UartFrameDecoder;
use crate::wiegand::WiegandBitDecoder;

/// Uniform front end over the UART frame decoder and the Wiegand bit
/// decoder.
///
/// # Examples
///
/// Wiegand mode, polling after wiring edge handlers:
///
/// ```
/// use tagport_core::WiegandFormat;
/// use tagport_protocol::TagReader;
///
/// let mut reader = TagReader::wiegand(WiegandFormat::Bits26);
/// assert!(!reader.is_id_available());
/// let tag = reader.read_id();
/// assert!(!tag.valid); // nothing captured yet
/// ```
pub struct TagReader {
    mode: ReaderMode,
}

enum ReaderMode {
    Uart {
        io: Box<dyn SerialTransport>,
        decoder: UartFrameDecoder,
    },
    Wiegand {
        decoder: WiegandBitDecoder,
    },
}

impl TagReader {
    /// Create a reader bound to a serial transport.
    pub fn uart(io: Box<dyn SerialTransport>) -> Self {
        Self {
            mode: ReaderMode::Uart {
                io,
                decoder: UartFrameDecoder::new(),
            },
        }
    }

    /// Create a reader decoding Wiegand frames of the given format.
    ///
    /// Wire the decoder's edge handlers to the data lines via
    /// [`wiegand_decoder`](TagReader::wiegand_decoder) before expecting
    /// any bits.
    pub fn wiegand(format: WiegandFormat) -> Self {
        Self {
            mode: ReaderMode::Wiegand {
                decoder: WiegandBitDecoder::new(format),
            },
        }
    }

    /// Create a Wiegand reader from a raw frame length in bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFrameLength`](tagport_core::Error) for
    /// any length other than 26 or 35 — such a decoder could never
    /// complete a cycle.
    pub fn wiegand_with_bits(bits: u8) -> tagport_core::Result<Self> {
        Ok(Self::wiegand(WiegandFormat::from_bits(bits)?))
    }

    /// Check whether a decoded id is ready to be read.
    ///
    /// In UART mode this drains the transport one byte at a time into the
    /// frame decoder as a side effect, stopping as soon as a frame
    /// completes or the transport runs dry. In Wiegand mode it only runs
    /// the length/parity check against a snapshot of the bit buffer —
    /// no external side effects.
    pub fn is_id_available(&mut self) -> bool {
        match &mut self.mode {
            ReaderMode::Uart { io, decoder } => {
                if decoder.is_ready() {
                    return true;
                }
                loop {
                    match io.read_byte() {
                        Ok(Some(byte)) => {
                            if decoder.feed(byte) {
                                return true;
                            }
                        }
                        Ok(None) => return false,
                        Err(err) => {
                            warn!(%err, "serial transport read failed");
                            return false;
                        }
                    }
                }
            }
            ReaderMode::Wiegand { decoder } => decoder.check_complete(),
        }
    }

    /// Return the pending record and rearm the decoder for the next
    /// frame.
    ///
    /// The record comes back whatever its `valid` state — checking it is
    /// the caller's job. When nothing is pending, the zeroed invalid
    /// record is returned. Either way the underlying decoder's cycle
    /// state (payload buffer or bit buffer) is reset so an independent
    /// frame can be captured next.
    pub fn read_id(&mut self) -> TagRecord {
        let tag = match &mut self.mode {
            ReaderMode::Uart { decoder, .. } => {
                let tag = decoder.take_result();
                decoder.reset_cycle();
                tag
            }
            ReaderMode::Wiegand { decoder } => {
                let tag = decoder.take_result();
                decoder.reset_cycle();
                tag
            }
        };
        debug!(%tag, "read id");
        tag
    }

    /// Discard all in-flight state — partial frames, buffered bits and
    /// any unconsumed record — without producing anything.
    pub fn restart(&mut self) {
        match &mut self.mode {
            ReaderMode::Uart { decoder, .. } => decoder.reset_cycle(),
            ReaderMode::Wiegand { decoder } => decoder.reset_cycle(),
        }
    }

    /// The underlying bit decoder, for edge-handler wiring. `None` in
    /// UART mode.
    pub fn wiegand_decoder(&self) -> Option<&WiegandBitDecoder> {
        match &self.mode {
            ReaderMode::Uart { .. } => None,
            ReaderMode::Wiegand { decoder } => Some(decoder),
        }
    }
}

impl fmt::Debug for TagReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            ReaderMode::Uart { decoder, .. } => f
                .debug_struct("TagReader")
                .field("mode", &"uart")
                .field("decoder", decoder)
                .finish_non_exhaustive(),
            ReaderMode::Wiegand { decoder } => f
                .debug_struct("TagReader")
                .field("mode", &"wiegand")
                .field("decoder", decoder)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tagport_core::Result;

    /// Minimal in-crate transport; the full mock lives in
    /// tagport-hardware and is exercised by the integration tests.
    struct QueueTransport(VecDeque<u8>);

    impl SerialTransport for QueueTransport {
        fn read_byte(&mut self) -> Result<Option<u8>> {
            Ok(self.0.pop_front())
        }
    }

    struct FailingTransport;

    impl SerialTransport for FailingTransport {
        fn read_byte(&mut self) -> Result<Option<u8>> {
            Err(tagport_core::Error::transport("port gone"))
        }
    }

    fn uart_reader(bytes: &[u8]) -> TagReader {
        TagReader::uart(Box::new(QueueTransport(bytes.iter().copied().collect())))
    }

    #[test]
    fn test_uart_poll_consumes_transport() {
        let mut frame = vec![0x02];
        frame.extend_from_slice(b"0200001A2B33");
        frame.push(0x03);

        let mut reader = uart_reader(&frame);
        assert!(reader.is_id_available());

        let tag = reader.read_id();
        assert!(tag.valid);
        assert_eq!(tag.manufacturer_code, 0x0200);
        assert_eq!(tag.id, 0x001A2B);
    }

    #[test]
    fn test_uart_poll_without_data() {
        let mut reader = uart_reader(&[]);
        assert!(!reader.is_id_available());
        assert!(!reader.read_id().valid);
    }

    #[test]
    fn test_uart_availability_is_sticky_until_read() {
        let mut frame = vec![0x02];
        frame.extend_from_slice(b"0200001A2B33");
        frame.push(0x03);

        let mut reader = uart_reader(&frame);
        assert!(reader.is_id_available());
        assert!(reader.is_id_available());

        assert!(reader.read_id().valid);
        assert!(!reader.is_id_available());
    }

    #[test]
    fn test_read_id_consumes_record_once() {
        let mut frame = vec![0x02];
        frame.extend_from_slice(b"0200001A2B33");
        frame.push(0x03);

        let mut reader = uart_reader(&frame);
        assert!(reader.is_id_available());
        assert!(reader.read_id().valid);

        // Second read with nothing pending: the zeroed invalid record.
        assert_eq!(reader.read_id(), TagRecord::default());
    }

    #[test]
    fn test_uart_transport_error_ends_poll() {
        let mut reader = TagReader::uart(Box::new(FailingTransport));
        assert!(!reader.is_id_available());
    }

    #[test]
    fn test_wiegand_poll_is_read_only() {
        let mut reader = TagReader::wiegand(WiegandFormat::Bits26);
        let decoder = reader.wiegand_decoder().expect("wiegand mode");
        for _ in 0..10 {
            decoder.on_one_bit();
        }

        assert!(!reader.is_id_available());
        let count = reader.wiegand_decoder().expect("wiegand mode").bit_count();
        assert_eq!(count, 10);
    }

    #[test]
    fn test_wiegand_read_id_resets_cycle() {
        let mut reader = TagReader::wiegand(WiegandFormat::Bits35);
        {
            let decoder = reader.wiegand_decoder().expect("wiegand mode");
            for _ in 0..35 {
                decoder.on_one_bit();
            }
        }

        assert!(reader.is_id_available());
        let tag = reader.read_id();
        assert!(tag.valid);
        assert_eq!(tag.manufacturer_code, 0xFFF);
        assert_eq!(tag.id, 0xFFFFF);

        let count = reader.wiegand_decoder().expect("wiegand mode").bit_count();
        assert_eq!(count, 0);
        assert!(!reader.is_id_available());
    }

    #[test]
    fn test_restart_discards_everything() {
        let mut frame = vec![0x02];
        frame.extend_from_slice(b"0200001A2B33");
        frame.push(0x03);

        let mut reader = uart_reader(&frame);
        assert!(reader.is_id_available());
        reader.restart();
        assert!(!reader.read_id().valid);
    }

    #[test]
    fn test_wiegand_with_bits_rejects_unsupported_lengths() {
        assert!(TagReader::wiegand_with_bits(26).is_ok());
        assert!(TagReader::wiegand_with_bits(35).is_ok());
        assert!(TagReader::wiegand_with_bits(34).is_err());
        assert!(TagReader::wiegand_with_bits(0).is_err());
    }

    #[test]
    fn test_wiegand_decoder_accessor_is_mode_specific() {
        let uart = uart_reader(&[]);
        assert!(uart.wiegand_decoder().is_none());

        let wiegand = TagReader::wiegand(WiegandFormat::Bits26);
        assert!(wiegand.wiegand_decoder().is_some());
    }
}
