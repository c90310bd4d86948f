//! Protocol decoders for low-cost RFID reader modules.
//!
//! Two physical encodings are understood: a framed ASCII-hex byte stream
//! over an asynchronous serial transport ([`UartFrameDecoder`]) and a raw
//! two-line pulse-encoded bit stream ([`WiegandBitDecoder`]). The
//! [`TagReader`] facade holds one of the two, fixed at construction, and
//! exposes the poll/consume contract callers loop on.
//!
//! Data flows one way: transport bytes or line-edge events → decoder
//! buffer → finalized [`TagRecord`](tagport_core::TagRecord) → caller.

pub mod reader;
pub mod uart;
pub mod wiegand;

pub use reader::TagReader;
pub use uart::{FrameState, UartFrameDecoder};
pub use wiegand::WiegandBitDecoder;
