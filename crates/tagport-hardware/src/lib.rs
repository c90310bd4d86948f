//! Transport implementations for the tagport decoding core.
//!
//! The decoders in `tagport-protocol` consume bytes and bit events through
//! the collaborator traits defined in `tagport-core::transport`. This
//! crate provides the implementations:
//!
//! - [`mock::MockSerial`] / [`mock::MockSerialHandle`] — in-memory serial
//!   transport driven programmatically, for tests and development.
//! - [`mock::MockEdgeLine`] — simulated edge-triggered input line for
//!   Wiegand wiring.
//! - [`ReplayTransport`] — plays back a captured byte stream.
//! - `SerialPortTransport` — a physical port via the `serialport` crate,
//!   behind the `hardware-serial` feature.

pub mod mock;
pub mod replay;

#[cfg(feature = "hardware-serial")]
pub mod serial;

pub use replay::ReplayTransport;

#[cfg(feature = "hardware-serial")]
pub use serial::SerialPortTransport;
