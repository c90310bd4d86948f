//! Collaborator interface boundaries.
//!
//! The decoding core never owns hardware. It consumes bytes from a serial
//! transport and bit events from edge-triggered input lines, both of which
//! are specified here only at their interface boundary. Implementations
//! (in-memory mocks, capture replay, a real serial port) live in the
//! `tagport-hardware` crate.
//!
//! Both traits are synchronous: nothing in the decode path blocks or
//! suspends, and edge handlers must be callable from interrupt-like
//! contexts that cannot await.

use crate::error::Result;

/// Handler invoked on a falling edge of a Wiegand data line.
///
/// Handlers are bound closures over the owning decoder's shared line
/// state; registering them requires no global lookup table.
pub type EdgeHandler = Box<dyn FnMut() + Send + 'static>;

/// Byte-oriented serial transport the UART decoder reads from.
///
/// # Contract
///
/// `read_byte` must never block: it returns `Ok(None)` when no byte is
/// currently buffered. The polling caller drains the transport one byte at
/// a time until it runs dry or a frame completes.
pub trait SerialTransport: Send {
    /// Take the next buffered byte, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport failed (disconnected
    /// port, I/O error). Transport errors end the current poll; they do
    /// not invalidate a partially captured frame.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

/// An edge-triggered digital input line.
///
/// One line signals 0-bits, the other 1-bits; each falling edge
/// contributes exactly one bit to the frame in arrival order.
pub trait EdgeInput {
    /// Register the handler to invoke on every falling edge.
    ///
    /// The handler may be invoked from an asynchronous, high-priority
    /// context at any time, including while a poll is executing.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's edge-trigger facility rejects
    /// the registration.
    fn on_falling_edge(&mut self, handler: EdgeHandler) -> Result<()>;
}
