//! Mock serial transport for testing and development.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tagport_core::Result;
use tagport_core::transport::SerialTransport;

/// In-memory serial transport driven by a [`MockSerialHandle`].
///
/// The transport side is handed to a reader; the handle side injects the
/// bytes a physical module would have written to the line. Injection and
/// reading may happen from different threads.
///
/// # Examples
///
/// ```
/// use tagport_core::transport::SerialTransport;
/// use tagport_hardware::mock::MockSerial;
///
/// let (mut transport, handle) = MockSerial::new();
///
/// handle.inject(b"\x02AB");
/// assert_eq!(transport.read_byte().unwrap(), Some(0x02));
/// assert_eq!(transport.read_byte().unwrap(), Some(b'A'));
/// assert_eq!(transport.read_byte().unwrap(), Some(b'B'));
/// assert_eq!(transport.read_byte().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct MockSerial {
    queue: Arc<Mutex<VecDeque<u8>>>,
}

impl MockSerial {
    /// Create a transport/handle pair sharing an empty byte queue.
    pub fn new() -> (Self, MockSerialHandle) {
        let queue = Arc::new(Mutex::new(VecDeque::new()));
        let transport = Self {
            queue: Arc::clone(&queue),
        };
        (transport, MockSerialHandle { queue })
    }
}

impl SerialTransport for MockSerial {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front())
    }
}

/// Handle for feeding bytes into a [`MockSerial`] transport.
#[derive(Debug, Clone)]
pub struct MockSerialHandle {
    queue: Arc<Mutex<VecDeque<u8>>>,
}

impl MockSerialHandle {
    /// Append bytes to the transport's receive queue.
    pub fn inject(&self, bytes: &[u8]) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(bytes.iter().copied());
    }

    /// Append a single byte.
    pub fn inject_byte(&self, byte: u8) {
        self.inject(std::slice::from_ref(&byte));
    }

    /// Number of bytes not yet consumed by the transport side.
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
