//! Capture replay transport.

use std::collections::VecDeque;

use tagport_core::Result;
use tagport_core::transport::SerialTransport;
use tracing::debug;

/// Serial transport that replays a captured byte stream.
///
/// Unlike [`MockSerial`](crate::mock::MockSerial) there is no feeding
/// handle: the whole capture is owned up front. Used by the CLI to decode
/// recorded reader output, and handy in tests that do not need
/// incremental injection.
#[derive(Debug, Clone)]
pub struct ReplayTransport {
    bytes: VecDeque<u8>,
}

impl ReplayTransport {
    /// Create a transport replaying the given bytes in order.
    pub fn from_bytes(bytes: impl Into<VecDeque<u8>>) -> Self {
        let bytes = bytes.into();
        debug!(len = bytes.len(), "replay capture loaded");
        Self { bytes }
    }

    /// Number of bytes left to replay.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the capture has been fully consumed.
    pub fn is_exhausted(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl SerialTransport for ReplayTransport {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.bytes.pop_front())
    }
}
