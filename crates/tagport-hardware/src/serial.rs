//! Real serial-port transport (feature `hardware-serial`).

use std::io::Read;
use std::time::Duration;

use tagport_core::transport::SerialTransport;
use tagport_core::{Error, Result};
use tracing::info;

/// Serial transport backed by a physical port via the `serialport` crate.
///
/// [`read_byte`](SerialTransport::read_byte) honors the non-blocking
/// transport contract: it checks the driver's receive buffer first and
/// returns `Ok(None)` when nothing has arrived, so the short port timeout
/// is only ever hit on a disappearing device.
pub struct SerialPortTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialPortTransport {
    /// Open the named port at the given baud rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the port cannot be opened.
    pub fn open(path: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(path, baud)
            .timeout(Duration::from_millis(1))
            .open()
            .map_err(|err| Error::transport(format!("failed to open {path}: {err}")))?;

        info!(path, baud, "serial port open");
        Ok(Self { port })
    }
}

impl SerialTransport for SerialPortTransport {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let buffered = self
            .port
            .bytes_to_read()
            .map_err(|err| Error::transport(format!("bytes_to_read failed: {err}")))?;
        if buffered == 0 {
            return Ok(None);
        }

        let mut buf = [0u8; 1];
        self.port.read_exact(&mut buf)?;
        Ok(Some(buf[0]))
    }
}

impl std::fmt::Debug for SerialPortTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialPortTransport")
            .field("port", &self.port.name())
            .finish()
    }
}
