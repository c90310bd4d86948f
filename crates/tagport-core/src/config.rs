//! Reader configuration.
//!
//! The decoding mode is fixed when a reader is constructed, but which mode
//! gets constructed is a runtime decision: deployments describe their
//! reader in a small JSON document and drivers build the matching
//! strategy from it. This replaces compile-time mode selection and lets
//! both modes be exercised in the same binary and the same test suite.

use crate::constants::DEFAULT_BAUD_RATE;
use crate::error::{Error, Result};
use crate::types::WiegandFormat;
use serde::{Deserialize, Serialize};

/// Declarative description of a reader attachment.
///
/// # Examples
///
/// ```
/// use tagport_core::config::ReaderConfig;
///
/// let uart: ReaderConfig =
///     serde_json::from_str(r#"{ "mode": "uart", "port": "/dev/ttyUSB0" }"#).unwrap();
/// assert!(uart.validate().is_ok());
///
/// let wiegand: ReaderConfig =
///     serde_json::from_str(r#"{ "mode": "wiegand", "frame_bits": 26 }"#).unwrap();
/// assert!(wiegand.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ReaderConfig {
    /// Reader wired to an asynchronous serial transport.
    Uart {
        /// Serial device path (e.g. `/dev/ttyUSB0`). Unused by replay
        /// drivers.
        port: String,

        /// Baud rate; the reader modules are fixed at 9600.
        #[serde(default = "default_baud")]
        baud: u32,
    },

    /// Reader wired to two edge-triggered data lines.
    Wiegand {
        /// Expected frame length in bits; must be 26 or 35.
        frame_bits: u8,
    },
}

fn default_baud() -> u32 {
    DEFAULT_BAUD_RATE
}

impl ReaderConfig {
    /// Validate the configuration without building anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFrameLength`] for a Wiegand length the
    /// decoder could never complete, or [`Error::Config`] for a zero baud
    /// rate.
    pub fn validate(&self) -> Result<()> {
        match self {
            ReaderConfig::Uart { baud: 0, .. } => {
                Err(Error::config("baud rate must be non-zero"))
            }
            ReaderConfig::Uart { .. } => Ok(()),
            ReaderConfig::Wiegand { frame_bits } => {
                WiegandFormat::from_bits(*frame_bits).map(|_| ())
            }
        }
    }

    /// The Wiegand format this configuration selects, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFrameLength`] when the configured
    /// length is not decodable.
    pub fn wiegand_format(&self) -> Result<Option<WiegandFormat>> {
        match self {
            ReaderConfig::Uart { .. } => Ok(None),
            ReaderConfig::Wiegand { frame_bits } => {
                Ok(Some(WiegandFormat::from_bits(*frame_bits)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_uart_config_default_baud() {
        let config: ReaderConfig =
            serde_json::from_str(r#"{ "mode": "uart", "port": "/dev/ttyS1" }"#).unwrap();
        assert_eq!(
            config,
            ReaderConfig::Uart {
                port: "/dev/ttyS1".to_string(),
                baud: 9600,
            }
        );
    }

    #[test]
    fn test_uart_config_explicit_baud() {
        let config: ReaderConfig =
            serde_json::from_str(r#"{ "mode": "uart", "port": "COM3", "baud": 19200 }"#)
                .unwrap();
        assert!(matches!(config, ReaderConfig::Uart { baud: 19200, .. }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_uart_config_zero_baud_rejected() {
        let config = ReaderConfig::Uart {
            port: "/dev/ttyUSB0".to_string(),
            baud: 0,
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[rstest]
    #[case(26, WiegandFormat::Bits26)]
    #[case(35, WiegandFormat::Bits35)]
    fn test_wiegand_config_valid(#[case] bits: u8, #[case] expected: WiegandFormat) {
        let config = ReaderConfig::Wiegand { frame_bits: bits };
        assert!(config.validate().is_ok());
        assert_eq!(config.wiegand_format().unwrap(), Some(expected));
    }

    #[test]
    fn test_wiegand_config_unsupported_length_surfaces_at_validation() {
        let config: ReaderConfig =
            serde_json::from_str(r#"{ "mode": "wiegand", "frame_bits": 37 }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::UnsupportedFrameLength { bits: 37 })
        ));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ReaderConfig::Wiegand { frame_bits: 35 };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""mode":"wiegand""#));
        let back: ReaderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
