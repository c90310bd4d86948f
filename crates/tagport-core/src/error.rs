//! Error types shared across the workspace.
//!
//! Decode-time failures (bad checksum, failed parity, short frames) are
//! deliberately *not* errors: they surface only through
//! [`TagRecord::valid`](crate::types::TagRecord). The variants here cover
//! the places where an explicit error is the right shape — configuration
//! validation, the standalone hex utility, and the transport boundary.

use thiserror::Error;

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced at the edges of the decoding core.
#[derive(Debug, Error)]
pub enum Error {
    /// Configured Wiegand frame length is not a supported format.
    ///
    /// Any length other than 26 or 35 bits would leave the decoder unable
    /// to ever complete a cycle, so it is rejected at construction time.
    #[error("unsupported Wiegand frame length: {bits} bits (supported: 26 or 35)")]
    UnsupportedFrameLength { bits: u8 },

    /// A byte outside `[0-9a-fA-F]` was handed to the hex utility.
    #[error("invalid hex digit 0x{byte:02X} at offset {offset}")]
    InvalidHexDigit { byte: u8, offset: usize },

    /// More hex digits than the conversion utility can hold in a `u64`.
    #[error("hex field of {len} digits exceeds the {max}-digit capacity")]
    HexOverflow { len: usize, max: usize },

    /// The serial transport or edge-line collaborator failed.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Reader configuration is invalid.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
