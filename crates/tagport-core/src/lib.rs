//! Core types for the tagport RFID decoding workspace.
//!
//! This crate is the leaf of the workspace: wire-format constants, the
//! shared error enum, the [`TagRecord`] value type produced by every
//! decoder, reader configuration, the collaborator interface traits, and
//! the standalone hex utility. The decoders themselves live in
//! `tagport-protocol`; transport implementations in `tagport-hardware`.

pub mod config;
pub mod constants;
pub mod error;
pub mod hex;
pub mod transport;
pub mod types;

pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use types::{TagRecord, WiegandFormat};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
