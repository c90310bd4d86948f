//! Capture replay driver for the tagport decoders.
//!
//! Feeds a recorded reader capture through the decoder selected by a JSON
//! reader configuration and logs every decoded tag:
//!
//! ```sh
//! tagport reader.json capture.bin
//! ```
//!
//! UART captures are the raw bytes recorded from the serial line, framing
//! markers included. Wiegand captures are ASCII `0`/`1` characters in
//! arrival order; whitespace is ignored.

use std::{env, fs, process::ExitCode};

use tagport_core::{Error, ReaderConfig, Result, TagRecord, WiegandFormat};
use tagport_hardware::ReplayTransport;
use tagport_protocol::TagReader;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let (config_path, capture_path) = match (args.next(), args.next()) {
        (Some(config), Some(capture)) => (config, capture),
        _ => {
            eprintln!("usage: tagport <config.json> <capture-file>");
            return ExitCode::from(2);
        }
    };

    match run(&config_path, &capture_path) {
        Ok(decoded) => {
            info!(decoded, "replay finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &str, capture_path: &str) -> Result<usize> {
    let raw = fs::read(config_path)?;
    let config: ReaderConfig = serde_json::from_slice(&raw)
        .map_err(|err| Error::config(format!("{config_path}: {err}")))?;
    config.validate()?;

    let capture = fs::read(capture_path)?;
    match &config {
        ReaderConfig::Uart { .. } => replay_uart(capture),
        ReaderConfig::Wiegand { frame_bits } => {
            replay_wiegand(WiegandFormat::from_bits(*frame_bits)?, &capture)
        }
    }
}

fn replay_uart(capture: Vec<u8>) -> Result<usize> {
    let mut reader = TagReader::uart(Box::new(ReplayTransport::from_bytes(capture)));

    let mut decoded = 0;
    while reader.is_id_available() {
        decoded += report(reader.read_id());
    }
    Ok(decoded)
}

fn replay_wiegand(format: WiegandFormat, capture: &[u8]) -> Result<usize> {
    let mut reader = TagReader::wiegand(format);

    let mut decoded = 0;
    for &byte in capture {
        match byte {
            b'0' => {
                if let Some(decoder) = reader.wiegand_decoder() {
                    decoder.on_zero_bit();
                }
            }
            b'1' => {
                if let Some(decoder) = reader.wiegand_decoder() {
                    decoder.on_one_bit();
                }
            }
            b if b.is_ascii_whitespace() => continue,
            other => {
                return Err(Error::config(format!(
                    "invalid capture byte 0x{other:02X}; expected '0' or '1'"
                )));
            }
        }

        if reader.is_id_available() {
            decoded += report(reader.read_id());
        } else if buffered_bits(&reader) == format.bit_count() {
            // Complete frame that failed parity: surface the invalid
            // record and reset so the next frame starts clean.
            report(reader.read_id());
        }
    }
    Ok(decoded)
}

fn buffered_bits(reader: &TagReader) -> usize {
    reader
        .wiegand_decoder()
        .map(|decoder| decoder.bit_count())
        .unwrap_or(0)
}

fn report(tag: TagRecord) -> usize {
    if tag.valid {
        info!(%tag, "tag decoded");
        1
    } else {
        warn!(%tag, "invalid tag discarded");
        0
    }
}
