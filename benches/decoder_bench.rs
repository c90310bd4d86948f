//! Performance benchmarks for the frame and bit decoders.
//!
//! The feed paths run on every transport byte and every line edge, so
//! per-event cost matters more than bulk throughput here.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench decoder_bench
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tagport_core::WiegandFormat;
use tagport_protocol::{UartFrameDecoder, WiegandBitDecoder};

/// A complete framed transmission: STX + "0200001A2B33" + ETX.
fn sample_frame() -> Vec<u8> {
    let mut frame = vec![0x02];
    frame.extend_from_slice(b"0200001A2B33");
    frame.push(0x03);
    frame
}

/// A 26-bit sequence with correct parity around card code 0x00ABCD.
fn sample_bits_26() -> Vec<bool> {
    let card = 0x00ABCDu32;
    let data: Vec<bool> = (0..24).rev().map(|i| card >> i & 1 == 1).collect();
    let even_ones = data[..12].iter().filter(|&&b| b).count();
    let odd_ones = data[12..].iter().filter(|&&b| b).count();

    let mut bits = vec![even_ones % 2 == 1];
    bits.extend(&data);
    bits.push(odd_ones % 2 == 0);
    bits
}

/// Benchmark feeding one complete frame byte-by-byte.
fn bench_uart_feed(c: &mut Criterion) {
    let frame = sample_frame();

    let mut group = c.benchmark_group("uart_feed");
    group.throughput(Throughput::Bytes(frame.len() as u64));

    group.bench_function("feed_complete_frame", |b| {
        b.iter(|| {
            let mut decoder = UartFrameDecoder::new();
            for &byte in &frame {
                black_box(decoder.feed(black_box(byte)));
            }
            black_box(decoder.take_result())
        });
    });

    group.finish();
}

/// Benchmark a full 26-bit cycle: edge appends, poll, extraction.
fn bench_wiegand_cycle(c: &mut Criterion) {
    let bits = sample_bits_26();

    let mut group = c.benchmark_group("wiegand_cycle");
    group.throughput(Throughput::Elements(1));

    group.bench_function("accumulate_and_extract_26", |b| {
        b.iter(|| {
            let mut decoder = WiegandBitDecoder::new(WiegandFormat::Bits26);
            for &bit in &bits {
                if bit {
                    decoder.on_one_bit();
                } else {
                    decoder.on_zero_bit();
                }
            }
            black_box(decoder.check_complete());
            black_box(decoder.take_result())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_uart_feed, bench_wiegand_cycle);
criterion_main!(benches);
