//! Criterion benchmarks for pulse2-core control-rate primitives
//!
//! Run with: cargo bench -p pulse2-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pulse2_core::{Lfo, ParamDescriptor, ParamInput, SmoothedParam, cents_to_ratio};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_gain_lane(size: usize) -> Vec<f32> {
    (0..size).map(|i| (i % 2) as f32).collect()
}

fn bench_smoothed_param(c: &mut Criterion) {
    let mut group = c.benchmark_group("SmoothedParam");

    for &block_size in BLOCK_SIZES {
        let lane = generate_gain_lane(block_size);

        group.bench_with_input(
            BenchmarkId::new("update", block_size),
            &block_size,
            |b, _| {
                let mut gain = SmoothedParam::gain(0.0, SAMPLE_RATE);
                b.iter(|| {
                    for &target in &lane {
                        black_box(gain.update(black_box(target)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_param_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("ParamInput");
    let desc = ParamDescriptor::level("Gain", "Gain", 0.7);

    for &block_size in BLOCK_SIZES {
        let lane = generate_gain_lane(block_size);
        let constant = [0.5f32];

        group.bench_with_input(
            BenchmarkId::new("dense", block_size),
            &block_size,
            |b, &size| {
                let input = ParamInput::new(&lane);
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for i in 0..size {
                        sum += input.value_at(i, &desc);
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("constant", block_size),
            &block_size,
            |b, &size| {
                let input = ParamInput::new(&constant);
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for i in 0..size {
                        sum += input.value_at(i, &desc);
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

fn bench_pitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pitch");

    group.bench_function("cents_to_ratio", |b| {
        b.iter(|| black_box(cents_to_ratio(black_box(37.5))));
    });

    for &block_size in BLOCK_SIZES {
        let mut lane = vec![0.0f32; block_size];
        group.bench_with_input(
            BenchmarkId::new("lfo_fill", block_size),
            &block_size,
            |b, _| {
                let mut lfo = Lfo::new(SAMPLE_RATE, 5.0);
                b.iter(|| {
                    lfo.fill_cents(&mut lane, 50.0);
                    black_box(lane[0])
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_smoothed_param, bench_param_input, bench_pitch);
criterion_main!(benches);
