//! Criterion benchmarks for the grainwarp-core stretch driver and tone filter
//!
//! Run with: cargo bench -p grainwarp-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use grainwarp_core::{
    FilterDepth, LeBytes, LeBytesMut, StretchConfig, StretchParameters, StretchRequest, ToneFilter,
    TrigMode, stretch, tone_coefficients,
};

const SAMPLE_RATE: f32 = 44100.0;
const CHUNK_SIZES: &[usize] = &[441, 4410, 44100];

fn generate_test_signal(size: usize) -> Vec<i16> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            ((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 16000.0) as i16
        })
        .collect()
}

fn bench_stretch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stretch");
    let config = StretchConfig::default();

    for &chunk in CHUNK_SIZES {
        let source = generate_test_signal(chunk);

        for (label, stretch_rate, depth) in [("unity", 1.0, 0.0), ("half_speed_lowpass", 0.5, -0.5)] {
            let request = StretchRequest {
                grain_seconds: 0.015,
                stretch_rate,
                pitch_rate: 1.0,
            };
            let Ok(params) = StretchParameters::for_chunk(chunk, SAMPLE_RATE, &request) else {
                continue;
            };
            let mut output = vec![0i16; params.target_samples];

            group.bench_with_input(BenchmarkId::new(label, chunk), &chunk, |b, _| {
                b.iter(|| {
                    black_box(
                        stretch(
                            output.as_mut_slice(),
                            source.as_slice(),
                            &params,
                            black_box(1.0),
                            black_box(depth),
                            &config,
                        )
                        .ok(),
                    )
                });
            });
        }
    }

    group.finish();
}

fn bench_byte_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("StretchBytes");
    let config = StretchConfig::default();
    let source = generate_test_signal(4410);
    let src_bytes: Vec<u8> = source.iter().flat_map(|s| s.to_le_bytes()).collect();
    let request = StretchRequest {
        grain_seconds: 0.015,
        stretch_rate: 0.75,
        pitch_rate: 1.5,
    };

    if let Ok(params) = StretchParameters::for_chunk(source.len(), SAMPLE_RATE, &request) {
        let mut out_bytes = vec![0u8; params.target_samples * 2];
        group.bench_function("le_bytes_4410", |b| {
            b.iter(|| {
                black_box(
                    stretch(
                        &mut LeBytesMut(&mut out_bytes),
                        &LeBytes(&src_bytes),
                        &params,
                        1.0,
                        0.4,
                        &config,
                    )
                    .ok(),
                )
            });
        });
    }

    group.finish();
}

fn bench_tone_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("ToneFilter");
    let input: Vec<f32> = generate_test_signal(1024).iter().map(|&s| f32::from(s)).collect();

    for (label, trig) in [("libm", TrigMode::Libm), ("polynomial", TrigMode::Polynomial)] {
        let config = StretchConfig::default().with_trig(trig);

        group.bench_function(BenchmarkId::new("design", label), |b| {
            b.iter(|| {
                let depth = FilterDepth::new(black_box(-0.5)).unwrap_or(FilterDepth::BYPASS);
                black_box(tone_coefficients(depth, &config).ok())
            });
        });

        if let Ok(mut filter) = ToneFilter::new(-0.5, &config) {
            group.bench_function(BenchmarkId::new("process_1024", label), |b| {
                b.iter(|| {
                    for &sample in &input {
                        black_box(filter.process(black_box(sample)));
                    }
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_stretch, bench_byte_path, bench_tone_filter);
criterion_main!(benches);
