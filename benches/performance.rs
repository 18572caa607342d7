// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for the chord trainer
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Progression generation for common and weighted lengths
//! - Numeral resolution
//! - Multiple-choice option selection
//! - Building a full quiz session

use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nashville::generators::pick_options;
use nashville::music::KeyName;
use nashville::quiz::QuizSession;
use nashville::{chords_in_key, resolve_progression, ProgressionGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Benchmark progression generation across lengths
fn bench_generate(c: &mut Criterion) {
    let generator = ProgressionGenerator::default();
    let mut rng = StdRng::seed_from_u64(42);

    let mut group = c.benchmark_group("generate_progression");
    for n in [4usize, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| generator.generate(black_box(n), &mut rng))
        });
    }
    group.finish();
}

/// Benchmark resolving a progression in a key
fn bench_resolve(c: &mut Criterion) {
    let progression = ["I", "vi", "IV", "V", "ii", "iii", "vii°", "I"];

    c.bench_function("resolve_progression", |b| {
        b.iter(|| resolve_progression(black_box(&progression[..]), black_box("G")))
    });
}

/// Benchmark picking four options
fn bench_pick_options(c: &mut Criterion) {
    let chords = chords_in_key("E").unwrap_or_else(|e| panic!("{}", e));
    let mut rng = StdRng::seed_from_u64(7);

    c.bench_function("pick_options", |b| {
        b.iter(|| pick_options(black_box("B"), black_box(chords), &mut rng))
    });
}

/// Benchmark building a whole session (questions plus options)
fn bench_session(c: &mut Criterion) {
    let generator = ProgressionGenerator::default();
    let mut rng = StdRng::seed_from_u64(3);
    let now = Instant::now();

    c.bench_function("quiz_session_new", |b| {
        b.iter(|| {
            let progression = generator.generate(8, &mut rng);
            QuizSession::new(
                0,
                KeyName::D,
                progression,
                Some(Duration::from_secs(10)),
                &mut rng,
                now,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_resolve,
    bench_pick_options,
    bench_session,
);
criterion_main!(benches);
