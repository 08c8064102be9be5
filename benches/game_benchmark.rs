//! Benchmarks for running complete matches.
//!
//! This benchmarks the full scripted match loop - the hot path.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use formica::game::GameConfig;
use formica::runner::run_match;

fn bench_single_match(c: &mut Criterion) {
    let config = GameConfig::default();

    c.bench_function("single_match_10x10", |b| {
        b.iter(|| {
            let result = run_match(black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

fn bench_match_batch(c: &mut Criterion) {
    // Running 10 matches sequentially (without parallel overhead)
    let config = GameConfig::default();

    c.bench_function("10_matches_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                let result = run_match(black_box(seed), black_box(&config));
                let _ = black_box(result);
            }
        });
    });
}

fn bench_large_board_match(c: &mut Criterion) {
    let config = GameConfig {
        width: 32,
        height: 32,
        ants_per_player: 16,
        food_count: 40,
        max_turns: Some(200),
        ..GameConfig::default()
    };

    c.bench_function("single_match_32x32", |b| {
        b.iter(|| {
            let result = run_match(black_box(42), black_box(&config));
            black_box(result)
        });
    });
}

criterion_group!(
    benches,
    bench_single_match,
    bench_match_batch,
    bench_large_board_match
);
criterion_main!(benches);
