// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for sequence navigation and progress ticking.
//!
//! Measures the performance of:
//! - Navigation operations (advance/retreat with wrap-around)
//! - The periodic progress tick on a fixed-duration item

use criterion::{criterion_group, criterion_main, Criterion};
use iced_reel::config::EngineConfig;
use iced_reel::{MediaItem, MediaKind, ReelEngine};
use std::hint::black_box;
use std::time::{Duration, Instant};

fn story(len: usize) -> Vec<MediaItem> {
    (0..len)
        .map(|i| {
            MediaItem::new(
                format!("item-{i}"),
                format!("https://cdn.example/{i}.jpg"),
                MediaKind::Image,
                i as u32,
            )
        })
        .collect()
}

/// Benchmark navigation operations (advance/retreat).
fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_navigation");

    let mut engine = ReelEngine::open(story(100), None, &EngineConfig::default()).unwrap();
    group.bench_function("advance", |b| {
        b.iter(|| {
            black_box(engine.advance());
        });
    });

    let mut engine = ReelEngine::open(story(100), None, &EngineConfig::default()).unwrap();
    group.bench_function("retreat", |b| {
        b.iter(|| {
            black_box(engine.retreat());
        });
    });

    group.finish();
}

/// Benchmark the periodic tick driving a fixed-duration item.
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_navigation");

    let mut engine = ReelEngine::open(story(100), None, &EngineConfig::default()).unwrap();
    let start = Instant::now();
    let mut now = start;
    group.bench_function("tick", |b| {
        b.iter(|| {
            now += Duration::from_millis(50);
            black_box(engine.tick(now));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_navigate, bench_tick);
criterion_main!(benches);
