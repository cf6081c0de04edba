//! Benchmarks for overscroll physics and mosaic packing.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rebound::*;

fn bench_spring_step(c: &mut Criterion) {
    c.bench_function("spring_release_600_frames", |b| {
        let config = OverscrollConfig::<f64>::new();
        b.iter(|| {
            let mut spring = SpringState::new(60.0, 0.0);
            for _ in 0..600 {
                spring.step(1.0 / 60.0, &config, &mut NoOpFrameObserver);
            }
            spring.position()
        });
    });
}

fn bench_engine_gesture(c: &mut Criterion) {
    c.bench_function("engine_pull_and_settle", |b| {
        let metrics = ScrollMetrics::new(0.0, 4000.0);
        b.iter(|| {
            let mut engine = OverscrollEngine::<f64>::new(OverscrollConfig::new()).unwrap();
            let mut t = 0.0;
            for _ in 0..20 {
                engine.handle_input(-60.0, metrics, t);
                engine.tick(t);
                t += 1000.0 / 60.0;
            }
            let mut frames = 0;
            while !engine.tick(t).is_settled() {
                t += 1000.0 / 60.0;
                frames += 1;
            }
            frames
        });
    });
}

fn mosaic(count: usize) -> Vec<Card> {
    (0..count)
        .map(|i| {
            let ratio = [1.5, 0.66, 1.0, 1.78, 0.8][i % 5];
            let (w, h) = card_size(ratio, 180.0);
            Card::new(format!("card-{i}"), w, h + 28.0)
        })
        .collect()
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    for count in [24, 96, 240] {
        let cards = mosaic(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &cards, |b, cards| {
            b.iter(|| pack(cards, 1280.0, 16.0, None).unwrap().total_height);
        });
    }
    group.finish();

    let cards = mosaic(96);
    let pin = PinnedCard::new("card-40", 400.0, 240.0);
    c.bench_function("pack_96_pinned", |b| {
        b.iter(|| pack(&cards, 1280.0, 16.0, Some(&pin)).unwrap().total_height);
    });
}

criterion_group!(benches, bench_spring_step, bench_engine_gesture, bench_pack);
criterion_main!(benches);
