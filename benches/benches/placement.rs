// Copyright 2025 the Popstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Rect, Size, Vec2};
use popstack_placement::{
    AnchorPoint, AnchorRegistry, AnchorSource, BoundaryConstraints, ConstrainedEdges, Placement,
    avoid_boundaries, raw_position,
};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn gen_frames(n: usize, container: Size, seed: u64) -> Vec<Rect> {
    let mut rng = Rng::new(seed);
    (0..n)
        .map(|_| {
            let w = 20.0 + rng.next_f64() * container.width;
            let h = 20.0 + rng.next_f64() * container.height * 0.5;
            let x = rng.next_f64() * container.width * 1.5 - container.width * 0.25;
            let y = rng.next_f64() * container.height * 1.5 - container.height * 0.25;
            Rect::from_origin_size((x, y), (w, h))
        })
        .collect()
}

fn bench_raw_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_position");
    let anchors = gen_frames(1024, Size::new(390.0, 844.0), 7);
    group.throughput(Throughput::Elements((anchors.len() * 81) as u64));
    group.bench_function("all_anchor_pairs", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &anchor in &anchors {
                for origin in AnchorPoint::ALL {
                    for popup in AnchorPoint::ALL {
                        let p = raw_position(
                            anchor,
                            origin,
                            popup,
                            Vec2::new(0.0, 8.0),
                            Size::new(120.0, 40.0),
                        );
                        acc += p.x + p.y;
                    }
                }
            }
            black_box(acc);
        });
    });
    group.finish();
}

fn bench_avoid_boundaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("avoid_boundaries");
    let container = Size::new(390.0, 844.0);
    let frames = gen_frames(4096, container, 42);
    group.throughput(Throughput::Elements(frames.len() as u64));
    for (name, edges) in [
        ("horizontal", ConstrainedEdges::HORIZONTAL),
        ("both", ConstrainedEdges::all()),
    ] {
        let constraints = BoundaryConstraints {
            edges,
            edge_padding: 16.0,
            safe_area: Insets::new(0.0, 47.0, 0.0, 34.0),
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for &frame in &frames {
                    acc += avoid_boundaries(frame, container, &constraints).x0;
                }
                black_box(acc);
            });
        });
    }
    group.finish();
}

fn bench_keyed_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed_position");
    let container = Size::new(390.0, 844.0);
    let frames = gen_frames(256, container, 3);
    let mut registry = AnchorRegistry::new();
    let sources: Vec<AnchorSource> = frames
        .iter()
        .enumerate()
        .map(|(i, &frame)| {
            let key = format!("anchor-{i}");
            registry.set_frame(key.clone(), frame);
            AnchorSource::key(key)
        })
        .collect();
    let placement = Placement::default();
    group.throughput(Throughput::Elements(sources.len() as u64));
    group.bench_function("resolve_then_place", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for source in &sources {
                let p = placement.position(
                    source.resolve(&registry),
                    Size::new(180.0, 120.0),
                    container,
                    Insets::ZERO,
                );
                acc += p.x;
            }
            black_box(acc);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_raw_position,
    bench_avoid_boundaries,
    bench_keyed_position,
);
criterion_main!(benches);
