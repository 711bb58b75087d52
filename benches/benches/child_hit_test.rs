// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_measure::{LayoutSlot, compute_max_radius, is_inside_any_child};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

// A row of `n` children, each `cell` wide, separated by `cell` gaps.
fn gen_children(n: usize, cell: f64) -> Vec<Rect> {
    (0..n)
        .map(|i| Rect::from_origin_size((i as f64 * cell * 2.0, 0.0), (cell, cell)))
        .collect()
}

fn gen_points(count: usize, width: f64, height: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * width, rng.next_f64() * height))
        .collect()
}

fn bench_rects(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_rects");
    for &n in &[1usize, 8, 64] {
        let children = gen_children(n, 20.0);
        let points = gen_points(1_024, n as f64 * 40.0, 40.0);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("children_n{n}"), |b| {
            b.iter(|| {
                let hits = points
                    .iter()
                    .filter(|pt| is_inside_any_child(**pt, &children))
                    .count();
                black_box(hits);
            });
        });
    }
    group.finish();
}

fn bench_layout_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_layout_slots");
    let slots: Vec<LayoutSlot> = gen_children(64, 20.0)
        .into_iter()
        .map(LayoutSlot::with_layout)
        .collect();
    let refs: Vec<&LayoutSlot> = slots.iter().collect();
    let points = gen_points(1_024, 64.0 * 40.0, 40.0);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("children_n64", |b| {
        b.iter(|| {
            let hits = points
                .iter()
                .filter(|pt| is_inside_any_child(**pt, &refs))
                .count();
            black_box(hits);
        });
    });
    group.finish();
}

fn bench_radius(c: &mut Criterion) {
    let sizes: Vec<Size> = gen_points(1_024, 2_000.0, 2_000.0)
        .into_iter()
        .map(|p| Size::new(p.x, p.y))
        .collect();
    c.bench_function("max_radius_capped", |b| {
        b.iter(|| {
            let total: f64 = sizes
                .iter()
                .map(|s| compute_max_radius(*s, Some(400.0)))
                .sum();
            black_box(total);
        });
    });
}

criterion_group!(benches, bench_rects, bench_layout_slots, bench_radius);
criterion_main!(benches);
