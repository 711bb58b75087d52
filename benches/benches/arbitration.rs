// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_gesture::arbiter::{Arbiter, GestureSink};
use understory_gesture::config::GestureConfig;
use understory_gesture::context::QueuedContext;
use understory_gesture::types::{Millis, PointerEvent};
use understory_ripple::animator::RippleConfig;
use understory_ripple::surface::InkWell;

#[derive(Default)]
struct Count(u32);

impl GestureSink for Count {
    fn on_gesture_begin(&mut self, _: Point, _: Millis) {
        self.0 += 1;
    }
    fn on_gesture_end(&mut self, _: Millis) {}
}

fn full_config() -> GestureConfig {
    GestureConfig::new()
        .on_tap(|| {})
        .on_tap_down(|| {})
        .on_double_tap(|| {})
        .on_long_press(|| {})
}

// Alternating isolated taps, double taps, and long presses, 16ms frames in between.
fn script(sequences: u64) -> Vec<(Option<PointerEvent>, Millis)> {
    let at = Point::new(30.0, 20.0);
    let mut out = Vec::new();
    let mut t = 0;
    for i in 0..sequences {
        let presses: &[(Millis, Millis)] = match i % 3 {
            0 => &[(0, 60)],
            1 => &[(0, 60), (150, 210)],
            _ => &[(0, 700)],
        };
        for &(down, up) in presses {
            out.push((Some(PointerEvent::down(at, t + down)), t + down));
            out.push((Some(PointerEvent::up(at, t + up)), t + up));
        }
        t += 1_000;
        let mut frame = t - 1_000;
        while frame < t {
            out.push((None, frame));
            frame += 16;
        }
    }
    // Stable, so a pointer event stays ahead of a frame with the same timestamp.
    out.sort_by_key(|(_, time)| *time);
    out
}

fn bench_arbiter(c: &mut Criterion) {
    let events = script(30);
    c.bench_function("arbiter_mixed_sequences", |b| {
        b.iter_batched(
            || Arbiter::new(full_config(), Rc::new(QueuedContext::new())),
            |mut arbiter| {
                let mut sink = Count::default();
                for (ev, time) in &events {
                    match ev {
                        Some(ev) => arbiter.handle_pointer(ev, &mut sink),
                        None => arbiter.tick(*time, &mut sink),
                    }
                }
                arbiter.context().run_pending();
                black_box(sink.0);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_inkwell_frames(c: &mut Criterion) {
    let events = script(30);
    c.bench_function("inkwell_mixed_sequences", |b| {
        b.iter_batched(
            || {
                let mut well = InkWell::new(
                    full_config(),
                    RippleConfig::new().child(Rect::new(200.0, 0.0, 240.0, 40.0)),
                    Rect::new(0.0, 0.0, 300.0, 120.0),
                    Rc::new(QueuedContext::new()),
                );
                well.on_layout(Rect::new(0.0, 0.0, 300.0, 120.0));
                well
            },
            |mut well| {
                let mut acc = 0.0;
                for (ev, time) in &events {
                    match ev {
                        Some(ev) => well.handle_pointer(ev),
                        None => acc += well.frame(*time).ripple.scale,
                    }
                }
                black_box(acc);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_arbiter, bench_inkwell_frames);
criterion_main!(benches);
