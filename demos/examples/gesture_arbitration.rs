// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration.
//!
//! Drive one arbiter through a lone tap, a double tap, and a long press, and print which
//! callbacks ran and when the visual gesture began and ended.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example gesture_arbitration`

use kurbo::Point;
use understory_gesture::arbiter::{Arbiter, GestureSink};
use understory_gesture::config::GestureConfig;
use understory_gesture::context::ChannelContext;
use understory_gesture::types::{Millis, PointerEvent};

struct Printer;

impl GestureSink for Printer {
    fn on_gesture_begin(&mut self, position: Point, time: Millis) {
        println!("render: begin at {position:?}, t={time}");
    }

    fn on_gesture_end(&mut self, time: Millis) {
        println!("render: end, t={time}");
    }
}

fn main() {
    env_logger::init();

    let (ctx, rx) = ChannelContext::channel();
    let app = std::thread::spawn(move || rx.run_until_closed());

    let config = GestureConfig::new()
        .on_tap_down(|| println!("app: tap down"))
        .on_tap(|| println!("app: tap"))
        .on_tap_cancel(|| println!("app: tap cancel"))
        .on_double_tap(|| println!("app: double tap"))
        .on_long_press(|| println!("app: long press"));
    let mut arbiter = Arbiter::new(config, ctx);
    let mut sink = Printer;
    let at = Point::new(40.0, 40.0);

    println!("-- lone tap");
    arbiter.handle_pointer(&PointerEvent::down(at, 0), &mut sink);
    arbiter.handle_pointer(&PointerEvent::up(at, 70), &mut sink);
    arbiter.tick(600, &mut sink);

    println!("-- double tap");
    arbiter.handle_pointer(&PointerEvent::down(at, 1_000), &mut sink);
    arbiter.handle_pointer(&PointerEvent::up(at, 1_060), &mut sink);
    arbiter.handle_pointer(&PointerEvent::down(at, 1_200), &mut sink);
    arbiter.handle_pointer(&PointerEvent::up(at, 1_260), &mut sink);

    println!("-- long press");
    arbiter.handle_pointer(&PointerEvent::down(at, 2_000), &mut sink);
    arbiter.tick(2_600, &mut sink);
    arbiter.handle_pointer(&PointerEvent::up(at, 2_900), &mut sink);

    drop(arbiter);
    let ran = app.join().unwrap_or(0);
    println!("app context ran {ran} callbacks");
}
