// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple basics.
//!
//! Tap a 100x50 surface and print the ripple's style every few frames.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example ripple_basics`

use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_gesture::config::GestureConfig;
use understory_gesture::context::QueuedContext;
use understory_gesture::types::PointerEvent;
use understory_ripple::animator::RippleConfig;
use understory_ripple::surface::InkWell;

fn main() {
    env_logger::init();

    let app = Rc::new(QueuedContext::new());
    let mut well = InkWell::new(
        GestureConfig::new()
            .on_tap_down(|| println!("app: tap down"))
            .on_tap(|| println!("app: tap")),
        RippleConfig::new(),
        Rect::new(0.0, 0.0, 100.0, 50.0),
        Rc::clone(&app),
    );
    well.on_layout(Rect::new(0.0, 0.0, 100.0, 50.0));

    let radius = well.animator().max_radius();
    println!("max radius: {radius:.1}");

    // Hold the press for 160ms, then release.
    let touch = Point::new(30.0, 20.0);
    well.handle_pointer(&PointerEvent::down(touch, 0));
    for now in (0..=704).step_by(32) {
        if now == 160 {
            well.handle_pointer(&PointerEvent::up(touch, now));
            app.run_pending();
        }
        let style = well.frame(now);
        println!(
            "t={now:>4}ms scale={:.3} ripple={:.2} highlight={:.2} center={:?}",
            style.ripple.scale,
            style.ripple.opacity,
            style.highlight.opacity,
            style.ripple.center(),
        );
    }
    assert!(!well.animator().is_animating(), "ripple should settle");
}
