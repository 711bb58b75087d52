// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested children.
//!
//! A card surface with a button well nested in it. The card lists the button's region as a
//! child, so touches on the button play only the button's ripple while touches beside it play
//! the card's. A button that has not been laid out yet claims every card touch.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example nested_children`

use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use understory_gesture::config::GestureConfig;
use understory_gesture::context::{AppContext, QueuedContext};
use understory_gesture::types::{Millis, PointerEvent};
use understory_measure::{LayoutSlot, RegionHandle};
use understory_ripple::animator::RippleConfig;
use understory_ripple::diagnostics::{Alignment, ContainerStyle};
use understory_ripple::surface::InkWell;

fn press<C: AppContext, R: RegionHandle>(well: &mut InkWell<C, R>, at: Point, t: Millis) {
    well.handle_pointer(&PointerEvent::down(at, t));
}

fn release<C: AppContext, R: RegionHandle>(well: &mut InkWell<C, R>, at: Point, t: Millis) {
    well.handle_pointer(&PointerEvent::up(at, t));
}

fn main() {
    env_logger::init();

    let app = Rc::new(QueuedContext::new());
    let mut button = InkWell::new(
        GestureConfig::new().on_tap(|| println!("app: button tapped")),
        RippleConfig::new(),
        Rect::new(0.0, 0.0, 60.0, 40.0),
        Rc::clone(&app),
    );
    let card_surface = Rc::new(LayoutSlot::new());
    let mut card = InkWell::new(
        GestureConfig::new().on_tap(|| println!("app: card tapped")),
        RippleConfig::new().child(button.region()),
        Rc::clone(&card_surface),
        Rc::clone(&app),
    );

    // Container alignment belongs on the content style; this logs a warning in debug builds.
    if let Some(advisory) = card.set_container_style(ContainerStyle {
        align_items: Some(Alignment::Center),
        corner_radius: Some(8.0),
        ..ContainerStyle::default()
    }) {
        println!("advisory: {advisory}");
    }

    let card_bounds = Rect::new(0.0, 0.0, 200.0, 80.0);
    card_surface.set_layout(card_bounds);
    card.on_layout(card_bounds);

    let beside = Point::new(150.0, 40.0);
    press(&mut card, beside, 0);
    println!(
        "button not laid out, press beside it: card ripple={}",
        card.animator().is_engaged()
    );
    release(&mut card, beside, 50);

    // The button's layout is reported in the card's coordinates.
    button.on_layout(Rect::new(10.0, 20.0, 70.0, 60.0));
    let on_button = Point::new(30.0, 30.0);
    let button_origin = button.layout().map_or(Vec2::ZERO, |b| b.origin().to_vec2());
    press(&mut card, on_button, 1_000);
    press(&mut button, on_button - button_origin, 1_000);
    println!(
        "press on button: card ripple={}, button ripple={}",
        card.animator().is_engaged(),
        button.animator().is_engaged()
    );
    release(&mut card, on_button, 1_050);
    release(&mut button, on_button - button_origin, 1_050);

    press(&mut card, beside, 2_000);
    let style = card.frame(2_100);
    println!(
        "press beside button: card ripple={}, highlight={:.2}, clip radius={:?}",
        card.animator().is_engaged(),
        style.highlight.opacity,
        style.content.corner_radius
    );
    release(&mut card, beside, 2_150);
    card.frame(3_000);
    button.frame(3_000);
    app.run_pending();
}
