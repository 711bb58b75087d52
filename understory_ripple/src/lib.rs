// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_ripple --heading-base-level=0

//! Understory Ripple: ink ripple and highlight feedback for touch surfaces.
//!
//! ## Overview
//!
//! A surface shows two layers of feedback:
//! - a highlight that fades in over the whole surface while it is pressed;
//! - a ripple, a circle that grows from the touch point until it covers every corner.
//!
//! [`RippleAnimator`](crate::animator::RippleAnimator) owns the animated values and reacts to
//! gesture boundaries. [`InkWell`](crate::surface::InkWell) wires it to an
//! [`Arbiter`](understory_gesture::arbiter::Arbiter) so a single object takes raw pointer
//! events and frame ticks and hands back a [`SurfaceStyle`](crate::style::SurfaceStyle) per
//! frame.
//!
//! ## Nested children
//!
//! Interactive children keep their own touches. Each child exposes a
//! [`RegionHandle`](understory_measure::RegionHandle) reporting its bounds in the surface's
//! coordinates; a touch landing inside one, or any touch while one has not been laid out yet,
//! leaves the ripple untouched. An `InkWell` is itself a region handle, so wells nest.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use kurbo::{Point, Rect};
//! use understory_gesture::config::GestureConfig;
//! use understory_gesture::context::QueuedContext;
//! use understory_gesture::types::PointerEvent;
//! use understory_ripple::animator::RippleConfig;
//! use understory_ripple::surface::InkWell;
//!
//! let app = Rc::new(QueuedContext::new());
//! let mut well = InkWell::new(
//!     GestureConfig::new().on_tap(|| println!("tapped")),
//!     RippleConfig::new(),
//!     Rect::new(0.0, 0.0, 100.0, 50.0),
//!     Rc::clone(&app),
//! );
//! well.on_layout(Rect::new(0.0, 0.0, 100.0, 50.0));
//!
//! well.handle_pointer(&PointerEvent::down(Point::new(30.0, 20.0), 0));
//! well.handle_pointer(&PointerEvent::up(Point::new(30.0, 20.0), 80));
//!
//! let style = well.frame(96);
//! assert!(style.ripple.scale > 0.0);
//! assert!((style.ripple.corner_radius - 111.803).abs() < 1e-3);
//! app.run_pending();
//! ```

pub mod animator;
pub mod constants;
pub mod diagnostics;
pub mod style;
pub mod surface;
pub mod timing;
