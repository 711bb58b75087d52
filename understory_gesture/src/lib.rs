// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: deterministic tap, double-tap, and long-press arbitration.
//!
//! ## Overview
//!
//! This crate decides which touch gesture a surface saw. It does not draw anything and it does
//! not read a clock. Feed it timestamped [`PointerEvent`](crate::types::PointerEvent)s and frame
//! ticks, and it reports:
//! - user callbacks (`on_tap_down`, `on_tap`, `on_tap_cancel`, `on_double_tap`,
//!   `on_long_press`), posted to an [`AppContext`](crate::context::AppContext);
//! - one begin/end pair per gesture sequence, from the press to its release or resolution,
//!   delivered synchronously to a [`GestureSink`](crate::arbiter::GestureSink) so a visual layer
//!   can animate in the same frame.
//!
//! ## Recognizers
//!
//! Three slots live in every [`Arbiter`](crate::arbiter::Arbiter):
//! - single tap, always enabled while the surface is enabled;
//! - double tap, enabled when an `on_double_tap` callback is configured;
//! - long press, enabled when an `on_long_press` callback is configured.
//!
//! Each slot walks the state machine described on
//! [`RecognizerState`](crate::types::RecognizerState).
//!
//! ## Arbitration
//!
//! A single tap waits for the double-tap slot, so a lone tap is reported only after the
//! double-tap arming window elapses, and a double tap never reports a single tap. Every slot can
//! also wait for an [`ExternalRecognizer`](crate::config::ExternalRecognizer) owned by some other
//! part of the UI. See the [`arbiter`](crate::arbiter) module for the full rules.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use kurbo::Point;
//! use understory_gesture::arbiter::{Arbiter, GestureSink};
//! use understory_gesture::config::GestureConfig;
//! use understory_gesture::context::QueuedContext;
//! use understory_gesture::types::{Millis, PointerEvent};
//!
//! struct Visual(u32);
//! impl GestureSink for Visual {
//!     fn on_gesture_begin(&mut self, _: Point, _: Millis) { self.0 += 1; }
//!     fn on_gesture_end(&mut self, _: Millis) {}
//! }
//!
//! let taps = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&taps);
//! let config = GestureConfig::new().on_tap(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//! let app = Rc::new(QueuedContext::new());
//! let mut arbiter = Arbiter::new(config, Rc::clone(&app));
//! let mut visual = Visual(0);
//!
//! let at = Point::new(30.0, 20.0);
//! arbiter.handle_pointer(&PointerEvent::down(at, 0), &mut visual);
//! arbiter.handle_pointer(&PointerEvent::up(at, 90), &mut visual);
//! assert_eq!(visual.0, 1);
//!
//! // Callbacks run when the application context drains its queue.
//! assert_eq!(taps.load(Ordering::SeqCst), 0);
//! app.run_pending();
//! assert_eq!(taps.load(Ordering::SeqCst), 1);
//! ```

pub mod arbiter;
pub mod config;
pub mod constants;
pub mod context;
pub mod recognizer;
pub mod types;
