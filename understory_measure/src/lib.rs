// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_measure --heading-base-level=0

//! Understory Measure: region measurement and geometry for touch-feedback surfaces.
//!
//! ## Overview
//!
//! A touch surface that draws an ink ripple needs two pieces of geometry every time a
//! gesture begins:
//!
//! - How far the ripple must grow so it can cover every corner of the surface.
//!   See [`compute_max_radius`].
//! - Whether the touch landed on a nested interactive child that should own the gesture
//!   instead of the surface. See [`is_inside_any_child`] and [`claiming_child`].
//!
//! Layout happens elsewhere. Children expose their bounds through a [`RegionHandle`], whose
//! [`measure`](RegionHandle::measure) either returns a [`Rect`](kurbo::Rect) or fails fast with a
//! [`MeasureError`]. A child that has just mounted and has not been laid out yet reports
//! [`MeasureError::NotReady`].
//!
//! ## Conservative hit testing
//!
//! A region that cannot be measured claims the touch. Playing the parent ripple on top of a
//! child's own feedback is worse than occasionally skipping a ripple while a child is still
//! mounting.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_measure::{LayoutSlot, compute_max_radius, is_inside_any_child};
//!
//! let radius = compute_max_radius(Size::new(100.0, 50.0), None);
//! assert!((radius - 111.803).abs() < 1e-3);
//!
//! let child = LayoutSlot::new();
//! // Not laid out yet: the child claims every touch.
//! assert!(is_inside_any_child(Point::new(90.0, 40.0), &[&child]));
//!
//! child.set_layout(Rect::new(0.0, 0.0, 50.0, 50.0));
//! assert!(is_inside_any_child(Point::new(10.0, 10.0), &[&child]));
//! assert!(!is_inside_any_child(Point::new(90.0, 40.0), &[&child]));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod hit;
mod radius;
mod region;

pub use hit::{ChildClaim, ClaimReason, claiming_child, is_inside_any_child, region_contains};
pub use radius::compute_max_radius;
pub use region::{LayoutSlot, MeasureError, RegionHandle};
