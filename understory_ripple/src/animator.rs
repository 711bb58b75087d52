// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ripple animator.
//!
//! ## Overview
//!
//! [`RippleAnimator`] owns the ripple center plus the animated ripple scale, ripple opacity, and
//! highlight opacity, and mutates them in response to gesture boundaries:
//!
//! - [`on_gesture_begin`](RippleAnimator::on_gesture_begin) re-measures the surface, asks the
//!   child hit tester whether a nested child owns the touch, and if not restarts the ripple
//!   at the touch point.
//! - [`on_gesture_end`](RippleAnimator::on_gesture_end) fades the highlight, holds and then
//!   fades the ripple, and lets an interrupted ripple finish growing at a speed proportional to
//!   the radius it still has to cover.
//!
//! The render layer calls [`frame`](RippleAnimator::frame) once per frame and draws the
//! returned [`SurfaceStyle`].
//!
//! ## Coordinates
//!
//! Gesture positions are local to the surface, and child regions report bounds in that same
//! space, the way a layout pass reports a child relative to its parent. The surface's own
//! handle only contributes its size, so a surface that has not been measured yet still hit
//! tests correctly.

use kurbo::{Point, Size};
use understory_gesture::arbiter::GestureSink;
use understory_gesture::types::Millis;
use understory_measure::{ChildClaim, RegionHandle, claiming_child, compute_max_radius};

use crate::constants::{
    DEFAULT_SCALE_EASING, DOUBLE_TAP_SCALE_START, HIGHLIGHT_FADE_IN_MS, HIGHLIGHT_FADE_OUT_MS,
    MIN_SCALE_DURATION_MS, RIPPLE_FADE_DELAY_MS, RIPPLE_FADE_OUT_MS, SCALE_RADIUS_PER_MS,
};
use crate::style::SurfaceStyle;
use crate::timing::{AnimatedScalar, Easing, TimingSpec};

/// Ripple geometry and timing for one surface.
#[derive(Clone, Debug)]
pub struct RippleConfig<R> {
    /// Upper bound for the ripple radius. `None` covers the whole surface.
    pub radius: Option<f64>,
    /// Fixed growth duration. `None` derives it from the radius.
    pub scale_duration_ms: Option<f64>,
    /// Growth easing.
    pub easing: Easing,
    /// Nested interactive children that own touches landing on them.
    pub children: Vec<R>,
    /// Whether the surface also recognizes double taps.
    pub double_tap_paired: bool,
}

impl<R> Default for RippleConfig<R> {
    fn default() -> Self {
        Self {
            radius: None,
            scale_duration_ms: None,
            easing: DEFAULT_SCALE_EASING,
            children: Vec::new(),
            double_tap_paired: false,
        }
    }
}

impl<R> RippleConfig<R> {
    /// Default geometry and timing, no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the ripple radius.
    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Use a fixed growth duration.
    #[must_use]
    pub fn scale_duration_ms(mut self, ms: f64) -> Self {
        self.scale_duration_ms = Some(ms);
        self
    }

    /// Override the growth easing.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Add a nested child region.
    #[must_use]
    pub fn child(mut self, region: R) -> Self {
        self.children.push(region);
        self
    }

    /// Mark the surface as paired with a double-tap recognizer.
    #[must_use]
    pub fn double_tap_paired(mut self, paired: bool) -> Self {
        self.double_tap_paired = paired;
        self
    }

    fn scale_start(&self) -> f64 {
        if self.double_tap_paired {
            DOUBLE_TAP_SCALE_START
        } else {
            0.0
        }
    }
}

/// A snapshot of the animated values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimatedRippleState {
    /// Ripple layer x offset; the circle's center lands on the touch point.
    pub center_x: f64,
    /// Ripple layer y offset.
    pub center_y: f64,
    /// Radius that covers the surface, possibly capped.
    pub max_radius: f64,
    /// Ripple scale.
    pub scale: f64,
    /// Ripple opacity.
    pub ripple_opacity: f64,
    /// Highlight opacity.
    pub highlight_opacity: f64,
}

impl AnimatedRippleState {
    /// Values of a surface that has never been touched or laid out.
    pub const RESTING: Self = Self {
        center_x: 0.0,
        center_y: 0.0,
        max_radius: 0.0,
        scale: 0.0,
        ripple_opacity: 1.0,
        highlight_opacity: 0.0,
    };
}

impl Default for AnimatedRippleState {
    fn default() -> Self {
        Self::RESTING
    }
}

/// What [`RippleAnimator::on_gesture_begin`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BeginOutcome {
    /// The ripple restarted at the touch point.
    Started,
    /// A nested child owns the touch; nothing changed.
    Suppressed(ChildClaim),
    /// The surface was torn down; nothing changed.
    TornDown,
}

/// Drives the ripple and highlight of one surface.
pub struct RippleAnimator<R> {
    config: RippleConfig<R>,
    surface: R,
    size: Option<Size>,
    max_radius: f64,
    center: Point,
    scale: AnimatedScalar,
    ripple_opacity: AnimatedScalar,
    highlight_opacity: AnimatedScalar,
    engaged: bool,
    torn_down: bool,
}

impl<R> core::fmt::Debug for RippleAnimator<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RippleAnimator")
            .field("state", &self.snapshot())
            .field("engaged", &self.engaged)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl<R: RegionHandle> RippleAnimator<R> {
    /// Create an animator for the surface measured through `surface`.
    pub fn new(surface: R, config: RippleConfig<R>) -> Self {
        let rest = AnimatedRippleState::RESTING;
        Self {
            config,
            surface,
            size: None,
            max_radius: rest.max_radius,
            center: Point::new(rest.center_x, rest.center_y),
            scale: AnimatedScalar::new(rest.scale),
            ripple_opacity: AnimatedScalar::new(rest.ripple_opacity),
            highlight_opacity: AnimatedScalar::new(rest.highlight_opacity),
            engaged: false,
            torn_down: false,
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &RippleConfig<R> {
        &self.config
    }

    /// The surface's own region handle.
    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// Replace the configuration without touching running animations.
    ///
    /// A new radius cap applies at once when the surface size is known.
    pub fn set_config(&mut self, config: RippleConfig<R>) {
        if self.torn_down {
            return;
        }
        self.config = config;
        if let Some(size) = self.size {
            self.max_radius = compute_max_radius(size, self.config.radius);
        }
    }

    /// Record a layout pass.
    pub fn on_layout(&mut self, size: Size) {
        if self.torn_down {
            return;
        }
        self.size = Some(size);
        self.max_radius = compute_max_radius(size, self.config.radius);
    }

    /// Start the ripple at `position`, in surface-local coordinates.
    pub fn on_gesture_begin(&mut self, position: Point, now: Millis) -> BeginOutcome {
        if self.torn_down {
            return BeginOutcome::TornDown;
        }
        match self.surface.measure() {
            Ok(bounds) => {
                self.size = Some(bounds.size());
                self.max_radius = compute_max_radius(bounds.size(), self.config.radius);
            }
            Err(err) => {
                log::debug!("surface not measurable ({err}); keeping radius {}", self.max_radius);
            }
        }

        if let Some(claim) = claiming_child(position, &self.config.children) {
            log::debug!("ripple suppressed: child {} owns {position:?}", claim.index);
            return BeginOutcome::Suppressed(claim);
        }

        let r = self.max_radius;
        self.highlight_opacity.set(0.0);
        self.highlight_opacity.animate_to(
            1.0,
            TimingSpec::tween(HIGHLIGHT_FADE_IN_MS, Easing::EaseInOutQuad),
            now,
        );
        self.ripple_opacity.set(1.0);
        self.center = Point::new(position.x - r, position.y - r);
        self.scale.set(self.config.scale_start());
        let duration = self
            .config
            .scale_duration_ms
            .unwrap_or_else(|| (r / SCALE_RADIUS_PER_MS).max(MIN_SCALE_DURATION_MS));
        self.scale
            .animate_to(1.0, TimingSpec::tween(duration, self.config.easing), now);
        self.engaged = true;
        log::debug!("ripple started at {position:?}, radius {r}, growing over {duration}ms");
        BeginOutcome::Started
    }

    /// Release the ripple. Returns whether anything changed.
    pub fn on_gesture_end(&mut self, now: Millis) -> bool {
        if !self.engaged || self.torn_down {
            return false;
        }
        self.highlight_opacity.animate_to(
            0.0,
            TimingSpec::tween(HIGHLIGHT_FADE_OUT_MS, Easing::EaseInOutQuad),
            now,
        );
        self.ripple_opacity.animate_to(
            0.0,
            TimingSpec::tween(RIPPLE_FADE_OUT_MS, Easing::EaseInOutQuad)
                .with_delay(RIPPLE_FADE_DELAY_MS),
            now,
        );
        self.scale.cancel(now);
        let remaining = (self.max_radius * (1.0 - self.scale.value())).max(0.0);
        self.scale
            .animate_to(1.0, TimingSpec::tween(remaining, Easing::EaseInOutQuad), now);
        self.engaged = false;
        log::debug!("ripple released at {now}; finishing growth over {remaining}ms");
        true
    }

    /// Advance every animation to `now` and return the frame's style.
    pub fn frame(&mut self, now: Millis) -> SurfaceStyle {
        if !self.torn_down {
            self.scale.tick(now);
            self.ripple_opacity.tick(now);
            self.highlight_opacity.tick(now);
        }
        SurfaceStyle::from(&self.snapshot())
    }

    /// Stop every animation where it stands and refuse further changes.
    pub fn teardown(&mut self, now: Millis) {
        if self.torn_down {
            return;
        }
        self.scale.cancel(now);
        self.ripple_opacity.cancel(now);
        self.highlight_opacity.cancel(now);
        self.engaged = false;
        self.torn_down = true;
    }
}

impl<R> RippleAnimator<R> {
    /// Current values, as of the last frame or mutation.
    pub fn snapshot(&self) -> AnimatedRippleState {
        AnimatedRippleState {
            center_x: self.center.x,
            center_y: self.center.y,
            max_radius: self.max_radius,
            scale: self.scale.value(),
            ripple_opacity: self.ripple_opacity.value(),
            highlight_opacity: self.highlight_opacity.value(),
        }
    }

    /// Radius that covers the surface, possibly capped.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Whether a ripple is pressed and waiting for its release.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Whether any value is still animating.
    pub fn is_animating(&self) -> bool {
        self.scale.is_animating()
            || self.ripple_opacity.is_animating()
            || self.highlight_opacity.is_animating()
    }

    /// Whether [`teardown`](RippleAnimator::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Where the scale is heading.
    pub fn scale_target(&self) -> f64 {
        self.scale.target()
    }

    /// Where the highlight opacity is heading.
    pub fn highlight_target(&self) -> f64 {
        self.highlight_opacity.target()
    }

    /// Where the ripple opacity is heading.
    pub fn ripple_opacity_target(&self) -> f64 {
        self.ripple_opacity.target()
    }
}

impl<R: RegionHandle> GestureSink for RippleAnimator<R> {
    fn on_gesture_begin(&mut self, position: Point, time: Millis) {
        let _ = Self::on_gesture_begin(self, position, time);
    }

    fn on_gesture_end(&mut self, time: Millis) {
        let _ = Self::on_gesture_end(self, time);
    }
}
