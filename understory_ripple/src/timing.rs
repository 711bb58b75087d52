// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves, tween specs, and animated scalars.
//!
//! ## Overview
//!
//! An [`AnimatedScalar`] holds a value and at most one running tween. Starting a new tween
//! first cancels the running one at its current sampled value, so a scalar never has two
//! animations in flight and a restart never jumps.
//!
//! Values only change when the scalar is [`tick`](AnimatedScalar::tick)ed or explicitly
//! [`set`](AnimatedScalar::set); nothing here reads a clock.

use understory_gesture::types::Millis;

/// An easing curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Easing {
    /// No easing.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow finish.
    EaseOut,
    /// Slow start and finish.
    EaseInOut,
    /// Quadratic slow start and finish, the usual default for timed value changes.
    #[default]
    EaseInOutQuad,
    /// A CSS-style cubic bézier with endpoints at `(0, 0)` and `(1, 1)`.
    CubicBezier {
        /// First control point x, expected in `[0, 1]`.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x, expected in `[0, 1]`.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Easing {
    /// Apply the curve to `fraction`. Inputs outside `[0, 1]` are clamped.
    pub fn transform(&self, fraction: f64) -> f64 {
        match *self {
            Self::Linear => fraction.clamp(0.0, 1.0),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Self::EaseInOutQuad => {
                let t = fraction.clamp(0.0, 1.0);
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = 2.0 - 2.0 * t;
                    1.0 - 0.5 * u * u
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let slope = |a: f64, b: f64, c: f64, t: f64| (3.0 * a * t + 2.0 * b) * t + c;

    // Solve x(t) = fraction with Newton-Raphson, then bisect if that stalls.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-7 {
            solved = true;
            break;
        }
        let dx = slope(ax, bx, cx, t);
        if dx.abs() < 1e-7 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0, 1.0);
        t = fraction;
        for _ in 0..32 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-7 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// Duration, start delay, and easing of a tween.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimingSpec {
    /// Length of the tween after the delay. Zero or negative finishes at once.
    pub duration_ms: f64,
    /// Time the value holds still before the tween starts.
    pub delay_ms: f64,
    /// Progress curve.
    pub easing: Easing,
}

impl Default for TimingSpec {
    fn default() -> Self {
        Self::tween(300.0, Easing::EaseInOutQuad)
    }
}

impl TimingSpec {
    /// A tween with no delay.
    pub const fn tween(duration_ms: f64, easing: Easing) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            easing,
        }
    }

    /// Hold for `delay_ms` before starting.
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Eased progress `elapsed_ms` after the tween was started, or `None` once finished.
    fn progress(&self, elapsed_ms: f64) -> Option<f64> {
        let run = elapsed_ms - self.delay_ms;
        if run < 0.0 {
            return Some(0.0);
        }
        if self.duration_ms <= 0.0 || run >= self.duration_ms {
            return None;
        }
        Some(self.easing.transform(run / self.duration_ms))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Tween {
    from: f64,
    to: f64,
    start: Millis,
    spec: TimingSpec,
}

impl Tween {
    // Value at `now`, and whether the tween is still running.
    fn sample(&self, now: Millis) -> (f64, bool) {
        let elapsed = now.saturating_sub(self.start) as f64;
        match self.spec.progress(elapsed) {
            Some(p) => (self.from + (self.to - self.from) * p, true),
            None => (self.to, false),
        }
    }
}

/// A scalar with at most one tween in flight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimatedScalar {
    value: f64,
    tween: Option<Tween>,
}

impl AnimatedScalar {
    /// A resting scalar.
    pub const fn new(value: f64) -> Self {
        Self { value, tween: None }
    }

    /// Value as of the last tick or explicit mutation.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Where the running tween is heading, or the current value when at rest.
    pub fn target(&self) -> f64 {
        self.tween.map_or(self.value, |t| t.to)
    }

    /// Whether a tween is in flight.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Drop any tween and jump to `value`.
    pub fn set(&mut self, value: f64) {
        self.tween = None;
        self.value = value;
    }

    /// Stop the running tween, keeping the value it had reached at `now`.
    pub fn cancel(&mut self, now: Millis) {
        if let Some(tween) = self.tween.take() {
            self.value = tween.sample(now).0;
        }
    }

    /// Start tweening from the current value to `target`, cancelling any running tween first.
    pub fn animate_to(&mut self, target: f64, spec: TimingSpec, now: Millis) {
        self.cancel(now);
        self.tween = Some(Tween {
            from: self.value,
            to: target,
            start: now,
            spec,
        });
    }

    /// Advance to `now` and return the new value.
    pub fn tick(&mut self, now: Millis) -> f64 {
        if let Some(tween) = self.tween {
            let (value, running) = tween.sample(now);
            self.value = value;
            if !running {
                self.tween = None;
            }
        }
        self.value
    }
}
