// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default animation timings.
//!
//! Durations are in milliseconds.

use crate::timing::Easing;

/// Easing of the ripple's growth unless the configuration overrides it.
pub const DEFAULT_SCALE_EASING: Easing = Easing::CubicBezier {
    x1: 0.25,
    y1: 0.5,
    x2: 0.4,
    y2: 1.0,
};

/// Growth speed used to derive the default scale duration, in logical pixels per millisecond.
pub const SCALE_RADIUS_PER_MS: f64 = 0.3;

/// Shortest default scale duration.
pub const MIN_SCALE_DURATION_MS: f64 = 500.0;

/// Highlight fade-in.
pub const HIGHLIGHT_FADE_IN_MS: f64 = 300.0;

/// Highlight fade-out.
pub const HIGHLIGHT_FADE_OUT_MS: f64 = 100.0;

/// How long the ripple stays opaque after release.
pub const RIPPLE_FADE_DELAY_MS: f64 = 150.0;

/// Ripple fade-out after the hold.
pub const RIPPLE_FADE_OUT_MS: f64 = 250.0;

/// Starting scale when the surface also recognizes double taps.
pub const DOUBLE_TAP_SCALE_START: f64 = 0.01;
