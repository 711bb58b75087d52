// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default gesture thresholds.
//!
//! Durations are in milliseconds and distances in logical pixels.

use crate::types::Millis;

/// Longest a single press may be held and still count as a tap.
pub const DEFAULT_TAP_MAX_DURATION_MS: Millis = 3_000;

/// Double-tap arming window: the longest gap between the first release and the second press.
pub const DEFAULT_DOUBLE_TAP_MAX_DELAY_MS: Millis = 500;

/// Minimum hold before a press becomes a long press.
pub const DEFAULT_LONG_PRESS_MIN_DURATION_MS: Millis = 500;

/// How far a pointer may travel from its press position before a long press gives up.
pub const DEFAULT_LONG_PRESS_MAX_DIST: f64 = 10.0;
