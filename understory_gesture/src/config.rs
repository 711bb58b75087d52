// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture configuration and external recognizer handles.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use crate::constants::{
    DEFAULT_DOUBLE_TAP_MAX_DELAY_MS, DEFAULT_LONG_PRESS_MAX_DIST,
    DEFAULT_LONG_PRESS_MIN_DURATION_MS, DEFAULT_TAP_MAX_DURATION_MS,
};
use crate::context::Callback;
use crate::types::{Millis, RecognizerState};

/// A recognizer outside the arbiter that the arbiter must wait for.
///
/// The owner reports state changes with [`set_state`](Self::set_state); clones share the same
/// state. While it is [`Possible`](RecognizerState::Possible) the arbiter holds back
/// activation. If it activates, every recognizer waiting on it fails.
#[derive(Clone, Debug, Default)]
pub struct ExternalRecognizer {
    state: Rc<Cell<RecognizerState>>,
}

impl ExternalRecognizer {
    /// Create a handle in the [`Idle`](RecognizerState::Idle) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the external recognizer's current state.
    pub fn set_state(&self, state: RecognizerState) {
        self.state.set(state);
    }

    /// The last reported state.
    pub fn state(&self) -> RecognizerState {
        self.state.get()
    }

    /// Whether two handles refer to the same recognizer.
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// Callbacks and thresholds for an [`Arbiter`](crate::arbiter::Arbiter).
///
/// Double-tap recognition is enabled only when [`on_double_tap`](Self::on_double_tap) is set,
/// and long-press recognition only when [`on_long_press`](Self::on_long_press) is set.
#[derive(Clone)]
pub struct GestureConfig {
    /// When false the arbiter ignores pointer input.
    pub enabled: bool,
    /// Pointer went down on the surface.
    pub on_tap_down: Option<Callback>,
    /// Single tap recognized.
    pub on_tap: Option<Callback>,
    /// Single-tap tracking was cancelled.
    pub on_tap_cancel: Option<Callback>,
    /// Double tap recognized.
    pub on_double_tap: Option<Callback>,
    /// Long press crossed its minimum duration.
    pub on_long_press: Option<Callback>,
    /// Double-tap arming window.
    pub max_delay_ms: Millis,
    /// Long-press minimum hold.
    pub min_duration_ms: Millis,
    /// Longest press that still counts as a tap.
    pub max_duration_ms: Millis,
    /// Long-press travel limit in logical pixels.
    pub long_press_max_dist: f64,
    /// Recognizer every slot waits for.
    pub wait_for: Option<ExternalRecognizer>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            on_tap_down: None,
            on_tap: None,
            on_tap_cancel: None,
            on_double_tap: None,
            on_long_press: None,
            max_delay_ms: DEFAULT_DOUBLE_TAP_MAX_DELAY_MS,
            min_duration_ms: DEFAULT_LONG_PRESS_MIN_DURATION_MS,
            max_duration_ms: DEFAULT_TAP_MAX_DURATION_MS,
            long_press_max_dist: DEFAULT_LONG_PRESS_MAX_DIST,
            wait_for: None,
        }
    }
}

impl core::fmt::Debug for GestureConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureConfig")
            .field("enabled", &self.enabled)
            .field("on_tap_down", &self.on_tap_down.is_some())
            .field("on_tap", &self.on_tap.is_some())
            .field("on_tap_cancel", &self.on_tap_cancel.is_some())
            .field("on_double_tap", &self.on_double_tap.is_some())
            .field("on_long_press", &self.on_long_press.is_some())
            .field("max_delay_ms", &self.max_delay_ms)
            .field("min_duration_ms", &self.min_duration_ms)
            .field("max_duration_ms", &self.max_duration_ms)
            .field("long_press_max_dist", &self.long_press_max_dist)
            .field("wait_for", &self.wait_for)
            .finish()
    }
}

impl GestureConfig {
    /// Default thresholds, no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the surface.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the tap-down callback.
    #[must_use]
    pub fn on_tap_down(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_tap_down = Some(Arc::new(f));
        self
    }

    /// Set the tap callback.
    #[must_use]
    pub fn on_tap(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_tap = Some(Arc::new(f));
        self
    }

    /// Set the tap-cancel callback.
    #[must_use]
    pub fn on_tap_cancel(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_tap_cancel = Some(Arc::new(f));
        self
    }

    /// Set the double-tap callback, enabling double-tap recognition.
    #[must_use]
    pub fn on_double_tap(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_double_tap = Some(Arc::new(f));
        self
    }

    /// Set the long-press callback, enabling long-press recognition.
    #[must_use]
    pub fn on_long_press(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_long_press = Some(Arc::new(f));
        self
    }

    /// Set the double-tap arming window.
    #[must_use]
    pub fn max_delay_ms(mut self, ms: Millis) -> Self {
        self.max_delay_ms = ms;
        self
    }

    /// Set the long-press minimum hold.
    #[must_use]
    pub fn min_duration_ms(mut self, ms: Millis) -> Self {
        self.min_duration_ms = ms;
        self
    }

    /// Set the longest press that still counts as a tap.
    #[must_use]
    pub fn max_duration_ms(mut self, ms: Millis) -> Self {
        self.max_duration_ms = ms;
        self
    }

    /// Set how far a long press may travel, in logical pixels, before it fails.
    #[must_use]
    pub fn long_press_max_dist(mut self, px: f64) -> Self {
        self.long_press_max_dist = px;
        self
    }

    /// Wait for an external recognizer before activating.
    #[must_use]
    pub fn wait_for(mut self, external: ExternalRecognizer) -> Self {
        self.wait_for = Some(external);
        self
    }

    /// Whether double-tap recognition is enabled.
    pub fn double_tap_enabled(&self) -> bool {
        self.enabled && self.on_double_tap.is_some()
    }

    /// Whether long-press recognition is enabled.
    pub fn long_press_enabled(&self) -> bool {
        self.enabled && self.on_long_press.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = GestureConfig::default();
        assert!(c.enabled);
        assert_eq!(c.max_duration_ms, 3_000);
        assert!(!c.double_tap_enabled());
        assert!(!c.long_press_enabled());
    }

    #[test]
    fn callbacks_enable_optional_recognizers() {
        let c = GestureConfig::new().on_double_tap(|| {}).on_long_press(|| {});
        assert!(c.double_tap_enabled());
        assert!(c.long_press_enabled());
        let c = c.enabled(false);
        assert!(!c.double_tap_enabled());
        assert!(!c.long_press_enabled());
    }

    #[test]
    fn threshold_setters() {
        let c = GestureConfig::new()
            .max_delay_ms(250)
            .min_duration_ms(800)
            .max_duration_ms(1_000)
            .long_press_max_dist(24.0);
        assert_eq!(c.max_delay_ms, 250);
        assert_eq!(c.min_duration_ms, 800);
        assert_eq!(c.max_duration_ms, 1_000);
        assert_eq!(c.long_press_max_dist, 24.0);
    }

    #[test]
    fn external_handles_share_state() {
        let a = ExternalRecognizer::new();
        let b = a.clone();
        b.set_state(RecognizerState::Possible);
        assert_eq!(a.state(), RecognizerState::Possible);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&ExternalRecognizer::new()));
    }
}
