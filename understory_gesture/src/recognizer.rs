// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer primitives.
//!
//! ## Overview
//!
//! Each recognizer consumes raw [`PointerEvent`]s plus timer deadlines and reports
//! [`Transition`]s. Recognizers know nothing about each other; precedence between them is the
//! [`arbiter`](crate::arbiter)'s job.
//!
//! ## Timers
//!
//! A recognizer exposes its next [`deadline`](Recognizer::deadline). The driver calls
//! [`expire`](Recognizer::expire) with a time at or past that deadline; the resulting transition
//! is stamped with the deadline itself so coarse ticks do not shift recognition times.

use kurbo::{Point, Rect};

use crate::types::{Millis, PointerEvent, PointerPhase, RecognizerState, Transition};

/// Recognizes `taps_required` consecutive taps.
///
/// - A press held longer than `max_duration` fails.
/// - A gap longer than `max_delay` between a release and the next press fails.
/// - Leaving the surface bounds or a platform cancel cancels.
/// - The final release moves `Possible → Active → Ended` at once.
#[derive(Clone, Debug)]
pub struct TapRecognizer {
    taps_required: u32,
    max_duration: Millis,
    max_delay: Millis,
    state: RecognizerState,
    taps_done: u32,
    pressed: bool,
    last: Point,
    deadline: Option<Millis>,
}

impl TapRecognizer {
    /// Create a recognizer for `taps_required` taps (at least one).
    pub fn new(taps_required: u32, max_duration: Millis, max_delay: Millis) -> Self {
        Self {
            taps_required: taps_required.max(1),
            max_duration,
            max_delay,
            state: RecognizerState::Idle,
            taps_done: 0,
            pressed: false,
            last: Point::ZERO,
            deadline: None,
        }
    }

    /// Update thresholds. A running deadline keeps its old value.
    pub fn configure(&mut self, max_duration: Millis, max_delay: Millis) {
        self.max_duration = max_duration;
        self.max_delay = max_delay;
    }

    /// Number of taps this recognizer waits for.
    pub fn taps_required(&self) -> u32 {
        self.taps_required
    }

    fn handle(&mut self, ev: &PointerEvent, bounds: Option<Rect>, out: &mut Vec<Transition>) {
        self.last = ev.position;
        let outside = bounds.is_some_and(|b| !b.contains(ev.position));
        match (self.state, ev.phase) {
            (RecognizerState::Idle, PointerPhase::Down) => {
                if outside {
                    return;
                }
                self.taps_done = 0;
                self.pressed = true;
                self.deadline = Some(ev.time.saturating_add(self.max_duration));
                self.go(RecognizerState::Possible, ev.position, ev.time, out);
            }
            (RecognizerState::Possible, PointerPhase::Down) if !self.pressed => {
                self.pressed = true;
                self.deadline = Some(ev.time.saturating_add(self.max_duration));
            }
            (RecognizerState::Possible, PointerPhase::Move) if outside => {
                self.go(RecognizerState::Cancelled, ev.position, ev.time, out);
            }
            (RecognizerState::Possible, PointerPhase::Up) if self.pressed => {
                if outside {
                    self.go(RecognizerState::Cancelled, ev.position, ev.time, out);
                    return;
                }
                self.pressed = false;
                self.taps_done += 1;
                if self.taps_done >= self.taps_required {
                    self.go(RecognizerState::Active, ev.position, ev.time, out);
                    self.go(RecognizerState::Ended, ev.position, ev.time, out);
                } else {
                    self.deadline = Some(ev.time.saturating_add(self.max_delay));
                }
            }
            (RecognizerState::Possible | RecognizerState::Active, PointerPhase::Cancel) => {
                self.go(RecognizerState::Cancelled, ev.position, ev.time, out);
            }
            _ => {}
        }
    }

    fn expire(&mut self, now: Millis, out: &mut Vec<Transition>) {
        if let Some(deadline) = self.deadline
            && deadline <= now
            && self.state == RecognizerState::Possible
        {
            log::trace!(
                "tap x{} timed out at {deadline} after {} taps",
                self.taps_required,
                self.taps_done
            );
            self.go(RecognizerState::Failed, self.last, deadline, out);
        }
    }

    fn go(
        &mut self,
        to: RecognizerState,
        position: Point,
        time: Millis,
        out: &mut Vec<Transition>,
    ) {
        out.push(Transition {
            from: self.state,
            to,
            position,
            time,
        });
        self.state = to;
        if to.is_terminal() {
            self.deadline = None;
            self.pressed = false;
        }
    }

    fn reset(&mut self) {
        self.state = RecognizerState::Idle;
        self.taps_done = 0;
        self.pressed = false;
        self.deadline = None;
    }
}

/// Recognizes a press held for at least `min_duration`.
///
/// - Crossing the threshold while still pressed moves `Possible → Active`.
/// - Releasing before the threshold fails; releasing after it ends.
/// - Travelling more than `max_dist` from the press position fails (or cancels once active).
#[derive(Clone, Debug)]
pub struct LongPressRecognizer {
    min_duration: Millis,
    max_dist: f64,
    state: RecognizerState,
    start: Point,
    last: Point,
    deadline: Option<Millis>,
}

impl LongPressRecognizer {
    /// Create a long-press recognizer.
    pub fn new(min_duration: Millis, max_dist: f64) -> Self {
        Self {
            min_duration,
            max_dist,
            state: RecognizerState::Idle,
            start: Point::ZERO,
            last: Point::ZERO,
            deadline: None,
        }
    }

    /// Update thresholds. A running deadline keeps its old value.
    pub fn configure(&mut self, min_duration: Millis, max_dist: f64) {
        self.min_duration = min_duration;
        self.max_dist = max_dist;
    }

    fn handle(&mut self, ev: &PointerEvent, bounds: Option<Rect>, out: &mut Vec<Transition>) {
        self.last = ev.position;
        match (self.state, ev.phase) {
            (RecognizerState::Idle, PointerPhase::Down) => {
                if bounds.is_some_and(|b| !b.contains(ev.position)) {
                    return;
                }
                self.start = ev.position;
                self.deadline = Some(ev.time.saturating_add(self.min_duration));
                self.go(RecognizerState::Possible, ev.position, ev.time, out);
            }
            (RecognizerState::Possible, PointerPhase::Move) => {
                if self.start.distance(ev.position) > self.max_dist {
                    self.go(RecognizerState::Failed, ev.position, ev.time, out);
                }
            }
            (RecognizerState::Active, PointerPhase::Move) => {
                if self.start.distance(ev.position) > self.max_dist {
                    self.go(RecognizerState::Cancelled, ev.position, ev.time, out);
                }
            }
            (RecognizerState::Possible, PointerPhase::Up) => {
                self.go(RecognizerState::Failed, ev.position, ev.time, out);
            }
            (RecognizerState::Active, PointerPhase::Up) => {
                self.go(RecognizerState::Ended, ev.position, ev.time, out);
            }
            (RecognizerState::Possible | RecognizerState::Active, PointerPhase::Cancel) => {
                self.go(RecognizerState::Cancelled, ev.position, ev.time, out);
            }
            _ => {}
        }
    }

    fn expire(&mut self, now: Millis, out: &mut Vec<Transition>) {
        if let Some(deadline) = self.deadline
            && deadline <= now
            && self.state == RecognizerState::Possible
        {
            log::trace!("long press crossed {}ms at {deadline}", self.min_duration);
            self.deadline = None;
            self.go(RecognizerState::Active, self.last, deadline, out);
        }
    }

    fn go(
        &mut self,
        to: RecognizerState,
        position: Point,
        time: Millis,
        out: &mut Vec<Transition>,
    ) {
        out.push(Transition {
            from: self.state,
            to,
            position,
            time,
        });
        self.state = to;
        if to.is_terminal() {
            self.deadline = None;
        }
    }

    fn reset(&mut self) {
        self.state = RecognizerState::Idle;
        self.deadline = None;
    }
}

/// A recognizer primitive of either family.
#[derive(Clone, Debug)]
pub enum Recognizer {
    /// Tap-counting recognizer.
    Tap(TapRecognizer),
    /// Hold-duration recognizer.
    LongPress(LongPressRecognizer),
}

impl Recognizer {
    /// Current raw state.
    pub fn state(&self) -> RecognizerState {
        match self {
            Self::Tap(r) => r.state,
            Self::LongPress(r) => r.state,
        }
    }

    /// Next timer deadline, if a timer is running.
    pub fn deadline(&self) -> Option<Millis> {
        match self {
            Self::Tap(r) => r.deadline,
            Self::LongPress(r) => r.deadline,
        }
    }

    /// Feed a pointer event. `bounds` are the surface bounds in the event's coordinates.
    pub fn handle(&mut self, ev: &PointerEvent, bounds: Option<Rect>, out: &mut Vec<Transition>) {
        match self {
            Self::Tap(r) => r.handle(ev, bounds, out),
            Self::LongPress(r) => r.handle(ev, bounds, out),
        }
    }

    /// Fire the timer if `now` is at or past the deadline.
    pub fn expire(&mut self, now: Millis, out: &mut Vec<Transition>) {
        match self {
            Self::Tap(r) => r.expire(now, out),
            Self::LongPress(r) => r.expire(now, out),
        }
    }

    /// Force a terminal state without reporting a transition.
    ///
    /// Used when a decision made elsewhere (a sibling won, a binding was removed) ends this
    /// recognizer's participation; the caller reports the change itself.
    pub fn force(&mut self, state: RecognizerState) {
        debug_assert!(state.is_terminal(), "only terminal states can be forced");
        match self {
            Self::Tap(r) => {
                r.state = state;
                r.deadline = None;
                r.pressed = false;
            }
            Self::LongPress(r) => {
                r.state = state;
                r.deadline = None;
            }
        }
    }

    /// Return to [`RecognizerState::Idle`] for the next sequence.
    pub fn reset(&mut self) {
        match self {
            Self::Tap(r) => r.reset(),
            Self::LongPress(r) => r.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RecognizerState::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn states(out: &[Transition]) -> Vec<(RecognizerState, RecognizerState, Millis)> {
        out.iter().map(|t| (t.from, t.to, t.time)).collect()
    }

    #[test]
    fn single_tap_recognizes_on_release() {
        let mut r = Recognizer::Tap(TapRecognizer::new(1, 3_000, 500));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(5.0, 5.0), 0), None, &mut out);
        r.handle(&PointerEvent::up(pt(5.0, 5.0), 80), None, &mut out);
        assert_eq!(
            states(&out),
            vec![(Idle, Possible, 0), (Possible, Active, 80), (Active, Ended, 80)]
        );
        assert_eq!(r.deadline(), None);
    }

    #[test]
    fn tap_held_too_long_fails_at_deadline() {
        let mut r = Recognizer::Tap(TapRecognizer::new(1, 3_000, 500));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(5.0, 5.0), 100), None, &mut out);
        assert_eq!(r.deadline(), Some(3_100));
        r.expire(3_099, &mut out);
        assert_eq!(r.state(), Possible);
        r.expire(4_000, &mut out);
        assert_eq!(states(&out).last(), Some(&(Possible, Failed, 3_100)));
    }

    #[test]
    fn double_tap_needs_second_tap_within_window() {
        let mut r = Recognizer::Tap(TapRecognizer::new(2, 3_000, 300));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(1.0, 1.0), 0), None, &mut out);
        r.handle(&PointerEvent::up(pt(1.0, 1.0), 50), None, &mut out);
        assert_eq!(r.state(), Possible);
        assert_eq!(r.deadline(), Some(350));
        r.handle(&PointerEvent::down(pt(1.0, 1.0), 200), None, &mut out);
        r.handle(&PointerEvent::up(pt(1.0, 1.0), 260), None, &mut out);
        assert_eq!(
            states(&out),
            vec![(Idle, Possible, 0), (Possible, Active, 260), (Active, Ended, 260)]
        );
    }

    #[test]
    fn double_tap_window_elapses() {
        let mut r = Recognizer::Tap(TapRecognizer::new(2, 3_000, 300));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(1.0, 1.0), 0), None, &mut out);
        r.handle(&PointerEvent::up(pt(1.0, 1.0), 50), None, &mut out);
        r.expire(400, &mut out);
        assert_eq!(states(&out).last(), Some(&(Possible, Failed, 350)));
    }

    #[test]
    fn tap_leaving_bounds_cancels() {
        let bounds = Some(Rect::new(0.0, 0.0, 100.0, 50.0));
        let mut r = Recognizer::Tap(TapRecognizer::new(1, 3_000, 500));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(5.0, 5.0), 0), bounds, &mut out);
        r.handle(&PointerEvent::moved(pt(50.0, 20.0), 10), bounds, &mut out);
        assert_eq!(r.state(), Possible);
        r.handle(&PointerEvent::moved(pt(150.0, 20.0), 20), bounds, &mut out);
        assert_eq!(states(&out).last(), Some(&(Possible, Cancelled, 20)));
        // Release after the cancel is ignored.
        r.handle(&PointerEvent::up(pt(50.0, 20.0), 30), bounds, &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn press_outside_bounds_is_ignored() {
        let bounds = Some(Rect::new(0.0, 0.0, 100.0, 50.0));
        let mut r = Recognizer::Tap(TapRecognizer::new(1, 3_000, 500));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(500.0, 5.0), 0), bounds, &mut out);
        assert!(out.is_empty());
        assert_eq!(r.state(), Idle);
    }

    #[test]
    fn platform_cancel_cancels_tap() {
        let mut r = Recognizer::Tap(TapRecognizer::new(1, 3_000, 500));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(5.0, 5.0), 0), None, &mut out);
        r.handle(&PointerEvent::cancel(pt(5.0, 5.0), 10), None, &mut out);
        assert_eq!(states(&out).last(), Some(&(Possible, Cancelled, 10)));
    }

    #[test]
    fn long_press_activates_at_threshold_not_at_tick() {
        let mut r = Recognizer::LongPress(LongPressRecognizer::new(500, 10.0));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(5.0, 5.0), 0), None, &mut out);
        r.expire(450, &mut out);
        assert_eq!(r.state(), Possible);
        r.expire(600, &mut out);
        assert_eq!(states(&out), vec![(Idle, Possible, 0), (Possible, Active, 500)]);
        r.expire(700, &mut out);
        assert_eq!(out.len(), 2);
        r.handle(&PointerEvent::up(pt(5.0, 5.0), 900), None, &mut out);
        assert_eq!(states(&out).last(), Some(&(Active, Ended, 900)));
    }

    #[test]
    fn long_press_released_early_fails() {
        let mut r = Recognizer::LongPress(LongPressRecognizer::new(500, 10.0));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(5.0, 5.0), 0), None, &mut out);
        r.handle(&PointerEvent::up(pt(5.0, 5.0), 100), None, &mut out);
        assert_eq!(states(&out).last(), Some(&(Possible, Failed, 100)));
        r.expire(1_000, &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn long_press_travel_limit() {
        let mut r = Recognizer::LongPress(LongPressRecognizer::new(500, 10.0));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(0.0, 0.0), 0), None, &mut out);
        r.handle(&PointerEvent::moved(pt(6.0, 8.0), 10), None, &mut out);
        assert_eq!(r.state(), Possible);
        r.handle(&PointerEvent::moved(pt(9.0, 8.0), 20), None, &mut out);
        assert_eq!(states(&out).last(), Some(&(Possible, Failed, 20)));
    }

    #[test]
    fn force_and_reset() {
        let mut r = Recognizer::Tap(TapRecognizer::new(1, 3_000, 500));
        let mut out = Vec::new();
        r.handle(&PointerEvent::down(pt(5.0, 5.0), 0), None, &mut out);
        r.force(Cancelled);
        assert_eq!(r.state(), Cancelled);
        assert_eq!(r.deadline(), None);
        r.reset();
        assert_eq!(r.state(), Idle);
    }
}
