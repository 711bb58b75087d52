// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration.
//!
//! ## Overview
//!
//! An [`Arbiter`] owns three recognizer slots (single tap, double tap, long press) for one
//! surface. It feeds each pointer event to every enabled slot in [slot order](RecognizerKind::ALL),
//! resolves conflicts between them, posts user callbacks to an [`AppContext`], and reports the
//! surface's visual gesture through a [`GestureSink`].
//!
//! ## Wait-for gating
//!
//! A slot may wait for other slots (and for an [`ExternalRecognizer`]). While anything it waits
//! for is still [`Possible`](RecognizerState::Possible), the slot's activation is held back:
//! - when everything it waits for has failed or been cancelled, the held transitions are
//!   replayed, stamped with the time of release;
//! - when anything it waits for activates, the slot fails.
//!
//! The single-tap slot waits for the double-tap slot whenever double tap is enabled, so a
//! single tap is only reported once the arming window has elapsed.
//!
//! ## Precedence
//!
//! When a slot activates, every sibling still in play is cancelled unless that sibling is
//! waiting for the winner. A long press therefore cancels a pending single tap, and
//! `on_tap_cancel` is posted.
//!
//! ## Visual gesture
//!
//! A press is visible feedback before it is a recognized gesture. The surface is claimed, and
//! [`on_gesture_begin`](GestureSink::on_gesture_begin) called, by whichever comes first:
//! - a tap slot tracking a press that is still down, once nothing it waits for is undecided;
//! - any slot activating.
//!
//! On a double-tap surface the double-tap slot claims the first press, and the single-tap slot
//! keeps its own visual start gated as usual.
//!
//! The claim passes along rather than ending while the sequence is still live. A slot that
//! activates takes the claim from a claimer still in play, and a claimer that fails or is
//! cancelled hands it to the first sibling still in play. When the claimer ends, or gives up
//! with no sibling left, [`on_gesture_end`](GestureSink::on_gesture_end) is called once.
//!
//! ## Time
//!
//! The arbiter never reads a clock. Pointer events carry timestamps, and
//! [`tick`](Arbiter::tick) drives timers. Expired timers are processed in deadline order
//! before any event with a later timestamp.

use kurbo::{Point, Rect};

use crate::config::{ExternalRecognizer, GestureConfig};
use crate::context::{AppContext, Callback, post_callback};
use crate::recognizer::{LongPressRecognizer, Recognizer, TapRecognizer};
use crate::types::{
    Millis, PointerEvent, PointerPhase, RecognizerKind, RecognizerState, Transition,
};

bitflags::bitflags! {
    /// Recognizers a slot waits for before it may activate.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WaitSet: u8 {
        /// The single-tap slot.
        const SINGLE_TAP = 0b0000_0001;
        /// The double-tap slot.
        const DOUBLE_TAP = 0b0000_0010;
        /// The long-press slot.
        const LONG_PRESS = 0b0000_0100;
        /// The configured [`ExternalRecognizer`].
        const EXTERNAL   = 0b0000_1000;
    }
}

impl WaitSet {
    /// The flag naming an arbiter slot.
    pub const fn of(kind: RecognizerKind) -> Self {
        match kind {
            RecognizerKind::SingleTap => Self::SINGLE_TAP,
            RecognizerKind::DoubleTap => Self::DOUBLE_TAP,
            RecognizerKind::LongPress => Self::LONG_PRESS,
        }
    }
}

bitflags::bitflags! {
    /// Callbacks already posted in the current sequence.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Dispatched: u8 {
        const TAP_DOWN   = 0b0000_0001;
        const TAP        = 0b0000_0010;
        const TAP_CANCEL = 0b0000_0100;
        const DOUBLE_TAP = 0b0000_1000;
        const LONG_PRESS = 0b0001_0000;
    }
}

/// Receives the surface's visual gesture boundaries.
pub trait GestureSink {
    /// The surface started showing a press or an activated gesture. `position` is in the
    /// surface's local coordinates.
    fn on_gesture_begin(&mut self, position: Point, time: Millis);
    /// The claiming slot ended, or gave up with no sibling left to take the claim.
    fn on_gesture_end(&mut self, time: Millis);
}

impl<S: GestureSink + ?Sized> GestureSink for &mut S {
    fn on_gesture_begin(&mut self, position: Point, time: Millis) {
        (**self).on_gesture_begin(position, time);
    }

    fn on_gesture_end(&mut self, time: Millis) {
        (**self).on_gesture_end(time);
    }
}

/// How a slot is wired into the arbiter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    /// Which slot.
    pub kind: RecognizerKind,
    /// Whether the slot receives pointer input.
    pub enabled: bool,
    /// What the slot waits for.
    pub waits_for: WaitSet,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Gate {
    Open,
    Closed,
    Blocked,
}

impl Gate {
    fn from_awaited(state: RecognizerState) -> Self {
        match state {
            RecognizerState::Active | RecognizerState::Ended => Self::Blocked,
            RecognizerState::Possible => Self::Closed,
            RecognizerState::Idle | RecognizerState::Failed | RecognizerState::Cancelled => {
                Self::Open
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    recognizer: Recognizer,
    enabled: bool,
    waits_for: WaitSet,
    // State reported to the outside; lags the recognizer while transitions are held.
    state: RecognizerState,
    held: Vec<Transition>,
}

fn recognizer_for(kind: RecognizerKind, config: &GestureConfig) -> Recognizer {
    match kind {
        RecognizerKind::SingleTap => Recognizer::Tap(TapRecognizer::new(
            1,
            config.max_duration_ms,
            config.max_delay_ms,
        )),
        RecognizerKind::DoubleTap => Recognizer::Tap(TapRecognizer::new(
            2,
            config.max_duration_ms,
            config.max_delay_ms,
        )),
        RecognizerKind::LongPress => Recognizer::LongPress(LongPressRecognizer::new(
            config.min_duration_ms,
            config.long_press_max_dist,
        )),
    }
}

fn slot_enabled(kind: RecognizerKind, config: &GestureConfig) -> bool {
    match kind {
        RecognizerKind::SingleTap => config.enabled,
        RecognizerKind::DoubleTap => config.double_tap_enabled(),
        RecognizerKind::LongPress => config.long_press_enabled(),
    }
}

fn slot_waits_for(kind: RecognizerKind, config: &GestureConfig) -> WaitSet {
    let mut waits = WaitSet::empty();
    if config.wait_for.is_some() {
        waits |= WaitSet::EXTERNAL;
    }
    if kind == RecognizerKind::SingleTap && config.double_tap_enabled() {
        waits |= WaitSet::DOUBLE_TAP;
    }
    waits
}

/// Tap, double-tap, and long-press arbitration for one surface.
///
/// ## Usage
///
/// - Construct with [`Arbiter::new`] from a [`GestureConfig`] and an [`AppContext`].
/// - Optionally call [`Arbiter::set_bounds`] so presses that leave the surface cancel.
/// - Feed every pointer event to [`Arbiter::handle_pointer`] and call [`Arbiter::tick`] once
///   per frame.
/// - Call [`Arbiter::rebind`] when the surface's configuration changes.
pub struct Arbiter<C: AppContext> {
    ctx: C,
    config: GestureConfig,
    slots: [Slot; 3],
    bounds: Option<Rect>,
    claimer: Option<RecognizerKind>,
    dispatched: Dispatched,
    last_position: Point,
    pressed: bool,
    scratch: Vec<Transition>,
}

impl<C: AppContext> core::fmt::Debug for Arbiter<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Arbiter")
            .field("config", &self.config)
            .field("bounds", &self.bounds)
            .field("claimer", &self.claimer)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl<C: AppContext> Arbiter<C> {
    /// Create an arbiter. Callbacks are posted to `ctx`.
    pub fn new(config: GestureConfig, ctx: C) -> Self {
        let slots = RecognizerKind::ALL.map(|kind| Slot {
            recognizer: recognizer_for(kind, &config),
            enabled: slot_enabled(kind, &config),
            waits_for: slot_waits_for(kind, &config),
            state: RecognizerState::Idle,
            held: Vec::new(),
        });
        Self {
            ctx,
            config,
            slots,
            bounds: None,
            claimer: None,
            dispatched: Dispatched::empty(),
            last_position: Point::ZERO,
            pressed: false,
            scratch: Vec::new(),
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// The application context callbacks are posted to.
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Set the surface bounds in local coordinates. `None` disables bounds checks.
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    /// The surface bounds used for bounds checks.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// How `kind` is wired.
    pub fn binding(&self, kind: RecognizerKind) -> Binding {
        let slot = &self.slots[kind.index()];
        Binding {
            kind,
            enabled: slot.enabled,
            waits_for: slot.waits_for,
        }
    }

    /// The reported state of `kind`. Held activations still report `Possible`.
    pub fn state(&self, kind: RecognizerKind) -> RecognizerState {
        self.slots[kind.index()].state
    }

    /// The slot currently holding the visual gesture, if any.
    pub fn claimer(&self) -> Option<RecognizerKind> {
        self.claimer
    }

    /// The earliest pending timer across all slots.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.slots
            .iter()
            .filter(|slot| slot.enabled)
            .filter_map(|slot| slot.recognizer.deadline())
            .min()
    }

    /// Feed a pointer event in local coordinates.
    ///
    /// Timers due at or before the event's timestamp fire first.
    pub fn handle_pointer<S: GestureSink + ?Sized>(&mut self, ev: &PointerEvent, sink: &mut S) {
        self.advance_to(ev.time, sink);
        self.last_position = ev.position;
        match ev.phase {
            PointerPhase::Down => self.pressed = true,
            PointerPhase::Up | PointerPhase::Cancel => self.pressed = false,
            PointerPhase::Move => {}
        }
        let mut buf = core::mem::take(&mut self.scratch);
        for kind in RecognizerKind::ALL {
            let slot = &mut self.slots[kind.index()];
            if !slot.enabled {
                continue;
            }
            buf.clear();
            slot.recognizer.handle(ev, self.bounds, &mut buf);
            for t in buf.drain(..) {
                self.apply(kind, t, sink);
            }
        }
        self.scratch = buf;
        self.settle(ev.time, sink);
    }

    /// Advance timers to `now` and re-evaluate wait-for gates.
    ///
    /// Call once per frame. Also call after an [`ExternalRecognizer`] changes state.
    pub fn tick<S: GestureSink + ?Sized>(&mut self, now: Millis, sink: &mut S) {
        self.advance_to(now, sink);
        self.settle(now, sink);
    }

    /// Replace the configuration.
    ///
    /// Slots that become disabled are cancelled, ending the visual gesture if they claimed it.
    /// Slots that become enabled start idle. Retained slots keep their progress and pick up the
    /// new thresholds for their next timer.
    pub fn rebind<S: GestureSink + ?Sized>(
        &mut self,
        config: GestureConfig,
        sink: &mut S,
        now: Millis,
    ) {
        self.config = config;
        for kind in RecognizerKind::ALL {
            let enable = slot_enabled(kind, &self.config);
            let i = kind.index();
            if self.slots[i].enabled && !enable {
                let state = self.slots[i].state;
                if state != RecognizerState::Idle && !state.is_terminal() {
                    log::debug!("{kind:?} unbound mid-gesture at {now}");
                    self.slots[i].recognizer.force(RecognizerState::Cancelled);
                    self.slots[i].held.clear();
                    let t = self.transition_to(kind, RecognizerState::Cancelled, now);
                    self.commit(kind, t, sink);
                }
                let slot = &mut self.slots[i];
                slot.recognizer.reset();
                slot.state = RecognizerState::Idle;
                slot.held.clear();
                slot.enabled = false;
            } else if !self.slots[i].enabled && enable {
                let slot = &mut self.slots[i];
                slot.recognizer = recognizer_for(kind, &self.config);
                slot.state = RecognizerState::Idle;
                slot.held.clear();
                slot.enabled = true;
            } else if enable {
                match &mut self.slots[i].recognizer {
                    Recognizer::Tap(r) => {
                        r.configure(self.config.max_duration_ms, self.config.max_delay_ms);
                    }
                    Recognizer::LongPress(r) => {
                        r.configure(self.config.min_duration_ms, self.config.long_press_max_dist);
                    }
                }
            }
            self.slots[i].waits_for = slot_waits_for(kind, &self.config);
        }
        self.settle(now, sink);
    }

    /// The configured external recognizer, if any.
    pub fn external(&self) -> Option<&ExternalRecognizer> {
        self.config.wait_for.as_ref()
    }

    fn advance_to<S: GestureSink + ?Sized>(&mut self, now: Millis, sink: &mut S) {
        let mut buf = core::mem::take(&mut self.scratch);
        loop {
            // Earliest due deadline; ties resolve in slot order.
            let mut due: Option<(Millis, RecognizerKind)> = None;
            for kind in RecognizerKind::ALL {
                let slot = &self.slots[kind.index()];
                if !slot.enabled {
                    continue;
                }
                if let Some(deadline) = slot.recognizer.deadline()
                    && deadline <= now
                    && due.is_none_or(|(best, _)| deadline < best)
                {
                    due = Some((deadline, kind));
                }
            }
            let Some((deadline, kind)) = due else {
                break;
            };
            buf.clear();
            self.slots[kind.index()].recognizer.expire(deadline, &mut buf);
            if buf.is_empty() && self.slots[kind.index()].recognizer.deadline() == Some(deadline) {
                break;
            }
            for t in buf.drain(..) {
                self.apply(kind, t, sink);
            }
            self.settle(deadline, sink);
        }
        self.scratch = buf;
    }

    fn apply<S: GestureSink + ?Sized>(
        &mut self,
        kind: RecognizerKind,
        mut t: Transition,
        sink: &mut S,
    ) {
        match t.to {
            RecognizerState::Active | RecognizerState::Ended => {
                if !self.slots[kind.index()].held.is_empty() || self.gate(kind) != Gate::Open {
                    log::trace!("{kind:?} holds {:?} at {}", t.to, t.time);
                    self.slots[kind.index()].held.push(t);
                    return;
                }
            }
            RecognizerState::Failed | RecognizerState::Cancelled => {
                let slot = &mut self.slots[kind.index()];
                if !slot.held.is_empty() {
                    // The held activation never happened.
                    slot.held.clear();
                    t.from = slot.state;
                }
            }
            RecognizerState::Idle | RecognizerState::Possible => {}
        }
        self.commit(kind, t, sink);
    }

    fn commit<S: GestureSink + ?Sized>(
        &mut self,
        kind: RecognizerKind,
        t: Transition,
        sink: &mut S,
    ) {
        let from = self.slots[kind.index()].state;
        self.slots[kind.index()].state = t.to;
        log::trace!("{kind:?}: {from:?} -> {:?} at {}", t.to, t.time);
        match (kind, t.to) {
            (RecognizerKind::SingleTap, RecognizerState::Possible)
                if from == RecognizerState::Idle =>
            {
                self.dispatch(Dispatched::TAP_DOWN, |c| c.on_tap_down.as_ref());
            }
            (_, RecognizerState::Active) => {
                match kind {
                    RecognizerKind::SingleTap => {
                        self.dispatch(Dispatched::TAP, |c| c.on_tap.as_ref());
                    }
                    RecognizerKind::DoubleTap => {
                        self.dispatch(Dispatched::DOUBLE_TAP, |c| c.on_double_tap.as_ref());
                    }
                    RecognizerKind::LongPress => {
                        self.dispatch(Dispatched::LONG_PRESS, |c| c.on_long_press.as_ref());
                    }
                }
                match self.claimer {
                    None => {
                        log::debug!("{kind:?} claims the surface at {}", t.time);
                        self.claimer = Some(kind);
                        sink.on_gesture_begin(t.position, t.time);
                    }
                    Some(current) if current != kind && self.in_play(current) => {
                        log::debug!("{kind:?} takes the surface from {current:?}");
                        self.claimer = Some(kind);
                    }
                    Some(_) => {}
                }
                self.cancel_siblings(kind, t.time, sink);
            }
            (RecognizerKind::SingleTap, RecognizerState::Cancelled) => {
                self.dispatch(Dispatched::TAP_CANCEL, |c| c.on_tap_cancel.as_ref());
            }
            _ => {}
        }
        if t.to.is_terminal() && self.claimer == Some(kind) {
            let heir = if t.to.is_released() {
                RecognizerKind::ALL
                    .into_iter()
                    .find(|&other| other != kind && self.in_play(other))
            } else {
                None
            };
            if let Some(heir) = heir {
                log::debug!("{kind:?} hands the surface to {heir:?}");
                self.claimer = Some(heir);
            } else {
                sink.on_gesture_end(t.time);
            }
        }
    }

    fn in_play(&self, kind: RecognizerKind) -> bool {
        let slot = &self.slots[kind.index()];
        slot.enabled && slot.state != RecognizerState::Idle && !slot.state.is_terminal()
    }

    // A tap slot tracking a press that is still down shows it as soon as its gate opens.
    fn claim_press<S: GestureSink + ?Sized>(&mut self, now: Millis, sink: &mut S) {
        if self.claimer.is_some() || !self.pressed {
            return;
        }
        let Some(kind) = RecognizerKind::ALL.into_iter().find(|&kind| {
            let slot = &self.slots[kind.index()];
            kind.is_tap()
                && slot.enabled
                && slot.state == RecognizerState::Possible
                && slot.held.is_empty()
                && self.gate(kind) == Gate::Open
        }) else {
            return;
        };
        log::debug!("{kind:?} claims the surface for a press at {now}");
        self.claimer = Some(kind);
        sink.on_gesture_begin(self.last_position, now);
    }

    fn cancel_siblings<S: GestureSink + ?Sized>(
        &mut self,
        winner: RecognizerKind,
        time: Millis,
        sink: &mut S,
    ) {
        for kind in RecognizerKind::ALL {
            if kind == winner {
                continue;
            }
            let slot = &self.slots[kind.index()];
            if !slot.enabled
                || slot.state == RecognizerState::Idle
                || slot.state.is_terminal()
                || slot.waits_for.contains(WaitSet::of(winner))
            {
                continue;
            }
            log::debug!("{winner:?} cancels {kind:?}");
            self.slots[kind.index()].recognizer.force(RecognizerState::Cancelled);
            self.slots[kind.index()].held.clear();
            let t = self.transition_to(kind, RecognizerState::Cancelled, time);
            self.commit(kind, t, sink);
        }
    }

    fn gate(&self, kind: RecognizerKind) -> Gate {
        let waits = self.slots[kind.index()].waits_for;
        let mut gate = Gate::Open;
        for other in RecognizerKind::ALL {
            let slot = &self.slots[other.index()];
            if slot.enabled && waits.contains(WaitSet::of(other)) {
                gate = gate.max(Gate::from_awaited(slot.state));
            }
        }
        if waits.contains(WaitSet::EXTERNAL)
            && let Some(external) = &self.config.wait_for
        {
            gate = gate.max(Gate::from_awaited(external.state()));
        }
        gate
    }

    // Resolve gates until nothing changes, then start a fresh sequence if this one is over.
    fn settle<S: GestureSink + ?Sized>(&mut self, now: Millis, sink: &mut S) {
        loop {
            let mut changed = false;
            for kind in RecognizerKind::ALL {
                let slot = &self.slots[kind.index()];
                if !slot.enabled || slot.state != RecognizerState::Possible {
                    continue;
                }
                match self.gate(kind) {
                    Gate::Blocked => {
                        log::debug!("{kind:?} fails: an awaited recognizer won");
                        self.slots[kind.index()].recognizer.force(RecognizerState::Failed);
                        self.slots[kind.index()].held.clear();
                        let t = self.transition_to(kind, RecognizerState::Failed, now);
                        self.commit(kind, t, sink);
                        changed = true;
                    }
                    Gate::Open if !self.slots[kind.index()].held.is_empty() => {
                        let held = core::mem::take(&mut self.slots[kind.index()].held);
                        log::trace!("{kind:?} released {} held transitions at {now}", held.len());
                        for mut t in held {
                            t.from = self.slots[kind.index()].state;
                            t.time = now;
                            self.commit(kind, t, sink);
                        }
                        changed = true;
                    }
                    Gate::Open | Gate::Closed => {}
                }
            }
            if !changed {
                break;
            }
        }
        self.claim_press(now, sink);
        self.reset_if_done();
    }

    fn reset_if_done(&mut self) {
        let done = self.slots.iter().all(|slot| {
            !slot.enabled
                || (slot.held.is_empty()
                    && (slot.state == RecognizerState::Idle || slot.state.is_terminal()))
        });
        let started = self.slots.iter().any(|slot| slot.state != RecognizerState::Idle);
        if !done || !started {
            return;
        }
        for slot in &mut self.slots {
            slot.recognizer.reset();
            slot.state = RecognizerState::Idle;
            slot.held.clear();
        }
        self.claimer = None;
        self.dispatched = Dispatched::empty();
    }

    fn transition_to(&self, kind: RecognizerKind, to: RecognizerState, time: Millis) -> Transition {
        Transition {
            from: self.slots[kind.index()].state,
            to,
            position: self.last_position,
            time,
        }
    }

    fn dispatch(&mut self, flag: Dispatched, pick: fn(&GestureConfig) -> Option<&Callback>) {
        if self.dispatched.contains(flag) {
            return;
        }
        self.dispatched.insert(flag);
        if let Some(callback) = pick(&self.config) {
            post_callback(&self.ctx, callback);
        }
    }
}
