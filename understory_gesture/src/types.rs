// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for gesture recognition: recognizer kinds and states, pointer input, transitions.
//!
//! ## Overview
//!
//! These types describe the recognizer protocol and its inputs/outputs.
//! They are consumed by the [`recognizer`](crate::recognizer) primitives and the
//! [`arbiter`](crate::arbiter).

use kurbo::Point;

/// Timestamps and durations, in milliseconds.
///
/// Any monotonic clock works as long as pointer events and ticks share it.
pub type Millis = u64;

/// The three recognizer slots owned by an [`Arbiter`](crate::arbiter::Arbiter).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RecognizerKind {
    /// A single tap. Gated on the double-tap recognizer.
    SingleTap,
    /// Two taps within the arming window.
    DoubleTap,
    /// A press held past the minimum duration.
    LongPress,
}

impl RecognizerKind {
    /// All kinds in slot order. Ties at equal timestamps resolve in this order.
    pub const ALL: [Self; 3] = [Self::SingleTap, Self::DoubleTap, Self::LongPress];

    /// Whether this slot counts taps. A tap slot's press drives the surface's press feedback.
    pub const fn is_tap(self) -> bool {
        matches!(self, Self::SingleTap | Self::DoubleTap)
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::SingleTap => 0,
            Self::DoubleTap => 1,
            Self::LongPress => 2,
        }
    }
}

/// Lifecycle state of a recognizer.
///
/// ```text
/// Idle → Possible → Active → Ended
///                 │        └→ Cancelled
///                 ├→ Failed
///                 └→ Cancelled
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum RecognizerState {
    /// No pointer is being tracked.
    #[default]
    Idle,
    /// A pointer is down and the gesture may still be recognized.
    Possible,
    /// The gesture has been recognized.
    Active,
    /// The recognized gesture completed.
    Ended,
    /// The gesture was not recognized (timed out, moved too far, released too early).
    Failed,
    /// The gesture was interrupted (left the surface, platform cancel, usurped by a sibling).
    Cancelled,
}

impl RecognizerState {
    /// Whether this state ends the recognizer's participation in the current sequence.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Failed | Self::Cancelled)
    }

    /// Whether a recognizer in this state has given up without recognizing.
    pub const fn is_released(self) -> bool {
        matches!(self, Self::Failed | Self::Cancelled)
    }
}

/// Pointer lifecycle phase reported by the platform.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerPhase {
    /// Contact started.
    Down,
    /// Contact moved.
    Move,
    /// Contact lifted.
    Up,
    /// The platform took the pointer away (system gesture, window lost focus).
    Cancel,
}

/// A raw pointer event in the surface's local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer phase.
    pub phase: PointerPhase,
    /// Position relative to the surface's top-left corner.
    pub position: Point,
    /// Timestamp of the event.
    pub time: Millis,
}

impl PointerEvent {
    /// Create an event.
    pub const fn new(phase: PointerPhase, position: Point, time: Millis) -> Self {
        Self {
            phase,
            position,
            time,
        }
    }

    /// A [`PointerPhase::Down`] event.
    pub const fn down(position: Point, time: Millis) -> Self {
        Self::new(PointerPhase::Down, position, time)
    }

    /// A [`PointerPhase::Move`] event.
    pub const fn moved(position: Point, time: Millis) -> Self {
        Self::new(PointerPhase::Move, position, time)
    }

    /// A [`PointerPhase::Up`] event.
    pub const fn up(position: Point, time: Millis) -> Self {
        Self::new(PointerPhase::Up, position, time)
    }

    /// A [`PointerPhase::Cancel`] event.
    pub const fn cancel(position: Point, time: Millis) -> Self {
        Self::new(PointerPhase::Cancel, position, time)
    }
}

/// A single recognizer state change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    /// State before the change.
    pub from: RecognizerState,
    /// State after the change.
    pub to: RecognizerState,
    /// Pointer position associated with the change.
    pub position: Point,
    /// When the change happened. Timer-driven changes carry the deadline, not the tick time.
    pub time: Millis,
}
