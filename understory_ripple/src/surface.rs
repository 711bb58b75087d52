// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A complete touch-feedback surface.
//!
//! ## Nesting
//!
//! An [`InkWell`] records the bounds its layout pass reports, in its parent's coordinates, and
//! is itself a [`RegionHandle`]. A parent surface lists a nested well's
//! [`region`](InkWell::region) among its children, so touches on the nested well play only the
//! nested well's ripple.

use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_gesture::arbiter::Arbiter;
use understory_gesture::config::GestureConfig;
use understory_gesture::context::AppContext;
use understory_gesture::types::{Millis, PointerEvent};
use understory_measure::{LayoutSlot, MeasureError, RegionHandle};

use crate::animator::{AnimatedRippleState, RippleAnimator, RippleConfig};
use crate::diagnostics::{ContainerStyle, LayoutAdvisory, check_container_style};
use crate::style::SurfaceStyle;

/// One mounted surface: an [`Arbiter`] wired to a [`RippleAnimator`].
///
/// Feed it raw pointer events in surface-local coordinates and call [`frame`](Self::frame)
/// once per frame. User callbacks go to the [`AppContext`]; the ripple plays in the same
/// call that recognized the gesture.
///
/// The animator's double-tap pairing always follows the gesture configuration.
pub struct InkWell<C: AppContext, R: RegionHandle> {
    arbiter: Arbiter<C>,
    animator: RippleAnimator<R>,
    container: ContainerStyle,
    region: Rc<LayoutSlot>,
    mounted: bool,
}

impl<C: AppContext, R: RegionHandle> core::fmt::Debug for InkWell<C, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InkWell")
            .field("arbiter", &self.arbiter)
            .field("animator", &self.animator)
            .field("container", &self.container)
            .field("layout", &self.region.layout())
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl<C: AppContext, R: RegionHandle> InkWell<C, R> {
    /// Mount a surface measured through `surface`.
    pub fn new(gesture: GestureConfig, ripple: RippleConfig<R>, surface: R, ctx: C) -> Self {
        let ripple = ripple.double_tap_paired(gesture.double_tap_enabled());
        Self {
            arbiter: Arbiter::new(gesture, ctx),
            animator: RippleAnimator::new(surface, ripple),
            container: ContainerStyle::default(),
            region: Rc::new(LayoutSlot::new()),
            mounted: true,
        }
    }

    /// Feed a pointer event in surface-local coordinates.
    pub fn handle_pointer(&mut self, ev: &PointerEvent) {
        if !self.mounted {
            return;
        }
        self.arbiter.handle_pointer(ev, &mut self.animator);
    }

    /// Advance gesture timers without producing a style.
    pub fn tick(&mut self, now: Millis) {
        if !self.mounted {
            return;
        }
        self.arbiter.tick(now, &mut self.animator);
    }

    /// Advance gesture timers and animations to `now` and return the frame's style.
    pub fn frame(&mut self, now: Millis) -> SurfaceStyle {
        self.tick(now);
        let mut style = self.animator.frame(now);
        style.content.corner_radius = self.container.corner_radius;
        style
    }

    /// Record a layout pass. `bounds` are in the parent's coordinates.
    ///
    /// Refreshes the ripple radius, the tap bounds, and the bounds a parent surface sees.
    pub fn on_layout(&mut self, bounds: Rect) {
        if !self.mounted {
            return;
        }
        self.region.set_layout(bounds);
        let size = bounds.size();
        self.animator.on_layout(size);
        self.arbiter
            .set_bounds(Some(Rect::from_origin_size(Point::ZERO, size)));
    }

    /// The bounds from the last layout pass, in the parent's coordinates.
    pub fn layout(&self) -> Option<Rect> {
        self.region.layout()
    }

    /// A shared handle to this surface's layout, for listing it as a child of another surface.
    ///
    /// The handle stays valid after the well is dropped and reports
    /// [`MeasureError::Detached`] once the well is unmounted.
    pub fn region(&self) -> Rc<LayoutSlot> {
        Rc::clone(&self.region)
    }

    /// Swap configurations, keeping any gesture in flight.
    ///
    /// Recognizers the new gesture configuration drops are cancelled, which ends the ripple if
    /// one of them was driving it.
    pub fn rebind(&mut self, gesture: GestureConfig, ripple: RippleConfig<R>, now: Millis) {
        if !self.mounted {
            return;
        }
        let ripple = ripple.double_tap_paired(gesture.double_tap_enabled());
        self.arbiter.rebind(gesture, &mut self.animator, now);
        self.animator.set_config(ripple);
    }

    /// Apply the container style, returning any layout advisory.
    pub fn set_container_style(&mut self, style: ContainerStyle) -> Option<LayoutAdvisory> {
        self.container = style;
        check_container_style(&self.container)
    }

    /// Cancel every animation and ignore further input.
    pub fn unmount(&mut self, now: Millis) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.animator.teardown(now);
        self.region.detach();
        log::debug!("surface unmounted at {now}");
    }

    /// Whether the surface still accepts input.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current animated values.
    pub fn snapshot(&self) -> AnimatedRippleState {
        self.animator.snapshot()
    }

    /// The container style last applied.
    pub fn container_style(&self) -> &ContainerStyle {
        &self.container
    }

    /// The gesture arbiter.
    pub fn arbiter(&self) -> &Arbiter<C> {
        &self.arbiter
    }

    /// The ripple animator.
    pub fn animator(&self) -> &RippleAnimator<R> {
        &self.animator
    }
}

impl<C: AppContext, R: RegionHandle> RegionHandle for InkWell<C, R> {
    fn measure(&self) -> Result<Rect, MeasureError> {
        self.region.measure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use understory_gesture::context::QueuedContext;
    use understory_gesture::types::RecognizerKind;

    use crate::diagnostics::Alignment;

    fn well(gesture: GestureConfig) -> (InkWell<Rc<QueuedContext>, Rect>, Rc<QueuedContext>) {
        let ctx = Rc::new(QueuedContext::new());
        let mut well = InkWell::new(
            gesture,
            RippleConfig::new(),
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rc::clone(&ctx),
        );
        well.on_layout(Rect::new(0.0, 0.0, 100.0, 50.0));
        (well, ctx)
    }

    #[test]
    fn press_starts_ripple_and_release_ends_it() {
        let (mut w, _) = well(GestureConfig::new());
        w.handle_pointer(&PointerEvent::down(Point::new(30.0, 20.0), 0));
        assert!(w.animator().is_engaged());
        assert!((w.snapshot().center_x + 81.803).abs() < 1e-3);
        let held = w.frame(150);
        assert!(held.highlight.opacity > 0.4);
        w.handle_pointer(&PointerEvent::up(Point::new(30.0, 20.0), 200));
        assert!(!w.animator().is_engaged());
        assert_eq!(w.animator().ripple_opacity_target(), 0.0);
        assert_eq!(w.frame(300).highlight.opacity, 0.0);
    }

    #[test]
    fn long_press_holds_ripple_until_release() {
        let (mut w, ctx) = well(GestureConfig::new().on_long_press(|| {}));
        w.handle_pointer(&PointerEvent::down(Point::new(30.0, 20.0), 0));
        w.frame(520);
        assert!(w.animator().is_engaged());
        assert_eq!(w.arbiter().claimer(), Some(RecognizerKind::LongPress));
        w.handle_pointer(&PointerEvent::up(Point::new(30.0, 20.0), 900));
        assert!(!w.animator().is_engaged());
        assert_eq!(ctx.run_pending(), 1);
    }

    #[test]
    fn double_tap_pairing_follows_gesture_config() {
        let (w, _) = well(GestureConfig::new().on_double_tap(|| {}));
        assert!(w.animator().config().double_tap_paired);
        let (w, _) = well(GestureConfig::new());
        assert!(!w.animator().config().double_tap_paired);
    }

    #[test]
    fn bounds_follow_layout() {
        let (mut w, _) = well(GestureConfig::new());
        assert_eq!(w.arbiter().bounds(), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        w.on_layout(Rect::new(40.0, 60.0, 60.0, 80.0));
        // Tap bounds are local; the recorded layout stays in parent space.
        assert_eq!(w.arbiter().bounds(), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert_eq!(w.layout(), Some(Rect::new(40.0, 60.0, 60.0, 80.0)));
        assert!((w.animator().max_radius() - 28.284).abs() < 1e-3);
    }

    #[test]
    fn region_tracks_layout_and_unmount() {
        let ctx = Rc::new(QueuedContext::new());
        let mut w = InkWell::new(
            GestureConfig::new(),
            RippleConfig::new(),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            ctx,
        );
        let region = w.region();
        assert_eq!(region.measure(), Err(MeasureError::NotReady));
        assert_eq!(w.measure(), Err(MeasureError::NotReady));
        w.on_layout(Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(region.measure(), Ok(Rect::new(5.0, 5.0, 15.0, 15.0)));
        w.unmount(0);
        assert_eq!(region.measure(), Err(MeasureError::Detached));
    }

    #[test]
    fn content_layer_carries_container_corner_radius() {
        let (mut w, _) = well(GestureConfig::new());
        assert_eq!(w.frame(0).content.corner_radius, None);
        w.set_container_style(ContainerStyle {
            corner_radius: Some(12.0),
            ..ContainerStyle::default()
        });
        assert_eq!(w.frame(16).content.corner_radius, Some(12.0));
    }

    #[test]
    fn rebind_keeps_gesture_in_flight() {
        let taps = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&taps);
        let (mut w, ctx) = well(GestureConfig::new());
        w.handle_pointer(&PointerEvent::down(Point::new(10.0, 10.0), 0));
        w.rebind(
            GestureConfig::new().on_tap(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            RippleConfig::new().radius(20.0),
            30,
        );
        w.handle_pointer(&PointerEvent::up(Point::new(10.0, 10.0), 60));
        ctx.run_pending();
        assert_eq!(taps.load(Ordering::SeqCst), 1);
        assert_eq!(w.animator().max_radius(), 20.0);
    }

    #[test]
    fn unmount_ignores_further_input() {
        let (mut w, ctx) = well(GestureConfig::new().on_tap(|| {}));
        w.handle_pointer(&PointerEvent::down(Point::new(10.0, 10.0), 0));
        w.unmount(10);
        assert!(!w.is_mounted());
        let frozen = w.snapshot();
        w.handle_pointer(&PointerEvent::up(Point::new(10.0, 10.0), 60));
        let style = w.frame(1_000);
        assert_eq!(style.highlight.opacity, frozen.highlight_opacity);
        assert_eq!(w.snapshot(), frozen);
        assert_eq!(ctx.run_pending(), 0);
    }

    #[test]
    fn container_style_advisory() {
        let (mut w, _) = well(GestureConfig::new());
        assert!(
            w.set_container_style(ContainerStyle {
                corner_radius: Some(4.0),
                ..ContainerStyle::default()
            })
            .is_none()
        );
        let advisory = w.set_container_style(ContainerStyle {
            align_items: Some(Alignment::Center),
            ..ContainerStyle::default()
        });
        assert!(advisory.is_some());
        assert_eq!(w.container_style().align_items, Some(Alignment::Center));
    }
}
