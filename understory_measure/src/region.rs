// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region handles: measurable references to rendered subtrees.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::cell::Cell;

use kurbo::Rect;

/// Why a region could not be measured.
///
/// Measurement never blocks: a region that is not ready fails immediately and callers
/// decide how to degrade.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The region has mounted but no layout pass has reported its bounds yet.
    #[error("region has not been laid out yet")]
    NotReady,
    /// The region was detached from the view tree.
    #[error("region is detached from the view tree")]
    Detached,
}

/// An opaque, measurable reference to a rendered subtree.
///
/// A child region reports its bounds in the local coordinate space of the surface it is nested
/// in, as a layout pass reports a child relative to its parent. A surface's own handle is only
/// used for its size. Holders of a handle only borrow it for the duration of a single
/// query; the bounds are resampled on every call.
pub trait RegionHandle {
    /// Measure the region's current bounds.
    fn measure(&self) -> Result<Rect, MeasureError>;
}

impl<T: RegionHandle + ?Sized> RegionHandle for &T {
    #[inline]
    fn measure(&self) -> Result<Rect, MeasureError> {
        (**self).measure()
    }
}

impl<T: RegionHandle + ?Sized> RegionHandle for Box<T> {
    #[inline]
    fn measure(&self) -> Result<Rect, MeasureError> {
        (**self).measure()
    }
}

impl<T: RegionHandle + ?Sized> RegionHandle for Rc<T> {
    #[inline]
    fn measure(&self) -> Result<Rect, MeasureError> {
        (**self).measure()
    }
}

impl<T: RegionHandle + ?Sized> RegionHandle for Arc<T> {
    #[inline]
    fn measure(&self) -> Result<Rect, MeasureError> {
        (**self).measure()
    }
}

/// A fixed rectangle is always measured.
impl RegionHandle for Rect {
    #[inline]
    fn measure(&self) -> Result<Rect, MeasureError> {
        Ok(*self)
    }
}

/// A region handle filled in by the owner's layout pass.
///
/// A fresh slot reports [`MeasureError::NotReady`] until [`set_layout`](Self::set_layout) is
/// called. Once [`detach`](Self::detach)ed it reports [`MeasureError::Detached`] until the next
/// layout.
#[derive(Debug, Default)]
pub struct LayoutSlot {
    bounds: Cell<Option<Rect>>,
    detached: Cell<bool>,
}

impl LayoutSlot {
    /// Create a slot that has not been laid out.
    pub const fn new() -> Self {
        Self {
            bounds: Cell::new(None),
            detached: Cell::new(false),
        }
    }

    /// Create a slot with known bounds.
    pub const fn with_layout(bounds: Rect) -> Self {
        Self {
            bounds: Cell::new(Some(bounds)),
            detached: Cell::new(false),
        }
    }

    /// Record the bounds reported by a layout pass.
    pub fn set_layout(&self, bounds: Rect) {
        self.bounds.set(Some(bounds));
        self.detached.set(false);
    }

    /// The last reported bounds, if any.
    pub fn layout(&self) -> Option<Rect> {
        if self.detached.get() {
            return None;
        }
        self.bounds.get()
    }

    /// Forget the recorded bounds; the slot is not ready again.
    pub fn clear(&self) {
        self.bounds.set(None);
    }

    /// Mark the region as removed from the view tree.
    pub fn detach(&self) {
        self.detached.set(true);
    }
}

impl RegionHandle for LayoutSlot {
    fn measure(&self) -> Result<Rect, MeasureError> {
        if self.detached.get() {
            return Err(MeasureError::Detached);
        }
        self.bounds.get().ok_or(MeasureError::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_slot_is_not_ready() {
        let slot = LayoutSlot::new();
        assert_eq!(slot.measure(), Err(MeasureError::NotReady));
        assert_eq!(slot.layout(), None);
    }

    #[test]
    fn slot_reports_last_layout() {
        let slot = LayoutSlot::new();
        slot.set_layout(Rect::new(0.0, 0.0, 10.0, 10.0));
        slot.set_layout(Rect::new(5.0, 5.0, 20.0, 30.0));
        assert_eq!(slot.measure(), Ok(Rect::new(5.0, 5.0, 20.0, 30.0)));
    }

    #[test]
    fn detach_then_relayout() {
        let slot = LayoutSlot::with_layout(Rect::new(0.0, 0.0, 10.0, 10.0));
        slot.detach();
        assert_eq!(slot.measure(), Err(MeasureError::Detached));
        assert_eq!(slot.layout(), None);
        slot.set_layout(Rect::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(slot.measure(), Ok(Rect::new(1.0, 1.0, 2.0, 2.0)));
    }

    #[test]
    fn clear_returns_to_not_ready() {
        let slot = LayoutSlot::with_layout(Rect::new(0.0, 0.0, 10.0, 10.0));
        slot.clear();
        assert_eq!(slot.measure(), Err(MeasureError::NotReady));
    }

    #[test]
    fn smart_pointers_forward_measure() {
        let rc: Rc<dyn RegionHandle> = Rc::new(LayoutSlot::with_layout(Rect::new(
            0.0, 0.0, 4.0, 4.0,
        )));
        assert_eq!(rc.measure(), Ok(Rect::new(0.0, 0.0, 4.0, 4.0)));
        let boxed: Box<dyn RegionHandle> = Box::new(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(boxed.measure(), Ok(Rect::new(1.0, 2.0, 3.0, 4.0)));
    }
}
