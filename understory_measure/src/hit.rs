// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child-region hit testing.
//!
//! ## Containment
//!
//! A point is inside a region when it lies strictly between the region's edges on both axes.
//! A touch exactly on a child's edge belongs to the surface.
//!
//! ## Unmeasured regions
//!
//! A region whose [`measure`](crate::RegionHandle::measure) fails claims the touch no matter
//! where it landed. See the crate docs for the rationale.

use kurbo::{Point, Rect};

use crate::region::{MeasureError, RegionHandle};

/// Why a child region claimed a touch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClaimReason {
    /// The touch is inside the region's measured bounds.
    Inside(Rect),
    /// The region could not be measured, so it claims the touch conservatively.
    NotMeasured(MeasureError),
}

/// Result of a successful child hit test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChildClaim {
    /// Index of the claiming region in the slice passed to [`claiming_child`].
    pub index: usize,
    /// Why the region claimed the touch.
    pub reason: ClaimReason,
}

/// Whether `bounds` strictly contains `pt`.
///
/// Bounds with a negative width or height are normalized first.
pub fn region_contains(bounds: Rect, pt: Point) -> bool {
    let b = bounds.abs();
    b.x0 < pt.x && pt.x < b.x1 && b.y0 < pt.y && pt.y < b.y1
}

/// Find the first region that claims `pt`.
///
/// Regions are measured in order and the search stops at the first claim, so later regions
/// are not measured at all.
pub fn claiming_child<R: RegionHandle>(pt: Point, regions: &[R]) -> Option<ChildClaim> {
    for (index, region) in regions.iter().enumerate() {
        match region.measure() {
            Ok(bounds) => {
                if region_contains(bounds, pt) {
                    log::debug!("child {index} claims touch at {pt:?} inside {bounds:?}");
                    return Some(ChildClaim {
                        index,
                        reason: ClaimReason::Inside(bounds),
                    });
                }
            }
            Err(err) => {
                log::debug!("child {index} claims touch at {pt:?}: {err}");
                return Some(ChildClaim {
                    index,
                    reason: ClaimReason::NotMeasured(err),
                });
            }
        }
    }
    None
}

/// Whether `pt` falls inside any of `regions`, treating unmeasured regions as inside.
pub fn is_inside_any_child<R: RegionHandle>(pt: Point, regions: &[R]) -> bool {
    claiming_child(pt, regions).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::LayoutSlot;
    use core::cell::Cell;

    struct Counting<'a> {
        bounds: Rect,
        calls: &'a Cell<u32>,
    }

    impl RegionHandle for Counting<'_> {
        fn measure(&self) -> Result<Rect, MeasureError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.bounds)
        }
    }

    #[test]
    fn no_regions_never_claims() {
        let regions: [Rect; 0] = [];
        assert!(!is_inside_any_child(Point::new(1.0, 1.0), &regions));
    }

    #[test]
    fn strictly_inside_is_claimed() {
        let regions = [Rect::new(0.0, 0.0, 50.0, 50.0)];
        assert!(is_inside_any_child(Point::new(10.0, 10.0), &regions));
        assert!(is_inside_any_child(Point::new(49.9, 0.1), &regions));
    }

    #[test]
    fn outside_is_not_claimed() {
        let regions = [Rect::new(0.0, 0.0, 50.0, 50.0), Rect::new(60.0, 0.0, 80.0, 20.0)];
        assert!(!is_inside_any_child(Point::new(55.0, 10.0), &regions));
        assert!(!is_inside_any_child(Point::new(70.0, 30.0), &regions));
        assert!(!is_inside_any_child(Point::new(-1.0, 10.0), &regions));
    }

    #[test]
    fn edges_belong_to_the_surface() {
        let regions = [Rect::new(0.0, 0.0, 50.0, 50.0)];
        assert!(!is_inside_any_child(Point::new(0.0, 10.0), &regions));
        assert!(!is_inside_any_child(Point::new(50.0, 10.0), &regions));
        assert!(!is_inside_any_child(Point::new(10.0, 0.0), &regions));
        assert!(!is_inside_any_child(Point::new(10.0, 50.0), &regions));
    }

    #[test]
    fn inverted_bounds_are_normalized() {
        let regions = [Rect::new(50.0, 50.0, 0.0, 0.0)];
        assert!(is_inside_any_child(Point::new(10.0, 10.0), &regions));
    }

    #[test]
    fn unmeasured_region_claims_any_point() {
        let slot = LayoutSlot::new();
        for pt in [
            Point::new(0.0, 0.0),
            Point::new(1_000.0, -3.0),
            Point::new(25.0, 25.0),
        ] {
            let claim = claiming_child(pt, &[&slot]).unwrap();
            assert_eq!(claim.index, 0);
            assert_eq!(claim.reason, ClaimReason::NotMeasured(MeasureError::NotReady));
        }
    }

    #[test]
    fn detached_region_claims_conservatively() {
        let slot = LayoutSlot::with_layout(Rect::new(0.0, 0.0, 1.0, 1.0));
        slot.detach();
        assert!(is_inside_any_child(Point::new(500.0, 500.0), &[&slot]));
    }

    #[test]
    fn reports_first_claiming_index() {
        let a = LayoutSlot::with_layout(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = LayoutSlot::with_layout(Rect::new(20.0, 20.0, 40.0, 40.0));
        let c = LayoutSlot::with_layout(Rect::new(25.0, 25.0, 35.0, 35.0));
        let claim = claiming_child(Point::new(30.0, 30.0), &[&a, &b, &c]).unwrap();
        assert_eq!(claim.index, 1);
        assert_eq!(
            claim.reason,
            ClaimReason::Inside(Rect::new(20.0, 20.0, 40.0, 40.0))
        );
    }

    #[test]
    fn short_circuits_on_first_claim() {
        let first = Cell::new(0);
        let second = Cell::new(0);
        let regions = [
            Counting {
                bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                calls: &first,
            },
            Counting {
                bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                calls: &second,
            },
        ];
        assert!(is_inside_any_child(Point::new(5.0, 5.0), &regions));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);

        assert!(!is_inside_any_child(Point::new(50.0, 5.0), &regions));
        assert_eq!(first.get(), 2);
        assert_eq!(second.get(), 1);
    }
}
