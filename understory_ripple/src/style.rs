// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame style records consumed by the render layer.

use kurbo::{Affine, Point, Size, Vec2};

use crate::animator::AnimatedRippleState;

/// Style of the ripple layer.
///
/// The ripple is a circle of diameter `2 * max_radius` whose top-left corner sits at the
/// surface origin before [`translate`](Self::translate) and [`scale`](Self::scale) are applied.
/// Scaling happens about the circle's own center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RippleStyle {
    /// Offset of the circle's top-left corner, in surface coordinates.
    pub translate: Vec2,
    /// Scale about the circle's center.
    pub scale: f64,
    /// Layer opacity.
    pub opacity: f64,
    /// Unscaled circle size.
    pub size: Size,
    /// Corner radius that turns the square layer into a circle.
    pub corner_radius: f64,
}

impl RippleStyle {
    /// Transform from the circle's local space to surface coordinates.
    pub fn transform(&self) -> Affine {
        let center = Point::new(self.size.width * 0.5, self.size.height * 0.5);
        Affine::translate(self.translate) * Affine::scale_about(self.scale, center)
    }

    /// Center of the circle in surface coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.corner_radius, self.corner_radius) + self.translate
    }
}

/// Style of the highlight layer, which fills the whole surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HighlightStyle {
    /// Layer opacity.
    pub opacity: f64,
}

/// Style of the content layer that holds the highlight, the ripple, and the children.
///
/// The content layer clips to its rounded bounds, so the ripple never spills past the
/// container's corners.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ContentStyle {
    /// Corner radius copied from the container. `None` leaves the corners square.
    pub corner_radius: Option<f64>,
}

/// Everything the render layer needs for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceStyle {
    /// The expanding circle.
    pub ripple: RippleStyle,
    /// The background wash.
    pub highlight: HighlightStyle,
    /// The clipping layer.
    pub content: ContentStyle,
}

impl From<&AnimatedRippleState> for SurfaceStyle {
    fn from(state: &AnimatedRippleState) -> Self {
        let r = state.max_radius;
        Self {
            ripple: RippleStyle {
                translate: Vec2::new(state.center_x, state.center_y),
                scale: state.scale,
                opacity: state.ripple_opacity,
                size: Size::new(2.0 * r, 2.0 * r),
                corner_radius: r,
            },
            highlight: HighlightStyle {
                opacity: state.highlight_opacity,
            },
            content: ContentStyle::default(),
        }
    }
}
