// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple radius geometry.

use kurbo::Size;

/// Compute the radius a ripple needs to cover every corner of a surface of `size`.
///
/// The result is the full diagonal `sqrt(width² + height²)`: a ripple centered on a touch at one
/// corner still reaches the opposite corner. With a `ceiling` the result is clamped to
/// `[0, ceiling]`.
///
/// Inputs are assumed finite.
pub fn compute_max_radius(size: Size, ceiling: Option<f64>) -> f64 {
    let diagonal = size.to_vec2().hypot();
    match ceiling {
        Some(ceiling) => diagonal.min(ceiling).max(0.0),
        None => diagonal,
    }
}
