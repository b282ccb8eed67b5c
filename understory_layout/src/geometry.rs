// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-axis rectangle helpers shared by the transform rules.

use kurbo::{Insets, Rect, Size};

use crate::types::Axis;

/// Returns `(min, max)` of `rect` along `axis`.
#[inline]
pub(crate) fn span(rect: Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (rect.x0, rect.x1),
        Axis::Vertical => (rect.y0, rect.y1),
    }
}

/// Replaces the span of `rect` along `axis`.
#[inline]
pub(crate) fn set_span(rect: &mut Rect, axis: Axis, min: f64, max: f64) {
    match axis {
        Axis::Horizontal => {
            rect.x0 = min;
            rect.x1 = max;
        }
        Axis::Vertical => {
            rect.y0 = min;
            rect.y1 = max;
        }
    }
}

/// Signed extent of `rect` along `axis`. Negative while a rect is inverted.
#[inline]
pub(crate) fn extent(rect: Rect, axis: Axis) -> f64 {
    let (min, max) = span(rect, axis);
    max - min
}

/// Sets the extent along `axis`, holding the minimum edge.
#[inline]
pub(crate) fn set_extent(rect: &mut Rect, axis: Axis, extent: f64) {
    let (min, _) = span(*rect, axis);
    set_span(rect, axis, min, min + extent);
}

/// Moves `rect` along `axis` so its minimum edge sits at `min`, keeping its extent.
#[inline]
pub(crate) fn move_min_to(rect: &mut Rect, axis: Axis, min: f64) {
    let e = extent(*rect, axis);
    set_span(rect, axis, min, min + e);
}

/// Moves `rect` along `axis` so its maximum edge sits at `max`, keeping its extent.
#[inline]
pub(crate) fn move_max_to(rect: &mut Rect, axis: Axis, max: f64) {
    let e = extent(*rect, axis);
    set_span(rect, axis, max - e, max);
}

/// Midpoint of `rect` along `axis`.
#[inline]
pub(crate) fn mid(rect: Rect, axis: Axis) -> f64 {
    let (min, max) = span(rect, axis);
    min + (max - min) * 0.5
}

/// Moves `rect` along `axis` so its midpoint sits at `center`, keeping its extent.
#[inline]
pub(crate) fn move_mid_to(rect: &mut Rect, axis: Axis, center: f64) {
    let e = extent(*rect, axis);
    set_span(rect, axis, center - e * 0.5, center - e * 0.5 + e);
}

/// Clamps inverted spans to zero extent, holding the minimum edge.
#[inline]
pub(crate) fn normalized(mut rect: Rect) -> Rect {
    if rect.x1 < rect.x0 {
        rect.x1 = rect.x0;
    }
    if rect.y1 < rect.y0 {
        rect.y1 = rect.y0;
    }
    rect
}

/// Returns `(leading, trailing)` inset amounts along `axis`.
#[inline]
pub(crate) fn insets_along(insets: Insets, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (insets.x0, insets.x1),
        Axis::Vertical => (insets.y0, insets.y1),
    }
}

/// Shrinks (or, for negative insets, grows) each edge of `rect` independently.
///
/// The resulting size is clamped to zero; a collapsed span sits at the inset leading edge.
pub(crate) fn inset_rect(rect: Rect, insets: Insets) -> Rect {
    normalized(Rect::new(
        rect.x0 + insets.x0,
        rect.y0 + insets.y0,
        rect.x1 - insets.x1,
        rect.y1 - insets.y1,
    ))
}

/// Component of `size` along `axis`.
#[inline]
pub(crate) fn size_along(size: Size, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => size.width,
        Axis::Vertical => size.height,
    }
}

/// Builds a size from a main-axis and a cross-axis component.
#[inline]
pub(crate) fn size_from_axes(axis: Axis, main: f64, cross: f64) -> Size {
    match axis {
        Axis::Horizontal => Size::new(main, cross),
        Axis::Vertical => Size::new(cross, main),
    }
}

/// Clamps `value` into `[min, max]` without panicking on an inverted range.
///
/// An inverted range resolves to `min`.
#[inline]
pub(crate) fn clamp_range(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insets_clamp_to_zero_size() {
        let r = inset_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Insets::new(8.0, 2.0, 8.0, 2.0),
        );
        assert_eq!(r, Rect::new(8.0, 2.0, 8.0, 8.0));
    }

    #[test]
    fn negative_insets_grow() {
        let r = inset_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Insets::uniform(-5.0));
        assert_eq!(r, Rect::new(-5.0, -5.0, 15.0, 15.0));
    }

    #[test]
    fn normalize_holds_origin() {
        let r = normalized(Rect::new(10.0, 10.0, 4.0, 30.0));
        assert_eq!(r, Rect::new(10.0, 10.0, 10.0, 30.0));
    }

    #[test]
    fn clamp_range_prefers_min_when_inverted() {
        assert_eq!(clamp_range(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp_range(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_range(-1.0, 0.0, 10.0), 0.0);
    }
}
