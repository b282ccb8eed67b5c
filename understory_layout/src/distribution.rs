// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distribution: laying rectangles out contiguously along one axis.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::geometry::{extent, mid, set_span, span};
use crate::types::Axis;

/// Where a distribution starts placing items.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// The first item touches the minimum edge; later items follow toward the maximum edge.
    #[default]
    FromLeading,
    /// The first item touches the maximum edge; later items follow toward the minimum edge.
    FromTrailing,
    /// Items keep leading-to-trailing order and the run is centered on the midpoint.
    FromCenter,
}

/// Gaps between consecutive items.
#[derive(Clone, Debug, PartialEq)]
pub enum Spacing {
    /// The same gap between every pair of items.
    Equal(f64),
    /// One gap per pair, in placement order. Missing entries repeat the last one; an
    /// empty list means no gaps.
    Custom(Vec<f64>),
}

impl Default for Spacing {
    fn default() -> Self {
        Self::Equal(0.0)
    }
}

impl Spacing {
    /// The gap placed after item `index`.
    #[must_use]
    pub fn gap(&self, index: usize) -> f64 {
        match self {
            Self::Equal(v) => *v,
            Self::Custom(gaps) => gaps.get(index).or(gaps.last()).copied().unwrap_or(0.0),
        }
    }

    /// Total length of items with the given extents and the gaps between them.
    pub fn run_length(&self, extents: impl IntoIterator<Item = f64>) -> f64 {
        extents
            .into_iter()
            .enumerate()
            .fold(0.0, |total, (i, e)| {
                if i > 0 { total + self.gap(i - 1) + e } else { e }
            })
    }
}

/// How [`distribute`] chooses item extents along the axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ItemSizing {
    /// Every item gets this extent.
    Uniform(f64),
    /// Every item keeps its current extent.
    Keep,
}

/// Places `rects` one after another along `axis` of `within`.
///
/// Only the span along `axis` is written; the cross axis is left to the caller. Negative
/// extents are treated as zero. The result depends only on the inputs.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layout::{Axis, Distribution, ItemSizing, Spacing, distribute};
///
/// let mut rects = [Rect::ZERO; 3];
/// distribute(
///     &mut rects,
///     Rect::new(0.0, 0.0, 100.0, 10.0),
///     Axis::Horizontal,
///     Distribution::FromLeading,
///     &Spacing::Equal(5.0),
///     ItemSizing::Uniform(10.0),
/// );
/// assert_eq!(rects[2].x0, 30.0);
/// ```
pub fn distribute(
    rects: &mut [Rect],
    within: Rect,
    axis: Axis,
    distribution: Distribution,
    spacing: &Spacing,
    sizing: ItemSizing,
) {
    let extent_of = |r: &Rect| match sizing {
        ItemSizing::Uniform(v) => v.max(0.0),
        ItemSizing::Keep => extent(*r, axis).max(0.0),
    };
    let (min, max) = span(within, axis);
    match distribution {
        Distribution::FromLeading => place_forward(rects, axis, min, spacing, extent_of),
        Distribution::FromCenter => {
            let run = spacing.run_length(rects.iter().map(extent_of));
            place_forward(rects, axis, mid(within, axis) - run * 0.5, spacing, extent_of);
        }
        Distribution::FromTrailing => {
            let mut cursor = max;
            for (i, r) in rects.iter_mut().enumerate() {
                let e = extent_of(r);
                set_span(r, axis, cursor - e, cursor);
                cursor -= e + spacing.gap(i);
            }
        }
    }
}

fn place_forward(
    rects: &mut [Rect],
    axis: Axis,
    start: f64,
    spacing: &Spacing,
    extent_of: impl Fn(&Rect) -> f64,
) {
    let mut cursor = start;
    for (i, r) in rects.iter_mut().enumerate() {
        let e = extent_of(r);
        set_span(r, axis, cursor, cursor + e);
        cursor += e + spacing.gap(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const CONTAINER: Rect = Rect::new(0.0, 0.0, 200.0, 50.0);

    #[test]
    fn from_trailing_with_uniform_spacing() {
        let mut rects = [Rect::new(0.0, 0.0, 0.0, 10.0); 5];
        distribute(
            &mut rects,
            CONTAINER,
            Axis::Horizontal,
            Distribution::FromTrailing,
            &Spacing::Equal(2.0),
            ItemSizing::Uniform(20.0),
        );
        assert_eq!(rects[0].x1, CONTAINER.x1);
        for pair in rects.windows(2) {
            assert_eq!(pair[1].x1 + 2.0, pair[0].x0, "gap must be exactly the spacing");
            assert_eq!(pair[1].width(), 20.0);
        }
        assert_eq!(rects[4].x0, 200.0 - 5.0 * 20.0 - 4.0 * 2.0);
    }

    #[test]
    fn from_leading_keeps_sizes_and_cross_axis() {
        let mut rects = [
            Rect::new(50.0, 3.0, 60.0, 13.0),
            Rect::new(0.0, 4.0, 30.0, 14.0),
        ];
        distribute(
            &mut rects,
            CONTAINER,
            Axis::Horizontal,
            Distribution::FromLeading,
            &Spacing::Equal(4.0),
            ItemSizing::Keep,
        );
        assert_eq!(rects[0], Rect::new(0.0, 3.0, 10.0, 13.0));
        assert_eq!(rects[1], Rect::new(14.0, 4.0, 44.0, 14.0));
    }

    #[test]
    fn from_center_is_symmetric() {
        let mut rects = [Rect::ZERO; 3];
        distribute(
            &mut rects,
            CONTAINER,
            Axis::Vertical,
            Distribution::FromCenter,
            &Spacing::Equal(5.0),
            ItemSizing::Uniform(10.0),
        );
        // Run of 40 centered on y = 25.
        assert_eq!(rects[0].y0, 5.0);
        assert_eq!(rects[2].y1, 45.0);
        assert_eq!(rects[1].center().y, 25.0);
    }

    #[test]
    fn custom_gaps_repeat_last() {
        let spacing = Spacing::Custom(vec![1.0, 3.0]);
        assert_eq!(spacing.gap(0), 1.0);
        assert_eq!(spacing.gap(1), 3.0);
        assert_eq!(spacing.gap(7), 3.0);
        assert_eq!(Spacing::Custom(vec![]).gap(0), 0.0);
        assert_eq!(spacing.run_length([10.0, 10.0, 10.0, 10.0]), 47.0);
        assert_eq!(spacing.run_length([]), 0.0);
    }

    #[test]
    fn stable_for_same_input() {
        let run = || {
            let mut rects = [Rect::new(0.0, 0.0, 7.5, 1.0); 4];
            distribute(
                &mut rects,
                CONTAINER,
                Axis::Horizontal,
                Distribution::FromCenter,
                &Spacing::Custom(vec![0.5, 1.5]),
                ItemSizing::Keep,
            );
            rects
        };
        assert_eq!(run(), run());
    }
}
