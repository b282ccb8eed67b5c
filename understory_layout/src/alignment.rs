// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment rules: positioning a rectangle along one axis of a source rectangle.

use kurbo::Rect;

use crate::geometry::{extent, mid, move_max_to, move_mid_to, move_min_to, span};
use crate::types::Axis;

/// Which part of the source an [`Alignment`] positions against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AlignAnchor {
    /// Leave the position untouched.
    Keep,
    /// Align minimum edges (left or top).
    Start,
    /// Align midpoints.
    Center,
    /// Align maximum edges (right or bottom).
    End,
}

/// How the distance between the aligned edge and the source edge is chosen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AlignOffset {
    /// A constant distance.
    Fixed(f64),
    /// The source extent along the axis multiplied by a factor.
    Multiplied(f64),
    /// The space left over by the target, capped at `max`.
    ///
    /// For [`AlignAnchor::Start`] and [`AlignAnchor::End`] the left-over space is
    /// `source - target`; for [`AlignAnchor::Center`] it is half of that. The largest
    /// offset that still fits is used, so a roomy source resolves to `max`. When less
    /// than `min` is left, the offset collapses to exactly the left-over space (zero if
    /// the target does not fit at all), so the target never leaves the source.
    Between {
        /// Lower bound of the offset.
        min: f64,
        /// Upper bound of the offset.
        max: f64,
    },
}

impl AlignOffset {
    /// Offset equal to `factor` times the source extent.
    #[must_use]
    pub const fn multiplied(factor: f64) -> Self {
        Self::Multiplied(factor)
    }

    /// Offset clamped into `min..=max` against the available space.
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self::Between { min, max }
    }

    pub(crate) fn resolve(self, anchor: AlignAnchor, target: f64, source: f64) -> f64 {
        match self {
            Self::Fixed(v) => v,
            Self::Multiplied(k) => source * k,
            Self::Between { min, max } => {
                let available = match anchor {
                    AlignAnchor::Center => (source - target) * 0.5,
                    _ => source - target,
                };
                if available >= min {
                    available.min(max.max(min))
                } else {
                    available.max(0.0)
                }
            }
        }
    }
}

impl From<f64> for AlignOffset {
    fn from(v: f64) -> Self {
        Self::Fixed(v)
    }
}

impl Default for AlignOffset {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}

/// Positions a rectangle along one axis of a source rectangle without changing its size.
///
/// Positive offsets move the target toward the source's interior for `Start` and `End`
/// and toward the maximum edge for `Center`.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layout::{AlignOffset, Alignment, Axis};
///
/// let source = Rect::new(0.0, 0.0, 100.0, 100.0);
/// let mut rect = Rect::new(0.0, 0.0, 20.0, 20.0);
/// Alignment::right(5.0).apply(&mut rect, source, Axis::Horizontal);
/// assert_eq!(rect.x1, 95.0);
///
/// Alignment::top(AlignOffset::between(0.0, 10.0)).apply(&mut rect, source, Axis::Vertical);
/// assert_eq!(rect.y0, 10.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Alignment {
    /// The edge or midpoint to align.
    pub anchor: AlignAnchor,
    /// Distance from the source edge or midpoint.
    pub offset: AlignOffset,
}

impl Default for Alignment {
    fn default() -> Self {
        Self::KEEP
    }
}

impl Alignment {
    /// Leaves the position untouched.
    pub const KEEP: Self = Self {
        anchor: AlignAnchor::Keep,
        offset: AlignOffset::Fixed(0.0),
    };

    /// Build an alignment from its parts.
    #[must_use]
    pub fn new(anchor: AlignAnchor, offset: impl Into<AlignOffset>) -> Self {
        Self {
            anchor,
            offset: offset.into(),
        }
    }

    /// Align minimum edges.
    #[must_use]
    pub fn start(offset: impl Into<AlignOffset>) -> Self {
        Self::new(AlignAnchor::Start, offset)
    }

    /// Align maximum edges.
    #[must_use]
    pub fn end(offset: impl Into<AlignOffset>) -> Self {
        Self::new(AlignAnchor::End, offset)
    }

    /// Align midpoints.
    #[must_use]
    pub fn center(offset: impl Into<AlignOffset>) -> Self {
        Self::new(AlignAnchor::Center, offset)
    }

    /// Horizontal alias of [`Alignment::start`].
    #[must_use]
    pub fn left(offset: impl Into<AlignOffset>) -> Self {
        Self::start(offset)
    }

    /// Horizontal alias of [`Alignment::end`].
    #[must_use]
    pub fn right(offset: impl Into<AlignOffset>) -> Self {
        Self::end(offset)
    }

    /// Vertical alias of [`Alignment::start`].
    #[must_use]
    pub fn top(offset: impl Into<AlignOffset>) -> Self {
        Self::start(offset)
    }

    /// Vertical alias of [`Alignment::end`].
    #[must_use]
    pub fn bottom(offset: impl Into<AlignOffset>) -> Self {
        Self::end(offset)
    }

    /// Positions `rect` along `axis` of `source`.
    pub fn apply(&self, rect: &mut Rect, source: Rect, axis: Axis) {
        if self.anchor == AlignAnchor::Keep {
            return;
        }
        let offset = self
            .offset
            .resolve(self.anchor, extent(*rect, axis), extent(source, axis));
        let (min, max) = span(source, axis);
        match self.anchor {
            AlignAnchor::Keep => {}
            AlignAnchor::Start => move_min_to(rect, axis, min + offset),
            AlignAnchor::End => move_max_to(rect, axis, max - offset),
            AlignAnchor::Center => move_mid_to(rect, axis, mid(source, axis) + offset),
        }
    }
}
