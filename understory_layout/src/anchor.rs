// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchors: single rules relating a target rectangle to a reference rectangle.
//!
//! Edge anchors come in three relations, each parameterized by a [`Side`] of the
//! reference edge:
//!
//! - **align** moves the target so one of its edges meets the reference edge. The size
//!   is unchanged. With [`Side::Outer`] the target's facing edge meets the reference
//!   edge from outside (the target sits beyond the edge); with [`Side::Inner`] the
//!   matching edges coincide.
//! - **limit** clips the target to the allowed side of the reference edge. A target that
//!   does not cross the edge is left untouched, including when it merely touches it.
//!   A target entirely on the wrong side collapses to zero extent on the edge. Limits
//!   only ever shrink.
//! - **pull** places the same edge that align would, but resizes instead of moving: the
//!   opposite edge stays put, and the extent is clamped at zero.

use kurbo::{Insets, Rect, Vec2};

use crate::geometry::{
    extent, inset_rect, mid, move_max_to, move_mid_to, move_min_to, set_extent, set_span, span,
};
use crate::types::{Axes, Axis, Edge, Side};

/// A rule that mutates a target rectangle given a reference rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    /// Move the target so its edge meets `edge` of the reference.
    ///
    /// `spacing` is a gap away from the reference for [`Side::Outer`] and an inset into
    /// the reference for [`Side::Inner`].
    Align {
        /// Reference edge.
        edge: Edge,
        /// Side of the reference edge the target ends up on.
        side: Side,
        /// Distance kept from the reference edge.
        spacing: f64,
    },
    /// Clip the target to one side of `edge` of the reference.
    ///
    /// A target that lies wholly on the disallowed side, even one whose far edge only
    /// touches the boundary, is not left in place: it collapses to zero extent on the
    /// boundary.
    Limit {
        /// Reference edge.
        edge: Edge,
        /// The allowed side.
        side: Side,
    },
    /// Resize the target so its edge meets `edge` of the reference.
    Pull {
        /// Reference edge.
        edge: Edge,
        /// Side of the reference edge the target ends up on.
        side: Side,
    },
    /// Align midpoints on the given axes.
    Center {
        /// Axes to center on.
        axes: Axes,
        /// Offset added to the reference midpoint.
        offset: Vec2,
    },
    /// Copy the reference extent on the given axes, multiplied by `multiplier`.
    ///
    /// The target's minimum edges are held.
    Size {
        /// Axes to copy.
        axes: Axes,
        /// Factor applied to the reference extent.
        multiplier: f64,
    },
    /// Make the target equal to the reference shrunk by insets.
    Equal(Insets),
    /// Shrink the target by insets. The reference is not consulted.
    Inset(Insets),
}

impl Edge {
    /// Align against this edge of the reference.
    #[must_use]
    pub const fn align(self, side: Side) -> Anchor {
        Anchor::Align {
            edge: self,
            side,
            spacing: 0.0,
        }
    }

    /// Align against this edge of the reference, keeping `spacing` from it.
    #[must_use]
    pub const fn align_spaced(self, side: Side, spacing: f64) -> Anchor {
        Anchor::Align {
            edge: self,
            side,
            spacing,
        }
    }

    /// Limit the target to `side` of this edge of the reference.
    #[must_use]
    pub const fn limit(self, side: Side) -> Anchor {
        Anchor::Limit { edge: self, side }
    }

    /// Pull the target to this edge of the reference.
    #[must_use]
    pub const fn pull(self, side: Side) -> Anchor {
        Anchor::Pull { edge: self, side }
    }
}

impl Anchor {
    /// Center horizontally.
    #[must_use]
    pub const fn center_x() -> Self {
        Self::Center {
            axes: Axes::HORIZONTAL,
            offset: Vec2::ZERO,
        }
    }

    /// Center vertically.
    #[must_use]
    pub const fn center_y() -> Self {
        Self::Center {
            axes: Axes::VERTICAL,
            offset: Vec2::ZERO,
        }
    }

    /// Center on both axes.
    #[must_use]
    pub const fn center() -> Self {
        Self::Center {
            axes: Axes::all(),
            offset: Vec2::ZERO,
        }
    }

    /// Copy the reference width.
    #[must_use]
    pub const fn width() -> Self {
        Self::Size {
            axes: Axes::HORIZONTAL,
            multiplier: 1.0,
        }
    }

    /// Copy the reference height.
    #[must_use]
    pub const fn height() -> Self {
        Self::Size {
            axes: Axes::VERTICAL,
            multiplier: 1.0,
        }
    }

    /// Copy the reference size.
    #[must_use]
    pub const fn size() -> Self {
        Self::Size {
            axes: Axes::all(),
            multiplier: 1.0,
        }
    }

    /// Mutates `rect` against `reference`.
    pub fn apply(&self, rect: &mut Rect, reference: Rect) {
        match *self {
            Self::Align {
                edge,
                side,
                spacing,
            } => align(rect, reference, edge, side, spacing),
            Self::Limit { edge, side } => limit(rect, reference, edge, side),
            Self::Pull { edge, side } => pull(rect, reference, edge, side),
            Self::Center { axes, offset } => {
                if axes.has(Axis::Horizontal) {
                    let center = mid(reference, Axis::Horizontal) + offset.x;
                    move_mid_to(rect, Axis::Horizontal, center);
                }
                if axes.has(Axis::Vertical) {
                    let center = mid(reference, Axis::Vertical) + offset.y;
                    move_mid_to(rect, Axis::Vertical, center);
                }
            }
            Self::Size { axes, multiplier } => {
                for axis in [Axis::Horizontal, Axis::Vertical] {
                    if axes.has(axis) {
                        set_extent(rect, axis, extent(reference, axis) * multiplier);
                    }
                }
            }
            Self::Equal(insets) => *rect = inset_rect(reference, insets),
            Self::Inset(insets) => *rect = inset_rect(*rect, insets),
        }
    }
}

/// Coordinate of `edge` on `reference`.
fn boundary(reference: Rect, edge: Edge) -> f64 {
    let (min, max) = span(reference, edge.axis());
    if edge.is_max() { max } else { min }
}

/// Whether the target edge that meets the boundary is its maximum edge.
fn meets_with_max(edge: Edge, side: Side) -> bool {
    match side {
        Side::Inner => edge.is_max(),
        Side::Outer => !edge.is_max(),
    }
}

fn align(rect: &mut Rect, reference: Rect, edge: Edge, side: Side, spacing: f64) {
    let axis = edge.axis();
    let outward = if edge.is_max() { 1.0 } else { -1.0 };
    let direction = match side {
        Side::Outer => outward,
        Side::Inner => -outward,
    };
    let target = boundary(reference, edge) + spacing * direction;
    if meets_with_max(edge, side) {
        move_max_to(rect, axis, target);
    } else {
        move_min_to(rect, axis, target);
    }
}

fn limit(rect: &mut Rect, reference: Rect, edge: Edge, side: Side) {
    let axis = edge.axis();
    let b = boundary(reference, edge);
    // Allowed half-space is `>= b` beyond a max edge or inside a min edge.
    let allowed_above = edge.is_max() == (side == Side::Outer);
    let (min, max) = span(*rect, axis);
    if allowed_above {
        set_span(rect, axis, min.max(b), max.max(b));
    } else {
        set_span(rect, axis, min.min(b), max.min(b));
    }
}

fn pull(rect: &mut Rect, reference: Rect, edge: Edge, side: Side) {
    let axis = edge.axis();
    let b = boundary(reference, edge);
    let (min, max) = span(*rect, axis);
    if meets_with_max(edge, side) {
        set_span(rect, axis, min.min(b), b);
    } else {
        set_span(rect, axis, b, max.max(b));
    }
}
