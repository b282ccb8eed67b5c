// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public vocabulary types: element identifiers, axes, edges, and sides.

/// Identifier for an element in an [`ElementTree`](crate::ElementTree) (generational).
///
/// A handle stays valid until the element is removed. Reusing a slot bumps its
/// generation, so stale handles never alias a newer element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A single layout axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// The x axis (left to right).
    Horizontal,
    /// The y axis (top to bottom).
    Vertical,
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

bitflags::bitflags! {
    /// A set of axes, used by anchors and constraints that may act on one or both axes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        /// Act on the x axis (x position or width).
        const HORIZONTAL = 0b0000_0001;
        /// Act on the y axis (y position or height).
        const VERTICAL   = 0b0000_0010;
    }
}

impl Axes {
    /// Returns `true` if `axis` is part of this set.
    #[must_use]
    pub const fn has(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.contains(Self::HORIZONTAL),
            Axis::Vertical => self.contains(Self::VERTICAL),
        }
    }
}

impl From<Axis> for Axes {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::HORIZONTAL,
            Axis::Vertical => Self::VERTICAL,
        }
    }
}

/// One edge of a rectangle.
///
/// Edges are named in screen coordinates: `Top` is the minimum y, `Bottom` the maximum y.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Edge {
    /// Minimum x.
    Left,
    /// Maximum x.
    Right,
    /// Minimum y.
    Top,
    /// Maximum y.
    Bottom,
}

impl Edge {
    /// The axis this edge lies across.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Whether this is the maximum edge of its axis (`Right` or `Bottom`).
    #[must_use]
    pub const fn is_max(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }
}

/// Which side of a reference edge a target is related to.
///
/// For a reference's bottom edge, `Inner` means "inside the reference, above the edge"
/// and `Outer` means "outside the reference, below the edge".
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// The interior side of the reference edge.
    Inner,
    /// The exterior side of the reference edge.
    Outer,
}
