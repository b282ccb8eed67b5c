// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Layout`] value type: one filling and one alignment per axis.

use kurbo::{Insets, Rect};

use crate::alignment::Alignment;
use crate::filling::Filling;
use crate::types::Axis;

/// One alignment rule and one filling rule per axis.
///
/// [`Layout::apply`] fills first, then aligns, so edge and center alignments see the
/// final size. The axes are independent.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layout::{Alignment, Filling, Layout};
///
/// // A 44pt tall bar pinned to the bottom, full width minus 16pt of margins.
/// let layout = Layout::new(
///     Alignment::center(0.0),
///     Alignment::bottom(0.0),
///     Filling::boxed(16.0),
///     Filling::fixed(44.0),
/// );
/// let frame = layout.apply(Rect::ZERO, Rect::new(0.0, 0.0, 320.0, 480.0));
/// assert_eq!(frame, Rect::new(8.0, 436.0, 312.0, 480.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Horizontal alignment.
    pub x: Alignment,
    /// Vertical alignment.
    pub y: Alignment,
    /// Horizontal filling (width).
    pub width: Filling,
    /// Vertical filling (height).
    pub height: Filling,
}

impl Layout {
    /// Build a layout from its four rules.
    #[must_use]
    pub fn new(x: Alignment, y: Alignment, width: Filling, height: Filling) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A layout that leaves the target unchanged.
    ///
    /// Useful for blocks that exist only to run constraints.
    #[must_use]
    pub fn equal() -> Self {
        Self::default()
    }

    /// A layout that makes the target equal to the source.
    #[must_use]
    pub fn fill() -> Self {
        Self::new(
            Alignment::start(0.0),
            Alignment::start(0.0),
            Filling::scaled(1.0),
            Filling::scaled(1.0),
        )
    }

    /// A layout that makes the target the source shrunk by `insets`.
    #[must_use]
    pub fn inset(insets: Insets) -> Self {
        Self::new(
            Alignment::start(insets.x0),
            Alignment::start(insets.y0),
            Filling::boxed_insets(insets, Axis::Horizontal),
            Filling::boxed_insets(insets, Axis::Vertical),
        )
    }

    /// Replace the horizontal alignment.
    #[must_use]
    pub fn with_x(mut self, x: Alignment) -> Self {
        self.x = x;
        self
    }

    /// Replace the vertical alignment.
    #[must_use]
    pub fn with_y(mut self, y: Alignment) -> Self {
        self.y = y;
        self
    }

    /// Replace the horizontal filling.
    #[must_use]
    pub fn with_width(mut self, width: Filling) -> Self {
        self.width = width;
        self
    }

    /// Replace the vertical filling.
    #[must_use]
    pub fn with_height(mut self, height: Filling) -> Self {
        self.height = height;
        self
    }

    /// Returns `rect` transformed to sit inside `source`.
    ///
    /// The input is not modified. The result may have a negative extent if a filling
    /// produced one; blocks normalize before committing.
    #[must_use]
    pub fn apply(&self, rect: Rect, source: Rect) -> Rect {
        let mut out = rect;
        self.width.apply(&mut out, source, Axis::Horizontal);
        self.height.apply(&mut out, source, Axis::Vertical);
        self.x.apply(&mut out, source, Axis::Horizontal);
        self.y.apply(&mut out, source, Axis::Vertical);
        out
    }
}
