// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout guides: non-rendering participants.
//!
//! A guide behaves like any other element for constraint purposes. Two kinds carry
//! extra state:
//!
//! - [`StackGuide`] arranges an ordered list of items along an axis and reports the
//!   extent of the arranged run as its intrinsic size.
//! - [`ScrollGuide`] has a content size and a content offset (its bounds origin), so
//!   elements inside it are translated when the offset changes.

use alloc::vec::Vec;

use kurbo::{Insets, Rect, Size};

use crate::distribution::{Distribution, ItemSizing, Spacing, distribute};
use crate::geometry::{
    extent, inset_rect, insets_along, set_extent, set_span, size_along, size_from_axes, span,
};
use crate::space::LayoutContext;
use crate::types::{Axis, ElementId};

/// The kind of a guide element.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Guide {
    /// A plain rectangle used only as a constraint reference or participant.
    #[default]
    Plain,
    /// A guide that distributes its arranged items.
    Stack(StackGuide),
    /// A guide with a scrollable content offset.
    Scroll(ScrollGuide),
}

/// How a stack sizes its items along the stacking axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StackSizing {
    /// Every item gets this extent.
    Uniform(f64),
    /// Items keep their current extent.
    Keep,
    /// Items take their intrinsic content size.
    ///
    /// Items without intrinsic content keep their current extent.
    Intrinsic,
}

/// How a stack sizes its items across the stacking axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CrossFilling {
    /// Items keep their cross extent and sit at the leading cross edge.
    #[default]
    Keep,
    /// Items span the whole cross extent of the content area.
    Fill,
}

/// Configuration and arranged items of a stack guide.
///
/// Items are arranged in the guide's own coordinate space, inside its bounds shrunk by
/// [`StackGuide::insets`]. Use [`ElementTree::arrange`](crate::ElementTree::arrange) to
/// add items and [`SchemeEntry::Stack`](crate::SchemeEntry::Stack) to lay them out
/// during a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct StackGuide {
    /// Stacking axis.
    pub axis: Axis,
    /// Where the run starts.
    pub distribution: Distribution,
    /// Gaps between items.
    pub spacing: Spacing,
    /// Item extent along the axis.
    pub sizing: StackSizing,
    /// Item extent across the axis.
    pub cross: CrossFilling,
    /// Content insets applied to the guide's bounds.
    pub insets: Insets,
    pub(crate) arranged: Vec<ElementId>,
}

impl StackGuide {
    /// A leading-aligned stack along `axis` with no spacing that keeps item sizes.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            distribution: Distribution::FromLeading,
            spacing: Spacing::default(),
            sizing: StackSizing::Keep,
            cross: CrossFilling::Keep,
            insets: Insets::ZERO,
            arranged: Vec::new(),
        }
    }

    /// Set where the run starts.
    #[must_use]
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Set the gaps between items.
    #[must_use]
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the item extent policy along the axis.
    #[must_use]
    pub fn with_sizing(mut self, sizing: StackSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Set the item extent policy across the axis.
    #[must_use]
    pub fn with_cross(mut self, cross: CrossFilling) -> Self {
        self.cross = cross;
        self
    }

    /// Set the content insets.
    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// The arranged items, in order.
    pub fn arranged(&self) -> &[ElementId] {
        &self.arranged
    }
}

/// Content size of a scroll guide.
///
/// The content offset is the guide's bounds origin; see
/// [`ElementTree::scroll_to`](crate::ElementTree::scroll_to).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollGuide {
    /// Size of the scrollable content.
    pub content_size: Size,
}

impl ScrollGuide {
    /// A scroll guide with the given content size.
    #[must_use]
    pub const fn new(content_size: Size) -> Self {
        Self { content_size }
    }
}

/// Item extents for a stack, before positioning: `(item, main, cross)`.
fn item_extents<C: LayoutContext + ?Sized>(
    ctx: &C,
    stack: &StackGuide,
    cross_available: f64,
) -> Vec<(ElementId, f64, f64)> {
    let axis = stack.axis;
    let cross_axis = axis.cross();
    stack
        .arranged
        .iter()
        .copied()
        .filter(|id| ctx.is_element_alive(*id))
        .map(|id| {
            let frame = ctx.element_frame(id);
            let (mut main, mut cross) = (extent(frame, axis), extent(frame, cross_axis));
            match stack.sizing {
                StackSizing::Uniform(v) => main = v,
                StackSizing::Keep => {}
                StackSizing::Intrinsic => {
                    let fitting = size_from_axes(axis, f64::INFINITY, cross_available);
                    if let Some(size) = ctx.intrinsic_size(id, fitting) {
                        main = size_along(size, axis);
                        if stack.cross == CrossFilling::Keep {
                            cross = size_along(size, cross_axis);
                        }
                    }
                }
            }
            if stack.cross == CrossFilling::Fill && cross_available.is_finite() {
                cross = cross_available;
            }
            (id, main.max(0.0), cross.max(0.0))
        })
        .collect()
}

/// Computes new frames for the arranged items of stack guide `guide`.
///
/// Frames are expressed in the guide's own space. Returns an empty list if `guide` is
/// not a stack guide.
pub(crate) fn arrange_stack<C: LayoutContext + ?Sized>(
    ctx: &C,
    guide: ElementId,
) -> Vec<(ElementId, Rect)> {
    let Some(stack) = ctx.stack_guide(guide) else {
        return Vec::new();
    };
    let axis = stack.axis;
    let cross_axis = axis.cross();
    let content = inset_rect(ctx.element_bounds(guide), stack.insets);
    let (cross_min, cross_max) = span(content, cross_axis);

    let extents = item_extents(ctx, stack, cross_max - cross_min);
    let mut rects: Vec<Rect> = extents
        .iter()
        .map(|&(id, main, cross)| {
            let mut r = ctx.element_frame(id);
            set_extent(&mut r, axis, main);
            set_span(&mut r, cross_axis, cross_min, cross_min + cross);
            r
        })
        .collect();
    distribute(
        &mut rects,
        content,
        axis,
        stack.distribution,
        &stack.spacing,
        ItemSizing::Keep,
    );
    tracing::trace!(?guide, items = rects.len(), "arranged stack");
    extents
        .iter()
        .map(|&(id, _, _)| id)
        .zip(rects)
        .collect()
}

/// The extent of a stack's arranged run plus its insets.
///
/// `fitting` bounds the cross axis for [`CrossFilling::Fill`] and intrinsic items; pass
/// infinity to measure unconstrained.
pub(crate) fn measure_stack<C: LayoutContext + ?Sized>(
    ctx: &C,
    stack: &StackGuide,
    fitting: Size,
) -> Size {
    let axis = stack.axis;
    let cross_axis = axis.cross();
    let (lead, trail) = insets_along(stack.insets, axis);
    let (cross_lead, cross_trail) = insets_along(stack.insets, cross_axis);
    let cross_available = (size_along(fitting, cross_axis) - cross_lead - cross_trail).max(0.0);

    let extents = item_extents(ctx, stack, cross_available);
    let run = stack.spacing.run_length(extents.iter().map(|e| e.1));
    let cross = extents.iter().map(|e| e.2).fold(0.0, f64::max);
    size_from_axes(
        axis,
        run + lead + trail,
        cross + cross_lead + cross_trail,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ElementKind, ElementTree, FixedContent};
    use kurbo::Point;

    fn stack_with_items(guide: StackGuide, sizes: &[Size]) -> (ElementTree, ElementId, Vec<ElementId>) {
        let mut tree = ElementTree::new();
        let root = tree.insert_view(None, Rect::new(0.0, 0.0, 400.0, 400.0));
        let g = tree.insert_guide(root, Guide::Stack(guide), Rect::new(10.0, 10.0, 210.0, 60.0));
        let items = sizes
            .iter()
            .map(|s| {
                let item = tree.insert(None, ElementKind::View, Rect::from_origin_size(Point::ORIGIN, *s));
                tree.arrange(g, item);
                item
            })
            .collect();
        (tree, g, items)
    }

    #[test]
    fn horizontal_leading_keep() {
        let guide = StackGuide::new(Axis::Horizontal).with_spacing(Spacing::Equal(5.0));
        let (tree, g, items) = stack_with_items(guide, &[Size::new(20.0, 10.0), Size::new(30.0, 15.0)]);
        let frames = arrange_stack(&tree, g);
        assert_eq!(frames[0], (items[0], Rect::new(0.0, 0.0, 20.0, 10.0)));
        assert_eq!(frames[1], (items[1], Rect::new(25.0, 0.0, 55.0, 15.0)));
    }

    #[test]
    fn trailing_uniform_fill_with_insets() {
        let guide = StackGuide::new(Axis::Horizontal)
            .with_distribution(Distribution::FromTrailing)
            .with_spacing(Spacing::Equal(2.0))
            .with_sizing(StackSizing::Uniform(20.0))
            .with_cross(CrossFilling::Fill)
            .with_insets(Insets::uniform(5.0));
        let (tree, g, _) = stack_with_items(guide, &[Size::ZERO; 5]);
        let frames = arrange_stack(&tree, g);
        // Guide bounds are 200x50; content area is 5..195 x 5..45.
        assert_eq!(frames[0].1, Rect::new(175.0, 5.0, 195.0, 45.0));
        for pair in frames.windows(2) {
            assert_eq!(pair[1].1.x1 + 2.0, pair[0].1.x0);
        }
    }

    #[test]
    fn intrinsic_items_and_measure() {
        let guide = StackGuide::new(Axis::Vertical)
            .with_sizing(StackSizing::Intrinsic)
            .with_spacing(Spacing::Equal(4.0))
            .with_insets(Insets::new(1.0, 2.0, 3.0, 4.0));
        let (mut tree, g, items) = stack_with_items(guide, &[Size::ZERO, Size::ZERO]);
        tree.set_content(items[0], FixedContent(Size::new(50.0, 10.0)));
        tree.set_content(items[1], FixedContent(Size::new(70.0, 20.0)));

        let frames = arrange_stack(&tree, g);
        assert_eq!(frames[0].1, Rect::new(1.0, 2.0, 51.0, 12.0));
        assert_eq!(frames[1].1, Rect::new(1.0, 16.0, 71.0, 36.0));

        let size = measure_stack(&tree, tree.stack_guide(g).unwrap(), Size::new(f64::INFINITY, f64::INFINITY));
        assert_eq!(size, Size::new(70.0 + 1.0 + 3.0, 34.0 + 2.0 + 4.0));
    }

    #[test]
    fn non_stack_guide_arranges_nothing() {
        let mut tree = ElementTree::new();
        let root = tree.insert_view(None, Rect::new(0.0, 0.0, 10.0, 10.0));
        let g = tree.insert_guide(root, Guide::Plain, Rect::ZERO);
        assert!(arrange_stack(&tree, g).is_empty());
    }
}
