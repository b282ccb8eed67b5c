// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout blocks: one participant, one [`Layout`], and an ordered constraint list.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::constraint::Constraint;
use crate::error::LayoutError;
use crate::geometry::normalized;
use crate::layout::Layout;
use crate::space::{LayoutContext, default_source};
use crate::tree::ElementTree;
use crate::types::ElementId;

/// When a block's [`Layout`] runs relative to its constraints.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockOrder {
    /// Place the frame with the layout, then refine it with the constraints.
    #[default]
    LayoutFirst,
    /// Narrow the source region with the constraints, then place the frame inside it
    /// with the layout.
    ConstraintsFirst,
}

/// A participant together with the rules that compute its frame.
///
/// The source rect for the [`Layout`] step is the one passed in by the caller (usually
/// the scheme), else the participant's super-element bounds, else its own frame.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layout::{Constraint, Edge, ElementTree, Layout, LayoutBlock, Side};
///
/// let mut tree = ElementTree::new();
/// let root = tree.insert_view(None, Rect::new(0.0, 0.0, 200.0, 100.0));
/// let title = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 80.0, 20.0));
/// let body = tree.insert_view(Some(root), Rect::ZERO);
///
/// LayoutBlock::new(body)
///     .with_layout(Layout::fill())
///     .with_constraint(Constraint::to(title, [Edge::Bottom.limit(Side::Outer)]))
///     .layout(&mut tree, None);
///
/// assert_eq!(tree.frame(body), Some(Rect::new(0.0, 20.0, 200.0, 100.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutBlock {
    /// The participant whose frame this block computes.
    pub element: ElementId,
    /// Base placement against the source rect.
    pub layout: Layout,
    /// Refinements, applied in order.
    pub constraints: Vec<Constraint>,
    /// Whether the layout or the constraints run first.
    pub order: BlockOrder,
}

impl LayoutBlock {
    /// A block that leaves `element` where it is until rules are added.
    #[must_use]
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            layout: Layout::equal(),
            constraints: Vec::new(),
            order: BlockOrder::LayoutFirst,
        }
    }

    /// Set the base layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Append one constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Append constraints in order.
    #[must_use]
    pub fn with_constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    /// Set the evaluation order.
    #[must_use]
    pub fn with_order(mut self, order: BlockOrder) -> Self {
        self.order = order;
        self
    }

    /// Computes the participant's frame without writing it.
    ///
    /// # Panics
    ///
    /// Panics if the participant or a reference element is stale, or if a reference
    /// shares no common ancestor with the participant.
    pub fn frame_in(&self, tree: &ElementTree, source: Option<Rect>) -> Rect {
        self.compute(tree, source)
    }

    /// Computes the participant's frame and writes it to the tree.
    ///
    /// # Panics
    ///
    /// See [`LayoutBlock::frame_in`].
    pub fn layout(&self, tree: &mut ElementTree, source: Option<Rect>) {
        let frame = self.compute(tree, source);
        tree.set_frame(self.element, frame);
    }

    pub(crate) fn compute<C: LayoutContext + ?Sized>(&self, ctx: &C, source: Option<Rect>) -> Rect {
        let element = self.element;
        if !ctx.is_element_alive(element) {
            panic!("{}", LayoutError::StaleElement(element));
        }
        let current = ctx.element_frame(element);
        let source = source.unwrap_or_else(|| default_source(ctx, element));
        let frame = match self.order {
            BlockOrder::LayoutFirst => {
                let mut rect = self.layout.apply(current, source);
                for constraint in &self.constraints {
                    constraint.apply(&mut rect, ctx, element);
                }
                rect
            }
            BlockOrder::ConstraintsFirst => {
                let mut region = source;
                for constraint in &self.constraints {
                    constraint.apply(&mut region, ctx, element);
                }
                self.layout.apply(current, normalized(region))
            }
        };
        let frame = normalized(frame);
        tracing::trace!(?element, ?frame, "computed block frame");
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Alignment;
    use crate::anchor::Anchor;
    use crate::filling::Filling;
    use crate::types::{Edge, Side};
    use kurbo::Insets;

    fn tree_with_root() -> (ElementTree, ElementId) {
        let mut tree = ElementTree::new();
        let root = tree.insert_view(None, Rect::new(0.0, 0.0, 200.0, 100.0));
        (tree, root)
    }

    #[test]
    fn equal_layout_without_constraints_is_identity() {
        let (mut tree, root) = tree_with_root();
        let child = tree.insert_view(Some(root), Rect::new(3.0, 4.0, 13.0, 24.0));
        let block = LayoutBlock::new(child);
        assert_eq!(block.frame_in(&tree, None), Rect::new(3.0, 4.0, 13.0, 24.0));
    }

    #[test]
    fn source_defaults_to_super_bounds() {
        let (mut tree, root) = tree_with_root();
        tree.set_bounds_origin(root, kurbo::Point::new(0.0, 30.0));
        let child = tree.insert_view(Some(root), Rect::ZERO);
        let block = LayoutBlock::new(child).with_layout(Layout::fill());
        assert_eq!(block.frame_in(&tree, None), Rect::new(0.0, 30.0, 200.0, 130.0));
        let explicit = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(block.frame_in(&tree, Some(explicit)), explicit);
        // A root lays out against its own frame.
        assert_eq!(
            LayoutBlock::new(root).with_layout(Layout::fill()).frame_in(&tree, None),
            Rect::new(0.0, 0.0, 200.0, 100.0)
        );
    }

    #[test]
    fn constraints_refine_after_layout() {
        let (mut tree, root) = tree_with_root();
        let sidebar = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 50.0, 100.0));
        let content = tree.insert_view(Some(root), Rect::ZERO);
        let block = LayoutBlock::new(content)
            .with_layout(Layout::fill())
            .with_constraints([
                Constraint::to(sidebar, [Edge::Right.limit(Side::Outer)]),
                Constraint::to_rect(Rect::ZERO, [Anchor::Inset(Insets::uniform(5.0))]),
            ]);
        block.layout(&mut tree, None);
        assert_eq!(tree.frame(content), Some(Rect::new(55.0, 5.0, 195.0, 95.0)));
    }

    #[test]
    fn constraints_first_narrows_the_source() {
        let (mut tree, root) = tree_with_root();
        let sidebar = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 50.0, 100.0));
        let badge = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 10.0, 10.0));
        let block = LayoutBlock::new(badge)
            .with_layout(Layout::equal().with_x(Alignment::center(0.0)).with_y(Alignment::end(0.0)))
            .with_constraint(Constraint::to(sidebar, [Edge::Right.limit(Side::Outer)]))
            .with_order(BlockOrder::ConstraintsFirst);
        // Region is x in 50..200, so center is 125.
        assert_eq!(block.frame_in(&tree, None), Rect::new(120.0, 90.0, 130.0, 100.0));

        let layout_first = block.clone().with_order(BlockOrder::LayoutFirst);
        // Centered at 100 first, then the limit clips nothing.
        assert_eq!(layout_first.frame_in(&tree, None), Rect::new(95.0, 90.0, 105.0, 100.0));
    }

    #[test]
    fn result_is_normalized() {
        let (mut tree, root) = tree_with_root();
        let child = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 10.0, 10.0));
        let block = LayoutBlock::new(child)
            .with_layout(Layout::equal().with_width(Filling::boxed(500.0)))
            .with_constraint(Constraint::to_rect(
                Rect::ZERO,
                [Anchor::Inset(Insets::new(0.0, 20.0, 0.0, 0.0))],
            ));
        let frame = block.frame_in(&tree, None);
        assert_eq!(frame.width(), 0.0);
        assert_eq!(frame.height(), 0.0);
        assert_eq!(frame.y0, 20.0);
    }

    #[test]
    #[should_panic(expected = "is not alive")]
    fn stale_participant_panics() {
        let (mut tree, root) = tree_with_root();
        let child = tree.insert_view(Some(root), Rect::ZERO);
        tree.remove(child);
        let _ = LayoutBlock::new(child).frame_in(&tree, None);
    }
}
