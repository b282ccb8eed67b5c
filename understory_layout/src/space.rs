// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate spaces: the read-only view layout computes against, and conversions
//! between element spaces.
//!
//! Conversion is translation only. A point in the own space of element `E` maps into
//! its super element's space by adding `E.frame.origin - E.bounds.origin`; a non-zero
//! bounds origin (a scroll offset) therefore shifts everything inside `E`.

use kurbo::{Point, Rect, Size, Vec2};

use crate::error::LayoutError;
use crate::guide::{Guide, StackGuide, measure_stack};
use crate::tree::{ElementKind, ElementTree, IntrinsicContent};
use crate::types::ElementId;

/// Read access to participant geometry.
///
/// Layout passes read frames through this trait so that snapshot computation can
/// overlay uncommitted results on top of the live tree. Implemented by
/// [`ElementTree`].
///
/// The `element_*` accessors panic on stale handles: evaluating layout against a
/// removed element is a programming error.
pub trait LayoutContext {
    /// Whether `id` is live.
    fn is_element_alive(&self, id: ElementId) -> bool;

    /// Frame of `id` in its super element's space.
    fn element_frame(&self, id: ElementId) -> Rect;

    /// Origin of the own space of `id` (its content offset).
    fn element_bounds_origin(&self, id: ElementId) -> Point;

    /// Super element of `id`, if attached.
    fn super_element(&self, id: ElementId) -> Option<ElementId>;

    /// Kind of `id`.
    fn element_kind(&self, id: ElementId) -> &ElementKind;

    /// Intrinsic content attached to `id`, if any.
    fn element_content(&self, id: ElementId) -> Option<&dyn IntrinsicContent>;

    /// Bounds of `id` in its own space.
    fn element_bounds(&self, id: ElementId) -> Rect {
        Rect::from_origin_size(self.element_bounds_origin(id), self.element_frame(id).size())
    }

    /// Stack configuration of `id`, if it is a stack guide.
    fn stack_guide(&self, id: ElementId) -> Option<&StackGuide> {
        match self.element_kind(id) {
            ElementKind::Guide(Guide::Stack(stack)) => Some(stack),
            _ => None,
        }
    }

    /// Natural size of `id` when constrained to `fitting`.
    ///
    /// Stack guides report the extent of their arranged run plus insets, scroll guides
    /// their content size, and other elements defer to their [`IntrinsicContent`].
    fn intrinsic_size(&self, id: ElementId, fitting: Size) -> Option<Size> {
        match self.element_kind(id) {
            ElementKind::Guide(Guide::Stack(stack)) => Some(measure_stack(self, stack, fitting)),
            ElementKind::Guide(Guide::Scroll(scroll)) => Some(scroll.content_size),
            _ => self.element_content(id).map(|c| c.size_that_fits(fitting)),
        }
    }

    /// Converts a rectangle from the own space of `from` to the own space of `to`.
    fn try_convert_rect(
        &self,
        rect: Rect,
        from: ElementId,
        to: ElementId,
    ) -> Result<Rect, LayoutError> {
        Ok(rect + self.try_offset_between(from, to)?)
    }

    /// Converts a point from the own space of `from` to the own space of `to`.
    fn try_convert_point(
        &self,
        point: Point,
        from: ElementId,
        to: ElementId,
    ) -> Result<Point, LayoutError> {
        Ok(point + self.try_offset_between(from, to)?)
    }

    /// Panicking form of [`LayoutContext::try_convert_rect`].
    ///
    /// # Panics
    ///
    /// Panics if either element is stale or they share no common ancestor.
    fn convert_rect(&self, rect: Rect, from: ElementId, to: ElementId) -> Rect {
        self.try_convert_rect(rect, from, to)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Panicking form of [`LayoutContext::try_convert_point`].
    ///
    /// # Panics
    ///
    /// Panics if either element is stale or they share no common ancestor.
    fn convert_point(&self, point: Point, from: ElementId, to: ElementId) -> Point {
        self.try_convert_point(point, from, to)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Translation taking the own space of `from` to the own space of `to`.
    fn try_offset_between(&self, from: ElementId, to: ElementId) -> Result<Vec2, LayoutError> {
        if !self.is_element_alive(from) {
            return Err(LayoutError::StaleElement(from));
        }
        if !self.is_element_alive(to) {
            return Err(LayoutError::StaleElement(to));
        }
        if from == to {
            return Ok(Vec2::ZERO);
        }
        let (root_a, up) = offset_to_root(self, from);
        let (root_b, down) = offset_to_root(self, to);
        if root_a != root_b {
            return Err(LayoutError::NoCommonAncestor { from, to });
        }
        Ok(up - down)
    }
}

/// Walks from `id` to its root, accumulating the translation into the root's own space.
fn offset_to_root<C: LayoutContext + ?Sized>(ctx: &C, id: ElementId) -> (ElementId, Vec2) {
    let mut offset = Vec2::ZERO;
    let mut current = id;
    while let Some(parent) = ctx.super_element(current) {
        offset += ctx.element_frame(current).origin() - ctx.element_bounds_origin(current);
        current = parent;
    }
    (current, offset)
}

/// Frame of `reference`, expressed in the super-element space of `participant`.
///
/// # Panics
///
/// Panics if the two elements live in unrelated trees.
pub(crate) fn reference_frame<C: LayoutContext + ?Sized>(
    ctx: &C,
    reference: ElementId,
    participant: ElementId,
) -> Rect {
    let frame = ctx.element_frame(reference);
    let into = ctx.super_element(participant);
    match (ctx.super_element(reference), into) {
        (from, to) if from == to => frame,
        (Some(from), Some(to)) => ctx.convert_rect(frame, from, to),
        // The reference is a root: its frame has no enclosing space, so use its bounds.
        (None, Some(to)) => ctx.convert_rect(ctx.element_bounds(reference), reference, to),
        // The participant is a root: lift into the space its frame is expressed in.
        (Some(from), None) => {
            let r = ctx.convert_rect(frame, from, participant);
            r + (ctx.element_frame(participant).origin() - ctx.element_bounds_origin(participant))
        }
        (None, None) => frame,
    }
}

/// Default layout source for `participant`: its super element's layout space, or its
/// own frame for roots.
pub(crate) fn default_source<C: LayoutContext + ?Sized>(ctx: &C, participant: ElementId) -> Rect {
    match ctx.super_element(participant) {
        Some(parent) => layout_space(ctx, parent),
        None => ctx.element_frame(participant),
    }
}

/// The rect children of `id` are laid out against, in the own space of `id`.
///
/// This is the bounds of `id`, except for scroll guides: their children lay out in
/// content space, anchored at the origin and at least as large as the viewport, so
/// the scroll offset only affects conversion.
fn layout_space<C: LayoutContext + ?Sized>(ctx: &C, id: ElementId) -> Rect {
    match ctx.element_kind(id) {
        ElementKind::Guide(Guide::Scroll(scroll)) => {
            let viewport = ctx.element_frame(id).size();
            let size = Size::new(
                scroll.content_size.width.max(viewport.width),
                scroll.content_size.height.max(viewport.height),
            );
            Rect::from_origin_size(Point::ORIGIN, size)
        }
        _ => ctx.element_bounds(id),
    }
}

impl LayoutContext for ElementTree {
    fn is_element_alive(&self, id: ElementId) -> bool {
        self.is_alive(id)
    }

    fn element_frame(&self, id: ElementId) -> Rect {
        self.element(id).frame
    }

    fn element_bounds_origin(&self, id: ElementId) -> Point {
        self.element(id).bounds_origin
    }

    fn super_element(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).parent
    }

    fn element_kind(&self, id: ElementId) -> &ElementKind {
        &self.element(id).kind
    }

    fn element_content(&self, id: ElementId) -> Option<&dyn IntrinsicContent> {
        self.element(id).content.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::ScrollGuide;

    /// Root at the origin, a container at (100, 100), and a guide at (20, 10) inside it.
    fn nested() -> (ElementTree, ElementId, ElementId, ElementId) {
        let mut tree = ElementTree::new();
        let root = tree.insert_view(None, Rect::new(0.0, 0.0, 500.0, 500.0));
        let container = tree.insert_view(Some(root), Rect::new(100.0, 100.0, 300.0, 300.0));
        let guide = tree.insert_guide(container, Guide::Plain, Rect::new(20.0, 10.0, 70.0, 60.0));
        (tree, root, container, guide)
    }

    #[test]
    fn guide_point_into_owner_space() {
        let (tree, root, container, guide) = nested();
        let p = Point::new(10.0, -5.0);
        assert_eq!(tree.convert_point(p, guide, container), Point::new(30.0, 5.0));
        assert_eq!(tree.convert_point(p, guide, root), Point::new(130.0, 105.0));
        assert_eq!(
            tree.convert_point(Point::new(130.0, 105.0), root, guide),
            p,
            "conversion must invert"
        );
    }

    #[test]
    fn identity_for_same_element() {
        let (tree, _, container, _) = nested();
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(tree.convert_rect(r, container, container), r);
    }

    #[test]
    fn siblings_across_branches() {
        let (mut tree, root, container, guide) = nested();
        let other = tree.insert_view(Some(root), Rect::new(0.0, 400.0, 50.0, 450.0));
        let r = tree.convert_rect(Rect::new(0.0, 0.0, 10.0, 10.0), guide, other);
        assert_eq!(r, Rect::new(120.0, -290.0, 130.0, -280.0));
        let back = tree.convert_rect(r, other, container);
        assert_eq!(back, Rect::new(20.0, 10.0, 30.0, 20.0));
    }

    #[test]
    fn scroll_offset_shifts_content() {
        let (mut tree, root, container, guide) = nested();
        let scroll = tree.insert_guide(
            container,
            Guide::Scroll(ScrollGuide::new(Size::new(200.0, 1000.0))),
            Rect::new(0.0, 0.0, 200.0, 200.0),
        );
        let row = tree.insert_view(Some(scroll), Rect::new(0.0, 300.0, 200.0, 340.0));
        tree.scroll_to(scroll, Point::new(0.0, 250.0));
        let in_root = tree.convert_rect(tree.bounds(row).unwrap(), row, root);
        assert_eq!(in_root, Rect::new(100.0, 150.0, 300.0, 190.0));
        let in_guide = tree.convert_point(Point::ORIGIN, row, guide);
        assert_eq!(in_guide, Point::new(-20.0, 40.0));
    }

    #[test]
    fn scroll_guide_children_lay_out_in_content_space() {
        let (mut tree, _, container, guide) = nested();
        let scroll = tree.insert_guide(
            container,
            Guide::Scroll(ScrollGuide::new(Size::new(150.0, 1000.0))),
            Rect::new(0.0, 0.0, 200.0, 200.0),
        );
        let row = tree.insert_view(Some(scroll), Rect::ZERO);
        tree.scroll_to(scroll, Point::new(0.0, 250.0));
        assert_eq!(default_source(&tree, row), Rect::new(0.0, 0.0, 200.0, 1000.0));

        tree.set_content_size(scroll, Size::new(50.0, 50.0));
        assert_eq!(default_source(&tree, row), Rect::new(0.0, 0.0, 200.0, 200.0));

        // Other parents contribute their bounds, scroll offset included.
        tree.set_bounds_origin(container, Point::new(5.0, 7.0));
        assert_eq!(default_source(&tree, guide), Rect::new(5.0, 7.0, 205.0, 207.0));
    }

    #[test]
    fn unrelated_roots_have_no_conversion() {
        let (mut tree, root, _, guide) = nested();
        let island = tree.insert_view(None, Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(
            tree.try_convert_point(Point::ORIGIN, guide, island),
            Err(LayoutError::NoCommonAncestor {
                from: guide,
                to: island
            })
        );
        tree.remove(island);
        assert_eq!(
            tree.try_convert_point(Point::ORIGIN, root, island),
            Err(LayoutError::StaleElement(island))
        );
    }

    #[test]
    #[should_panic(expected = "share no common ancestor")]
    fn convert_panics_without_common_ancestor() {
        let (mut tree, _, _, guide) = nested();
        let island = tree.insert_view(None, Rect::ZERO);
        let _ = tree.convert_rect(Rect::ZERO, guide, island);
    }

    #[test]
    fn reference_frames_between_spaces() {
        let (mut tree, root, container, guide) = nested();
        let sibling = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 50.0, 50.0));
        // Same space: untouched.
        assert_eq!(reference_frame(&tree, container, sibling), Rect::new(100.0, 100.0, 300.0, 300.0));
        // Guide inside the container, read from the root's children's space.
        assert_eq!(reference_frame(&tree, guide, sibling), Rect::new(120.0, 110.0, 170.0, 160.0));
        // The root as reference for its own child: its bounds.
        assert_eq!(reference_frame(&tree, root, sibling), Rect::new(0.0, 0.0, 500.0, 500.0));
        // A root participant reading a nested element: lifted into the root's frame space.
        assert_eq!(reference_frame(&tree, guide, root), Rect::new(120.0, 110.0, 170.0, 160.0));
    }
}
