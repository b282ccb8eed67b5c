// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraints: anchors bound to a reference, as stored on a [`LayoutBlock`](crate::LayoutBlock).

use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::anchor::Anchor;
use crate::error::LayoutError;
use crate::geometry::{extent, set_extent, size_along};
use crate::space::{LayoutContext, reference_frame};
use crate::types::{Axes, Axis, ElementId};

/// Anchors applied in order against one reference.
pub type Anchors = SmallVec<[Anchor; 4]>;

/// One step of a block's refinement.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    /// Anchors against another element's current frame.
    ///
    /// The reference frame is converted into the participant's super-element space
    /// before the anchors run. Within a pass, the frame read is whatever earlier
    /// entries committed.
    Element {
        /// The reference element.
        reference: ElementId,
        /// Anchors applied in order.
        anchors: Anchors,
    },
    /// Anchors against a fixed rectangle, already in the participant's super-element space.
    Rect {
        /// The reference rectangle.
        reference: Rect,
        /// Anchors applied in order.
        anchors: Anchors,
    },
    /// Size the target from the participant's intrinsic content on the given axes.
    ///
    /// Adjusted axes are measured unconstrained; the others fit the current extent.
    /// Minimum edges are held.
    Adjust {
        /// Axes to size.
        axes: Axes,
    },
}

impl Constraint {
    /// Anchors against `reference`.
    pub fn to(reference: ElementId, anchors: impl IntoIterator<Item = Anchor>) -> Self {
        Self::Element {
            reference,
            anchors: anchors.into_iter().collect(),
        }
    }

    /// Anchors against a fixed rectangle.
    pub fn to_rect(reference: Rect, anchors: impl IntoIterator<Item = Anchor>) -> Self {
        Self::Rect {
            reference,
            anchors: anchors.into_iter().collect(),
        }
    }

    /// Size from intrinsic content on `axes`.
    #[must_use]
    pub fn adjust(axes: Axes) -> Self {
        Self::Adjust { axes }
    }

    /// Size from intrinsic content on both axes.
    #[must_use]
    pub fn adjust_to_fit() -> Self {
        Self::Adjust { axes: Axes::all() }
    }

    /// The reference element, if any.
    pub fn reference(&self) -> Option<ElementId> {
        match self {
            Self::Element { reference, .. } => Some(*reference),
            _ => None,
        }
    }

    /// Refines `rect` for `participant`.
    ///
    /// # Panics
    ///
    /// Panics if the reference element is stale or unrelated to `participant`.
    pub fn apply<C: LayoutContext + ?Sized>(
        &self,
        rect: &mut Rect,
        ctx: &C,
        participant: ElementId,
    ) {
        match self {
            Self::Element { reference, anchors } => {
                if !ctx.is_element_alive(*reference) {
                    panic!("{}", LayoutError::StaleElement(*reference));
                }
                let frame = reference_frame(ctx, *reference, participant);
                for anchor in anchors {
                    anchor.apply(rect, frame);
                }
            }
            Self::Rect { reference, anchors } => {
                for anchor in anchors {
                    anchor.apply(rect, *reference);
                }
            }
            Self::Adjust { axes } => adjust(rect, ctx, participant, *axes),
        }
    }
}

fn adjust<C: LayoutContext + ?Sized>(rect: &mut Rect, ctx: &C, participant: ElementId, axes: Axes) {
    let fitting_along = |axis| {
        if axes.has(axis) {
            f64::INFINITY
        } else {
            extent(*rect, axis).max(0.0)
        }
    };
    let fitting = Size::new(
        fitting_along(Axis::Horizontal),
        fitting_along(Axis::Vertical),
    );
    let Some(size) = ctx.intrinsic_size(participant, fitting) else {
        tracing::warn!(?participant, "adjust constraint on an element without intrinsic content");
        return;
    };
    for axis in [Axis::Horizontal, Axis::Vertical] {
        if axes.has(axis) {
            set_extent(rect, axis, size_along(size, axis).max(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ElementTree, FixedContent};
    use crate::types::{Edge, Side};

    #[test]
    fn anchors_run_in_order() {
        let mut tree = ElementTree::new();
        let root = tree.insert_view(None, Rect::new(0.0, 0.0, 300.0, 300.0));
        let header = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 300.0, 40.0));
        let body = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 10.0, 10.0));

        let c = Constraint::to(header, [Anchor::width(), Edge::Bottom.align(Side::Outer)]);
        let mut r = tree.frame(body).unwrap();
        c.apply(&mut r, &tree, body);
        assert_eq!(r, Rect::new(0.0, 40.0, 300.0, 50.0));

        // Reversed order: centering sees the new width only if it runs after sizing.
        let c = Constraint::to(header, [Anchor::center_x(), Anchor::width()]);
        let mut r = Rect::new(0.0, 0.0, 10.0, 10.0);
        c.apply(&mut r, &tree, body);
        assert_eq!(r, Rect::new(145.0, 0.0, 445.0, 10.0));
    }

    #[test]
    fn reference_in_another_container() {
        let mut tree = ElementTree::new();
        let root = tree.insert_view(None, Rect::new(0.0, 0.0, 500.0, 500.0));
        let panel = tree.insert_view(Some(root), Rect::new(100.0, 100.0, 300.0, 300.0));
        let button = tree.insert_view(Some(panel), Rect::new(10.0, 20.0, 60.0, 40.0));
        let badge = tree.insert_view(Some(root), Rect::new(0.0, 0.0, 8.0, 8.0));

        let c = Constraint::to(button, [Edge::Right.align(Side::Outer), Edge::Top.align(Side::Inner)]);
        let mut r = tree.frame(badge).unwrap();
        c.apply(&mut r, &tree, badge);
        assert_eq!(r, Rect::new(160.0, 120.0, 168.0, 128.0));
    }

    #[test]
    fn rect_reference() {
        let mut tree = ElementTree::new();
        let root = tree.insert_view(None, Rect::ZERO);
        let c = Constraint::to_rect(Rect::new(0.0, 0.0, 50.0, 50.0), [Edge::Right.pull(Side::Inner)]);
        let mut r = Rect::new(10.0, 0.0, 20.0, 10.0);
        c.apply(&mut r, &tree, root);
        assert_eq!(r, Rect::new(10.0, 0.0, 50.0, 10.0));
        assert_eq!(c.reference(), None);
    }

    #[test]
    fn adjust_uses_intrinsic_size() {
        let mut tree = ElementTree::new();
        let label = tree.insert_view(None, Rect::new(5.0, 5.0, 15.0, 15.0));
        tree.set_content(label, |fitting: Size| {
            // One 160-wide line, wrapped onto two when narrower.
            let width = fitting.width.min(160.0);
            let lines = if width < 160.0 { 2.0 } else { 1.0 };
            Size::new(width, lines * 12.0)
        });

        let mut r = Rect::new(5.0, 5.0, 85.0, 15.0);
        Constraint::adjust(Axes::VERTICAL).apply(&mut r, &tree, label);
        assert_eq!(r, Rect::new(5.0, 5.0, 85.0, 29.0));

        let mut r = Rect::new(5.0, 5.0, 85.0, 15.0);
        Constraint::adjust_to_fit().apply(&mut r, &tree, label);
        assert_eq!(r, Rect::new(5.0, 5.0, 165.0, 17.0));
    }

    #[test]
    fn adjust_without_content_is_noop() {
        let mut tree = ElementTree::new();
        let plain = tree.insert_view(None, Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut r = Rect::new(0.0, 0.0, 10.0, 10.0);
        Constraint::adjust_to_fit().apply(&mut r, &tree, plain);
        assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 10.0));

        tree.set_content(plain, FixedContent(Size::new(3.0, 4.0)));
        Constraint::adjust(Axes::HORIZONTAL).apply(&mut r, &tree, plain);
        assert_eq!(r, Rect::new(0.0, 0.0, 3.0, 10.0));
    }

    #[test]
    #[should_panic(expected = "is not alive")]
    fn stale_reference_panics() {
        let mut tree = ElementTree::new();
        let root = tree.insert_view(None, Rect::ZERO);
        let gone = tree.insert_view(Some(root), Rect::ZERO);
        let child = tree.insert_view(Some(root), Rect::ZERO);
        tree.remove(gone);
        let mut r = Rect::ZERO;
        Constraint::to(gone, [Anchor::size()]).apply(&mut r, &tree, child);
    }
}
