// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element arena: participants, their frames, and super-element links.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::guide::{Guide, ScrollGuide, StackGuide};
use crate::types::ElementId;

/// Natural content size of an element, supplied by the host.
///
/// This is the "adjustable" capability: text labels, images, and other content whose
/// size the engine cannot know implement it. The engine treats it as an opaque
/// measurement callback.
pub trait IntrinsicContent: Send + Sync {
    /// Returns the natural size of the content when constrained to `fitting`.
    ///
    /// Components of `fitting` may be infinite to request an unconstrained measurement.
    fn size_that_fits(&self, fitting: Size) -> Size;
}

/// Content with a constant natural size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FixedContent(pub Size);

impl IntrinsicContent for FixedContent {
    fn size_that_fits(&self, _fitting: Size) -> Size {
        self.0
    }
}

impl<F> IntrinsicContent for F
where
    F: Fn(Size) -> Size + Send + Sync,
{
    fn size_that_fits(&self, fitting: Size) -> Size {
        self(fitting)
    }
}

/// The kind of participant an element represents.
///
/// All kinds share the same frame, bounds, and super-element model; only guides carry
/// extra layout state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ElementKind {
    /// A rendering view owned by the host toolkit.
    #[default]
    View,
    /// A rendering layer owned by the host toolkit.
    Layer,
    /// A non-rendering layout guide.
    Guide(Guide),
}

pub(crate) struct Element {
    generation: u32,
    pub(crate) kind: ElementKind,
    pub(crate) parent: Option<ElementId>,
    children: Vec<ElementId>,
    pub(crate) frame: Rect,
    pub(crate) bounds_origin: Point,
    pub(crate) content: Option<Box<dyn IntrinsicContent>>,
}

impl Element {
    fn new(generation: u32, kind: ElementKind, frame: Rect) -> Self {
        Self {
            generation,
            kind,
            parent: None,
            children: Vec::new(),
            frame,
            bounds_origin: Point::ORIGIN,
            content: None,
        }
    }
}

/// Arena of layout participants.
///
/// Elements are addressed by generational [`ElementId`] handles. Each element has a
/// `frame` in its super-element's space and a `bounds` in its own space, whose origin
/// may be non-zero to represent a scroll offset. The super-element link is a handle:
/// owners hold their children in an ordered list, children only name their owner.
///
/// Queries on stale handles return `None` and setters ignore them.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layout::{ElementTree, Guide};
///
/// let mut tree = ElementTree::new();
/// let root = tree.insert_view(None, Rect::new(0.0, 0.0, 320.0, 480.0));
/// let header = tree.insert_guide(root, Guide::Plain, Rect::new(0.0, 0.0, 320.0, 64.0));
/// assert_eq!(tree.parent_of(header), Some(root));
///
/// tree.detach(header);
/// assert_eq!(tree.parent_of(header), None);
/// ```
pub struct ElementTree {
    /// slots
    elements: Vec<Option<Element>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|n| n.is_some()).count();
        f.debug_struct("ElementTree")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new element under `parent` (or detached if `None`).
    pub fn insert(
        &mut self,
        parent: Option<ElementId>,
        kind: ElementKind,
        frame: Rect,
    ) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.elements[idx] = Some(Element::new(generation, kind, frame));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.elements.push(Some(Element::new(generation, kind, frame)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.elements.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        if let Some(p) = parent {
            self.attach(id, p);
        }
        id
    }

    /// Insert a view under `parent`.
    pub fn insert_view(&mut self, parent: Option<ElementId>, frame: Rect) -> ElementId {
        self.insert(parent, ElementKind::View, frame)
    }

    /// Insert a layer under `parent`.
    pub fn insert_layer(&mut self, parent: Option<ElementId>, frame: Rect) -> ElementId {
        self.insert(parent, ElementKind::Layer, frame)
    }

    /// Insert a guide owned by `owner`.
    pub fn insert_guide(&mut self, owner: ElementId, guide: Guide, frame: Rect) -> ElementId {
        self.insert(Some(owner), ElementKind::Guide(guide), frame)
    }

    /// Remove an element and its subtree.
    ///
    /// Handles to removed elements become stale immediately.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        self.detach(id);
        let children = self.element(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.elements[id.idx()] = None;
        self.free_list.push(id.idx());
        tracing::trace!(?id, "removed element");
    }

    /// Attach `id` to `owner`, detaching it from any previous owner first.
    ///
    /// # Panics
    ///
    /// Panics if `owner` is `id` or one of its descendants.
    pub fn attach(&mut self, id: ElementId, owner: ElementId) {
        if !self.is_alive(id) || !self.is_alive(owner) {
            return;
        }
        let mut cursor = Some(owner);
        while let Some(c) = cursor {
            assert!(c != id, "attaching {id:?} under {owner:?} would create a cycle");
            cursor = self.element(c).parent;
        }
        self.detach(id);
        self.element_mut(owner).children.push(id);
        self.element_mut(id).parent = Some(owner);
        tracing::trace!(?id, ?owner, "attached element");
    }

    /// Detach `id` from its owner. Its own subtree stays intact.
    ///
    /// If the owner is a stack guide, `id` is also removed from its arranged items.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.parent_of(id) else {
            return;
        };
        let p = self.element_mut(parent);
        p.children.retain(|c| *c != id);
        if let ElementKind::Guide(Guide::Stack(stack)) = &mut p.kind {
            stack.arranged.retain(|c| *c != id);
        }
        self.element_mut(id).parent = None;
        tracing::trace!(?id, ?parent, "detached element");
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.elements
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the super element of `id`, or `None` for detached or stale elements.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.element_opt(id).and_then(|e| e.parent)
    }

    /// Returns the elements attached to `id`, in attachment order.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        let Some(e) = self.element_opt(id) else {
            return &[];
        };
        &e.children
    }

    /// Returns the kind of a live element.
    pub fn kind(&self, id: ElementId) -> Option<&ElementKind> {
        self.element_opt(id).map(|e| &e.kind)
    }

    /// Returns the frame of a live element, in its super element's space.
    pub fn frame(&self, id: ElementId) -> Option<Rect> {
        self.element_opt(id).map(|e| e.frame)
    }

    /// Returns the bounds of a live element, in its own space.
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.element_opt(id)
            .map(|e| Rect::from_origin_size(e.bounds_origin, e.frame.size()))
    }

    /// Update the frame of an element.
    pub fn set_frame(&mut self, id: ElementId, frame: Rect) {
        if let Some(e) = self.element_opt_mut(id) {
            e.frame = frame;
        }
    }

    /// Update the bounds origin (content offset) of an element.
    pub fn set_bounds_origin(&mut self, id: ElementId, origin: Point) {
        if let Some(e) = self.element_opt_mut(id) {
            e.bounds_origin = origin;
        }
    }

    /// Attach intrinsic content to an element, replacing any previous content.
    pub fn set_content(&mut self, id: ElementId, content: impl IntrinsicContent + 'static) {
        if let Some(e) = self.element_opt_mut(id) {
            e.content = Some(Box::new(content));
        }
    }

    /// Remove the intrinsic content of an element.
    pub fn clear_content(&mut self, id: ElementId) {
        if let Some(e) = self.element_opt_mut(id) {
            e.content = None;
        }
    }

    /// Mutable access to the configuration of a stack guide.
    ///
    /// Use [`ElementTree::arrange`] to change its items.
    pub fn stack_guide_mut(&mut self, id: ElementId) -> Option<StackGuideConfig<'_>> {
        match self.element_opt_mut(id).map(|e| &mut e.kind) {
            Some(ElementKind::Guide(Guide::Stack(stack))) => Some(StackGuideConfig(stack)),
            _ => None,
        }
    }

    /// Append `item` to the arranged items of stack guide `stack`, attaching it there.
    ///
    /// Does nothing if `stack` is not a live stack guide.
    pub fn arrange(&mut self, stack: ElementId, item: ElementId) {
        if !self.is_alive(item) {
            return;
        }
        if !matches!(self.kind(stack), Some(ElementKind::Guide(Guide::Stack(_)))) {
            tracing::warn!(?stack, "arrange called on an element that is not a stack guide");
            return;
        }
        self.attach(item, stack);
        if let ElementKind::Guide(Guide::Stack(s)) = &mut self.element_mut(stack).kind {
            s.arranged.push(item);
        }
        tracing::trace!(?stack, ?item, "arranged item");
    }

    /// Remove `item` from stack guide `stack` and detach it.
    pub fn remove_arranged(&mut self, stack: ElementId, item: ElementId) {
        if self.parent_of(item) == Some(stack) {
            self.detach(item);
        }
    }

    /// Update the content size of a scroll guide, re-clamping its offset.
    pub fn set_content_size(&mut self, id: ElementId, size: Size) {
        let Some(e) = self.element_opt_mut(id) else {
            return;
        };
        if let ElementKind::Guide(Guide::Scroll(scroll)) = &mut e.kind {
            scroll.content_size = size;
            e.bounds_origin = clamp_offset(e.bounds_origin, *scroll, e.frame.size());
        }
    }

    /// Scroll a scroll guide to `offset`, clamped into its scrollable range.
    ///
    /// The range is `0..=max(0, content - frame)` on each axis.
    pub fn scroll_to(&mut self, id: ElementId, offset: Point) {
        let Some(e) = self.element_opt_mut(id) else {
            return;
        };
        if let ElementKind::Guide(Guide::Scroll(scroll)) = &e.kind {
            e.bounds_origin = clamp_offset(offset, *scroll, e.frame.size());
        } else {
            tracing::warn!(?id, "scroll_to called on an element that is not a scroll guide");
        }
    }

    /// Returns the content offset of a live element (its bounds origin).
    pub fn content_offset(&self, id: ElementId) -> Option<Point> {
        self.element_opt(id).map(|e| e.bounds_origin)
    }

    // --- internals ---

    /// Access an element; panics if `id` is stale.
    pub(crate) fn element(&self, id: ElementId) -> &Element {
        self.element_opt(id).expect("dangling ElementId")
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.element_opt_mut(id).expect("dangling ElementId")
    }

    fn element_opt(&self, id: ElementId) -> Option<&Element> {
        let e = self.elements.get(id.idx())?.as_ref()?;
        (e.generation == id.1).then_some(e)
    }

    fn element_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let e = self.elements.get_mut(id.idx())?.as_mut()?;
        if e.generation != id.1 {
            return None;
        }
        Some(e)
    }
}

/// Mutable view of a stack guide's configuration that keeps its items list intact.
#[derive(Debug)]
pub struct StackGuideConfig<'a>(&'a mut StackGuide);

impl core::ops::Deref for StackGuideConfig<'_> {
    type Target = StackGuide;

    fn deref(&self) -> &StackGuide {
        self.0
    }
}

impl StackGuideConfig<'_> {
    /// Replace the configuration, keeping the arranged items.
    pub fn set(&mut self, config: StackGuide) {
        let arranged = core::mem::take(&mut self.0.arranged);
        *self.0 = StackGuide { arranged, ..config };
    }
}

fn clamp_offset(offset: Point, scroll: ScrollGuide, viewport: Size) -> Point {
    let max_x = (scroll.content_size.width - viewport.width).max(0.0);
    let max_y = (scroll.content_size.height - viewport.height).max(0.0);
    Point::new(offset.x.max(0.0).min(max_x), offset.y.max(0.0).min(max_y))
}
