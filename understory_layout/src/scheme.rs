// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout schemes: ordered layout passes, and snapshots of their results.
//!
//! A [`LayoutScheme`] runs its entries top to bottom exactly once per pass. Each entry
//! sees the frames committed by earlier entries. The three entry points share a single
//! traversal and differ only in how a computed frame is committed:
//!
//! - [`LayoutScheme::layout`] writes each frame to the tree as soon as it is computed.
//! - [`LayoutScheme::snapshot`] records frames in a scratch overlay that later entries
//!   read through, and collects them into a [`Snapshot`]. The tree is only borrowed
//!   immutably.
//! - [`LayoutScheme::apply`] writes a snapshot's frames to the tree in pass order.
//!
//! For an unchanged tree, `apply(snapshot(r))` and `layout(r)` leave identical frames.

use alloc::vec::Vec;
use core::slice;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::block::LayoutBlock;
use crate::error::LayoutError;
use crate::guide::arrange_stack;
use crate::space::LayoutContext;
use crate::tree::{ElementKind, ElementTree, IntrinsicContent};
use crate::types::ElementId;

/// One step of a [`LayoutScheme`].
#[derive(Clone, Debug, PartialEq)]
pub enum SchemeEntry {
    /// Compute and commit one participant's frame.
    Block(LayoutBlock),
    /// Run a nested scheme in place.
    Scheme(LayoutScheme),
    /// Arrange the items of a stack guide.
    ///
    /// The guide's own frame should already be placed by an earlier entry.
    Stack(ElementId),
}

impl From<LayoutBlock> for SchemeEntry {
    fn from(block: LayoutBlock) -> Self {
        Self::Block(block)
    }
}

impl From<LayoutScheme> for SchemeEntry {
    fn from(scheme: LayoutScheme) -> Self {
        Self::Scheme(scheme)
    }
}

/// An ordered layout pass.
///
/// Entry order is the dependency order: an entry may reference frames placed by
/// earlier entries, never later ones.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layout::{
///     Constraint, Edge, ElementTree, Filling, Layout, LayoutBlock, LayoutScheme, Side,
/// };
///
/// let mut tree = ElementTree::new();
/// let root = tree.insert_view(None, Rect::new(0.0, 0.0, 320.0, 480.0));
/// let header = tree.insert_view(Some(root), Rect::ZERO);
/// let body = tree.insert_view(Some(root), Rect::ZERO);
///
/// let mut scheme = LayoutScheme::new();
/// scheme.push_block(
///     LayoutBlock::new(header).with_layout(Layout::fill().with_height(Filling::fixed(64.0))),
/// );
/// scheme.push_block(
///     LayoutBlock::new(body)
///         .with_layout(Layout::fill())
///         .with_constraint(Constraint::to(header, [Edge::Bottom.limit(Side::Outer)])),
/// );
///
/// let snapshot = scheme.snapshot(&tree, None);
/// assert_eq!(tree.frame(body), Some(Rect::ZERO));
/// assert_eq!(snapshot.frame_of(body), Some(Rect::new(0.0, 64.0, 320.0, 480.0)));
///
/// scheme.apply(&mut tree, &snapshot);
/// assert_eq!(tree.frame(body), Some(Rect::new(0.0, 64.0, 320.0, 480.0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutScheme {
    entries: Vec<SchemeEntry>,
}

impl LayoutScheme {
    /// An empty scheme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: impl Into<SchemeEntry>) {
        self.entries.push(entry.into());
    }

    /// Append a block.
    pub fn push_block(&mut self, block: LayoutBlock) {
        self.entries.push(SchemeEntry::Block(block));
    }

    /// Append a nested scheme.
    pub fn push_scheme(&mut self, scheme: Self) {
        self.entries.push(SchemeEntry::Scheme(scheme));
    }

    /// Append a stack arrangement step for guide `stack`.
    pub fn push_stack(&mut self, stack: ElementId) {
        self.entries.push(SchemeEntry::Stack(stack));
    }

    /// Builder form of [`LayoutScheme::push`].
    #[must_use]
    pub fn with(mut self, entry: impl Into<SchemeEntry>) -> Self {
        self.push(entry);
        self
    }

    /// The entries, in pass order.
    pub fn entries(&self) -> &[SchemeEntry] {
        &self.entries
    }

    /// Number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the scheme has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs the pass, writing each frame to the tree before the next entry runs.
    ///
    /// `source` overrides the layout source rect of every block; see
    /// [`LayoutBlock`] for the default.
    ///
    /// # Panics
    ///
    /// Panics if an entry names a stale element or a reference unrelated to its
    /// participant.
    pub fn layout(&self, tree: &mut ElementTree, source: Option<Rect>) {
        tracing::debug!(entries = self.entries.len(), ?source, "layout pass");
        let mut pass = DirectPass { tree };
        run(self, &mut pass, source);
    }

    /// Runs the pass without touching the tree and returns the computed frames.
    ///
    /// # Panics
    ///
    /// See [`LayoutScheme::layout`].
    pub fn snapshot(&self, tree: &ElementTree, source: Option<Rect>) -> Snapshot {
        tracing::debug!(entries = self.entries.len(), ?source, "snapshot pass");
        let mut pass = BufferedPass {
            tree,
            overlay: HashMap::new(),
            groups: Vec::new(),
            current: Vec::new(),
        };
        run(self, &mut pass, source);
        Snapshot {
            entries: pass.current,
        }
    }

    /// Writes the frames of `snapshot` to the tree, in pass order.
    ///
    /// The frames are already resolved, so the entries of this scheme are not read and
    /// the snapshot need not come from it. This is the same as [`Snapshot::apply`]; it
    /// exists so a scheme's `snapshot` and `apply` read as a pair.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot names an element that is no longer alive.
    pub fn apply(&self, tree: &mut ElementTree, snapshot: &Snapshot) {
        tracing::debug!(frames = snapshot.len(), "applying snapshot");
        snapshot.apply(tree);
    }
}

/// Where a pass commits computed frames.
trait Pass: LayoutContext {
    fn commit(&mut self, element: ElementId, frame: Rect);

    fn open_group(&mut self) {}

    fn close_group(&mut self) {}
}

fn run<P: Pass>(scheme: &LayoutScheme, pass: &mut P, source: Option<Rect>) {
    for entry in &scheme.entries {
        match entry {
            SchemeEntry::Block(block) => {
                let frame = block.compute(&*pass, source);
                pass.commit(block.element, frame);
            }
            SchemeEntry::Scheme(nested) => {
                pass.open_group();
                run(nested, pass, source);
                pass.close_group();
            }
            SchemeEntry::Stack(guide) => {
                let guide = *guide;
                if !pass.is_element_alive(guide) {
                    panic!("{}", LayoutError::StaleElement(guide));
                }
                if pass.stack_guide(guide).is_none() {
                    tracing::warn!(?guide, "stack entry names an element that is not a stack guide");
                }
                let frames = arrange_stack(&*pass, guide);
                pass.open_group();
                for (item, frame) in frames {
                    pass.commit(item, frame);
                }
                pass.close_group();
            }
        }
    }
}

struct DirectPass<'a> {
    tree: &'a mut ElementTree,
}

impl LayoutContext for DirectPass<'_> {
    fn is_element_alive(&self, id: ElementId) -> bool {
        self.tree.is_element_alive(id)
    }

    fn element_frame(&self, id: ElementId) -> Rect {
        self.tree.element_frame(id)
    }

    fn element_bounds_origin(&self, id: ElementId) -> Point {
        self.tree.element_bounds_origin(id)
    }

    fn super_element(&self, id: ElementId) -> Option<ElementId> {
        self.tree.super_element(id)
    }

    fn element_kind(&self, id: ElementId) -> &ElementKind {
        self.tree.element_kind(id)
    }

    fn element_content(&self, id: ElementId) -> Option<&dyn IntrinsicContent> {
        self.tree.element_content(id)
    }
}

impl Pass for DirectPass<'_> {
    fn commit(&mut self, element: ElementId, frame: Rect) {
        self.tree.set_frame(element, frame);
    }
}

/// Reads through uncommitted frames and records them as snapshot entries.
struct BufferedPass<'a> {
    tree: &'a ElementTree,
    overlay: HashMap<ElementId, Rect>,
    groups: Vec<Vec<SnapshotEntry>>,
    current: Vec<SnapshotEntry>,
}

impl LayoutContext for BufferedPass<'_> {
    fn is_element_alive(&self, id: ElementId) -> bool {
        self.tree.is_element_alive(id)
    }

    fn element_frame(&self, id: ElementId) -> Rect {
        match self.overlay.get(&id) {
            Some(frame) => *frame,
            None => self.tree.element_frame(id),
        }
    }

    fn element_bounds_origin(&self, id: ElementId) -> Point {
        self.tree.element_bounds_origin(id)
    }

    fn super_element(&self, id: ElementId) -> Option<ElementId> {
        self.tree.super_element(id)
    }

    fn element_kind(&self, id: ElementId) -> &ElementKind {
        self.tree.element_kind(id)
    }

    fn element_content(&self, id: ElementId) -> Option<&dyn IntrinsicContent> {
        self.tree.element_content(id)
    }
}

impl Pass for BufferedPass<'_> {
    fn commit(&mut self, element: ElementId, frame: Rect) {
        self.overlay.insert(element, frame);
        self.current.push(SnapshotEntry::Frame { element, frame });
    }

    fn open_group(&mut self) {
        let outer = core::mem::take(&mut self.current);
        self.groups.push(outer);
    }

    fn close_group(&mut self) {
        let inner = core::mem::take(&mut self.current);
        self.current = self.groups.pop().unwrap_or_default();
        self.current.push(SnapshotEntry::Group(Snapshot { entries: inner }));
    }
}

/// One recorded step of a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum SnapshotEntry {
    /// A computed frame, in the element's super-element space.
    Frame {
        /// The participant.
        element: ElementId,
        /// Its computed frame.
        frame: Rect,
    },
    /// The frames of a nested scheme or stack arrangement.
    Group(Snapshot),
}

/// Precomputed frames of a [`LayoutScheme`] pass, mirroring its structure.
///
/// A snapshot holds no borrow of the tree, so it can be computed on one thread and
/// applied on another.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Top-level entries, in pass order.
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Iterates all recorded frames in pass order, flattening groups.
    pub fn iter(&self) -> SnapshotIter<'_> {
        SnapshotIter {
            stack: alloc::vec![self.entries.iter()],
        }
    }

    /// The last frame recorded for `element`, if any.
    pub fn frame_of(&self, element: ElementId) -> Option<Rect> {
        self.iter()
            .filter(|(id, _)| *id == element)
            .last()
            .map(|(_, frame)| frame)
    }

    /// Number of recorded frames, including those in groups.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if no frames were recorded.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Union of all recorded frames.
    ///
    /// Frames are unioned as recorded, each in its own super-element space, so this is
    /// only meaningful when the participants share a space.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut it = self.iter().map(|(_, frame)| frame);
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Writes every recorded frame to the tree, in pass order.
    ///
    /// # Panics
    ///
    /// Panics if a recorded element is no longer alive.
    pub fn apply(&self, tree: &mut ElementTree) {
        for (element, frame) in self.iter() {
            if !tree.is_alive(element) {
                panic!("{}", LayoutError::StaleElement(element));
            }
            tree.set_frame(element, frame);
        }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (ElementId, Rect);
    type IntoIter = SnapshotIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flattened iterator over a [`Snapshot`]'s frames.
#[derive(Clone, Debug)]
pub struct SnapshotIter<'a> {
    stack: Vec<slice::Iter<'a, SnapshotEntry>>,
}

impl Iterator for SnapshotIter<'_> {
    type Item = (ElementId, Rect);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(SnapshotEntry::Frame { element, frame }) => return Some((*element, *frame)),
                Some(SnapshotEntry::Group(group)) => self.stack.push(group.entries.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
