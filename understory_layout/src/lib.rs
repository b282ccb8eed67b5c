// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_layout --heading-base-level=0

//! Understory Layout: anchor-based rectangle layout over a tree of participants.
//!
//! This crate computes frames for views, layers, and abstract guides from a fixed,
//! composable set of geometric rules. It is not a general constraint solver: rules run
//! in the order the caller gives them, and every result is reproducible from the inputs.
//!
//! - A [`Layout`] places a rectangle inside a source rectangle with one [`Filling`]
//!   (extent) and one [`Alignment`] (position) per axis.
//! - An [`Anchor`] relates a target rectangle to a reference: align, limit, or pull an
//!   edge, center, copy a size, or apply insets.
//! - A [`Constraint`] binds anchors to a reference element or rectangle, or sizes the
//!   participant from its [`IntrinsicContent`].
//! - A [`LayoutBlock`] binds one participant to a layout and an ordered constraint list.
//! - A [`LayoutScheme`] is an ordered pass of blocks, nested schemes, and stack guide
//!   arrangements. It can run directly against an [`ElementTree`], or compute a
//!   [`Snapshot`] without mutation and apply it later.
//!
//! ## Coordinate spaces
//!
//! Each element has a `frame` in its super element's space and `bounds` in its own
//! space. Constraint references in other containers are converted into the
//! participant's super-element space before anchors run; see [`LayoutContext`]. A
//! scroll guide's content offset is its bounds origin, so it translates everything
//! inside it.
//!
//! ## Guides
//!
//! [`Guide`]s take part in layout like views but render nothing. A [`StackGuide`]
//! distributes its arranged items along an axis (see [`distribute`]) and reports the
//! extent of the run as its intrinsic size. A [`ScrollGuide`] carries a content size.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_layout::{
//!     Constraint, Edge, ElementTree, Filling, Layout, LayoutBlock, LayoutScheme, Side,
//! };
//!
//! let mut tree = ElementTree::new();
//! let window = tree.insert_view(None, Rect::new(0.0, 0.0, 400.0, 300.0));
//! let toolbar = tree.insert_view(Some(window), Rect::ZERO);
//! let sidebar = tree.insert_view(Some(window), Rect::ZERO);
//! let canvas = tree.insert_view(Some(window), Rect::ZERO);
//!
//! let scheme = LayoutScheme::new()
//!     .with(LayoutBlock::new(toolbar).with_layout(Layout::fill().with_height(Filling::fixed(40.0))))
//!     .with(
//!         LayoutBlock::new(sidebar)
//!             .with_layout(Layout::fill().with_width(Filling::fixed(100.0)))
//!             .with_constraint(Constraint::to(toolbar, [Edge::Bottom.limit(Side::Outer)])),
//!     )
//!     .with(
//!         LayoutBlock::new(canvas)
//!             .with_layout(Layout::fill())
//!             .with_constraints([
//!                 Constraint::to(toolbar, [Edge::Bottom.limit(Side::Outer)]),
//!                 Constraint::to(sidebar, [Edge::Right.limit(Side::Outer)]),
//!             ]),
//!     );
//!
//! scheme.layout(&mut tree, None);
//! assert_eq!(tree.frame(sidebar), Some(Rect::new(0.0, 40.0, 100.0, 300.0)));
//! assert_eq!(tree.frame(canvas), Some(Rect::new(100.0, 40.0, 400.0, 300.0)));
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: enables `std` support in `kurbo`, `tracing`, and `thiserror`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! Logging goes through `tracing`: structural tree changes and block results at
//! `trace`, pass boundaries at `debug`, and ignored requests at `warn`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod alignment;
mod anchor;
mod block;
mod constraint;
mod distribution;
mod error;
mod filling;
mod geometry;
mod guide;
mod layout;
mod scheme;
mod space;
mod tree;
mod types;

pub use alignment::{AlignAnchor, AlignOffset, Alignment};
pub use anchor::Anchor;
pub use block::{BlockOrder, LayoutBlock};
pub use constraint::{Anchors, Constraint};
pub use distribution::{Distribution, ItemSizing, Spacing, distribute};
pub use error::LayoutError;
pub use filling::{Filling, FillingRule};
pub use guide::{CrossFilling, Guide, ScrollGuide, StackGuide, StackSizing};
pub use layout::Layout;
pub use scheme::{LayoutScheme, SchemeEntry, Snapshot, SnapshotEntry, SnapshotIter};
pub use space::LayoutContext;
pub use tree::{ElementKind, ElementTree, FixedContent, IntrinsicContent, StackGuideConfig};
pub use types::{Axes, Axis, Edge, ElementId, Side};
