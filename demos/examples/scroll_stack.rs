// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A vertical stack of rows inside a scroll guide, with a floating badge pinned to a row.
//!
//! Scrolling changes the scroll guide's bounds origin, so the badge, which lives outside
//! the scroll guide, follows its row after the next pass.
//!
//! Run:
//! - `RUST_LOG=understory_layout=debug cargo run -p understory_demos --example scroll_stack`

use kurbo::{Insets, Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_layout::{
    Anchor, Axes, Axis, Constraint, CrossFilling, Edge, ElementTree, Guide, Layout,
    LayoutBlock, LayoutContext, LayoutScheme, SchemeEntry, ScrollGuide, Side, Spacing,
    StackGuide, StackSizing,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = ElementTree::new();
    let window = tree.insert_view(None, Rect::new(0.0, 0.0, 240.0, 320.0));
    let scroll = tree.insert_guide(
        window,
        Guide::Scroll(ScrollGuide::new(Size::ZERO)),
        Rect::ZERO,
    );
    let list = tree.insert_guide(
        scroll,
        Guide::Stack(
            StackGuide::new(Axis::Vertical)
                .with_spacing(Spacing::Equal(1.0))
                .with_sizing(StackSizing::Uniform(44.0))
                .with_cross(CrossFilling::Fill)
                .with_insets(Insets::uniform_xy(0.0, 8.0)),
        ),
        Rect::ZERO,
    );
    let rows: Vec<_> = (0..20)
        .map(|_| {
            let row = tree.insert_view(None, Rect::ZERO);
            tree.arrange(list, row);
            row
        })
        .collect();
    let badge = tree.insert_view(Some(window), Rect::new(0.0, 0.0, 24.0, 24.0));

    let scheme = LayoutScheme::new()
        .with(LayoutBlock::new(scroll).with_layout(Layout::fill()))
        .with(
            LayoutBlock::new(list)
                .with_layout(Layout::fill())
                .with_constraint(Constraint::adjust(Axes::VERTICAL)),
        )
        .with(SchemeEntry::Stack(list))
        .with(LayoutBlock::new(badge).with_constraint(Constraint::to(
            rows[5],
            [Anchor::center_y(), Edge::Right.align(Side::Inner)],
        )));

    scheme.layout(&mut tree, None);
    if let Some(list_frame) = tree.frame(list) {
        tree.set_content_size(scroll, list_frame.size());
    }
    println!("badge before scrolling: {:?}", tree.frame(badge));

    tracing::info!("scrolling by 150");
    tree.scroll_to(scroll, Point::new(0.0, 150.0));
    scheme.layout(&mut tree, None);
    println!("badge after scrolling: {:?}", tree.frame(badge));

    tree.scroll_to(scroll, Point::new(0.0, 10_000.0));
    println!("clamped offset: {:?}", tree.content_offset(scroll));

    let last = rows[rows.len() - 1];
    let origin = tree.convert_point(Point::ORIGIN, last, window);
    println!("last row origin in window space: {origin:?}");
}
