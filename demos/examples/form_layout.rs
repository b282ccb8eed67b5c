// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small sign-in form laid out with a scheme, computed as a snapshot and then applied.
//!
//! This example shows:
//! - chained blocks where each row hangs off the previous one,
//! - labels sized from measured content,
//! - a button row arranged by a stack guide,
//! - `snapshot` + `apply` producing the same frames as a direct `layout`.
//!
//! Run:
//! - `RUST_LOG=understory_layout=trace cargo run -p understory_demos --example form_layout`

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_layout::{
    Alignment, Anchor, Axes, Axis, Constraint, Distribution, Edge, ElementId, ElementTree,
    Filling, Guide, Layout, LayoutBlock, LayoutContext, LayoutScheme, SchemeEntry, Side, Spacing,
    StackGuide, StackSizing,
};

/// Rough text measurement: 7 units per character, 16 per line, wrapping at the fitting width.
fn text(len: usize) -> impl Fn(Size) -> Size + Send + Sync {
    move |fitting: Size| {
        #[allow(clippy::cast_precision_loss, reason = "label lengths are small")]
        let natural = len as f64 * 7.0;
        let width = natural.min(fitting.width);
        if width <= 0.0 {
            return Size::new(0.0, 16.0);
        }
        Size::new(width, (natural / width).ceil() * 16.0)
    }
}

fn below(above: ElementId) -> Constraint {
    Constraint::to(
        above,
        [
            Edge::Left.align(Side::Inner),
            Edge::Bottom.align_spaced(Side::Outer, 12.0),
        ],
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = ElementTree::new();
    let window = tree.insert_view(None, Rect::new(0.0, 0.0, 360.0, 480.0));
    let card = tree.insert_view(Some(window), Rect::ZERO);
    let title = tree.insert_view(Some(card), Rect::ZERO);
    tree.set_content(title, text(7));
    let user = tree.insert_view(Some(card), Rect::ZERO);
    let password = tree.insert_view(Some(card), Rect::ZERO);
    let hint = tree.insert_view(Some(card), Rect::ZERO);
    tree.set_content(hint, text(60));

    let buttons = tree.insert_guide(
        card,
        Guide::Stack(
            StackGuide::new(Axis::Horizontal)
                .with_distribution(Distribution::FromTrailing)
                .with_spacing(Spacing::Equal(8.0))
                .with_sizing(StackSizing::Uniform(96.0)),
        ),
        Rect::ZERO,
    );
    let labels = ["Sign in", "Cancel"];
    let actions: Vec<ElementId> = labels
        .iter()
        .map(|_| {
            let b = tree.insert_view(None, Rect::new(0.0, 0.0, 0.0, 36.0));
            tree.arrange(buttons, b);
            b
        })
        .collect();

    let rows = LayoutScheme::new()
        .with(
            LayoutBlock::new(title)
                .with_layout(
                    Layout::equal()
                        .with_x(Alignment::left(16.0))
                        .with_y(Alignment::top(16.0)),
                )
                .with_constraint(Constraint::adjust_to_fit()),
        )
        .with(
            LayoutBlock::new(user)
                .with_layout(
                    Layout::fill()
                        .with_width(Filling::boxed(32.0))
                        .with_height(Filling::fixed(40.0)),
                )
                .with_constraint(below(title)),
        )
        .with(
            LayoutBlock::new(password)
                .with_constraint(Constraint::to(user, [Anchor::size()]))
                .with_constraint(below(user)),
        )
        .with(
            LayoutBlock::new(hint)
                .with_constraint(Constraint::to(password, [Anchor::width()]))
                .with_constraint(Constraint::adjust(Axes::VERTICAL))
                .with_constraint(below(password)),
        )
        .with(
            LayoutBlock::new(buttons)
                .with_constraint(Constraint::adjust_to_fit())
                .with_constraint(Constraint::to(
                    hint,
                    [
                        Edge::Right.align(Side::Inner),
                        Edge::Bottom.align_spaced(Side::Outer, 20.0),
                    ],
                )),
        )
        .with(SchemeEntry::Stack(buttons));

    let scheme = LayoutScheme::new()
        .with(
            LayoutBlock::new(card).with_layout(Layout::new(
                Alignment::center(0.0),
                Alignment::center(0.0),
                Filling::boxed(24.0),
                Filling::fixed(320.0),
            )),
        )
        .with(rows);

    let snapshot = scheme.snapshot(&tree, None);
    tracing::info!(frames = snapshot.len(), "snapshot computed");
    for (id, frame) in &snapshot {
        println!("  {id:?}: {frame:?}");
    }

    scheme.apply(&mut tree, &snapshot);
    for (id, frame) in &snapshot {
        assert_eq!(tree.frame(id), Some(frame), "applied frame differs for {id:?}");
    }

    if let Some(card_frame) = tree.frame(card) {
        println!("card: {card_frame:?}");
    }
    for (label, id) in labels.iter().zip(&actions) {
        let Some(frame) = tree.frame(*id) else {
            continue;
        };
        let in_window = tree.convert_rect(frame, buttons, window);
        println!("{label:>8} button in window space: {in_window:?}");
    }
}
