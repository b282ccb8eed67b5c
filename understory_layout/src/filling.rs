// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filling rules: choosing a rectangle's extent along one axis.

use kurbo::{Insets, Rect};
use smallvec::SmallVec;

use crate::geometry::{clamp_range, extent, insets_along, set_extent};
use crate::types::Axis;

/// One stage of a [`Filling`].
///
/// Each stage receives the previous stage's extent (the source extent for the first
/// stage) and produces a new one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FillingRule {
    /// The target's own current extent.
    Keep,
    /// A constant extent.
    Fixed(f64),
    /// The source extent multiplied by a factor.
    Scaled(f64),
    /// The source extent minus a total inset, never below zero.
    Boxed(f64),
    /// The incoming extent clamped into `[min, max]`.
    Between {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// The incoming extent, at most `max`.
    UpTo(f64),
    /// The incoming extent, at least `min`.
    From(f64),
    /// The incoming extent plus a constant.
    Add(f64),
}

impl FillingRule {
    fn resolve(self, current: f64, own: f64, source: f64) -> f64 {
        match self {
            Self::Keep => own,
            Self::Fixed(v) => v,
            Self::Scaled(k) => source * k,
            Self::Boxed(inset) => (source - inset).max(0.0),
            Self::Between { min, max } => clamp_range(current, min, max),
            Self::UpTo(max) => current.min(max),
            Self::From(min) => current.max(min),
            Self::Add(v) => current + v,
        }
    }
}

/// Chooses a rectangle's extent along one axis from a source rectangle.
///
/// A filling is an ordered list of [`FillingRule`] stages. The pipeline is seeded with
/// the source extent, so a lone clamping stage clamps the source. An empty filling
/// leaves the extent untouched.
///
/// The minimum edge of the target is held fixed; positioning is left to
/// [`Alignment`](crate::Alignment).
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layout::{Axis, Filling, FillingRule};
///
/// let source = Rect::new(0.0, 0.0, 300.0, 100.0);
/// let mut rect = Rect::ZERO;
/// Filling::scaled(1.0)
///     .then(FillingRule::UpTo(200.0))
///     .apply(&mut rect, source, Axis::Horizontal);
/// assert_eq!(rect.width(), 200.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filling {
    rules: SmallVec<[FillingRule; 2]>,
}

impl Filling {
    /// Leaves the extent untouched.
    #[must_use]
    pub fn keep() -> Self {
        Self::default()
    }

    /// Starts a filling from a single rule.
    #[must_use]
    pub fn rule(rule: FillingRule) -> Self {
        let mut rules = SmallVec::new();
        rules.push(rule);
        Self { rules }
    }

    /// Constant extent `v`.
    #[must_use]
    pub fn fixed(v: f64) -> Self {
        Self::rule(FillingRule::Fixed(v))
    }

    /// Source extent times `k`.
    #[must_use]
    pub fn scaled(k: f64) -> Self {
        Self::rule(FillingRule::Scaled(k))
    }

    /// Source extent minus `inset` (the sum of both sides), clamped to zero.
    #[must_use]
    pub fn boxed(inset: f64) -> Self {
        Self::rule(FillingRule::Boxed(inset))
    }

    /// Source extent minus both of `insets` along `axis`, clamped to zero.
    ///
    /// Only the extent is set; pair it with [`Alignment::start`](crate::Alignment::start)
    /// at the leading inset to place the target, as [`Layout::inset`](crate::Layout::inset)
    /// does.
    #[must_use]
    pub fn boxed_insets(insets: Insets, axis: Axis) -> Self {
        let (leading, trailing) = insets_along(insets, axis);
        Self::boxed(leading + trailing)
    }

    /// Source extent clamped into `min..=max`.
    #[must_use]
    pub fn between(min: f64, max: f64) -> Self {
        Self::rule(FillingRule::Between { min, max })
    }

    /// Source extent, at most `max`.
    #[must_use]
    pub fn up_to(max: f64) -> Self {
        Self::rule(FillingRule::UpTo(max))
    }

    /// Source extent, at least `min`.
    #[must_use]
    pub fn from_min(min: f64) -> Self {
        Self::rule(FillingRule::From(min))
    }

    /// Appends a stage that runs after the existing ones.
    #[must_use]
    pub fn then(mut self, rule: FillingRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends a stage adding `delta` to the extent computed so far.
    #[must_use]
    pub fn plus(self, delta: f64) -> Self {
        self.then(FillingRule::Add(delta))
    }

    /// The stages of this filling, in evaluation order.
    pub fn rules(&self) -> &[FillingRule] {
        &self.rules
    }

    /// Returns `true` if this filling leaves extents untouched.
    pub fn is_keep(&self) -> bool {
        self.rules.is_empty()
    }

    /// Computes the extent for a target of extent `own` in a source of extent `source`.
    pub fn resolve(&self, own: f64, source: f64) -> f64 {
        if self.rules.is_empty() {
            return own;
        }
        self.rules
            .iter()
            .fold(source, |current, rule| rule.resolve(current, own, source))
    }

    /// Sets the extent of `rect` along `axis`, holding its minimum edge.
    pub fn apply(&self, rect: &mut Rect, source: Rect, axis: Axis) {
        if self.rules.is_empty() {
            return;
        }
        let value = self.resolve(extent(*rect, axis), extent(source, axis));
        set_extent(rect, axis, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: Rect = Rect::new(10.0, 20.0, 210.0, 120.0);

    fn width_of(filling: &Filling, own: f64) -> f64 {
        let mut r = Rect::new(0.0, 0.0, own, 5.0);
        filling.apply(&mut r, SOURCE, Axis::Horizontal);
        assert_eq!(r.x0, 0.0, "filling must hold the minimum edge");
        r.width()
    }

    #[test]
    fn base_rules() {
        assert_eq!(width_of(&Filling::fixed(42.0), 3.0), 42.0);
        assert_eq!(width_of(&Filling::scaled(0.5), 3.0), 100.0);
        assert_eq!(width_of(&Filling::scaled(1.0), 3.0), 200.0);
        assert_eq!(width_of(&Filling::keep(), 3.0), 3.0);
    }

    #[test]
    fn boxed_is_source_minus_insets_clamped() {
        assert_eq!(width_of(&Filling::boxed(30.0), 0.0), 170.0);
        assert_eq!(width_of(&Filling::boxed(200.0), 0.0), 0.0);
        assert_eq!(width_of(&Filling::boxed(250.0), 0.0), 0.0);
    }

    #[test]
    fn boxed_insets_sums_the_pair_on_one_axis() {
        let insets = Insets::new(10.0, 1.0, 30.0, 2.0);
        assert_eq!(
            width_of(&Filling::boxed_insets(insets, Axis::Horizontal), 0.0),
            160.0
        );
        let mut r = Rect::ZERO;
        Filling::boxed_insets(insets, Axis::Vertical).apply(&mut r, SOURCE, Axis::Vertical);
        assert_eq!(r.height(), 97.0);
    }

    #[test]
    fn clamps_on_source() {
        assert_eq!(width_of(&Filling::between(10.0, 50.0), 0.0), 50.0);
        assert_eq!(width_of(&Filling::between(250.0, 300.0), 0.0), 250.0);
        assert_eq!(width_of(&Filling::up_to(120.0), 0.0), 120.0);
        assert_eq!(width_of(&Filling::from_min(500.0), 0.0), 500.0);
        assert_eq!(width_of(&Filling::from_min(5.0), 0.0), 200.0);
    }

    #[test]
    fn modifiers_apply_in_order() {
        let f = Filling::scaled(1.0)
            .then(FillingRule::Add(-20.0))
            .then(FillingRule::UpTo(150.0));
        assert_eq!(width_of(&f, 0.0), 150.0);

        let f = Filling::scaled(1.0)
            .then(FillingRule::UpTo(150.0))
            .then(FillingRule::Add(-20.0));
        assert_eq!(width_of(&f, 0.0), 130.0);
        assert_eq!(width_of(&Filling::fixed(40.0).plus(8.0), 0.0), 48.0);

        let f = Filling::rule(FillingRule::Keep).then(FillingRule::From(8.0));
        assert_eq!(width_of(&f, 3.0), 8.0);
        assert_eq!(width_of(&f, 30.0), 30.0);
    }

    #[test]
    fn vertical_axis() {
        let mut r = Rect::new(0.0, 7.0, 10.0, 8.0);
        Filling::scaled(0.25).apply(&mut r, SOURCE, Axis::Vertical);
        assert_eq!(r, Rect::new(0.0, 7.0, 10.0, 32.0));
    }
}
