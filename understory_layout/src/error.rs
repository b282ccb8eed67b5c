// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by fallible tree queries.

use crate::types::ElementId;

/// A structurally invalid layout request.
///
/// These indicate a malformed element graph rather than a runtime condition. The
/// non-`try_` entry points panic with this message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The handle refers to a removed element.
    #[error("element {0:?} is not alive")]
    StaleElement(ElementId),
    /// The two elements live in unrelated trees, so no conversion exists.
    #[error("elements {from:?} and {to:?} share no common ancestor")]
    NoCommonAncestor {
        /// Source element.
        from: ElementId,
        /// Destination element.
        to: ElementId,
    },
}
