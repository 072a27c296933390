// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use thiserror::Error;

/// Errors reported when a sheet is configured with an unusable snap point set.
///
/// These are the only failures the controller surfaces. Degenerate gesture input
/// (dropped events, zero time deltas, a missing surface) is absorbed silently.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SheetError {
    /// The snap point set was empty, so no bounds can be derived.
    #[error("snap point set must contain at least one extent")]
    EmptySnapPoints,
    /// A snap point was negative, infinite, or NaN.
    #[error("snap point {index} must be finite and non-negative, got {value}")]
    InvalidSnapPoint {
        /// Position of the offending value in the supplied list.
        index: usize,
        /// The offending value.
        value: f64,
    },
}
