// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap point sets and the two snap searches used on release.

use alloc::vec::Vec;

use crate::SheetError;

/// Direction of travel along the sheet's extent axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward larger extents (opening the sheet).
    Up,
    /// Toward smaller extents (closing the sheet).
    Down,
}

/// A non-empty, validated list of rest positions for a sheet.
///
/// Extents live in the host's rendering coordinate space (typically logical
/// pixels of visible sheet height) and must be finite and non-negative.
/// Order is preserved as given; it matters for tie-breaking in [`SnapPoints::nearest`].
/// Duplicates are allowed.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapPoints {
    points: Vec<f64>,
    min: f64,
    max: f64,
}

impl SnapPoints {
    /// Validates `points` and derives the bounds.
    ///
    /// Returns [`SheetError::EmptySnapPoints`] for an empty list and
    /// [`SheetError::InvalidSnapPoint`] for the first negative or non-finite value.
    pub fn new(points: impl Into<Vec<f64>>) -> Result<Self, SheetError> {
        let points = points.into();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, &value) in points.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(SheetError::InvalidSnapPoint { index, value });
            }
            min = min.min(value);
            max = max.max(value);
        }
        if points.is_empty() {
            return Err(SheetError::EmptySnapPoints);
        }
        Ok(Self { points, min, max })
    }

    /// The snap points in the order they were supplied.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    /// Number of snap points. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest snap point.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest snap point.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns the snap point at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied()
    }

    /// Clamps `index` into `0..len()`.
    #[must_use]
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.points.len() - 1)
    }

    /// Returns the index of the first snap point exactly equal to `extent`.
    #[must_use]
    pub fn index_of(&self, extent: f64) -> Option<usize> {
        self.points.iter().position(|&point| point == extent)
    }

    /// Returns the snap point closest to `extent`.
    ///
    /// Ties go to the earliest point in list order.
    #[must_use]
    pub fn nearest(&self, extent: f64) -> f64 {
        let mut nearest = self.points[0];
        let mut best = (extent - nearest).abs();
        for &point in &self.points[1..] {
            let distance = (extent - point).abs();
            if distance < best {
                best = distance;
                nearest = point;
            }
        }
        nearest
    }

    /// Returns the closest snap point strictly beyond `extent ± dead_zone` in `direction`.
    ///
    /// For [`Direction::Up`] this is the smallest point greater than
    /// `extent + dead_zone`, falling back to [`SnapPoints::max`]. For
    /// [`Direction::Down`] it is the largest point less than `extent - dead_zone`,
    /// falling back to [`SnapPoints::min`].
    ///
    /// The dead zone keeps a small flick that starts just short of a snap point
    /// from skipping past it.
    #[must_use]
    pub fn next_in_direction(&self, extent: f64, direction: Direction, dead_zone: f64) -> f64 {
        match direction {
            Direction::Up => {
                let threshold = extent + dead_zone;
                self.points
                    .iter()
                    .copied()
                    .filter(|&point| point > threshold)
                    .reduce(f64::min)
                    .unwrap_or(self.max)
            }
            Direction::Down => {
                let threshold = extent - dead_zone;
                self.points
                    .iter()
                    .copied()
                    .filter(|&point| point < threshold)
                    .reduce(f64::max)
                    .unwrap_or(self.min)
            }
        }
    }
}
