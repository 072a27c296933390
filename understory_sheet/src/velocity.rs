// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded gesture history and release velocity estimation.

use smallvec::SmallVec;

/// Maximum number of samples retained by a [`GestureHistory`].
pub const HISTORY_CAPACITY: usize = 5;

/// One observation of the pointer along the drag axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Pointer coordinate on the drag axis, in surface coordinates.
    pub position: f64,
    /// Event timestamp in milliseconds.
    pub timestamp_ms: u64,
}

/// The most recent [`HISTORY_CAPACITY`] samples of a gesture.
///
/// Storage is inline; pushing onto a full history evicts the oldest sample.
#[derive(Clone, Debug, Default)]
pub struct GestureHistory {
    samples: SmallVec<[GestureSample; HISTORY_CAPACITY]>,
}

impl GestureHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Appends `sample`, evicting the oldest one when full.
    pub fn push(&mut self, sample: GestureSample) {
        if self.samples.len() == HISTORY_CAPACITY {
            self.samples.remove(0);
        }
        self.samples.push(sample);
    }

    /// Retained samples, oldest first.
    #[must_use]
    pub fn samples(&self) -> &[GestureSample] {
        &self.samples
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<GestureSample> {
        self.samples.last().copied()
    }

    /// Estimated extent velocity in units per millisecond.
    ///
    /// Compares the latest sample with the one two slots before it (or the oldest
    /// sample when fewer are retained). Positive values mean the pointer moved
    /// toward smaller coordinates, which grows the sheet.
    ///
    /// Returns `0.0` with fewer than two samples, or when the two samples share a
    /// timestamp (or arrive out of order).
    #[must_use]
    pub fn velocity(&self) -> f64 {
        let len = self.samples.len();
        if len < 2 {
            return 0.0;
        }
        let newer = self.samples[len - 1];
        let older = self.samples[len.saturating_sub(3)];
        let elapsed = newer.timestamp_ms.saturating_sub(older.timestamp_ms);
        if elapsed == 0 {
            return 0.0;
        }
        (older.position - newer.position) / elapsed as f64
    }
}
