// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rubber-band resistance applied when a drag pulls the sheet past its bounds.

use crate::SnapPoints;

/// Scale applied to the limit in the resistance denominator.
///
/// Together with the rubber-band factor this sets how quickly the pull
/// stiffens; it is part of the feel and should not be tuned per sheet.
pub const LIMIT_SCALE: f64 = 0.55;

/// Damped displacement for an `overshoot` past a bound.
///
/// Computes `sign(o) · |o| · factor · (1 − |o| / (|o| + limit · 0.55))`.
/// The result is zero at zero, keeps the sign of `overshoot`, grows strictly
/// with `|overshoot|` for a positive `limit`, and never reaches `overshoot`
/// for factors in `(0, 1]`.
///
/// `factor` must be finite and non-negative. Debug builds assert this; release
/// builds treat a negative or NaN factor as `0.0` (no give past the bound).
#[must_use]
pub fn resistance(overshoot: f64, limit: f64, factor: f64) -> f64 {
    debug_assert!(
        factor.is_finite() && factor >= 0.0,
        "rubber-band factor must be finite and non-negative; got {factor:?}"
    );
    let distance = overshoot.abs();
    if distance == 0.0 {
        return 0.0;
    }
    // Clamp negative (and NaN) factors to `0.0` so the result never flips sign.
    let factor = factor.max(0.0);
    let damped = distance * factor * (1.0 - distance / (distance + limit * LIMIT_SCALE));
    if overshoot < 0.0 { -damped } else { damped }
}

/// Maps a raw drag `candidate` extent onto the displayed extent.
///
/// Candidates inside `[points.min(), points.max()]` pass through untouched.
/// Outside, the excess is run through [`resistance`], always using
/// `points.max()` as the limit so both edges stiffen at the same rate.
#[must_use]
pub fn rubber_band(candidate: f64, points: &SnapPoints, factor: f64) -> f64 {
    let (min, max) = (points.min(), points.max());
    if candidate > max {
        max + resistance(candidate - max, max, factor)
    } else if candidate < min {
        min + resistance(candidate - min, max, factor)
    } else {
        candidate
    }
}
