// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs and the close callback.

use alloc::boxed::Box;
use core::fmt;

/// Default strength of the rubber-band resistance past the bounds.
pub const DEFAULT_RUBBER_BAND_FACTOR: f64 = 0.3;

/// Default release speed (extent units per millisecond) above which a release is a flick.
pub const DEFAULT_FLICK_VELOCITY_THRESHOLD: f64 = 0.5;

/// Default margin a flick must clear before it targets the next snap point.
pub const DEFAULT_FLICK_DEAD_ZONE: f64 = 10.0;

/// Default length of the settle animation, and of the delay before a close fires.
pub const DEFAULT_SETTLE_DURATION_MS: u64 = 450;

/// Callback invoked once the sheet has settled at its closed position.
pub type CloseCallback = Box<dyn FnMut()>;

/// Configuration for a [`SheetController`](crate::SheetController).
///
/// All fields are public; the `with_*` methods are shorthands for building one
/// from [`SheetOptions::default`].
pub struct SheetOptions {
    /// Resistance strength past the bounds. Must be finite and non-negative;
    /// values in `(0, 1]` keep the displayed extent between the bound and the
    /// raw pointer position.
    pub rubber_band_factor: f64,
    /// Release speed above which the sheet moves to the next snap point in the
    /// direction of travel instead of the nearest one.
    pub flick_velocity_threshold: f64,
    /// Margin a flick must clear past the current extent before a snap point counts
    /// as "next".
    pub flick_dead_zone: f64,
    /// Settle animation length in milliseconds. Also the close delay.
    pub settle_duration_ms: u64,
    /// Invoked (without arguments) after the sheet settles at or below its lowest
    /// snap point.
    pub on_close: Option<CloseCallback>,
}

impl SheetOptions {
    /// Sets [`SheetOptions::rubber_band_factor`].
    ///
    /// `factor` must be finite and non-negative.
    #[must_use]
    pub fn with_rubber_band_factor(mut self, factor: f64) -> Self {
        debug_assert!(
            factor.is_finite() && factor >= 0.0,
            "rubber-band factor must be finite and non-negative; got {factor:?}"
        );
        self.rubber_band_factor = factor;
        self
    }

    /// Sets [`SheetOptions::flick_velocity_threshold`].
    #[must_use]
    pub fn with_flick_velocity_threshold(mut self, threshold: f64) -> Self {
        self.flick_velocity_threshold = threshold;
        self
    }

    /// Sets [`SheetOptions::flick_dead_zone`].
    #[must_use]
    pub fn with_flick_dead_zone(mut self, dead_zone: f64) -> Self {
        self.flick_dead_zone = dead_zone;
        self
    }

    /// Sets [`SheetOptions::settle_duration_ms`].
    #[must_use]
    pub fn with_settle_duration_ms(mut self, duration_ms: u64) -> Self {
        self.settle_duration_ms = duration_ms;
        self
    }

    /// Sets [`SheetOptions::on_close`].
    #[must_use]
    pub fn with_on_close(mut self, on_close: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            rubber_band_factor: DEFAULT_RUBBER_BAND_FACTOR,
            flick_velocity_threshold: DEFAULT_FLICK_VELOCITY_THRESHOLD,
            flick_dead_zone: DEFAULT_FLICK_DEAD_ZONE,
            settle_duration_ms: DEFAULT_SETTLE_DURATION_MS,
            on_close: None,
        }
    }
}

impl fmt::Debug for SheetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetOptions")
            .field("rubber_band_factor", &self.rubber_band_factor)
            .field("flick_velocity_threshold", &self.flick_velocity_threshold)
            .field("flick_dead_zone", &self.flick_dead_zone)
            .field("settle_duration_ms", &self.settle_duration_ms)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}
