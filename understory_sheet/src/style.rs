// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render hints handed to the host view.
//!
//! The controller never paints. It describes where the sheet sits and whether the
//! host should animate toward that position; translating this into CSS, a scene
//! graph transform, or anything else is up to the host.

use kurbo::{Affine, CubicBez, Vec2};

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Easing {
    /// First control point, x.
    pub x1: f64,
    /// First control point, y.
    pub y1: f64,
    /// Second control point, x.
    pub x2: f64,
    /// Second control point, y.
    pub y2: f64,
}

impl Easing {
    /// The iOS sheet spring approximation, `cubic-bezier(0.32, 0.72, 0, 1)`.
    pub const IOS_SPRING: Self = Self {
        x1: 0.32,
        y1: 0.72,
        x2: 0.0,
        y2: 1.0,
    };

    /// The curve as a unit cubic Bézier from `(0, 0)` to `(1, 1)`.
    #[must_use]
    pub fn to_cubic_bez(self) -> CubicBez {
        CubicBez::new((0.0, 0.0), (self.x1, self.y1), (self.x2, self.y2), (1.0, 1.0))
    }
}

/// Animation the host should run when moving the sheet to its new extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Animation length in milliseconds.
    pub duration_ms: u64,
    /// Timing curve.
    pub easing: Easing,
}

/// Vertical placement of a sheet anchored to the bottom of its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetTransform {
    /// Visible sheet extent measured up from the container's bottom edge.
    pub extent: f64,
}

impl SheetTransform {
    /// Downward translation that leaves `extent` of a `container_extent`-tall sheet visible.
    ///
    /// This is the `calc(100% - extent)` of a `translateY`; it goes negative
    /// when a rubber-banded drag pulls the sheet past its container.
    #[must_use]
    pub fn offset_in(&self, container_extent: f64) -> f64 {
        container_extent - self.extent
    }

    /// The same placement as an affine translation.
    #[must_use]
    pub fn to_affine(&self, container_extent: f64) -> Affine {
        Affine::translate(Vec2::new(0.0, self.offset_in(container_extent)))
    }
}

/// Everything a host needs to paint the sheet for the current state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetStyle {
    /// Where the sheet sits.
    pub transform: SheetTransform,
    /// `None` while dragging: apply [`SheetStyle::transform`] immediately.
    /// `Some` otherwise: animate toward it.
    pub transition: Option<Transition>,
    /// Hint that the transform changes every frame (set while dragging).
    pub will_change: bool,
}

impl SheetStyle {
    /// Returns `true` when the host should animate toward the transform.
    #[must_use]
    pub const fn transition_active(&self) -> bool {
        self.transition.is_some()
    }
}
