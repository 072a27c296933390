// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sheet --heading-base-level=0

//! Understory Sheet: the interaction core of a draggable bottom sheet.
//!
//! A bottom sheet rests at one of a few discrete heights ("snap points") and can
//! be dragged between them. This crate owns the physics of that interaction and
//! nothing else:
//!
//! - [`SnapPoints`]: a validated, non-empty set of rest extents with derived bounds,
//!   plus the nearest and next-in-direction searches used on release.
//! - [`rubber_band()`] / [`resistance`]: the damping applied when a drag pulls the
//!   sheet past its lowest or highest snap point.
//! - [`GestureHistory`]: the last few pointer samples, used to estimate release velocity.
//! - [`SheetController`]: the state machine tying these together. It consumes
//!   press/move/release positions, keeps the current extent, resolves releases to a
//!   snap point, and schedules a close notification when the sheet settles at the bottom.
//! - [`SheetBinding`]: registers the sheet on a host [`GestureSurface`] and routes
//!   [`SurfaceEvent`]s into the controller.
//! - [`SheetStyle`]: the render hint a host paints from (transform, transition, and
//!   a `will_change` hint).
//!
//! This crate deliberately does **not** paint, animate, or own timers. Hosts are
//! responsible for:
//!
//! - Delivering pointer events with timestamps.
//! - Applying [`SheetController::style`] after every event.
//! - Calling [`SheetController::poll_close`] from a frame or timer loop while a
//!   close is pending.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_sheet::{ResolutionKind, SheetController, SheetOptions};
//!
//! // Closed, half, and full heights; start at half.
//! let mut sheet = SheetController::new([0.0, 300.0, 600.0], 1, SheetOptions::default()).unwrap();
//!
//! // Drag up 100px slowly (positions are screen-space: up is smaller).
//! sheet.on_gesture_start(500.0, 0);
//! for (i, y) in [480.0, 460.0, 440.0, 420.0, 400.0].into_iter().enumerate() {
//!     sheet.on_gesture_move(y, (i as u64 + 1) * 100);
//! }
//! assert_eq!(sheet.current_extent(), 400.0);
//! assert!(sheet.is_dragging());
//!
//! // A slow release settles on the nearest snap point.
//! let resolution = sheet.on_gesture_end().unwrap();
//! assert_eq!(resolution.kind, ResolutionKind::Settle);
//! assert_eq!(sheet.current_extent(), 300.0);
//! assert!(sheet.style().transition_active());
//! ```
//!
//! ## Closing
//!
//! When a release (or a programmatic snap) lands at or below the lowest snap point
//! and [`SheetOptions::on_close`] is set, the close callback is scheduled to run
//! once the settle animation has had time to finish:
//!
//! ```rust
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use understory_sheet::{SheetController, SheetOptions};
//!
//! let closed = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&closed);
//! let options = SheetOptions::default().with_on_close(move || flag.set(true));
//! let mut sheet = SheetController::new([0.0, 300.0], 1, options).unwrap();
//!
//! // Fast downward flick.
//! sheet.on_gesture_start(100.0, 1_000);
//! sheet.on_gesture_move(150.0, 1_020);
//! let resolution = sheet.on_gesture_end().unwrap();
//! assert_eq!(resolution.target, 0.0);
//! assert!(resolution.close.is_some());
//!
//! assert!(!sheet.poll_close(1_200));
//! assert!(sheet.poll_close(1_470));
//! assert!(closed.get());
//! ```
//!
//! Any later resolution or [`SheetController::configure`] call supersedes a pending
//! close, and [`SheetController::cancel_close`] cancels it explicitly.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `tracing`: emits `tracing` events for drag start/resolution, close scheduling,
//!   and surface swaps.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binding;
mod close;
mod controller;
mod error;
mod options;
mod rubber_band;
mod snap;
mod style;
mod velocity;

pub use binding::{
    EventDisposition, GestureSurface, PASSIVE_PHASES, Phases, SHEET_PHASES, SheetBinding,
    SurfaceEvent,
};
pub use close::CloseToken;
pub use controller::{Resolution, ResolutionKind, SheetController};
pub use error::SheetError;
pub use options::{
    CloseCallback, DEFAULT_FLICK_DEAD_ZONE, DEFAULT_FLICK_VELOCITY_THRESHOLD,
    DEFAULT_RUBBER_BAND_FACTOR, DEFAULT_SETTLE_DURATION_MS, SheetOptions,
};
pub use rubber_band::{LIMIT_SCALE, resistance, rubber_band};
pub use snap::{Direction, SnapPoints};
pub use style::{Easing, SheetStyle, SheetTransform, Transition};
pub use velocity::{GestureHistory, GestureSample, HISTORY_CAPACITY};
