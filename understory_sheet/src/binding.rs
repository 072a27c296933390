// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wiring between a host's interactive surface and a [`SheetController`].
//!
//! The host owns the actual drag handle (a DOM node, a widget, a window region)
//! and wraps it in a [`GestureSurface`]. A [`SheetBinding`] registers the sheet's
//! listeners on it, routes the resulting [`SurfaceEvent`]s to the controller, and
//! moves the registration when the host swaps the surface out.
//!
//! ```
//! use understory_sheet::{
//!     GestureSurface, Phases, SheetBinding, SheetController, SheetOptions, SurfaceEvent,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Handle {
//!     listening: Phases,
//! }
//!
//! impl GestureSurface for Handle {
//!     fn add_listeners(&mut self, phases: Phases, _passive: Phases) {
//!         self.listening |= phases;
//!     }
//!     fn remove_listeners(&mut self, phases: Phases) {
//!         self.listening -= phases;
//!     }
//! }
//!
//! let controller = SheetController::new([0.0, 300.0, 600.0], 1, SheetOptions::default()).unwrap();
//! let mut binding = SheetBinding::new(controller);
//!
//! // Without a surface the binding is inert.
//! let ignored = binding.dispatch(SurfaceEvent::Press { position: 500.0, timestamp_ms: 0 });
//! assert!(!ignored.handled);
//!
//! binding.mount(Some(Handle::default()));
//! assert_eq!(binding.surface().unwrap().listening, Phases::all());
//!
//! binding.dispatch(SurfaceEvent::Press { position: 500.0, timestamp_ms: 0 });
//! let moved = binding.dispatch(SurfaceEvent::Move { position: 480.0, timestamp_ms: 100 });
//! assert!(moved.prevent_default);
//! assert_eq!(binding.controller().current_extent(), 320.0);
//! ```

use bitflags::bitflags;

use crate::{Resolution, SheetController};

bitflags! {
    /// Pointer lifecycle phases a surface can deliver.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Phases: u8 {
        /// Press (touch start, pointer down).
        const PRESS = 1 << 0;
        /// Move while pressed.
        const MOVE = 1 << 1;
        /// Release (touch end, pointer up).
        const RELEASE = 1 << 2;
    }
}

/// Phases a sheet listens to.
pub const SHEET_PHASES: Phases = Phases::all();

/// Phases whose listeners never cancel the platform's default handling.
///
/// Moves are excluded: while dragging, the sheet asks the host to suppress
/// default scrolling via [`EventDisposition::prevent_default`].
pub const PASSIVE_PHASES: Phases = Phases::PRESS.union(Phases::RELEASE);

/// A host-provided interactive surface the sheet can listen on.
pub trait GestureSurface {
    /// Starts delivering `phases` to the sheet.
    ///
    /// Listeners for phases in `passive` will never request `prevent_default`.
    fn add_listeners(&mut self, phases: Phases, passive: Phases);

    /// Stops delivering `phases` to the sheet.
    fn remove_listeners(&mut self, phases: Phases);
}

/// A pointer event delivered by a [`GestureSurface`].
///
/// `position` is the coordinate along the drag axis, in surface space where
/// smaller values are further up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// The pointer went down on the surface.
    Press {
        /// Drag-axis coordinate.
        position: f64,
        /// Event timestamp in milliseconds.
        timestamp_ms: u64,
    },
    /// The pointer moved while down.
    Move {
        /// Drag-axis coordinate.
        position: f64,
        /// Event timestamp in milliseconds.
        timestamp_ms: u64,
    },
    /// The pointer was released.
    Release {
        /// Event timestamp in milliseconds.
        timestamp_ms: u64,
    },
}

impl SurfaceEvent {
    /// The phase this event belongs to.
    #[must_use]
    pub const fn phase(&self) -> Phases {
        match self {
            Self::Press { .. } => Phases::PRESS,
            Self::Move { .. } => Phases::MOVE,
            Self::Release { .. } => Phases::RELEASE,
        }
    }
}

/// What the binding did with an event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EventDisposition {
    /// The event reached the controller and changed its state.
    pub handled: bool,
    /// The host should cancel the platform's default handling (e.g. page scroll).
    pub prevent_default: bool,
    /// Set when a release resolved the drag.
    pub resolution: Option<Resolution>,
}

/// Owns a [`SheetController`] and its registration on a host surface.
#[derive(Debug)]
pub struct SheetBinding<S: GestureSurface> {
    controller: SheetController,
    surface: Option<S>,
}

impl<S: GestureSurface> SheetBinding<S> {
    /// Wraps `controller` with no surface attached.
    #[must_use]
    pub fn new(controller: SheetController) -> Self {
        Self {
            controller,
            surface: None,
        }
    }

    /// Attaches `surface` at mount time. `None` leaves the binding inert.
    pub fn mount(&mut self, surface: Option<S>) {
        let _ = self.set_surface(surface);
    }

    /// Swaps the surface, returning the previous one.
    ///
    /// Listeners are removed from the old surface before they are added to the new
    /// one, and both happen before this returns, so no event can be delivered
    /// while both or neither are registered.
    pub fn set_surface(&mut self, surface: Option<S>) -> Option<S> {
        let mut previous = self.surface.take();
        if let Some(old) = previous.as_mut() {
            old.remove_listeners(SHEET_PHASES);
        }
        self.surface = surface;
        if let Some(new) = self.surface.as_mut() {
            new.add_listeners(SHEET_PHASES, PASSIVE_PHASES);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            had_surface = previous.is_some(),
            has_surface = self.surface.is_some(),
            "sheet surface swapped"
        );
        previous
    }

    /// Detaches and returns the current surface.
    pub fn unmount(&mut self) -> Option<S> {
        self.set_surface(None)
    }

    /// The attached surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Returns `true` if a surface is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// The wrapped controller.
    #[must_use]
    pub fn controller(&self) -> &SheetController {
        &self.controller
    }

    /// Mutable access to the wrapped controller, for programmatic snaps and polling.
    pub fn controller_mut(&mut self) -> &mut SheetController {
        &mut self.controller
    }

    /// Unwraps the controller, detaching from any surface first.
    pub fn into_controller(mut self) -> SheetController {
        let _ = self.unmount();
        self.controller
    }

    /// Routes `event` to the controller.
    ///
    /// Events arriving while detached are dropped.
    pub fn dispatch(&mut self, event: SurfaceEvent) -> EventDisposition {
        if self.surface.is_none() {
            #[cfg(feature = "tracing")]
            tracing::trace!(?event, "sheet event dropped: no surface attached");
            return EventDisposition::default();
        }
        match event {
            SurfaceEvent::Press {
                position,
                timestamp_ms,
            } => {
                self.controller.on_gesture_start(position, timestamp_ms);
                EventDisposition {
                    handled: self.controller.is_dragging(),
                    ..EventDisposition::default()
                }
            }
            SurfaceEvent::Move {
                position,
                timestamp_ms,
            } => {
                let dragging = self.controller.is_dragging();
                self.controller.on_gesture_move(position, timestamp_ms);
                EventDisposition {
                    handled: dragging,
                    prevent_default: dragging,
                    resolution: None,
                }
            }
            SurfaceEvent::Release { timestamp_ms } => {
                self.controller.observe(timestamp_ms);
                let resolution = self.controller.on_gesture_end();
                EventDisposition {
                    handled: resolution.is_some(),
                    prevent_default: false,
                    resolution,
                }
            }
        }
    }
}
