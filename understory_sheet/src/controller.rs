// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sheet drag controller: gesture tracking, bounds, and snap resolution.

use alloc::vec::Vec;

use crate::close::CloseTimer;
use crate::{
    CloseToken, Direction, Easing, GestureHistory, GestureSample, SheetError, SheetOptions,
    SheetStyle, SheetTransform, SnapPoints, Transition, rubber_band,
};

/// How a release picked its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionKind {
    /// Released slowly: moved to the nearest snap point.
    Settle,
    /// Released fast: moved to the next snap point in the given direction.
    Flick(Direction),
}

/// Outcome of [`SheetController::on_gesture_end`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Snap point the sheet now rests at.
    pub target: f64,
    /// Whether the target came from a settle or a flick.
    pub kind: ResolutionKind,
    /// Release velocity in extent units per millisecond.
    pub velocity: f64,
    /// Close scheduled by this resolution, if the target closes the sheet.
    pub close: Option<CloseToken>,
}

/// State captured when a drag begins.
#[derive(Clone, Copy, Debug)]
struct DragSession {
    start_position: f64,
    start_extent: f64,
}

/// Controller for a bottom sheet that snaps between rest positions.
///
/// The controller consumes pointer positions along the drag axis, where
/// *smaller* coordinates mean further up (screen space). Dragging up grows the
/// sheet's extent. While a drag is active the extent follows the pointer, with
/// rubber-band resistance past the lowest and highest snap points. On release
/// the extent jumps to exactly one snap point and the host animates toward it.
///
/// Time is whatever the host's event timestamps say. The controller keeps a
/// monotonic clock advanced by every timestamp it sees, and deferred close
/// notifications are measured against that clock (see [`SheetController::poll_close`]).
#[derive(Debug)]
pub struct SheetController {
    snap_points: SnapPoints,
    options: SheetOptions,
    current_extent: f64,
    session: Option<DragSession>,
    history: GestureHistory,
    clock_ms: u64,
    close: CloseTimer,
}

impl SheetController {
    /// Creates a controller resting at `snap_points[initial_snap]`.
    ///
    /// An out-of-range `initial_snap` is clamped to the last snap point.
    pub fn new(
        snap_points: impl Into<Vec<f64>>,
        initial_snap: usize,
        options: SheetOptions,
    ) -> Result<Self, SheetError> {
        let snap_points = SnapPoints::new(snap_points)?;
        let current_extent = snap_points.as_slice()[snap_points.clamp_index(initial_snap)];
        Ok(Self {
            snap_points,
            options,
            current_extent,
            session: None,
            history: GestureHistory::new(),
            clock_ms: 0,
            close: CloseTimer::default(),
        })
    }

    /// Reconfigures the sheet from scratch.
    ///
    /// Any active drag is dropped, any pending close is canceled, and the sheet is
    /// re-seated at `snap_points[initial_snap]` (clamped). On error nothing changes.
    pub fn configure(
        &mut self,
        snap_points: impl Into<Vec<f64>>,
        initial_snap: usize,
        options: SheetOptions,
    ) -> Result<(), SheetError> {
        let snap_points = SnapPoints::new(snap_points)?;
        self.current_extent = snap_points.as_slice()[snap_points.clamp_index(initial_snap)];
        self.snap_points = snap_points;
        self.options = options;
        self.session = None;
        self.history.clear();
        let _superseded = self.close.supersede();
        #[cfg(feature = "tracing")]
        if let Some(token) = _superseded {
            tracing::debug!(?token, "pending sheet close canceled by reconfiguration");
        }
        Ok(())
    }

    /// Replaces the snap points without moving the sheet.
    ///
    /// The new set takes effect for later drags and resolutions. A sheet left
    /// outside the new bounds stays there until the next snap.
    pub fn update_snap_points(
        &mut self,
        snap_points: impl Into<Vec<f64>>,
    ) -> Result<(), SheetError> {
        self.snap_points = SnapPoints::new(snap_points)?;
        Ok(())
    }

    /// Current snap points.
    #[must_use]
    pub fn snap_points(&self) -> &SnapPoints {
        &self.snap_points
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// Where the sheet sits, as visible extent.
    #[must_use]
    pub const fn current_extent(&self) -> f64 {
        self.current_extent
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Index of the first snap point equal to the current extent, if the sheet is at rest on one.
    #[must_use]
    pub fn snap_index(&self) -> Option<usize> {
        if self.is_dragging() {
            return None;
        }
        self.snap_points.index_of(self.current_extent)
    }

    /// Samples retained for velocity estimation.
    #[must_use]
    pub fn history(&self) -> &GestureHistory {
        &self.history
    }

    /// Velocity estimate from the retained samples, in extent units per millisecond.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.history.velocity()
    }

    /// Latest time the controller has observed, in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Render hint for the current state.
    #[must_use]
    pub fn style(&self) -> SheetStyle {
        let dragging = self.is_dragging();
        SheetStyle {
            transform: SheetTransform {
                extent: self.current_extent,
            },
            transition: (!dragging).then_some(Transition {
                duration_ms: self.options.settle_duration_ms,
                easing: Easing::IOS_SPRING,
            }),
            will_change: dragging,
        }
    }

    /// Begins a drag at `position`.
    ///
    /// A start while a drag is already active restarts it from the current extent.
    /// Non-finite positions are ignored.
    pub fn on_gesture_start(&mut self, position: f64, timestamp_ms: u64) {
        if !position.is_finite() {
            return;
        }
        self.observe(timestamp_ms);
        #[cfg(feature = "tracing")]
        if self.session.is_some() {
            tracing::trace!(position, "sheet drag restarted while active");
        }
        self.session = Some(DragSession {
            start_position: position,
            start_extent: self.current_extent,
        });
        self.history.clear();
        self.history.push(GestureSample {
            position,
            timestamp_ms,
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(position, extent = self.current_extent, "sheet drag started");
    }

    /// Moves the active drag to `position`. Does nothing without an active drag.
    pub fn on_gesture_move(&mut self, position: f64, timestamp_ms: u64) {
        let Some(session) = self.session else {
            return;
        };
        if !position.is_finite() {
            return;
        }
        self.observe(timestamp_ms);
        let candidate = session.start_extent + (session.start_position - position);
        self.current_extent = rubber_band(
            candidate,
            &self.snap_points,
            self.options.rubber_band_factor,
        );
        self.history.push(GestureSample {
            position,
            timestamp_ms,
        });
    }

    /// Ends the active drag and snaps the sheet.
    ///
    /// Returns `None` (and changes nothing) without an active drag.
    pub fn on_gesture_end(&mut self) -> Option<Resolution> {
        self.session?;
        let velocity = self.history.velocity();
        let kind = if velocity.abs() > self.options.flick_velocity_threshold {
            ResolutionKind::Flick(if velocity > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            })
        } else {
            ResolutionKind::Settle
        };
        let target = match kind {
            ResolutionKind::Settle => self.snap_points.nearest(self.current_extent),
            ResolutionKind::Flick(direction) => self.snap_points.next_in_direction(
                self.current_extent,
                direction,
                self.options.flick_dead_zone,
            ),
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            ?kind,
            velocity,
            from = self.current_extent,
            target,
            "sheet drag resolved"
        );
        let close = self.settle_at(target);
        Some(Resolution {
            target,
            kind,
            velocity,
            close,
        })
    }

    /// Snaps to `snap_points[index]` (clamped) at time `now_ms`, ending any active drag.
    ///
    /// A close scheduled by this snap is due `settle_duration_ms` after `now_ms`
    /// (or after the latest observed time, if that is later).
    /// Returns the close token if the target closes the sheet.
    pub fn snap_to_index(&mut self, index: usize, now_ms: u64) -> Option<CloseToken> {
        self.observe(now_ms);
        let target = self.snap_points.as_slice()[self.snap_points.clamp_index(index)];
        self.settle_at(target)
    }

    /// Snaps to an arbitrary `extent` at time `now_ms`, ending any active drag.
    ///
    /// The extent does not have to be a snap point. Non-finite extents are ignored.
    /// Returns the close token if the target closes the sheet.
    pub fn snap_to_extent(&mut self, extent: f64, now_ms: u64) -> Option<CloseToken> {
        if !extent.is_finite() {
            return None;
        }
        self.observe(now_ms);
        self.settle_at(extent)
    }

    /// Token of the pending close, if one is scheduled.
    #[must_use]
    pub fn pending_close(&self) -> Option<CloseToken> {
        self.close.pending()
    }

    /// Clock time at which the pending close fires, if one is scheduled.
    #[must_use]
    pub fn close_due_at_ms(&self) -> Option<u64> {
        self.close.due_at_ms()
    }

    /// Cancels the pending close if it is `token`. Returns whether it was canceled.
    pub fn cancel_close(&mut self, token: CloseToken) -> bool {
        let canceled = self.close.cancel(token);
        #[cfg(feature = "tracing")]
        if canceled {
            tracing::debug!(?token, "pending sheet close canceled");
        }
        canceled
    }

    /// Advances the clock to `now_ms` and fires the close callback if it is due.
    ///
    /// Returns `true` if a close fired. Each scheduled close fires at most once.
    pub fn poll_close(&mut self, now_ms: u64) -> bool {
        self.observe(now_ms);
        let Some(_token) = self.close.take_due(self.clock_ms) else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(token = ?_token, now_ms = self.clock_ms, "sheet close fired");
        if let Some(on_close) = self.options.on_close.as_mut() {
            on_close();
        }
        true
    }

    pub(crate) fn observe(&mut self, timestamp_ms: u64) {
        self.clock_ms = self.clock_ms.max(timestamp_ms);
    }

    fn settle_at(&mut self, target: f64) -> Option<CloseToken> {
        self.session = None;
        self.current_extent = target;
        let _superseded = self.close.supersede();
        #[cfg(feature = "tracing")]
        if let Some(token) = _superseded {
            tracing::trace!(?token, "pending sheet close superseded");
        }
        if target > self.snap_points.min() || self.options.on_close.is_none() {
            return None;
        }
        let due_at_ms = self
            .clock_ms
            .saturating_add(self.options.settle_duration_ms);
        let token = self.close.schedule(due_at_ms);
        #[cfg(feature = "tracing")]
        tracing::debug!(?token, due_at_ms, "sheet close scheduled");
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolutionKind, SheetController};
    use crate::{Direction, SheetError, SheetOptions};
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn sheet() -> SheetController {
        SheetController::new([0.0, 300.0, 600.0], 1, SheetOptions::default()).unwrap()
    }

    fn closing_sheet(count: &Rc<Cell<u32>>) -> SheetController {
        let count = Rc::clone(count);
        let options = SheetOptions::default().with_on_close(move || count.set(count.get() + 1));
        SheetController::new([0.0, 300.0, 600.0], 1, options).unwrap()
    }

    /// Drags from `from` to `to` in 10-unit steps, 100ms apart (0.1 units/ms).
    fn slow_drag(sheet: &mut SheetController, from: f64, to: f64, start_ms: u64) -> u64 {
        let mut t = start_ms;
        sheet.on_gesture_start(from, t);
        let step = if to > from { 10.0 } else { -10.0 };
        let mut position = from;
        while position != to {
            position += step;
            t += 100;
            sheet.on_gesture_move(position, t);
        }
        t
    }

    #[test]
    fn initial_snap_is_clamped() {
        let sheet = SheetController::new([0.0, 300.0], 9, SheetOptions::default()).unwrap();
        assert_eq!(sheet.current_extent(), 300.0);
        assert!(!sheet.is_dragging());
        assert_eq!(sheet.snap_index(), Some(1));
    }

    #[test]
    fn empty_snap_points_are_rejected() {
        let empty: [f64; 0] = [];
        let err = SheetController::new(empty, 0, SheetOptions::default()).unwrap_err();
        assert_eq!(err, SheetError::EmptySnapPoints);

        let mut sheet = sheet();
        assert_eq!(sheet.update_snap_points(empty), Err(SheetError::EmptySnapPoints));
        assert_eq!(sheet.snap_points().as_slice(), &[0.0, 300.0, 600.0]);
    }

    #[test]
    fn drag_inside_bounds_follows_pointer() {
        let mut sheet = sheet();
        sheet.on_gesture_start(500.0, 0);
        assert!(sheet.is_dragging());
        sheet.on_gesture_move(380.0, 16);
        assert_eq!(sheet.current_extent(), 420.0);
        sheet.on_gesture_move(650.0, 32);
        assert_eq!(sheet.current_extent(), 150.0);
    }

    #[test]
    fn drag_past_bounds_is_damped() {
        let mut sheet =
            SheetController::new([0.0, 300.0, 600.0], 2, SheetOptions::default()).unwrap();
        sheet.on_gesture_start(500.0, 0);
        sheet.on_gesture_move(400.0, 100);
        let expected = 600.0 + crate::resistance(100.0, 600.0, 0.3);
        assert!((sheet.current_extent() - expected).abs() < 1e-9);
        assert!(sheet.current_extent() < 700.0);
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut sheet = sheet();
        sheet.on_gesture_move(0.0, 10);
        assert_eq!(sheet.current_extent(), 300.0);
        assert!(!sheet.is_dragging());
        assert_eq!(sheet.on_gesture_end(), None);
    }

    #[test]
    fn slow_release_settles_to_nearest() {
        let mut sheet = sheet();
        // 300 → 460: nearer to 600.
        slow_drag(&mut sheet, 500.0, 340.0, 0);
        let resolution = sheet.on_gesture_end().unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Settle);
        assert_eq!(resolution.target, 600.0);
        assert_eq!(sheet.current_extent(), 600.0);
        assert!(!sheet.is_dragging());
    }

    #[test]
    fn settle_tie_goes_to_first_listed_point() {
        let mut sheet = sheet();
        // 300 → 450: equidistant from 300 and 600.
        slow_drag(&mut sheet, 500.0, 350.0, 0);
        assert_eq!(sheet.current_extent(), 450.0);
        let resolution = sheet.on_gesture_end().unwrap();
        assert_eq!(resolution.target, 300.0);
    }

    #[test]
    fn upward_flick_skips_the_point_just_passed() {
        let mut sheet = sheet();
        sheet.on_gesture_start(500.0, 0);
        sheet.on_gesture_move(490.0, 10);
        assert_eq!(sheet.current_extent(), 310.0);
        let resolution = sheet.on_gesture_end().unwrap();
        assert_eq!(resolution.velocity, 1.0);
        assert_eq!(resolution.kind, ResolutionKind::Flick(Direction::Up));
        assert_eq!(resolution.target, 600.0);
    }

    #[test]
    fn downward_flick_moves_to_next_lower_point() {
        let mut sheet =
            SheetController::new([0.0, 300.0, 600.0], 2, SheetOptions::default()).unwrap();
        sheet.on_gesture_start(100.0, 0);
        sheet.on_gesture_move(120.0, 10);
        sheet.on_gesture_move(140.0, 20);
        assert_eq!(sheet.current_extent(), 560.0);
        let resolution = sheet.on_gesture_end().unwrap();
        assert_eq!(resolution.kind, ResolutionKind::Flick(Direction::Down));
        assert_eq!(resolution.target, 300.0);
    }

    #[test]
    fn velocity_at_threshold_is_not_a_flick() {
        let mut sheet = sheet();
        sheet.on_gesture_start(500.0, 0);
        sheet.on_gesture_move(495.0, 10);
        let resolution = sheet.on_gesture_end().unwrap();
        assert_eq!(resolution.velocity, 0.5);
        assert_eq!(resolution.kind, ResolutionKind::Settle);
        assert_eq!(resolution.target, 300.0);
    }

    #[test]
    fn tap_without_movement_settles() {
        let mut sheet = sheet();
        sheet.on_gesture_start(500.0, 0);
        let resolution = sheet.on_gesture_end().unwrap();
        assert_eq!(resolution.velocity, 0.0);
        assert_eq!(resolution.target, 300.0);
    }

    #[test]
    fn restart_while_dragging_rebases_on_current_extent() {
        let mut sheet = sheet();
        sheet.on_gesture_start(500.0, 0);
        sheet.on_gesture_move(450.0, 100);
        sheet.on_gesture_start(200.0, 200);
        assert_eq!(sheet.history().len(), 1);
        sheet.on_gesture_move(190.0, 300);
        assert_eq!(sheet.current_extent(), 360.0);
    }

    #[test]
    fn non_finite_positions_are_dropped() {
        let mut sheet = sheet();
        sheet.on_gesture_start(f64::NAN, 0);
        assert!(!sheet.is_dragging());
        sheet.on_gesture_start(500.0, 0);
        sheet.on_gesture_move(f64::INFINITY, 10);
        assert_eq!(sheet.current_extent(), 300.0);
        assert_eq!(sheet.snap_to_extent(f64::NAN, 20), None);
        assert!(sheet.is_dragging());
    }

    #[test]
    fn style_tracks_dragging() {
        let mut sheet = sheet();
        let resting = sheet.style();
        assert!(resting.transition_active());
        assert!(!resting.will_change);
        assert_eq!(resting.transition.unwrap().duration_ms, 450);
        assert_eq!(resting.transform.extent, 300.0);

        sheet.on_gesture_start(500.0, 0);
        let dragging = sheet.style();
        assert!(!dragging.transition_active());
        assert!(dragging.will_change);
    }

    #[test]
    fn settling_at_bottom_closes_once_after_delay() {
        let count = Rc::new(Cell::new(0));
        let mut sheet = closing_sheet(&count);
        // 300 → 50, slowly: settles to 0.
        let end = slow_drag(&mut sheet, 500.0, 750.0, 1_000);
        let resolution = sheet.on_gesture_end().unwrap();
        assert_eq!(resolution.target, 0.0);
        assert!(resolution.close.is_some());
        assert_eq!(sheet.close_due_at_ms(), Some(end + 450));

        assert!(!sheet.poll_close(end + 449));
        assert_eq!(count.get(), 0);
        assert!(sheet.poll_close(end + 450));
        assert_eq!(count.get(), 1);
        assert!(!sheet.poll_close(end + 5_000));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn no_close_without_callback() {
        let mut sheet = sheet();
        assert_eq!(sheet.snap_to_index(0, 0), None);
        assert_eq!(sheet.current_extent(), 0.0);
        assert_eq!(sheet.pending_close(), None);
        assert!(!sheet.poll_close(10_000));
    }

    #[test]
    fn later_resolution_supersedes_pending_close() {
        let count = Rc::new(Cell::new(0));
        let mut sheet = closing_sheet(&count);
        let first = sheet.snap_to_index(0, 0).unwrap();
        assert_eq!(sheet.snap_to_extent(600.0, 100), None);
        assert!(!sheet.cancel_close(first));
        assert!(!sheet.poll_close(10_000));
        assert_eq!(count.get(), 0);

        let second = sheet.snap_to_index(0, 10_500).unwrap();
        assert_ne!(first, second);
        assert!(sheet.cancel_close(second));
        assert!(!sheet.poll_close(20_000));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn configure_reseats_and_cancels() {
        let count = Rc::new(Cell::new(0));
        let mut sheet = closing_sheet(&count);
        sheet.snap_to_index(0, 0).unwrap();
        sheet.configure([100.0, 400.0], 1, SheetOptions::default()).unwrap();
        assert_eq!(sheet.current_extent(), 400.0);
        assert_eq!(sheet.pending_close(), None);
        assert!(!sheet.poll_close(10_000));
        assert_eq!(count.get(), 0);

        assert!(sheet.configure([1.0, -1.0], 0, SheetOptions::default()).is_err());
        assert_eq!(sheet.current_extent(), 400.0);
    }

    #[test]
    fn update_snap_points_only_affects_future_resolutions() {
        let mut sheet = sheet();
        sheet.update_snap_points([0.0, 200.0]).unwrap();
        assert_eq!(sheet.current_extent(), 300.0);
        assert_eq!(sheet.snap_index(), None);

        sheet.on_gesture_start(500.0, 0);
        let resolution = sheet.on_gesture_end().unwrap();
        assert_eq!(resolution.target, 200.0);
    }

    #[test]
    fn snap_to_index_ends_drag() {
        let mut sheet = sheet();
        sheet.on_gesture_start(500.0, 0);
        sheet.snap_to_index(99, 5);
        assert!(!sheet.is_dragging());
        assert_eq!(sheet.current_extent(), 600.0);
        sheet.on_gesture_move(0.0, 10);
        assert_eq!(sheet.current_extent(), 600.0);
    }

    #[test]
    fn close_delay_is_measured_from_latest_event() {
        let count = Rc::new(Cell::new(0));
        let mut sheet = closing_sheet(&count);
        assert!(!sheet.poll_close(5_000));
        assert_eq!(sheet.now_ms(), 5_000);
        sheet.snap_to_extent(0.0, 3_000).unwrap();
        assert_eq!(sheet.close_due_at_ms(), Some(5_450));
    }

    #[test]
    fn programmatic_close_waits_for_settle_after_idle() {
        let count = Rc::new(Cell::new(0));
        let mut sheet = closing_sheet(&count);
        slow_drag(&mut sheet, 500.0, 480.0, 800);
        sheet.on_gesture_end().unwrap();
        assert_eq!(sheet.now_ms(), 1_000);

        // The host idles for a minute, then snaps closed.
        let token = sheet.snap_to_index(0, 60_000).unwrap();
        assert_eq!(sheet.pending_close(), Some(token));
        assert_eq!(sheet.close_due_at_ms(), Some(60_450));
        assert!(!sheet.poll_close(60_016));
        assert_eq!(count.get(), 0);
        assert!(sheet.poll_close(60_450));
        assert_eq!(count.get(), 1);
    }

    #[test]
    #[should_panic(expected = "rubber-band factor")]
    #[cfg(debug_assertions)]
    fn negative_rubber_band_factor_is_caught() {
        let options = SheetOptions::default().with_rubber_band_factor(-0.3);
        let mut sheet = SheetController::new([0.0, 300.0], 1, options).unwrap();
        sheet.on_gesture_start(500.0, 0);
        sheet.on_gesture_move(300.0, 100);
    }
}
