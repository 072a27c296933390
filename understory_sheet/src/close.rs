// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred close notification.
//!
//! A close is "scheduled" by recording a deadline on the controller's clock.
//! Nothing runs in the background: the host polls, and the callback fires from
//! inside [`SheetController::poll_close`](crate::SheetController::poll_close)
//! once the deadline has passed. Scheduling a new close, resolving the sheet
//! somewhere else, or reconfiguring it supersedes the pending one.

use core::num::NonZeroU64;

/// Handle to one scheduled close.
///
/// Tokens are never reused by a controller, so a stale token can be held
/// safely: canceling it is a no-op once it has been superseded or has fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CloseToken(NonZeroU64);

#[derive(Clone, Copy, Debug)]
struct Pending {
    token: CloseToken,
    due_at_ms: u64,
}

/// At most one outstanding close deadline.
#[derive(Clone, Debug, Default)]
pub(crate) struct CloseTimer {
    issued: u64,
    pending: Option<Pending>,
}

impl CloseTimer {
    /// Replaces any pending close with a new one due at `due_at_ms`.
    pub(crate) fn schedule(&mut self, due_at_ms: u64) -> CloseToken {
        let token = CloseToken(NonZeroU64::MIN.saturating_add(self.issued));
        self.issued = self.issued.saturating_add(1);
        self.pending = Some(Pending { token, due_at_ms });
        token
    }

    /// Drops the pending close, returning its token.
    pub(crate) fn supersede(&mut self) -> Option<CloseToken> {
        self.pending.take().map(|pending| pending.token)
    }

    /// Drops the pending close if it is `token`.
    pub(crate) fn cancel(&mut self, token: CloseToken) -> bool {
        if self.pending().is_some_and(|pending| pending == token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn pending(&self) -> Option<CloseToken> {
        self.pending.map(|pending| pending.token)
    }

    pub(crate) fn due_at_ms(&self) -> Option<u64> {
        self.pending.map(|pending| pending.due_at_ms)
    }

    /// Takes the pending close if it is due at `now_ms`.
    pub(crate) fn take_due(&mut self, now_ms: u64) -> Option<CloseToken> {
        match self.pending {
            Some(pending) if now_ms >= pending.due_at_ms => {
                self.pending = None;
                Some(pending.token)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CloseTimer;

    #[test]
    fn fires_once_at_deadline() {
        let mut timer = CloseTimer::default();
        let token = timer.schedule(450);
        assert_eq!(timer.pending(), Some(token));
        assert_eq!(timer.due_at_ms(), Some(450));
        assert_eq!(timer.take_due(449), None);
        assert_eq!(timer.take_due(450), Some(token));
        assert_eq!(timer.take_due(10_000), None);
    }

    #[test]
    fn rescheduling_supersedes_and_issues_fresh_tokens() {
        let mut timer = CloseTimer::default();
        let first = timer.schedule(100);
        let second = timer.schedule(200);
        assert_ne!(first, second);
        assert!(!timer.cancel(first));
        assert_eq!(timer.pending(), Some(second));
        assert!(timer.cancel(second));
        assert_eq!(timer.pending(), None);
        assert_eq!(timer.supersede(), None);
    }
}
