//! Per-player timer handle bookkeeping
//!
//! Handles are stored per (player, kind) so a reset or an elimination
//! cancels exactly the right timers in O(1), with no name-string lookup
//! and no collision risk across sessions.

use std::collections::HashMap;

use crate::adapter::{Scheduler, TimerHandle};
use crate::types::PlayerId;

/// The cancellable per-player timer groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Idle-drop repeater plus its two warning repeaters; reset as one.
    Drop,
    /// Periodic status broadcast.
    Status,
}

/// Outstanding timer handles for one session.
#[derive(Default)]
pub struct TimerSet {
    handles: HashMap<(PlayerId, TimerKind), Vec<TimerHandle>>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: PlayerId, kind: TimerKind, handle: TimerHandle) {
        self.handles.entry((player, kind)).or_default().push(handle);
    }

    /// Cancel one timer group. Draining the stored handles makes a
    /// second cancellation of the same group a no-op.
    pub fn cancel(&mut self, player: PlayerId, kind: TimerKind, scheduler: &dyn Scheduler) {
        if let Some(handles) = self.handles.remove(&(player, kind)) {
            for h in handles {
                scheduler.cancel(h);
            }
        }
    }

    /// Cancel everything owned by one player.
    pub fn cancel_player(&mut self, player: PlayerId, scheduler: &dyn Scheduler) {
        self.cancel(player, TimerKind::Drop, scheduler);
        self.cancel(player, TimerKind::Status, scheduler);
    }

    /// Cancel everything owned by the session.
    pub fn cancel_all(&mut self, scheduler: &dyn Scheduler) {
        for (_, handles) in self.handles.drain() {
            for h in handles {
                scheduler.cancel(h);
            }
        }
    }
}
