//! Session registry - all running games in the process
//!
//! Keyed by group id, with at most one non-ended session per group.
//! Inbound events are routed here: group-origin events resolve by key,
//! private-origin events resolve through active-player membership (with
//! a Transport membership query as fallback). No match means the event
//! is dropped, never an error.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::adapter::{Scheduler, TimerEvent, TimerPayload, Transport};
use crate::core::WordBank;
use crate::session::game::GameSession;
use crate::types::{GroupId, Origin, PlayerId, SessionError, LOBBY_TIMEOUT_SECS};

pub struct SessionRegistry {
    sessions: HashMap<GroupId, GameSession>,
    bank: Arc<WordBank>,
    transport: Arc<dyn Transport>,
    scheduler: Arc<dyn Scheduler>,
}

impl SessionRegistry {
    pub fn new(
        bank: Arc<WordBank>,
        transport: Arc<dyn Transport>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            sessions: HashMap::new(),
            bank,
            transport,
            scheduler,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Create a session for a group and schedule its lobby timeout.
    ///
    /// Rejects non-group origins and groups that already have a live
    /// session. A leftover ended session is replaced.
    pub fn create_session(&mut self, origin: Origin) -> Result<&mut GameSession, SessionError> {
        let Origin::Group(group) = origin else {
            return Err(SessionError::NotAGroup);
        };
        if let Some(existing) = self.sessions.get(&group) {
            if !existing.is_ended() {
                return Err(SessionError::DuplicateSession);
            }
        }

        let session = GameSession::new(
            group,
            Arc::clone(&self.bank),
            Arc::clone(&self.transport),
            Arc::clone(&self.scheduler),
        );
        info!("created session for group {group:?}");

        // Phase is checked at fire time, so the handle needs no
        // explicit cancellation on begin.
        self.scheduler.schedule_once(
            Duration::from_secs(LOBBY_TIMEOUT_SECS),
            TimerEvent {
                group,
                payload: TimerPayload::LobbyTimeout,
            },
        );

        let slot = match self.sessions.entry(group) {
            std::collections::hash_map::Entry::Occupied(o) => {
                let slot = o.into_mut();
                *slot = session;
                slot
            }
            std::collections::hash_map::Entry::Vacant(v) => v.insert(session),
        };
        Ok(slot)
    }

    pub fn session_mut(&mut self, group: GroupId) -> Option<&mut GameSession> {
        self.sessions.get_mut(&group).filter(|s| !s.is_ended())
    }

    /// Find the session an event from `origin` belongs to.
    ///
    /// Group origins match by key. Private origins match the unique
    /// session where the sender is an active player, falling back to a
    /// Transport membership check; zero or multiple matches resolve to
    /// nothing.
    pub fn resolve(&mut self, origin: Origin) -> Option<&mut GameSession> {
        let group = match origin {
            Origin::Group(group) => Some(group),
            Origin::Private(chat) => {
                let player = PlayerId(chat.0);
                let by_play: Vec<GroupId> = self
                    .sessions
                    .values()
                    .filter(|s| !s.is_ended() && s.is_active(player))
                    .map(|s| s.group())
                    .collect();
                match by_play.as_slice() {
                    [only] => Some(*only),
                    [] => {
                        let by_membership: Vec<GroupId> = self
                            .sessions
                            .values()
                            .filter(|s| {
                                !s.is_ended() && self.transport.is_member(s.group(), chat)
                            })
                            .map(|s| s.group())
                            .collect();
                        match by_membership.as_slice() {
                            [only] => Some(*only),
                            _ => None,
                        }
                    }
                    _ => {
                        debug!("ambiguous private origin {chat:?}; dropping");
                        None
                    }
                }
            }
        }?;
        self.session_mut(group)
    }

    /// Drop ended sessions. Idempotent.
    pub fn reap_ended(&mut self) {
        self.sessions.retain(|group, session| {
            if session.is_ended() {
                info!("reaped ended session for group {group:?}");
                false
            } else {
                true
            }
        });
    }
}
