//! Adapter module - collaborator boundary
//!
//! The engine core never talks to a chat platform or a timer wheel
//! directly; it goes through the `Transport` and `Scheduler` traits
//! defined here. Timer callbacks are realized as events posted back
//! into the engine mailbox, which keeps all session mutation on one
//! logical thread.

pub mod render;
pub mod runtime;
pub mod scheduler;

pub use runtime::Engine;
pub use scheduler::TokioScheduler;

use std::time::Duration;

use crate::types::{ChatId, GroupId, Origin, Player, PlayerId};

/// Outbound messaging and membership queries.
pub trait Transport: Send + Sync {
    /// Deliver a text message to a chat. Delivery is fire-and-forget;
    /// a failed send must not surface into session logic.
    fn send_message(&self, chat: ChatId, text: &str);

    /// Whether `chat` belongs to a member of `group`.
    fn is_member(&self, group: GroupId, chat: ChatId) -> bool;
}

/// Opaque cancellation handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Cancellable one-shot and repeating timers.
///
/// Firing posts the given `TimerEvent` into the engine mailbox. A fire
/// after its session or player is gone is a no-op there, so handles may
/// be cancelled late (or never) without harm.
pub trait Scheduler: Send + Sync {
    fn schedule_once(&self, delay: Duration, event: TimerEvent) -> TimerHandle;

    /// `first` overrides the delay before the first fire; subsequent
    /// fires use `interval`.
    fn schedule_repeating(
        &self,
        interval: Duration,
        first: Option<Duration>,
        event: TimerEvent,
    ) -> TimerHandle;

    /// Cancel a pending timer. Unknown or already-fired handles are
    /// ignored.
    fn cancel(&self, handle: TimerHandle);
}

/// Anything the engine mailbox can receive.
#[derive(Debug, Clone)]
pub enum Event {
    Command(CommandEnvelope),
    Timer(TimerEvent),
}

/// An inbound user command with its sender and origin chat.
#[derive(Debug, Clone)]
pub struct CommandEnvelope {
    pub origin: Origin,
    pub sender: Player,
    pub command: Command,
}

/// Commands surfaced by the chat layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartGame,
    Join,
    ShowPlayers,
    Begin,
    Guess(String),
    ForceEnd,
    About,
    Help,
    Example,
}

/// A timer firing, addressed to one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEvent {
    pub group: GroupId,
    pub payload: TimerPayload,
}

/// What a fired timer means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPayload {
    /// The player idled a full period; drop a fresh word on them.
    IdleDrop { player: PlayerId },
    /// Heads-up that the idle drop is `remaining_secs` away.
    DropWarning { player: PlayerId, remaining_secs: u64 },
    /// Periodic all-stacks status report to one player.
    StatusBroadcast { player: PlayerId },
    /// The session never left its lobby.
    LobbyTimeout,
}
