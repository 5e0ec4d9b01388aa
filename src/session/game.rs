//! Game session - one running game bound to a group chat
//!
//! Owns the joined players, their stacks, and the session phase
//! machine (Lobby -> Begun -> Ended). All cross-player behavior lives
//! here: block propagation on a correct guess, elimination, win
//! detection, and the per-player timer lifecycle.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::adapter::{render, Scheduler, TimerEvent, TimerPayload, Transport};
use crate::core::{WordBank, WordStack};
use crate::session::timers::{TimerKind, TimerSet};
use crate::types::{
    BlockOutcome, GroupId, GuessOutcome, Letters, Player, PlayerId, SessionError, CAPACITIES,
    MAX_PLAYERS, STATUS_INTERVAL_SECS, TIME_LIMIT_SECS,
};

/// Session lifecycle phase. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lobby,
    Begun,
    Ended,
}

/// One running game.
pub struct GameSession {
    group: GroupId,
    phase: Phase,
    /// Everyone who joined, in join order. Eliminated players stay here
    /// so they keep receiving end-of-game messages.
    players: Vec<Player>,
    /// Players still in the game, join order preserved.
    active: Vec<PlayerId>,
    stacks: HashMap<PlayerId, WordStack>,
    capacity: usize,
    single_player: bool,
    bank: Arc<WordBank>,
    transport: Arc<dyn Transport>,
    scheduler: Arc<dyn Scheduler>,
    timers: TimerSet,
}

impl GameSession {
    pub fn new(
        group: GroupId,
        bank: Arc<WordBank>,
        transport: Arc<dyn Transport>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            group,
            phase: Phase::Lobby,
            players: Vec::new(),
            active: Vec::new(),
            stacks: HashMap::new(),
            capacity: 0,
            single_player: false,
            bank,
            transport,
            scheduler,
            timers: TimerSet::new(),
        }
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_active(&self, player: PlayerId) -> bool {
        self.active.contains(&player)
    }

    pub fn active_players(&self) -> &[PlayerId] {
        &self.active
    }

    pub fn stack(&self, player: PlayerId) -> Option<&WordStack> {
        self.stacks.get(&player)
    }

    fn name_of(&self, player: PlayerId) -> &str {
        self.players
            .iter()
            .find(|p| p.id == player)
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    }

    fn message_all(&self, text: &str) {
        for p in &self.players {
            self.transport.send_message(p.id.chat(), text);
        }
    }

    fn message_player(&self, player: PlayerId, text: &str) {
        self.transport.send_message(player.chat(), text);
    }

    /// Add a player while in the lobby. Reaching the player cap begins
    /// the game with the newest joiner as initiator.
    pub fn join(&mut self, player: Player) -> Result<(), SessionError> {
        match self.phase {
            Phase::Lobby => {}
            Phase::Begun => return Err(SessionError::AlreadyBegun),
            Phase::Ended => return Err(SessionError::NotInLobby),
        }
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(SessionError::AlreadyJoined);
        }

        let id = player.id;
        let name = player.name.clone();
        self.players.push(player);
        info!("{name} joined session for group {:?}", self.group);

        self.message_all(&format!("{name} joined the game."));
        self.message_all(&self.lobby_roster());

        if self.players.len() == MAX_PLAYERS {
            // Full house: no point waiting for an explicit /begin.
            self.begin(id)?;
        }
        Ok(())
    }

    fn lobby_roster(&self) -> String {
        let names: Vec<&str> = self.players.iter().map(|p| p.name.as_str()).collect();
        format!("Current players: {}", names.join(", "))
    }

    /// Allocate stacks and leave the lobby.
    pub fn begin(&mut self, initiator: PlayerId) -> Result<(), SessionError> {
        match self.phase {
            Phase::Lobby => {}
            Phase::Begun | Phase::Ended => return Err(SessionError::AlreadyBegun),
        }
        if !self.players.iter().any(|p| p.id == initiator) {
            return Err(SessionError::NotAPlayer);
        }

        let count = self.players.len();
        self.capacity = CAPACITIES[count];
        self.single_player = count == 1;
        self.active = self.players.iter().map(|p| p.id).collect();
        self.stacks = self
            .players
            .iter()
            .map(|p| (p.id, WordStack::new(self.capacity, Arc::clone(&self.bank))))
            .collect();
        self.phase = Phase::Begun;
        info!(
            "session for group {:?} begun with {count} players, capacity {}",
            self.group, self.capacity
        );

        let starter = self.name_of(initiator).to_string();
        self.transport.send_message(
            self.group.chat(),
            &format!(
                "{starter} has started the game! \
                 Head over to your private chat with the bot to start playing."
            ),
        );
        self.message_all(&format!(
            "{starter} has started the game! Begin by guessing a 5-letter word."
        ));
        self.message_all(&format!(
            "If your stack exceeds more than {} words, you lose!",
            self.capacity
        ));

        let ids: Vec<PlayerId> = self.active.clone();
        for id in ids {
            self.schedule_status(id);
            self.reset_drop_timers(id);
        }
        Ok(())
    }

    /// Handle one guess from a player.
    ///
    /// Out-of-phase or non-player guesses are dropped silently; this is
    /// benign chatter, not an error. Rejected guesses message the
    /// guesser and do not reset the idle timer.
    pub fn guess(&mut self, player: PlayerId, text: &str) {
        if self.phase != Phase::Begun || !self.is_active(player) {
            return;
        }
        let Some(stack) = self.stacks.get_mut(&player) else {
            return;
        };

        let outcome = match stack.apply_guess(text) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.message_player(player, &e.to_string());
                return;
            }
        };
        self.reset_drop_timers(player);

        let stack = &self.stacks[&player];
        match outcome {
            GuessOutcome::Normal { word_added } => {
                let tag = word_added.then_some(render::NewWordTag::Fresh);
                self.message_player(player, &render::stack_view(stack, tag));
            }
            GuessOutcome::CorrectFresh { answer } => {
                let reply = format!(
                    "{}\n{}",
                    render::cleared_banner(answer),
                    render::stack_view(stack, None)
                );
                self.message_player(player, &reply);
            }
            GuessOutcome::CorrectInherited => {
                // Inherited answers are not re-announced; the opponent
                // who sent it already knows it.
                self.message_player(player, &render::stack_view(stack, None));
            }
            GuessOutcome::Win => {
                self.message_player(player, "Good job, you've cleared them all! You win!");
            }
            GuessOutcome::Lose => {
                self.message_player(player, &render::lose_board(stack, None));
            }
        }

        self.check_win_lose();

        if let GuessOutcome::CorrectFresh { answer } = outcome {
            self.propagate_block(player, answer);
        }
    }

    /// Send an inherited block to every other active player.
    fn propagate_block(&mut self, from: PlayerId, answer: Letters) {
        let sender = self.name_of(from).to_string();
        let targets: Vec<PlayerId> = self
            .active
            .iter()
            .copied()
            .filter(|&p| p != from)
            .collect();

        for target in targets {
            if self.phase != Phase::Begun || !self.is_active(target) {
                continue;
            }
            let Some(stack) = self.stacks.get_mut(&target) else {
                continue;
            };
            let outcome = stack.receive_block(Some(answer));
            let stack = &self.stacks[&target];
            match outcome {
                BlockOutcome::Normal => {
                    let tag = Some(render::NewWordTag::SentBy(&sender));
                    self.message_player(target, &render::stack_view(stack, tag));
                }
                BlockOutcome::Lose => {
                    self.message_player(target, &render::lose_board(stack, Some(&sender)));
                }
            }
            self.check_win_lose();
        }
    }

    /// The idle-drop timer fired for a player.
    pub fn on_idle_drop(&mut self, player: PlayerId) {
        if self.phase != Phase::Begun || !self.is_active(player) {
            return;
        }
        let Some(stack) = self.stacks.get_mut(&player) else {
            return;
        };
        debug!("idle drop for {:?}", player);
        let before = stack.word_count();
        let outcome = stack.receive_block(None);
        let stack = &self.stacks[&player];
        match outcome {
            BlockOutcome::Normal => {
                // An exhausted answer pool means nothing landed; show
                // the board without announcing a new word.
                let added = stack.word_count() > before;
                let tag = added.then_some(render::NewWordTag::Fresh);
                self.message_player(player, &render::stack_view(stack, tag));
            }
            BlockOutcome::Lose => {
                self.message_player(player, &render::lose_board(stack, None));
            }
        }
        self.check_win_lose();
    }

    /// A pre-drop warning fired for a player.
    pub fn on_drop_warning(&self, player: PlayerId, remaining_secs: u64) {
        if self.phase != Phase::Begun || !self.is_active(player) {
            return;
        }
        self.message_player(
            player,
            &format!("New word arriving in {remaining_secs} seconds."),
        );
    }

    /// The status-broadcast timer fired for a player.
    pub fn on_status_broadcast(&self, player: PlayerId) {
        if self.phase != Phase::Begun || !self.is_active(player) {
            return;
        }
        self.message_player(player, &self.status_line());
    }

    /// The lobby timeout fired. Phase is the guard: a begun or ended
    /// session ignores it.
    pub fn on_lobby_timeout(&mut self) {
        if self.phase != Phase::Lobby {
            return;
        }
        info!("session for group {:?} timed out in lobby", self.group);
        self.transport
            .send_message(self.group.chat(), "Game ended due to timeout.");
        self.message_all("Game ended due to timeout.");
        self.end_session();
    }

    /// Respond to a roster/status request.
    pub fn show_players(&self, to: crate::types::ChatId) {
        let text = match self.phase {
            Phase::Begun => self.status_line(),
            _ => self.lobby_roster(),
        };
        self.transport.send_message(to, &text);
    }

    fn status_line(&self) -> String {
        let entries: Vec<(&str, usize, usize)> = self
            .active
            .iter()
            .map(|&id| {
                let count = self.stacks.get(&id).map_or(0, WordStack::word_count);
                (self.name_of(id), count, self.capacity)
            })
            .collect();
        render::status_line(&entries)
    }

    /// End the session on command, from any non-terminal phase.
    pub fn force_end(&mut self, by: &Player) {
        if self.phase == Phase::Ended {
            return;
        }
        let text = format!("The game was ended by {}. Goodbye!", by.name);
        self.transport.send_message(self.group.chat(), &text);
        self.message_all(&text);
        self.end_session();
    }

    /// Single evaluation pass over all stacks after any mutation.
    ///
    /// Order matters: a cleared stack wins outright before any loss is
    /// processed; eliminations then run, and only afterwards is the
    /// last-player-standing rule applied.
    fn check_win_lose(&mut self) {
        if self.phase != Phase::Begun {
            return;
        }

        if let Some(winner) = self
            .active
            .iter()
            .copied()
            .find(|id| self.stacks[id].is_won())
        {
            let name = self.name_of(winner).to_string();
            self.message_all(&format!("{name} has cleared all their words. {name} wins!"));
            self.message_all("The game has ended. Goodbye!");
            self.end_session();
            return;
        }

        let losers: Vec<PlayerId> = self
            .active
            .iter()
            .copied()
            .filter(|id| self.stacks[id].is_lost())
            .collect();
        for loser in losers {
            if self.single_player {
                self.message_all("You lose!");
                self.message_all("The game has ended. Goodbye!");
                self.end_session();
                return;
            }
            let name = self.name_of(loser).to_string();
            info!("{name} eliminated from group {:?}", self.group);
            self.message_all(&format!(
                "{name} got overwhelmed by words and has been eliminated!"
            ));
            self.active.retain(|&id| id != loser);
            self.timers.cancel_player(loser, &*self.scheduler);
        }

        if !self.single_player && self.active.len() == 1 {
            let name = self.name_of(self.active[0]).to_string();
            self.message_all(&format!("{name} is the last one remaining. {name} wins!"));
            self.message_all("The game has ended. Goodbye!");
            self.end_session();
        }
    }

    fn end_session(&mut self) {
        self.phase = Phase::Ended;
        self.timers.cancel_all(&*self.scheduler);
        info!("session for group {:?} ended", self.group);
    }

    fn schedule_status(&mut self, player: PlayerId) {
        let handle = self.scheduler.schedule_repeating(
            Duration::from_secs(STATUS_INTERVAL_SECS),
            None,
            TimerEvent {
                group: self.group,
                payload: TimerPayload::StatusBroadcast { player },
            },
        );
        self.timers.insert(player, TimerKind::Status, handle);
    }

    /// Cancel and reschedule the idle-drop repeater and its warnings.
    /// Called at begin and after every non-invalid guess.
    fn reset_drop_timers(&mut self, player: PlayerId) {
        self.timers
            .cancel(player, TimerKind::Drop, &*self.scheduler);

        let period = Duration::from_secs(TIME_LIMIT_SECS);
        let drop = self.scheduler.schedule_repeating(
            period,
            None,
            TimerEvent {
                group: self.group,
                payload: TimerPayload::IdleDrop { player },
            },
        );
        self.timers.insert(player, TimerKind::Drop, drop);

        // Warnings fire at 1/3 and 2/3 of the period, announcing how
        // long is left, then repeat in lockstep with the drop.
        for third in [1u64, 2] {
            let first = Duration::from_secs(TIME_LIMIT_SECS * third / 3);
            let remaining = TIME_LIMIT_SECS - TIME_LIMIT_SECS * third / 3;
            let warn = self.scheduler.schedule_repeating(
                period,
                Some(first),
                TimerEvent {
                    group: self.group,
                    payload: TimerPayload::DropWarning {
                        player,
                        remaining_secs: remaining,
                    },
                },
            );
            self.timers.insert(player, TimerKind::Drop, warn);
        }
    }
}
