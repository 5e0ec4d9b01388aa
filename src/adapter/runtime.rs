//! Engine runtime
//!
//! Bridges async delivery (chat input, fired timers) into the
//! single-threaded session processing the game model assumes: every
//! event lands in one mailbox and is handled to completion before the
//! next, so session state never needs interior locking.

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use crate::adapter::{render, Command, CommandEnvelope, Event, Scheduler, Transport};
use crate::core::WordBank;
use crate::session::SessionRegistry;

pub struct Engine {
    registry: SessionRegistry,
    transport: Arc<dyn Transport>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl Engine {
    pub fn new(
        bank: Arc<WordBank>,
        transport: Arc<dyn Transport>,
        scheduler: Arc<dyn Scheduler>,
        rx: mpsc::UnboundedReceiver<Event>,
    ) -> Self {
        Self {
            registry: SessionRegistry::new(bank, Arc::clone(&transport), scheduler),
            transport,
            rx,
        }
    }

    /// Drain the mailbox until every sender is gone.
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            self.handle_event(event);
        }
        debug!("mailbox closed; engine stopping");
    }

    /// Process one event to completion.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Command(envelope) => self.handle_command(envelope),
            Event::Timer(timer) => {
                if let Some(session) = self.registry.session_mut(timer.group) {
                    use crate::adapter::TimerPayload::*;
                    match timer.payload {
                        IdleDrop { player } => session.on_idle_drop(player),
                        DropWarning {
                            player,
                            remaining_secs,
                        } => session.on_drop_warning(player, remaining_secs),
                        StatusBroadcast { player } => session.on_status_broadcast(player),
                        LobbyTimeout => session.on_lobby_timeout(),
                    }
                }
                // A timer outliving its session is expected, not an error.
            }
        }
        self.registry.reap_ended();
    }

    fn handle_command(&mut self, envelope: CommandEnvelope) {
        let CommandEnvelope {
            origin,
            sender,
            command,
        } = envelope;
        let reply_to = origin.chat();

        match command {
            Command::StartGame => match self.registry.create_session(origin) {
                Ok(_) => self.transport.send_message(reply_to, render::WELCOME_MSG),
                Err(e) => self.transport.send_message(reply_to, &e.to_string()),
            },
            Command::Join => {
                if let Some(session) = self.registry.resolve(origin) {
                    if let Err(e) = session.join(sender) {
                        self.transport.send_message(reply_to, &e.to_string());
                    }
                }
            }
            Command::ShowPlayers => {
                if let Some(session) = self.registry.resolve(origin) {
                    session.show_players(reply_to);
                }
            }
            Command::Begin => {
                if let Some(session) = self.registry.resolve(origin) {
                    if let Err(e) = session.begin(sender.id) {
                        self.transport.send_message(reply_to, &e.to_string());
                    }
                }
            }
            Command::Guess(text) => {
                // No session: benign out-of-game chatter, dropped.
                if let Some(session) = self.registry.resolve(origin) {
                    session.guess(sender.id, &text);
                }
            }
            Command::ForceEnd => {
                if let Some(session) = self.registry.resolve(origin) {
                    session.force_end(&sender);
                }
            }
            Command::About => self.transport.send_message(reply_to, render::ABOUT_MSG),
            Command::Help => self.transport.send_message(reply_to, render::HELP_MSG),
            Command::Example => self.transport.send_message(reply_to, render::EXAMPLE_MSG),
        }
    }
}
