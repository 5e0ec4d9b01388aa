mod common;

use std::sync::Arc;

use common::{FakeScheduler, FakeTransport, ANSWERS, MISSES};
use tokio::sync::mpsc;
use wordle_battle::adapter::{
    Command, CommandEnvelope, Engine, Event, TimerEvent, TimerPayload,
};
use wordle_battle::core::WordBank;
use wordle_battle::types::{ChatId, GroupId, Origin, Player, PlayerId};

const GROUP: GroupId = GroupId(-5);

fn setup() -> (Engine, Arc<FakeTransport>) {
    let bank = Arc::new(WordBank::from_strs(MISSES, ANSWERS, 17));
    let transport = Arc::new(FakeTransport::new());
    let scheduler = Arc::new(FakeScheduler::new());
    let (_tx, rx) = mpsc::unbounded_channel::<Event>();
    let engine = Engine::new(
        bank,
        Arc::clone(&transport) as Arc<dyn wordle_battle::adapter::Transport>,
        scheduler as Arc<dyn wordle_battle::adapter::Scheduler>,
        rx,
    );
    (engine, transport)
}

fn command(user: i64, origin: Origin, command: Command) -> Event {
    Event::Command(CommandEnvelope {
        origin,
        sender: Player::new(PlayerId(user), format!("p{user}")),
        command,
    })
}

fn timer(payload: TimerPayload) -> Event {
    Event::Timer(TimerEvent {
        group: GROUP,
        payload,
    })
}

#[test]
fn start_join_begin_flow_over_the_mailbox() {
    let (mut engine, transport) = setup();
    let group = Origin::Group(GROUP);

    engine.handle_event(command(1, group, Command::StartGame));
    assert!(transport
        .sent_to(GROUP.chat())
        .iter()
        .any(|m| m.contains("Welcome to Wordle Battle")));

    engine.handle_event(command(1, group, Command::StartGame));
    assert!(transport
        .sent_to(GROUP.chat())
        .iter()
        .any(|m| m.contains("already running")));

    engine.handle_event(command(1, group, Command::Join));
    engine.handle_event(command(2, group, Command::Join));
    engine.handle_event(command(1, group, Command::Begin));
    assert!(transport
        .sent_to(GROUP.chat())
        .iter()
        .any(|m| m.contains("p1 has started the game")));

    // Guesses arrive from the players' private chats.
    engine.handle_event(command(2, Origin::Private(ChatId(2)), Command::Guess("ABBEY".into())));
    assert!(transport
        .sent_to(ChatId(2))
        .iter()
        .any(|m| m.contains("Last 10 guesses: ABBEY")));
}

#[test]
fn timers_for_unknown_sessions_are_dropped() {
    let (mut engine, transport) = setup();
    engine.handle_event(timer(TimerPayload::LobbyTimeout));
    engine.handle_event(timer(TimerPayload::IdleDrop { player: PlayerId(1) }));
    assert_eq!(transport.total_sent(), 0);
}

#[test]
fn guesses_without_a_session_are_dropped() {
    let (mut engine, transport) = setup();
    engine.handle_event(command(
        5,
        Origin::Private(ChatId(5)),
        Command::Guess("CRANE".into()),
    ));
    assert_eq!(transport.total_sent(), 0);
}

#[test]
fn lobby_timeout_reaps_the_session() {
    let (mut engine, transport) = setup();
    let group = Origin::Group(GROUP);
    engine.handle_event(command(1, group, Command::StartGame));
    engine.handle_event(command(1, group, Command::Join));

    engine.handle_event(timer(TimerPayload::LobbyTimeout));
    assert!(transport
        .sent_to(GROUP.chat())
        .iter()
        .any(|m| m.contains("timeout")));

    // The group is free for a fresh game.
    engine.handle_event(command(1, group, Command::StartGame));
    let welcomes = transport
        .sent_to(GROUP.chat())
        .iter()
        .filter(|m| m.contains("Welcome"))
        .count();
    assert_eq!(welcomes, 2);
}

#[test]
fn info_commands_answer_in_place() {
    let (mut engine, transport) = setup();
    let private = Origin::Private(ChatId(9));
    engine.handle_event(command(9, private, Command::Help));
    engine.handle_event(command(9, private, Command::About));
    engine.handle_event(command(9, private, Command::Example));
    let sent = transport.sent_to(ChatId(9));
    assert_eq!(sent.len(), 3);
    assert!(sent[0].contains("MAKING GUESSES"));
}
