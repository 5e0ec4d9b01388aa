//! Console Wordle Battle runner (default binary).
//!
//! Drives the real engine loop over stdin/stdout: stdin lines become
//! chat commands for one simulated group, stdout plays the chat. Lines
//! starting with `{` are parsed as JSON and may name another simulated
//! user, which makes local multiplayer testing possible.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use serde::Deserialize;
use tokio::sync::mpsc;

use wordle_battle::adapter::{
    Command, CommandEnvelope, Engine, Event, TokioScheduler, Transport,
};
use wordle_battle::core::WordBank;
use wordle_battle::types::{ChatId, GroupId, Origin, Player, PlayerId};

/// The one simulated group chat.
const GROUP: GroupId = GroupId(1);
/// Default simulated user.
const DEFAULT_USER: i64 = 100;

#[derive(Debug, Parser)]
#[command(name = "wordle-battle", about = "Multiplayer word-stack battle, console edition")]
struct Args {
    /// Directory holding answers.txt / valid.txt (embedded lists otherwise)
    #[arg(long)]
    words_dir: Option<PathBuf>,

    /// RNG seed for answer drawing; 0 picks a time-based seed
    #[arg(long, default_value_t = 0)]
    seed: u32,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            env_logger::Builder::from_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => env_logger::init(),
    }
    Ok(())
}

/// Prints every delivered message as a chat line.
struct ConsoleTransport;

impl Transport for ConsoleTransport {
    fn send_message(&self, chat: ChatId, text: &str) {
        let who = if chat == GROUP.chat() {
            "group".to_string()
        } else {
            format!("user {}", chat.0)
        };
        println!("── to {who} ──\n{text}");
        let _ = std::io::stdout().flush();
    }

    fn is_member(&self, _group: GroupId, _chat: ChatId) -> bool {
        // Every simulated user belongs to the one simulated group.
        true
    }
}

/// JSON form of an input line, e.g.
/// `{"cmd":"join","user":2,"name":"bob"}` or
/// `{"cmd":"guess","user":2,"text":"crane"}`.
#[derive(Debug, Deserialize)]
struct WireLine {
    user: Option<i64>,
    name: Option<String>,
    #[serde(flatten)]
    command: WireCommand,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum WireCommand {
    StartGame,
    Join,
    ShowPlayers,
    Begin,
    Guess { text: String },
    ForceEnd,
    About,
    Help,
    Example,
}

fn envelope(user: i64, name: Option<String>, command: Command) -> CommandEnvelope {
    let origin = match command {
        // Guesses happen in the player's private chat.
        Command::Guess(_) => Origin::Private(ChatId(user)),
        _ => Origin::Group(GROUP),
    };
    let sender = Player::new(
        PlayerId(user),
        name.unwrap_or_else(|| format!("user {user}")),
    );
    CommandEnvelope {
        origin,
        sender,
        command,
    }
}

fn parse_line(line: &str) -> Option<CommandEnvelope> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line.starts_with('{') {
        let wire: WireLine = match serde_json::from_str(line) {
            Ok(wire) => wire,
            Err(e) => {
                warn!("bad json line: {e}");
                return None;
            }
        };
        let command = match wire.command {
            WireCommand::StartGame => Command::StartGame,
            WireCommand::Join => Command::Join,
            WireCommand::ShowPlayers => Command::ShowPlayers,
            WireCommand::Begin => Command::Begin,
            WireCommand::Guess { text } => Command::Guess(text),
            WireCommand::ForceEnd => Command::ForceEnd,
            WireCommand::About => Command::About,
            WireCommand::Help => Command::Help,
            WireCommand::Example => Command::Example,
        };
        return Some(envelope(
            wire.user.unwrap_or(DEFAULT_USER),
            wire.name,
            command,
        ));
    }

    let command = match line.to_lowercase().as_str() {
        "/startgame" => Command::StartGame,
        "/join" => Command::Join,
        "/players" => Command::ShowPlayers,
        "/begin" => Command::Begin,
        "/end" => Command::ForceEnd,
        "/about" => Command::About,
        "/help" => Command::Help,
        "/example" => Command::Example,
        _ if line.starts_with('/') => {
            println!("Sorry, I didn't understand that command.");
            return None;
        }
        _ => Command::Guess(line.to_string()),
    };
    Some(envelope(DEFAULT_USER, Some("you".to_string()), command))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let seed = if args.seed == 0 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(1)
    } else {
        args.seed
    };

    let bank = match &args.words_dir {
        Some(dir) => WordBank::load_dir(dir, seed)
            .with_context(|| format!("loading word lists from {}", dir.display()))?,
        None => WordBank::embedded(seed),
    };
    let bank = Arc::new(bank);

    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    let transport = Arc::new(ConsoleTransport);
    let scheduler = Arc::new(TokioScheduler::new(tx.clone()));
    let engine = Engine::new(bank, transport, scheduler, rx);
    let engine_task = tokio::spawn(engine.run());

    println!(
        "Wordle Battle console. Commands: /startgame /join /players /begin \
         /end /about /help /example, or type a 5-letter guess."
    );

    let reader = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(envelope) = parse_line(&line) {
                if tx.send(Event::Command(envelope)).is_err() {
                    break;
                }
            }
        }
    });

    reader.await.context("stdin reader failed")?;
    engine_task.abort();
    Ok(())
}
