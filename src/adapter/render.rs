//! Chat message rendering
//!
//! Pure string builders for everything the engine sends: the per-stack
//! emoji grid with its countdown header and hint trailer, loss boards,
//! status lines, and the static help texts.

use crate::core::{Word, WordStack};
use crate::types::{Letters, Mark, Marks, WORD_DROP};

const BLANK_ROW: &str = "⬜️⬜️⬜️⬜️⬜️";
const NEW_WORD_ROW: &str = "🟧🟧🟧🟧🟧";
const SENT_ROW: &str = "🟥🟥🟥🟥🟥";

/// Countdown states for the drop cadence header; index is
/// `guess_count % WORD_DROP` (0 means a word just dropped).
const COUNTDOWN_EMOJIS: [&str; WORD_DROP as usize] = ["⬇️", "2️⃣", "1️⃣"];

/// How a just-added word row is labelled.
#[derive(Debug, Clone, Copy)]
pub enum NewWordTag<'a> {
    /// Drawn fresh (cadence or idle drop).
    Fresh,
    /// Inherited from an opponent's cleared word.
    SentBy(&'a str),
}

fn squares(marks: Marks) -> String {
    marks
        .iter()
        .map(|m| match m {
            Mark::Green => "🟩",
            Mark::Yellow => "🟨",
            Mark::Black => "⬛",
        })
        .collect()
}

/// One grid row for a slot: squares plus the accumulated hints.
fn word_row(word: &Word) -> String {
    if word.is_blank() {
        return BLANK_ROW.to_string();
    }

    let squares = match word.last_marks() {
        Some(marks) => squares(marks),
        // Not yet guessed against (e.g. just received); all-absent row.
        None => squares([Mark::Black; 5]),
    };

    let greens: Vec<String> = word
        .green_hints()
        .iter()
        .map(|h| match h {
            Some(c) => (*c as char).to_string(),
            None => "•".to_string(),
        })
        .collect();

    let separator = if word.is_inherited() { "🔸" } else { "🔹" };

    let yellows: Vec<String> = word
        .ordered_hints()
        .iter()
        .map(|&c| (c as char).to_string())
        .collect();

    format!(
        "{squares}  {}  {separator}  {}",
        greens.join(" "),
        yellows.join(", ")
    )
}

/// Full stack view: countdown header, rows newest-first, and the
/// recent-guess trailer. `new_word` relabels the newest word's row.
pub fn stack_view(stack: &WordStack, new_word: Option<NewWordTag<'_>>) -> String {
    let countdown = COUNTDOWN_EMOJIS[(stack.guess_count() % WORD_DROP) as usize];
    let mut out = countdown.repeat(5);
    out.push('\n');

    // Active words occupy a prefix of the slots, so the newest word
    // sits at index word_count - 1.
    let newest = stack.word_count().wrapping_sub(1);
    for (i, word) in stack.slots().iter().enumerate().rev() {
        let row = match (new_word, i == newest) {
            (Some(NewWordTag::Fresh), true) => format!("{NEW_WORD_ROW}  NEW WORD"),
            (Some(NewWordTag::SentBy(name)), true) => {
                format!("{SENT_ROW}  SENT BY {}", name.to_uppercase())
            }
            _ => word_row(word),
        };
        out.push_str(&row);
        out.push('\n');
    }

    let recent: Vec<&str> = stack
        .recent_guesses()
        .map(Letters::as_str)
        .rev()
        .collect();
    out.push_str(&format!("\nLast 10 guesses: {}", recent.join(", ")));
    out
}

/// Celebration line for a cleared word.
pub fn cleared_banner(answer: Letters) -> String {
    format!("🟩🟩🟩🟩🟩  💥 {answer} 💥")
}

/// Board dump sent when a stack overflows.
pub fn lose_board(stack: &WordStack, sender: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(name) = sender {
        out.push_str(&format!(
            "{name} sent you a word, but you were out of space!\n"
        ));
    }
    for word in stack.slots().iter().rev() {
        if let Some(answer) = word.answer() {
            out.push_str(&format!("{SENT_ROW} : {answer}\n"));
        }
    }
    out.push_str("\nYou were overwhelmed by words! You've been eliminated!");
    out
}

/// One-line stack fullness report for all listed players.
pub fn status_line(entries: &[(&str, usize, usize)]) -> String {
    let parts: Vec<String> = entries
        .iter()
        .map(|(name, count, capacity)| format!("{name}: {count}/{capacity}"))
        .collect();
    parts.join(", ")
}

pub const WELCOME_MSG: &str =
    "Welcome to Wordle Battle! Join the game, or type /help to learn how to play!";

pub const ABOUT_MSG: &str = "\
🤪 INFO 🤪
Wordle Battle is a multiplayer version of Josh Wardle's famously addictive Wordle.
Games are started in a group chat, but are played in the private chat with the bot.
Perfect for everyone, die-hard Wordle nut or otherwise.";

pub const HELP_MSG: &str = "\
😗 STARTING COMMANDS 😗
/startgame: Use this command in a group chat to initiate a game, then /join to enter.
/begin: Use this command to start playing once everyone's in the game.

🧐 MAKING GUESSES 🧐
When the game begins, each player is assigned a stack of random 5-letter words.
Your goal is to 'clear' every word in your stack by guessing them correctly.
When you make a guess, the bot will give you letter-by-letter feedback on your guess:
🟩: This letter is in the word, and in the right position
🟨: This letter is in the word, but in the wrong position
⬛: This letter doesn't exist in the word
The hints you've gathered are shown on the right of each word.

😵‍💫 RECEIVING NEW WORDS 😵‍💫
A new word gets added to the stack for every three guesses you make.
This also happens every 30 seconds that you don't make a guess.
Clearing a word from your stack sends it to everyone's stack, unless said word
was already sent to you by another player.
Words received from other players are indicated by 🔸 instead of 🔹.
If your stack goes over the capacity, you lose and are eliminated from the game!
Stack capacity depends on the number of players.

Recommended: Type /example to see an example guess being made";

pub const EXAMPLE_MSG: &str = "\
🤔 MAKING A GUESS: AN EXAMPLE 🤔
Every time you make a guess, the bot gives feedback in the form of a grid.

Guess #1: LIVES
Bot's reply:
2️⃣2️⃣2️⃣2️⃣2️⃣
⬜️⬜️⬜️⬜️⬜️
⬜️⬜️⬜️⬜️⬜️
⬜️⬜️⬜️⬜️⬜️
🟨⬛⬛🟨🟨  • • • • •  🔹  L, E, S
🟩⬛⬛⬛⬛  L • • • •  🔹

⬛ THE STACK ⬜
A row of black squares represents a word in the stack. Every guess made is
applied to all current words. A row of white squares is an empty space that
may eventually fill up with more words.

🟩 HINTS 🟨
🟨 letters are in the word but in the wrong position; they collect on the
right of the row. 🟩 letters are confirmed in place and shown in the grid
of dots.

🟥 NEW WORDS 🟧
You receive new words:
1. Every three guesses you make
2. Every 30 seconds that pass without a guess made
3. Every time an opponent clears a word from their stack";
