//! Shared types and tuning constants
//! This module contains pure data types with no external dependencies

use std::fmt;

/// Every hidden word and guess is exactly this long.
pub const WORD_LEN: usize = 5;

/// Upper bound on players per session; reaching it auto-begins the game.
pub const MAX_PLAYERS: usize = 8;

/// Stack capacity indexed by player count (index 0 is unused).
pub const CAPACITIES: [usize; MAX_PLAYERS + 1] = [0, 5, 6, 7, 7, 8, 8, 9, 9];

/// Words every stack starts with.
pub const START_WORDS: usize = 2;

/// A fresh word is dropped after this many non-matching guesses.
pub const WORD_DROP: u32 = 3;

/// Maximum retained guess history per stack (FIFO eviction).
pub const RECENT_GUESS_LIMIT: usize = 10;

/// Idle seconds before a word is auto-dropped onto a stack.
pub const TIME_LIMIT_SECS: u64 = 30;

/// Interval between automatic stack-status broadcasts.
pub const STATUS_INTERVAL_SECS: u64 = 30;

/// A session still in its lobby after this long is ended.
pub const LOBBY_TIMEOUT_SECS: u64 = 10 * 60;

/// A 5-letter word in canonical form (ASCII uppercase).
///
/// Used for both hidden answers and guesses; construction always goes
/// through [`Letters::parse`] or byte-validated loaders, so the inner
/// buffer is guaranteed to be valid UTF-8.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letters([u8; WORD_LEN]);

impl Letters {
    /// Parse user text into canonical form.
    ///
    /// Returns None unless the trimmed input is exactly five ASCII
    /// letters. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != WORD_LEN {
            return None;
        }
        let mut out = [0u8; WORD_LEN];
        for (i, b) in s.bytes().enumerate() {
            if !b.is_ascii_alphabetic() {
                return None;
            }
            out[i] = b.to_ascii_uppercase();
        }
        Some(Self(out))
    }

    /// The raw uppercase bytes.
    pub fn bytes(&self) -> [u8; WORD_LEN] {
        self.0
    }

    pub fn as_str(&self) -> &str {
        // Invariant: only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("?????")
    }
}

impl fmt::Display for Letters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Letters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Letters({})", self.as_str())
    }
}

/// Per-position feedback for one guess against one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Right letter, right position.
    Green,
    /// Letter present elsewhere in the answer.
    Yellow,
    /// Letter absent (or all its occurrences already consumed).
    Black,
}

/// Marks for a full guess row.
pub type Marks = [Mark; WORD_LEN];

/// Opaque id of a player (doubles as their private chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i64);

impl PlayerId {
    /// The private chat this player is reached at.
    pub fn chat(&self) -> ChatId {
        ChatId(self.0)
    }
}

/// Opaque id of a group chat hosting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub i64);

impl GroupId {
    pub fn chat(&self) -> ChatId {
        ChatId(self.0)
    }
}

/// Opaque id of any message recipient (group or private).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Where an inbound command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A group chat; sessions are created and bound here.
    Group(GroupId),
    /// An individual's private chat.
    Private(ChatId),
}

impl Origin {
    /// The chat replies to this command should go to.
    pub fn chat(&self) -> ChatId {
        match self {
            Origin::Group(g) => g.chat(),
            Origin::Private(c) => *c,
        }
    }
}

/// A joined participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Result of applying one valid guess to a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// No word matched; `word_added` is true when the drop cadence
    /// injected a fresh word this cycle.
    Normal { word_added: bool },
    /// A freshly drawn word matched; its answer propagates to opponents.
    CorrectFresh { answer: Letters },
    /// An inherited word matched; no further propagation.
    CorrectInherited,
    /// The stack was fully cleared.
    Win,
    /// The drop-cadence word found no free slot.
    Lose,
}

/// Result of a block landing on a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    Normal,
    /// The block found no free slot.
    Lose,
}

/// Rejected guesses, surfaced as a message to the guesser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessError {
    /// Not a 5-letter word from the valid list.
    InvalidWord,
    /// Already used within the last 10 guesses.
    RepeatedGuess,
}

impl fmt::Display for GuessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessError::InvalidWord => {
                f.write_str("Sorry, that's not in the word list. Try again.")
            }
            GuessError::RepeatedGuess => {
                f.write_str("You can't use a word in your recent guesses!")
            }
        }
    }
}

/// Rejected session commands, surfaced as a message to the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A non-ended session already exists for this group.
    DuplicateSession,
    /// Session creation attempted outside a group chat.
    NotAGroup,
    /// Command requires a running session in its lobby phase.
    NotInLobby,
    /// Join or begin attempted after the game already began.
    AlreadyBegun,
    /// The sender joined this session already.
    AlreadyJoined,
    /// The sender is not a joined (or still active) player.
    NotAPlayer,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::DuplicateSession => {
                f.write_str("Sorry, you can't start a game when there is one already running!")
            }
            SessionError::NotAGroup => {
                f.write_str("Sorry, you can't start a game when not in a group chat!")
            }
            SessionError::NotInLobby => {
                f.write_str("You must first start a game using /startgame!")
            }
            SessionError::AlreadyBegun => f.write_str("The game has already begun!"),
            SessionError::AlreadyJoined => f.write_str("You're already in the game!"),
            SessionError::NotAPlayer => f.write_str("You're not in the game!"),
        }
    }
}

impl std::error::Error for GuessError {}
impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_parse_canonicalizes() {
        let w = Letters::parse("  crane ").unwrap();
        assert_eq!(w.as_str(), "CRANE");
        assert_eq!(w, Letters::parse("CRANE").unwrap());
    }

    #[test]
    fn test_letters_parse_rejects_bad_input() {
        assert!(Letters::parse("CRAN").is_none());
        assert!(Letters::parse("CRANES").is_none());
        assert!(Letters::parse("CR4NE").is_none());
        assert!(Letters::parse("").is_none());
    }

    #[test]
    fn test_capacities_non_decreasing() {
        for n in 1..MAX_PLAYERS {
            assert!(CAPACITIES[n] <= CAPACITIES[n + 1]);
        }
    }
}
