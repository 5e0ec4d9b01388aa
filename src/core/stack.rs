//! Word stack - one player's play state
//!
//! A capacity-sized vector of word slots plus the guess bookkeeping
//! around it: recent-guess history, the drop-cadence counter, and the
//! terminal won/lost flags. Every live (non-blank, unguessed) word is
//! scored against each guess.

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, warn};

use crate::core::feedback::score;
use crate::core::word::Word;
use crate::core::wordbank::WordBank;
use crate::types::{
    BlockOutcome, GuessError, GuessOutcome, Letters, RECENT_GUESS_LIMIT, START_WORDS, WORD_DROP,
};

/// One player's stack of hidden words.
pub struct WordStack {
    capacity: usize,
    /// Active words always occupy a prefix; blanks trail. Rotation
    /// preserves this by removing from the middle and appending a blank.
    slots: Vec<Word>,
    word_count: usize,
    guess_count: u32,
    recent_guesses: VecDeque<Letters>,
    lost: bool,
    won: bool,
    bank: Arc<WordBank>,
}

impl WordStack {
    /// New stack with `START_WORDS` fresh words already drawn.
    pub fn new(capacity: usize, bank: Arc<WordBank>) -> Self {
        let mut stack = Self {
            capacity,
            slots: (0..capacity).map(|_| Word::blank()).collect(),
            word_count: 0,
            guess_count: 0,
            recent_guesses: VecDeque::with_capacity(RECENT_GUESS_LIMIT),
            lost: false,
            won: false,
            bank,
        };
        for _ in 0..START_WORDS {
            stack.add_word(None);
        }
        stack
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn slots(&self) -> &[Word] {
        &self.slots
    }

    /// Most recent guesses, oldest first (max 10).
    pub fn recent_guesses(&self) -> impl DoubleEndedIterator<Item = &Letters> + ExactSizeIterator {
        self.recent_guesses.iter()
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Guesses left until the cadence drops the next word.
    pub fn drop_countdown(&self) -> u32 {
        WORD_DROP - (self.guess_count % WORD_DROP)
    }

    /// Promote the first blank slot to an active word. Returns whether
    /// a word actually landed.
    ///
    /// With `inherited` the given answer is reused and flagged as
    /// propagated; otherwise a fresh answer is drawn from the pool.
    /// If no blank slot exists the stack is lost and nothing else
    /// changes. This is the sole loss trigger.
    pub fn add_word(&mut self, inherited: Option<Letters>) -> bool {
        if self.word_count == self.capacity {
            self.lost = true;
            return false;
        }
        let Some(idx) = self.slots.iter().position(Word::is_blank) else {
            // word_count < capacity guarantees a blank slot exists.
            return false;
        };
        let word = match inherited {
            Some(answer) => Word::inherited(answer),
            None => match self.bank.draw() {
                Some(answer) => Word::fresh(answer),
                None => {
                    warn!("answer pool exhausted; no word added");
                    return false;
                }
            },
        };
        self.slots[idx] = word;
        self.word_count += 1;
        true
    }

    /// Apply one guess to every live word.
    ///
    /// Rejections (not in the word list, repeated within the last 10)
    /// leave the stack untouched. At most one matched word rotates out
    /// per call; a leftover match from a simultaneous multi-word hit is
    /// picked up by a later call without being rescored.
    pub fn apply_guess(&mut self, raw: &str) -> Result<GuessOutcome, GuessError> {
        let guess = Letters::parse(raw).ok_or(GuessError::InvalidWord)?;
        if !self.bank.is_valid(&guess) {
            return Err(GuessError::InvalidWord);
        }
        if self.recent_guesses.contains(&guess) {
            return Err(GuessError::RepeatedGuess);
        }

        for word in &mut self.slots {
            score(word, guess);
        }

        self.recent_guesses.push_back(guess);
        if self.recent_guesses.len() > RECENT_GUESS_LIMIT {
            self.recent_guesses.pop_front();
        }

        // One rotation per guess cycle, first matched slot wins.
        if let Some(idx) = self.slots.iter().position(Word::is_guessed) {
            let matched = &self.slots[idx];
            let fresh = !matched.is_inherited();
            let answer = matched.answer();
            self.clear_word(idx);
            if self.word_count == 0 {
                self.won = true;
                return Ok(GuessOutcome::Win);
            }
            return Ok(match answer {
                Some(answer) if fresh => GuessOutcome::CorrectFresh { answer },
                _ => GuessOutcome::CorrectInherited,
            });
        }

        // The cadence counter only moves on a miss.
        self.guess_count += 1;
        if self.guess_count % WORD_DROP == 0 {
            let added = self.add_word(None);
            if self.lost {
                return Ok(GuessOutcome::Lose);
            }
            debug!("cadence drop after {} guesses", self.guess_count);
            return Ok(GuessOutcome::Normal { word_added: added });
        }
        Ok(GuessOutcome::Normal { word_added: false })
    }

    /// Rotate a matched slot out to the back as a fresh blank.
    fn clear_word(&mut self, idx: usize) {
        self.slots.remove(idx);
        self.slots.push(Word::blank());
        self.word_count -= 1;
    }

    /// A block lands on this stack (opponent propagation or idle drop).
    pub fn receive_block(&mut self, inherited: Option<Letters>) -> BlockOutcome {
        self.add_word(inherited);
        if self.lost {
            BlockOutcome::Lose
        } else {
            BlockOutcome::Normal
        }
    }
}
