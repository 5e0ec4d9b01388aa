//! Word slot state
//!
//! A stack is a fixed-length vector of these slots. A slot is either a
//! blank placeholder or holds one hidden answer together with the hint
//! state accumulated across guesses.

use crate::types::{Letters, Marks, WORD_LEN};

/// One slot in a player's stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    answer: Option<Letters>,
    inherited: bool,
    guessed: bool,
    /// Confirmed letter per guess position; fills in monotonically.
    green_hints: [Option<u8>; WORD_LEN],
    /// Tentative letter per *answer* position; cleared if that position
    /// later turns green for the same letter.
    yellow_hints: [Option<u8>; WORD_LEN],
    /// Letters known present, insertion-ordered. At most one entry per
    /// (answer position, letter) pair, so a letter repeats when it is
    /// yellow-bound to two different answer positions.
    ordered_hints: Vec<u8>,
    /// Marks from the most recent scoring, kept for rendering.
    last_marks: Option<Marks>,
}

impl Word {
    /// An empty placeholder slot.
    pub fn blank() -> Self {
        Self::with_answer(None, false)
    }

    /// A word freshly drawn from the answer pool.
    pub fn fresh(answer: Letters) -> Self {
        Self::with_answer(Some(answer), false)
    }

    /// A word propagated from another player's cleared word.
    pub fn inherited(answer: Letters) -> Self {
        Self::with_answer(Some(answer), true)
    }

    fn with_answer(answer: Option<Letters>, inherited: bool) -> Self {
        Self {
            answer,
            inherited,
            guessed: false,
            green_hints: [None; WORD_LEN],
            yellow_hints: [None; WORD_LEN],
            ordered_hints: Vec::new(),
            last_marks: None,
        }
    }

    pub fn answer(&self) -> Option<Letters> {
        self.answer
    }

    pub fn is_blank(&self) -> bool {
        self.answer.is_none()
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    pub fn is_guessed(&self) -> bool {
        self.guessed
    }

    pub fn green_hints(&self) -> &[Option<u8>; WORD_LEN] {
        &self.green_hints
    }

    pub fn ordered_hints(&self) -> &[u8] {
        &self.ordered_hints
    }

    pub fn last_marks(&self) -> Option<Marks> {
        self.last_marks
    }

    pub(crate) fn set_guessed(&mut self) {
        self.guessed = true;
    }

    pub(crate) fn set_last_marks(&mut self, marks: Marks) {
        self.last_marks = Some(marks);
    }

    pub(crate) fn set_green_hint(&mut self, pos: usize, letter: u8) {
        self.green_hints[pos] = Some(letter);
    }

    pub(crate) fn green_hint(&self, pos: usize) -> Option<u8> {
        self.green_hints[pos]
    }

    pub(crate) fn yellow_hint(&self, pos: usize) -> Option<u8> {
        self.yellow_hints[pos]
    }

    /// Bind a tentative yellow hint to an answer position.
    pub(crate) fn set_yellow_hint(&mut self, pos: usize, letter: u8) {
        self.yellow_hints[pos] = Some(letter);
        self.ordered_hints.push(letter);
    }

    /// Drop the yellow hint at a position that just went green.
    pub(crate) fn clear_yellow_hint(&mut self, pos: usize, letter: u8) {
        self.yellow_hints[pos] = None;
        if let Some(i) = self.ordered_hints.iter().position(|&c| c == letter) {
            self.ordered_hints.remove(i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_has_no_answer() {
        let w = Word::blank();
        assert!(w.is_blank());
        assert!(!w.is_inherited());
        assert!(!w.is_guessed());
        assert_eq!(w.answer(), None);
    }

    #[test]
    fn test_inherited_flag() {
        let ans = Letters::parse("CRANE").unwrap();
        assert!(!Word::fresh(ans).is_inherited());
        assert!(Word::inherited(ans).is_inherited());
    }
}
