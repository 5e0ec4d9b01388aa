//! Guess scoring
//!
//! Scores one guess against one hidden word and folds the result into
//! the word's accumulated hint state. Matching is two-pass with letter
//! consumption: greens claim their letter instances first, then yellows
//! consume what remains of the answer, so a repeated guess letter can
//! never be credited more times than it occurs in the answer.

use crate::core::word::Word;
use crate::types::{Letters, Mark, Marks, WORD_LEN};

/// Score `guess` against `word`, updating the word's hints.
///
/// Returns None for blank or already-guessed slots; those are terminal
/// for scoring purposes until the slot is rotated out.
///
/// Yellow hints are bound to the position the letter occupies in the
/// *answer*, not in the guess, and enter the ordered hint list only if
/// no green or yellow hint already claims that answer position for the
/// same letter. A yellow hint is evicted once its position turns green.
pub fn score(word: &mut Word, guess: Letters) -> Option<Marks> {
    let answer = word.answer()?;
    if word.is_guessed() {
        return None;
    }

    let mut g: [Option<u8>; WORD_LEN] = guess.bytes().map(Some);
    let mut a: [Option<u8>; WORD_LEN] = answer.bytes().map(Some);
    let mut marks: Marks = [Mark::Black; WORD_LEN];

    // Pass 1: exact positions. Consuming both buffers keeps this letter
    // instance out of the yellow pass.
    for i in 0..WORD_LEN {
        let (Some(gl), Some(al)) = (g[i], a[i]) else {
            continue;
        };
        if gl == al {
            marks[i] = Mark::Green;
            g[i] = None;
            a[i] = None;
            word.set_green_hint(i, gl);
            if word.yellow_hint(i) == Some(gl) {
                word.clear_yellow_hint(i, gl);
            }
        }
    }

    // Pass 2: presence with unknown position. Each yellow consumes one
    // remaining occurrence from the answer buffer.
    for i in 0..WORD_LEN {
        let Some(gl) = g[i] else {
            continue;
        };
        if let Some(j) = a.iter().position(|&c| c == Some(gl)) {
            marks[i] = Mark::Yellow;
            a[j] = None;
            g[i] = None;
            if word.green_hint(j) != Some(gl) && word.yellow_hint(j) != Some(gl) {
                word.set_yellow_hint(j, gl);
            }
        }
    }

    if marks.iter().all(|&m| m == Mark::Green) {
        word.set_guessed();
    }
    word.set_last_marks(marks);
    Some(marks)
}
