//! Cross-guess hint accumulation, exercised through the public API.

use wordle_battle::core::{score, Word};
use wordle_battle::types::{Letters, Mark};

fn letters(s: &str) -> Letters {
    Letters::parse(s).unwrap()
}

#[test]
fn hints_accumulate_across_a_solving_run() {
    let mut word = Word::fresh(letters("SPLIT"));

    let marks = score(&mut word, letters("LIVES")).unwrap();
    assert_eq!(
        marks,
        [Mark::Yellow, Mark::Yellow, Mark::Black, Mark::Black, Mark::Yellow]
    );
    assert_eq!(word.ordered_hints(), b"LIS");

    // SPLAT greens S, P, L and the trailing T; the tentative yellow S
    // and L are promoted out of the hint list.
    score(&mut word, letters("SPLAT")).unwrap();
    assert_eq!(word.green_hints()[0], Some(b'S'));
    assert_eq!(word.green_hints()[4], Some(b'T'));
    assert_eq!(word.ordered_hints(), b"I");

    let marks = score(&mut word, letters("SPLIT")).unwrap();
    assert_eq!(marks, [Mark::Green; 5]);
    assert!(word.is_guessed());
    assert!(score(&mut word, letters("CRANE")).is_none());
}

#[test]
fn last_marks_track_the_most_recent_guess_only() {
    let mut word = Word::fresh(letters("MOUNT"));
    score(&mut word, letters("CRANE")).unwrap();
    let first = word.last_marks().unwrap();
    score(&mut word, letters("STONE")).unwrap();
    let second = word.last_marks().unwrap();
    assert_ne!(first, second);
    assert_eq!(second[3], Mark::Green, "N in place");
    assert_eq!(second[1], Mark::Yellow, "T present elsewhere");
}

#[test]
fn a_letter_hints_once_per_answer_position() {
    // ERASE holds two Es; SPEED's two stray Es bind to both, so E
    // appears twice in the hint list. S binds once.
    let mut word = Word::fresh(letters("ERASE"));
    score(&mut word, letters("SPEED")).unwrap();
    assert_eq!(word.ordered_hints(), b"SEE");

    // Re-guessing adds nothing: every position/letter pair is taken.
    score(&mut word, letters("SPEED")).unwrap();
    assert_eq!(word.ordered_hints(), b"SEE");
}

#[test]
fn credited_letters_never_exceed_answer_multiplicity() {
    let cases = [
        ("SPEED", "ERASE"),
        ("ERASE", "SPEED"),
        ("ABBEY", "BABES"),
        ("LLAMA", "LOYAL"),
        ("MOUNT", "CRANE"),
    ];
    for (answer, guess) in cases {
        let mut word = Word::fresh(letters(answer));
        let marks = score(&mut word, letters(guess)).unwrap();
        for letter in b'A'..=b'Z' {
            let credited = marks
                .iter()
                .zip(guess.bytes())
                .filter(|(m, b)| **m != Mark::Black && *b == letter)
                .count();
            let available = answer.bytes().filter(|&b| b == letter).count();
            assert!(
                credited <= available,
                "{guess} vs {answer}: {} credited {credited}x but answer has {available}",
                letter as char
            );
        }
    }
}
