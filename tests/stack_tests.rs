mod common;

use std::sync::Arc;

use common::{ANSWERS, MISSES};
use wordle_battle::core::{WordBank, WordStack};
use wordle_battle::types::{BlockOutcome, GuessError, GuessOutcome, Letters};

fn bank() -> Arc<WordBank> {
    Arc::new(WordBank::from_strs(MISSES, ANSWERS, 3))
}

/// A bank whose draw pool is already empty; blocks must carry their own
/// answers to land.
fn dry_bank() -> Arc<WordBank> {
    let valid: Vec<&str> = MISSES.iter().chain(ANSWERS).copied().collect();
    Arc::new(WordBank::from_strs(&valid, &[], 3))
}

#[test]
fn missed_guesses_drop_a_word_every_third() {
    let mut stack = WordStack::new(9, bank());
    assert_eq!(stack.word_count(), 2);
    assert_eq!(stack.drop_countdown(), 3);

    for (i, miss) in MISSES.iter().take(9).enumerate() {
        let outcome = stack.apply_guess(miss).unwrap();
        let guesses = i as u32 + 1;
        assert_eq!(stack.guess_count(), guesses);
        assert_eq!(stack.drop_countdown(), 3 - guesses % 3);
        let expected = 2 + (guesses / 3) as usize;
        assert_eq!(stack.word_count(), expected, "after {guesses} misses");
        let added = guesses % 3 == 0;
        assert_eq!(outcome, GuessOutcome::Normal { word_added: added });
    }
}

#[test]
fn recent_guess_window_holds_ten_and_evicts_oldest() {
    let mut stack = WordStack::new(9, bank());
    for miss in MISSES.iter().take(11) {
        stack.apply_guess(miss).unwrap();
    }
    assert_eq!(stack.recent_guesses().count(), 10);

    // The very first guess has aged out and is usable again.
    assert!(stack.apply_guess(MISSES[0]).is_ok());
    // The second is still in the window.
    assert_eq!(
        stack.apply_guess(MISSES[2]),
        Err(GuessError::RepeatedGuess)
    );
}

#[test]
fn rejected_guesses_do_not_count_or_record() {
    let mut stack = WordStack::new(5, bank());
    assert_eq!(
        stack.apply_guess("XYZZY"),
        Err(GuessError::InvalidWord)
    );
    assert_eq!(stack.apply_guess("toolong"), Err(GuessError::InvalidWord));
    assert_eq!(stack.guess_count(), 0);
    assert_eq!(stack.recent_guesses().count(), 0);
}

#[test]
fn block_overflow_is_the_only_loss_trigger() {
    let mut stack = WordStack::new(5, bank());
    for _ in 0..3 {
        assert_eq!(stack.receive_block(None), BlockOutcome::Normal);
    }
    assert_eq!(stack.word_count(), stack.capacity());
    assert!(!stack.is_lost());

    assert_eq!(stack.receive_block(None), BlockOutcome::Lose);
    assert!(stack.is_lost());
    assert!(!stack.is_won());
    // The overflowing word is discarded, not stored.
    assert_eq!(stack.word_count(), 5);

    // Further blocks keep reporting the loss without mutating anything.
    assert_eq!(stack.receive_block(None), BlockOutcome::Lose);
    assert_eq!(stack.word_count(), 5);
}

#[test]
fn cadence_reports_no_word_added_when_pool_is_dry() {
    let mut stack = WordStack::new(5, dry_bank());
    stack.apply_guess(MISSES[0]).unwrap();
    stack.apply_guess(MISSES[1]).unwrap();
    // Third miss triggers the cadence, but nothing can be drawn.
    assert_eq!(
        stack.apply_guess(MISSES[2]).unwrap(),
        GuessOutcome::Normal { word_added: false }
    );
    assert_eq!(stack.word_count(), 0);
    assert!(!stack.is_lost());
}

#[test]
fn inherited_blocks_carry_their_answer() {
    let word = Letters::parse("CRANE").unwrap();
    let mut stack = WordStack::new(5, dry_bank());
    assert_eq!(stack.word_count(), 0);

    stack.receive_block(Some(word));
    assert_eq!(stack.word_count(), 1);
    let slot = &stack.slots()[0];
    assert!(slot.is_inherited());
    assert_eq!(slot.answer(), Some(word));
}

#[test]
fn one_cleared_word_per_guess_cycle() {
    // Two inherited copies of the same answer: one guess matches both,
    // but only one slot rotates out per cycle.
    let word = Letters::parse("CRANE").unwrap();
    let mut stack = WordStack::new(5, dry_bank());
    stack.receive_block(Some(word));
    stack.receive_block(Some(word));
    assert_eq!(stack.word_count(), 2);

    assert_eq!(
        stack.apply_guess("CRANE").unwrap(),
        GuessOutcome::CorrectInherited
    );
    assert_eq!(stack.word_count(), 1);
    assert_eq!(stack.guess_count(), 0, "hits never count as misses");

    // The leftover copy was already fully matched; the next cycle
    // rotates it out without rescoring, so even a miss wins here.
    assert_eq!(stack.apply_guess("ABBEY").unwrap(), GuessOutcome::Win);
    assert!(stack.is_won());
    assert_eq!(stack.word_count(), 0);
}

#[test]
fn clearing_a_fresh_word_reports_its_answer() {
    let mut stack = WordStack::new(5, bank());
    let answer = stack.slots()[0].answer().unwrap();
    match stack.apply_guess(answer.as_str()).unwrap() {
        GuessOutcome::CorrectFresh { answer: reported } => assert_eq!(reported, answer),
        other => panic!("expected CorrectFresh, got {other:?}"),
    }
    assert_eq!(stack.word_count(), 1);
    assert_eq!(stack.guess_count(), 0);
}

#[test]
fn clearing_the_last_word_wins() {
    let word = Letters::parse("SLATE").unwrap();
    let mut stack = WordStack::new(5, dry_bank());
    stack.receive_block(Some(word));
    assert_eq!(stack.apply_guess("SLATE").unwrap(), GuessOutcome::Win);
    assert!(stack.is_won());
    assert!(!stack.is_lost());
}

#[test]
fn active_words_stay_in_a_contiguous_prefix() {
    let mut stack = WordStack::new(5, bank());
    let answer = stack.slots()[0].answer().unwrap();
    stack.apply_guess(answer.as_str()).unwrap();

    let blank_from = stack.word_count();
    for (i, slot) in stack.slots().iter().enumerate() {
        assert_eq!(slot.is_blank(), i >= blank_from, "slot {i}");
    }
}
