//! Word lists and the shared answer pool
//!
//! The valid set screens guesses; the answer pool hands out hidden
//! words. The pool is shared by every stack in the process and a drawn
//! answer is removed under the lock, so no two live words can ever hold
//! the same answer.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Mutex;

use log::{info, warn};

use crate::core::rng::SimpleRng;
use crate::types::Letters;

const EMBEDDED_ANSWERS: &str = include_str!("../resources/answers.txt");
const EMBEDDED_VALID: &str = include_str!("../resources/valid.txt");

/// Valid-guess dictionary plus the process-wide answer pool.
pub struct WordBank {
    valid: HashSet<Letters>,
    pool: Mutex<Vec<Letters>>,
    rng: Mutex<SimpleRng>,
}

impl WordBank {
    /// Bank backed by the embedded word lists.
    pub fn embedded(seed: u32) -> Self {
        let answers = parse_list(EMBEDDED_ANSWERS);
        let valid = parse_list(EMBEDDED_VALID);
        Self::from_words(valid, answers, seed)
    }

    /// Bank from explicit lists; answers are always accepted as guesses.
    pub fn from_words(
        valid: impl IntoIterator<Item = Letters>,
        answers: Vec<Letters>,
        seed: u32,
    ) -> Self {
        let mut valid: HashSet<Letters> = valid.into_iter().collect();
        valid.extend(answers.iter().copied());
        info!(
            "word bank ready: {} valid words, {} answers",
            valid.len(),
            answers.len()
        );
        Self {
            valid,
            pool: Mutex::new(answers),
            rng: Mutex::new(SimpleRng::new(seed)),
        }
    }

    /// Bank from `answers.txt` and `valid.txt` under `dir`.
    pub fn load_dir(dir: &Path, seed: u32) -> io::Result<Self> {
        let answers = load_words(&dir.join("answers.txt"))?;
        let valid = load_words(&dir.join("valid.txt")).unwrap_or_else(|e| {
            warn!("no valid-word list in {}: {e}; answers only", dir.display());
            Vec::new()
        });
        Ok(Self::from_words(valid, answers, seed))
    }

    /// Convenience for tests: build from string slices.
    pub fn from_strs(valid: &[&str], answers: &[&str], seed: u32) -> Self {
        let parse = |s: &&str| Letters::parse(s);
        Self::from_words(
            valid.iter().filter_map(parse).collect::<Vec<_>>(),
            answers.iter().filter_map(parse).collect(),
            seed,
        )
    }

    pub fn is_valid(&self, word: &Letters) -> bool {
        self.valid.contains(word)
    }

    /// Atomically draw a random answer out of the pool.
    ///
    /// Returns None once the pool is exhausted; a drawn answer is never
    /// handed out again.
    pub fn draw(&self) -> Option<Letters> {
        let mut pool = self.pool.lock().ok()?;
        if pool.is_empty() {
            return None;
        }
        let idx = {
            let mut rng = self.rng.lock().ok()?;
            rng.next_range(pool.len() as u32) as usize
        };
        Some(pool.swap_remove(idx))
    }

    /// Answers still available to be drawn.
    pub fn remaining(&self) -> usize {
        self.pool.lock().map(|p| p.len()).unwrap_or(0)
    }
}

fn parse_list(data: &str) -> Vec<Letters> {
    data.lines().filter_map(Letters::parse).collect()
}

/// Load words from a plain text file (one word per line).
fn load_words(path: &Path) -> io::Result<Vec<Letters>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(w) = Letters::parse(&line?) {
            words.push(w);
        }
    }
    info!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
