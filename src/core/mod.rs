//! Core module - pure game logic
//!
//! Scoring, word slots, stacks, and the shared word bank. No session
//! orchestration, timers, or messaging here.

pub mod feedback;
pub mod rng;
pub mod stack;
pub mod word;
pub mod wordbank;

// Re-export commonly used types
pub use feedback::score;
pub use stack::WordStack;
pub use word::Word;
pub use wordbank::WordBank;
