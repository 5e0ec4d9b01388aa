//! Wordle Battle engine
//!
//! A multiplayer word-guessing battle: each player clears a stack of
//! hidden 5-letter words before it overflows, while correct guesses
//! push inherited words onto everyone else's stack.
//!
//! `core` is pure game logic, `session` orchestrates players and
//! timers, and `adapter` holds the Transport/Scheduler boundary plus
//! the chat rendering.

pub mod adapter;
pub mod core;
pub mod session;
pub mod types;
