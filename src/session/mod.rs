//! Session module - game orchestration
//!
//! Player lifecycle, cross-player propagation, timers, and the
//! process-wide registry of running games.

pub mod game;
pub mod registry;
pub mod timers;

pub use game::{GameSession, Phase};
pub use registry::SessionRegistry;
pub use timers::{TimerKind, TimerSet};
