//! The authoritative rule engine for one Tactix game.
//!
//! One [`Engine`] lives inside each room and is the single source of
//! truth for that game: board contents, whose turn it is, and whether
//! the game has reached a terminal state. It performs no I/O and knows
//! nothing about connections or rooms — the registry owns it, the
//! coordinator drives it.
//!
//! # Key types
//!
//! - [`Engine`] — board, turn, activity flag, seated participants
//! - [`MoveOutcome`] — accepted (with the applied move) or rejected
//! - [`Verdict`] — how a finished game ended (win or draw)

mod engine;

pub use engine::{AppliedMove, Engine, MoveOutcome, Verdict};
