//! Identity types and game atoms shared across the stack.
//!
//! Everything here is wire-visible: these types appear inside
//! [`ServerEvent`](crate::ServerEvent) payloads and must keep a stable
//! JSON representation, since the client renders directly from them.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Number of cells on the board. The ruleset is a fixed 3x3 grid.
pub const CELL_COUNT: usize = 9;

/// The board as the wire sees it: nine slots, each empty or holding a
/// player's mark. Serializes as a 9-element array of `"X"`/`"O"`/null.
pub type Board = [Option<Mark>; CELL_COUNT];

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a client connection.
///
/// Newtype over `u64` so a client id can't be confused with a cell
/// index or any other number. Assigned by the transport when the
/// connection is accepted, and used as the key for per-player state
/// everywhere above it — there is no separate account identity in
/// this system.
///
/// `#[serde(transparent)]` makes `ClientId(42)` serialize as plain
/// `42`, which also lets it act as a JSON object key in the
/// `gameState.players` map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// The short code that addresses a room.
///
/// Six uppercase alphanumeric characters, generated randomly by the
/// registry. Opaque to clients — they only display it and echo it back
/// in a `joinRoom` event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Wraps an existing code string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Marks and participants
// ---------------------------------------------------------------------------

/// One of the two symbols a player is assigned.
///
/// The mark doubles as turn order: the room creator always plays `X`
/// and `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("X"),
            Self::O => f.write_str("O"),
        }
    }
}

/// A player's seat in a game: display name plus assigned mark.
///
/// Appears as the values of the `gameState.players` object, where the
/// mark is exposed under the `symbol` key. The `creator` flag is
/// server-side bookkeeping (first entrant of the room) and never goes
/// on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name chosen by the player.
    pub name: String,
    /// Which mark this player moves with.
    #[serde(rename = "symbol")]
    pub mark: Mark,
    /// Whether this player created the room (and so holds `X`).
    #[serde(skip)]
    pub creator: bool,
}

// =========================================================================
// Tests
// =========================================================================
