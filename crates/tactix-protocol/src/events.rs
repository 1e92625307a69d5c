//! The inbound and outbound event vocabulary.
//!
//! Every frame on the wire is one event, encoded as a JSON object of
//! the shape `{"event": "<name>", "data": <payload>}`. Field names and
//! presence are part of the client contract and must stay stable —
//! the browser UI renders straight from these payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Board, ClientId, Mark, Participant, RoomCode};

// ---------------------------------------------------------------------------
// Recipient — who should receive an outbound event?
// ---------------------------------------------------------------------------

/// Specifies who an outbound event is for.
///
/// The session coordinator returns `(Recipient, ServerEvent)` pairs;
/// the transport layer resolves each recipient against current room
/// membership and delivers accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Send to one specific connection (e.g. the requester).
    Client(ClientId),

    /// Send to every member of the room.
    Room(RoomCode),

    /// Send to every member of the room except one.
    /// Used for "your opponent joined" style notices.
    RoomExcept(RoomCode, ClientId),
}

// ---------------------------------------------------------------------------
// ClientEvent — what clients send
// ---------------------------------------------------------------------------

/// An event sent by a client.
///
/// `#[serde(tag = "event", content = "data")]` produces adjacently
/// tagged JSON, e.g. `{"event": "makeMove", "data": 4}`. Events with
/// no payload (`resetGame`) omit the `data` field entirely.
///
/// Note there is no disconnect event here: disconnection is
/// transport-originated and synthesized by the connection handler, not
/// parsed off the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// "Open a new room for me." Payload is the display name.
    CreateRoom(String),

    /// "Put me in this room."
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_code: RoomCode,
        display_name: String,
    },

    /// "Place my mark at this cell." Payload is a cell index, 0..8.
    /// Out-of-range indices are not a protocol error — the rule
    /// engine rejects them like any other illegal move.
    MakeMove(usize),

    /// "Clear the board and start over." No payload.
    ResetGame,
}

// ---------------------------------------------------------------------------
// Winner — the terminal outcome as the client sees it
// ---------------------------------------------------------------------------

/// The `winner` field of a `gameOver` event: `"X"`, `"O"`, or `"draw"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

impl From<Mark> for Winner {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Self::X,
            Mark::O => Self::O,
        }
    }
}

// ---------------------------------------------------------------------------
// ServerEvent — what the server sends
// ---------------------------------------------------------------------------

/// An event sent by the server.
///
/// Same envelope shape as [`ClientEvent`]. Each variant corresponds to
/// exactly one event the client handles; the doc comment on each names
/// its audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// To the creator: "your room is open, here is its code."
    #[serde(rename_all = "camelCase")]
    RoomCreated {
        room_code: RoomCode,
        player_symbol: Mark,
        player_name: String,
    },

    /// To the room: "a player is now seated" with the member count.
    #[serde(rename_all = "camelCase")]
    PlayerJoined {
        player_name: String,
        player_count: usize,
    },

    /// To the joiner: "you're in", including who they're up against.
    #[serde(rename_all = "camelCase")]
    RoomJoined {
        room_code: RoomCode,
        player_symbol: Mark,
        player_name: String,
        opponent_name: String,
    },

    /// To everyone already in the room: "your opponent arrived."
    #[serde(rename_all = "camelCase")]
    OpponentJoined { opponent_name: String },

    /// To the room: full snapshot of the game. Sent when the game
    /// becomes active so both clients start from identical state.
    #[serde(rename_all = "camelCase")]
    GameState {
        board: Board,
        current_player: Mark,
        game_active: bool,
        players: BTreeMap<ClientId, Participant>,
    },

    /// To the room: an accepted move and the resulting state.
    #[serde(rename_all = "camelCase")]
    MoveMade {
        index: usize,
        player: Mark,
        board: Board,
        current_player: Mark,
        game_active: bool,
    },

    /// To the room: the game reached a terminal state. `winner_name`
    /// is `null` for a draw.
    #[serde(rename_all = "camelCase")]
    GameOver {
        winner: Winner,
        winner_name: Option<String>,
        board: Board,
    },

    /// To the room: the board was cleared for a rematch.
    #[serde(rename_all = "camelCase")]
    GameReset {
        board: Board,
        current_player: Mark,
        game_active: bool,
    },

    /// To the remaining members: a player's connection dropped.
    #[serde(rename_all = "camelCase")]
    PlayerDisconnected { player_name: String },

    /// To the requester only: a join attempt failed. The payload is
    /// one of the fixed reasons `"room not found"` or `"room full"`.
    Error(String),
}

// =========================================================================
// Tests
// =========================================================================
