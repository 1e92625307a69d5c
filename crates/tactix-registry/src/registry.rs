//! Room registry: creates, tracks, and tears down rooms.

use std::collections::HashMap;

use rand::Rng;
use tactix_engine::Engine;
use tactix_protocol::{ClientId, Mark, RoomCode};

use crate::RegistryError;

/// A room pairs exactly this many connections around one game.
///
/// Named rather than compared inline so a future N-player ruleset is a
/// config change, not a rewrite.
pub const ROOM_CAPACITY: usize = 2;

/// Room codes are this many characters drawn from [`CODE_ALPHABET`].
const CODE_LEN: usize = 6;

/// Uppercase alphanumerics — what players read aloud to each other.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Retry budget for finding an unused code. With a 36^6 code space,
/// exhausting this means something is deeply wrong.
const MAX_CODE_ATTEMPTS: usize = 16;

/// One live room: its rule engine and its ordered membership.
///
/// The first member is the room creator and plays `X`; the second is
/// the joiner and plays `O`. The engine is owned exclusively by the
/// room and is destroyed with it.
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    engine: Engine,
    members: Vec<ClientId>,
}

impl Room {
    /// The room's code.
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// The rule engine for this room's game.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable access to the rule engine, for driving moves.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Members in join order.
    pub fn members(&self) -> &[ClientId] {
        &self.members
    }

    /// Returns `true` if the room holds [`ROOM_CAPACITY`] members.
    pub fn is_full(&self) -> bool {
        self.members.len() >= ROOM_CAPACITY
    }
}

/// What a successful join returns: the seat taken and who is waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joined {
    /// The mark assigned to the joiner (always `O` in a 2-seat room).
    pub mark: Mark,
    /// The creator's display name, for the joiner's UI.
    pub opponent_name: String,
}

/// What removing a member produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Display name of the player who left.
    pub departed_name: String,
    /// Members still in the room (empty when the room was destroyed).
    pub remaining: Vec<ClientId>,
    /// Whether the room was torn down because it became empty.
    pub destroyed: bool,
}

/// All live rooms, keyed by room code.
///
/// The registry owns room records and, transitively, their rule
/// engines. Entries are created by [`create_room`](Self::create_room)
/// and destroyed when the last member leaves — there is no other
/// garbage collection path.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, Room>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Opens a new room with `creator` seated as `X`.
    ///
    /// The engine starts inactive — the game cannot begin until a
    /// second participant joins.
    ///
    /// # Errors
    /// Returns [`RegistryError::CodeSpaceExhausted`] if no unused code
    /// is found within the retry budget (operational failure, not an
    /// expected outcome).
    pub fn create_room(
        &mut self,
        creator: ClientId,
        display_name: &str,
    ) -> Result<RoomCode, RegistryError> {
        let code = self.generate_code()?;

        let mut engine = Engine::new();
        engine.seat(creator, display_name, Mark::X, true);

        self.rooms.insert(
            code.clone(),
            Room {
                code: code.clone(),
                engine,
                members: vec![creator],
            },
        );

        tracing::info!(room = %code, client = %creator, "room created");
        Ok(code)
    }

    /// Adds `joiner` to an existing room as `O` and activates the game.
    ///
    /// # Errors
    /// - [`RegistryError::NotFound`] — no live room has this code
    /// - [`RegistryError::RoomFull`] — the room already seats
    ///   [`ROOM_CAPACITY`] players; membership and engine state are
    ///   left untouched
    pub fn join_room(
        &mut self,
        code: &RoomCode,
        joiner: ClientId,
        display_name: &str,
    ) -> Result<Joined, RegistryError> {
        let room = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| RegistryError::NotFound(code.clone()))?;

        if room.is_full() {
            return Err(RegistryError::RoomFull(code.clone()));
        }

        let opponent_name = room
            .engine
            .name_of(Mark::X)
            .unwrap_or_default()
            .to_string();

        room.engine.seat(joiner, display_name, Mark::O, false);
        room.members.push(joiner);
        room.engine.activate();

        tracing::info!(
            room = %code,
            client = %joiner,
            members = room.members.len(),
            "player joined, game active"
        );

        Ok(Joined {
            mark: Mark::O,
            opponent_name,
        })
    }

    /// Removes a connection from a room's membership.
    ///
    /// If the room becomes empty it is destroyed along with its
    /// engine. Otherwise the engine is deactivated — the game cannot
    /// continue one-sided, and with capacity fixed at two the room
    /// becomes a lobby-of-one.
    ///
    /// Returns `None` if the room doesn't exist or the connection
    /// wasn't a member.
    pub fn remove_member(&mut self, code: &RoomCode, client: ClientId) -> Option<Departure> {
        let room = self.rooms.get_mut(code)?;
        let position = room.members.iter().position(|m| *m == client)?;
        room.members.remove(position);

        let departed_name = room
            .engine
            .remove_participant(client)
            .map(|seat| seat.name)
            .unwrap_or_default();

        if room.members.is_empty() {
            self.rooms.remove(code);
            tracing::info!(room = %code, "room destroyed, last member left");
            return Some(Departure {
                departed_name,
                remaining: Vec::new(),
                destroyed: true,
            });
        }

        room.engine.deactivate();
        let remaining = room.members.clone();
        tracing::info!(
            room = %code,
            client = %client,
            remaining = remaining.len(),
            "member left, game paused"
        );

        Some(Departure {
            departed_name,
            remaining,
            destroyed: false,
        })
    }

    /// Clears the board of a room's game for a rematch. No-op if the
    /// room is absent.
    pub fn reset_game(&mut self, code: &RoomCode) {
        if let Some(room) = self.rooms.get_mut(code) {
            room.engine.reset();
            tracing::info!(room = %code, "game reset");
        }
    }

    /// Looks up a room by code.
    pub fn room(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    /// Mutable lookup, used by the coordinator to drive moves.
    pub fn room_mut(&mut self, code: &RoomCode) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Generates a code not currently in use by any live room.
    ///
    /// Codes are checked against live rooms: an unchecked collision
    /// would overwrite an active room's registry entry.
    fn generate_code(&self) -> Result<RoomCode, RegistryError> {
        let mut rng = rand::rng();
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code: String = (0..CODE_LEN)
                .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
                .collect();
            let code = RoomCode::new(code);
            if !self.rooms.contains_key(&code) {
                return Ok(code);
            }
        }
        tracing::error!(
            attempts = MAX_CODE_ATTEMPTS,
            rooms = self.rooms.len(),
            "room code generation exhausted retry budget"
        );
        Err(RegistryError::CodeSpaceExhausted(MAX_CODE_ATTEMPTS))
    }
}

// =========================================================================
// Tests
// =========================================================================
