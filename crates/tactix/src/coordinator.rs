//! The session coordinator: one event in, a batch of events out.
//!
//! [`SessionCoordinator`] is the server's only decision-maker. It owns
//! the room registry and the connection index, consumes one
//! [`ClientEvent`] (or a synthesized disconnect) at a time, mutates
//! state, and returns the complete set of `(Recipient, ServerEvent)`
//! pairs the transport must deliver. It performs no I/O and knows
//! nothing about sockets, which keeps the whole ruleset testable
//! without a network.
//!
//! The API is synchronous. The server wraps the coordinator in a
//! `tokio::sync::Mutex` and processes one event at a time per process,
//! so every handler here runs atomically against shared state.

use tactix_engine::{MoveOutcome, Verdict};
use tactix_protocol::{ClientEvent, ClientId, Recipient, RoomCode, ServerEvent, Winner};
use tactix_registry::{ConnectionIndex, RegistryError, RoomRegistry};

/// Event dispatcher over the registry and connection index.
///
/// Stores are injected rather than constructed internally so tests can
/// pre-seed them.
pub struct SessionCoordinator {
    registry: RoomRegistry,
    index: ConnectionIndex,
}

impl SessionCoordinator {
    /// Creates a coordinator over the given stores.
    pub fn new(registry: RoomRegistry, index: ConnectionIndex) -> Self {
        Self { registry, index }
    }

    /// Processes one inbound event from a connection.
    ///
    /// Returns every event to deliver, paired with its audience. An
    /// empty batch means the event was ignored (illegal move, or an
    /// event from a connection bound to no room).
    pub fn handle_event(
        &mut self,
        client: ClientId,
        event: ClientEvent,
    ) -> Vec<(Recipient, ServerEvent)> {
        match event {
            ClientEvent::CreateRoom(name) => self.create_room(client, name),
            ClientEvent::JoinRoom {
                room_code,
                display_name,
            } => self.join_room(client, room_code, display_name),
            ClientEvent::MakeMove(index) => self.make_move(client, index),
            ClientEvent::ResetGame => self.reset_game(client),
        }
    }

    /// Processes a connection drop.
    ///
    /// Unbinds the connection and removes it from its room. Remaining
    /// members are told who left; if the room emptied it is gone and
    /// nothing is sent.
    pub fn handle_disconnect(&mut self, client: ClientId) -> Vec<(Recipient, ServerEvent)> {
        let Some(binding) = self.index.unbind(client) else {
            tracing::debug!(%client, "disconnect from connection with no room");
            return Vec::new();
        };

        let code = binding.room_code;
        let Some(departure) = self.registry.remove_member(&code, client) else {
            return Vec::new();
        };

        if departure.destroyed {
            return Vec::new();
        }

        vec![(
            Recipient::Room(code),
            ServerEvent::PlayerDisconnected {
                player_name: departure.departed_name,
            },
        )]
    }

    /// Current membership of a room, for transport fan-out. Empty when
    /// the room doesn't exist.
    pub fn room_members(&self, code: &RoomCode) -> Vec<ClientId> {
        self.registry
            .room(code)
            .map(|room| room.members().to_vec())
            .unwrap_or_default()
    }

    // -- Event handlers ---------------------------------------------------

    fn create_room(&mut self, client: ClientId, name: String) -> Vec<(Recipient, ServerEvent)> {
        let code = match self.registry.create_room(client, &name) {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(%client, error = %e, "room creation failed");
                return Vec::new();
            }
        };

        self.index.bind(client, code.clone(), name.clone());

        let player_count = self.room_members(&code).len();
        vec![
            (
                Recipient::Client(client),
                ServerEvent::RoomCreated {
                    room_code: code.clone(),
                    player_symbol: tactix_protocol::Mark::X,
                    player_name: name.clone(),
                },
            ),
            (
                Recipient::Room(code),
                ServerEvent::PlayerJoined {
                    player_name: name,
                    player_count,
                },
            ),
        ]
    }

    fn join_room(
        &mut self,
        client: ClientId,
        code: RoomCode,
        name: String,
    ) -> Vec<(Recipient, ServerEvent)> {
        let joined = match self.registry.join_room(&code, client, &name) {
            Ok(joined) => joined,
            Err(e @ RegistryError::NotFound(_)) => {
                tracing::debug!(%client, room = %code, error = %e, "join rejected");
                return vec![(
                    Recipient::Client(client),
                    ServerEvent::Error("room not found".into()),
                )];
            }
            Err(e @ RegistryError::RoomFull(_)) => {
                tracing::debug!(%client, room = %code, error = %e, "join rejected");
                return vec![(
                    Recipient::Client(client),
                    ServerEvent::Error("room full".into()),
                )];
            }
            Err(e) => {
                tracing::error!(%client, room = %code, error = %e, "join failed");
                return Vec::new();
            }
        };

        self.index.bind(client, code.clone(), name.clone());

        // Room exists: join_room just succeeded on it.
        let Some(room) = self.registry.room(&code) else {
            return Vec::new();
        };
        let engine = room.engine();

        vec![
            (
                Recipient::Client(client),
                ServerEvent::RoomJoined {
                    room_code: code.clone(),
                    player_symbol: joined.mark,
                    player_name: name.clone(),
                    opponent_name: joined.opponent_name,
                },
            ),
            (
                Recipient::RoomExcept(code.clone(), client),
                ServerEvent::OpponentJoined {
                    opponent_name: name,
                },
            ),
            (
                Recipient::Room(code),
                ServerEvent::GameState {
                    board: engine.board(),
                    current_player: engine.turn(),
                    game_active: engine.is_active(),
                    players: engine.participants().clone(),
                },
            ),
        ]
    }

    fn make_move(&mut self, client: ClientId, index: usize) -> Vec<(Recipient, ServerEvent)> {
        let Some(binding) = self.index.lookup(client) else {
            tracing::debug!(%client, index, "move from connection with no room");
            return Vec::new();
        };
        let code = binding.room_code.clone();

        let Some(room) = self.registry.room_mut(&code) else {
            tracing::debug!(%client, room = %code, "move against vanished room");
            return Vec::new();
        };

        let applied = match room.engine_mut().attempt_move(index, client) {
            MoveOutcome::Accepted(applied) => applied,
            MoveOutcome::Rejected => {
                tracing::debug!(%client, room = %code, index, "illegal move ignored");
                return Vec::new();
            }
        };

        let engine = room.engine();
        let board = engine.board();

        let mut batch = vec![(
            Recipient::Room(code.clone()),
            ServerEvent::MoveMade {
                index: applied.index,
                player: applied.mark,
                board,
                current_player: engine.turn(),
                game_active: engine.is_active(),
            },
        )];

        if let Some(verdict) = applied.verdict {
            let (winner, winner_name) = match verdict {
                Verdict::Win(mark) => (
                    Winner::from(mark),
                    engine.name_of(mark).map(str::to_string),
                ),
                Verdict::Draw => (Winner::Draw, None),
            };
            tracing::info!(room = %code, ?winner, "game over");
            batch.push((
                Recipient::Room(code),
                ServerEvent::GameOver {
                    winner,
                    winner_name,
                    board,
                },
            ));
        }

        batch
    }

    fn reset_game(&mut self, client: ClientId) -> Vec<(Recipient, ServerEvent)> {
        let Some(binding) = self.index.lookup(client) else {
            tracing::debug!(%client, "reset from connection with no room");
            return Vec::new();
        };
        let code = binding.room_code.clone();

        self.registry.reset_game(&code);

        let Some(room) = self.registry.room(&code) else {
            return Vec::new();
        };
        let engine = room.engine();

        vec![(
            Recipient::Room(code),
            ServerEvent::GameReset {
                board: engine.board(),
                current_player: engine.turn(),
                game_active: engine.is_active(),
            },
        )]
    }
}

impl Default for SessionCoordinator {
    fn default() -> Self {
        Self::new(RoomRegistry::new(), ConnectionIndex::new())
    }
}

// =========================================================================
// Tests
// =========================================================================
