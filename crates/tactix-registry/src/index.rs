//! Connection index: reverse lookup from connection to room.

use std::collections::HashMap;

use tactix_protocol::{ClientId, RoomCode};

/// What the index knows about a bound connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The room this connection currently belongs to.
    pub room_code: RoomCode,
    /// The display name the player registered with.
    pub display_name: String,
}

/// Maps each live connection to its current room and display name.
///
/// Pure mapping operations, no business rules: entries are created on
/// a successful create/join and destroyed when the disconnect event is
/// processed. A connection is in at most one room at a time.
#[derive(Debug, Default)]
pub struct ConnectionIndex {
    entries: HashMap<ClientId, Binding>,
}

impl ConnectionIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Associates a connection with a room and display name.
    pub fn bind(&mut self, client: ClientId, room_code: RoomCode, display_name: impl Into<String>) {
        self.entries.insert(
            client,
            Binding {
                room_code,
                display_name: display_name.into(),
            },
        );
    }

    /// Looks up the binding for a connection, if any.
    pub fn lookup(&self, client: ClientId) -> Option<&Binding> {
        self.entries.get(&client)
    }

    /// Removes a connection's binding, returning it if present.
    pub fn unbind(&mut self, client: ClientId) -> Option<Binding> {
        self.entries.remove(&client)
    }

    /// Number of bound connections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no connections are bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
