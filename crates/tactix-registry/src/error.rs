//! Error types for the registry layer.

use tactix_protocol::RoomCode;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No live room has this code.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// The room already holds its full complement of players.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// Code generation failed to find an unused code within the retry
    /// budget. Not expected in practice given the code space; if it
    /// fires it indicates registry corruption or an absurd collision
    /// rate, and must be surfaced rather than swallowed.
    #[error("room code space exhausted after {0} attempts")]
    CodeSpaceExhausted(usize),
}
