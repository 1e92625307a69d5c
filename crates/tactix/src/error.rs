//! Unified error type for the Tactix server.

use tactix_protocol::ProtocolError;
use tactix_registry::RegistryError;
use tactix_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TactixError {
    /// A transport-level error (connection, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid event).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A registry-level error (room full, not found, code exhaustion).
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
