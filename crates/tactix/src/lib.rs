//! # Tactix
//!
//! Server-authoritative session coordinator for two-player
//! tic-tac-toe over WebSockets.
//!
//! Clients create rooms addressed by short shareable codes, a second
//! player joins by code, and every rule — turn order, cell occupancy,
//! win and draw detection — is enforced on the server. Clients are
//! pure renderers of the events the server emits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tactix::prelude::*;
//!
//! # async fn run() -> Result<(), TactixError> {
//! let server = TactixServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod coordinator;
mod error;
mod handler;
mod server;

pub use coordinator::SessionCoordinator;
pub use error::TactixError;
pub use server::{TactixServer, TactixServerBuilder};

/// Common imports for server binaries and integration tests.
pub mod prelude {
    pub use crate::{SessionCoordinator, TactixError, TactixServer, TactixServerBuilder};
    pub use tactix_protocol::{
        Board, ClientEvent, ClientId, Codec, JsonCodec, Mark, Participant, Recipient, RoomCode,
        ServerEvent, Winner,
    };
    pub use tactix_registry::{ConnectionIndex, RoomRegistry};
}
