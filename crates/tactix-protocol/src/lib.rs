//! Wire protocol for Tactix.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`ClientId`], [`RoomCode`], [`Mark`], [`Participant`]) —
//!   the identities and game atoms that appear in messages.
//! - **Events** ([`ClientEvent`], [`ServerEvent`], [`Recipient`]) — the
//!   messages that travel on the wire, with a JSON shape the browser
//!   client renders from directly.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how events are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and the
//! session coordinator (room state). It doesn't know about connections
//! or rooms — it only knows how to serialize and deserialize events.
//!
//! ```text
//! Transport (bytes) → Protocol (ClientEvent/ServerEvent) → Coordinator
//! ```

mod codec;
mod error;
mod events;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use events::{ClientEvent, Recipient, ServerEvent, Winner};
pub use types::{Board, ClientId, Mark, Participant, RoomCode, CELL_COUNT};
