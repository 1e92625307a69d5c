//! Room lifecycle and connection bookkeeping for Tactix.
//!
//! Two stores live here, both plain in-memory maps with no
//! persistence — they are discarded on process restart:
//!
//! - [`RoomRegistry`] — room code → room record (rule engine +
//!   ordered membership). Owns rooms exclusively: create, join,
//!   teardown.
//! - [`ConnectionIndex`] — connection → current room code + display
//!   name, the O(1) reverse lookup used when a connection emits an
//!   event or drops. Holds back-references only; an index entry never
//!   keeps a room alive.
//!
//! Neither store is thread-safe by itself. They are owned by the
//! session coordinator and serialized behind a single lock at a
//! higher level, which keeps every event handler atomic with respect
//! to shared state.

mod error;
mod index;
mod registry;

pub use error::RegistryError;
pub use index::{Binding, ConnectionIndex};
pub use registry::{Departure, Joined, Room, RoomRegistry, ROOM_CAPACITY};
