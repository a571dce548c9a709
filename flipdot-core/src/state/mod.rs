//! Session lifecycle state machine
//!
//! Tracks what the sign has been told, not what it is doing: the sign
//! never answers, so the state is a record of the last lifecycle sequence
//! sent. Transitions are explicit, finite and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::SessionState;
