//! Pomo adapters - Infrastructure implementations
//!
//! This crate contains concrete implementations of the ports defined in pomo-core.
//! It bridges the domain logic with the audio players installed on the machine.

pub mod process_player;
pub mod testing;

pub use process_player::ProcessAudioBackend;
pub use testing::{FailingAudioBackend, StubAudioBackend};
