use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{MediaLocator, Volume};

/// Soft failures: reported to whoever asked for playback, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("no media locator given")]
    EmptyLocator,

    #[error("no audio player available (tried: {tried})")]
    PlayerUnavailable { tried: String },

    #[error("failed to launch {player}: {message}")]
    Spawn { player: String, message: String },

    #[error("{player} stopped right away, the source may be unreachable or unsupported")]
    PlayerExited { player: String },
}

#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Short sound played at phase boundaries.
    async fn play_cue(&self) -> Result<(), MediaError>;

    /// Starts looping playback of `locator` and returns its handle.
    async fn start_loop(
        &self,
        locator: &MediaLocator,
        volume: Volume,
    ) -> Result<Box<dyn Playback>, MediaError>;

    fn backend_name(&self) -> &'static str;
}

#[async_trait]
pub trait Playback: Send {
    async fn stop(&mut self);

    /// False once the underlying player has gone away.
    fn is_active(&mut self) -> bool;
}
