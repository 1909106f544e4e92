use async_trait::async_trait;
use pomo_core::{AudioBackend, MediaError, MediaLocator, Playback, Volume};

pub struct FailingAudioBackend {
    error: MediaError,
}

impl FailingAudioBackend {
    pub fn unavailable() -> Self {
        Self {
            error: MediaError::PlayerUnavailable {
                tried: "mpv, ffplay".to_string(),
            },
        }
    }

    pub fn unsupported_source() -> Self {
        Self {
            error: MediaError::PlayerExited {
                player: "mpv".to_string(),
            },
        }
    }

    pub fn with_error(error: MediaError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl AudioBackend for FailingAudioBackend {
    async fn play_cue(&self) -> Result<(), MediaError> {
        Err(self.error.clone())
    }

    async fn start_loop(
        &self,
        _locator: &MediaLocator,
        _volume: Volume,
    ) -> Result<Box<dyn Playback>, MediaError> {
        Err(self.error.clone())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_error() {
        let backend = FailingAudioBackend::unsupported_source();
        let locator = MediaLocator::parse("https://example.com/missing.mp3").unwrap();

        let result = backend.start_loop(&locator, Volume::default()).await;

        assert!(matches!(result, Err(MediaError::PlayerExited { .. })));
    }

    #[tokio::test]
    async fn cue_fails_too() {
        let backend = FailingAudioBackend::unavailable();

        let result = backend.play_cue().await;

        assert!(matches!(result, Err(MediaError::PlayerUnavailable { .. })));
    }
}
