use async_trait::async_trait;
use pomo_core::{AudioBackend, MediaError, MediaLocator, Playback, Volume};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records every request and pretends playback always works.
#[derive(Default)]
pub struct StubAudioBackend {
    cues: AtomicUsize,
    started: Mutex<Vec<(MediaLocator, Volume)>>,
    active: Mutex<Vec<Arc<AtomicBool>>>,
}

impl StubAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cue_count(&self) -> usize {
        self.cues.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> Vec<(MediaLocator, Volume)> {
        self.started.lock().unwrap().clone()
    }

    pub fn active_playbacks(&self) -> usize {
        self.active
            .lock()
            .unwrap()
            .iter()
            .filter(|flag| flag.load(Ordering::SeqCst))
            .count()
    }
}

#[async_trait]
impl AudioBackend for StubAudioBackend {
    async fn play_cue(&self) -> Result<(), MediaError> {
        self.cues.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn start_loop(
        &self,
        locator: &MediaLocator,
        volume: Volume,
    ) -> Result<Box<dyn Playback>, MediaError> {
        self.started.lock().unwrap().push((locator.clone(), volume));

        let flag = Arc::new(AtomicBool::new(true));
        self.active.lock().unwrap().push(flag.clone());

        Ok(Box::new(StubPlayback { active: flag }))
    }

    fn backend_name(&self) -> &'static str {
        "stub"
    }
}

struct StubPlayback {
    active: Arc<AtomicBool>,
}

#[async_trait]
impl Playback for StubPlayback {
    async fn stop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn is_active(&mut self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_cues() {
        let backend = StubAudioBackend::new();

        backend.play_cue().await.unwrap();
        backend.play_cue().await.unwrap();

        assert_eq!(backend.cue_count(), 2);
    }

    #[tokio::test]
    async fn tracks_started_and_stopped_playback() {
        let backend = StubAudioBackend::new();
        let locator = MediaLocator::parse("lofi.mp3").unwrap();

        let mut playback = backend
            .start_loop(&locator, Volume::new(0.5))
            .await
            .unwrap();
        assert_eq!(backend.active_playbacks(), 1);

        playback.stop().await;

        assert!(!playback.is_active());
        assert_eq!(backend.active_playbacks(), 0);
        assert_eq!(backend.started(), vec![(locator, Volume::new(0.5))]);
    }
}
