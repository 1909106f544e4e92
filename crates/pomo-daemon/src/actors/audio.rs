use std::sync::Arc;

use pomo_core::{AudioBackend, MediaError, MediaLocator, Playback, Volume};
use pomo_protocol::AudioStatus;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

pub enum AudioMessage {
    Play {
        locator: String,
        volume: f32,
        reply: oneshot::Sender<Result<AudioStatus, MediaError>>,
    },
    Stop {
        reply: oneshot::Sender<AudioStatus>,
    },
    SetVolume {
        volume: f32,
        reply: oneshot::Sender<Result<AudioStatus, MediaError>>,
    },
    GetStatus {
        reply: oneshot::Sender<AudioStatus>,
    },
}

#[derive(Clone)]
pub struct AudioHandle {
    sender: mpsc::Sender<AudioMessage>,
}

impl AudioHandle {
    pub async fn play(&self, locator: String, volume: f32) -> Option<Result<AudioStatus, MediaError>> {
        self.request(|reply| AudioMessage::Play {
            locator,
            volume,
            reply,
        })
        .await
    }

    pub async fn stop(&self) -> Option<AudioStatus> {
        self.request(|reply| AudioMessage::Stop { reply }).await
    }

    pub async fn set_volume(&self, volume: f32) -> Option<Result<AudioStatus, MediaError>> {
        self.request(|reply| AudioMessage::SetVolume { volume, reply })
            .await
    }

    pub async fn get_status(&self) -> Option<AudioStatus> {
        self.request(|reply| AudioMessage::GetStatus { reply }).await
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> AudioMessage,
    ) -> Option<T> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender.send(message(reply_sender)).await.ok()?;
        reply_receiver.await.ok()
    }
}

/// Owns the looping background player. Failures stay here and never reach
/// the timer.
pub struct AudioActor {
    receiver: mpsc::Receiver<AudioMessage>,
    backend: Arc<dyn AudioBackend>,
    playback: Option<Box<dyn Playback>>,
    locator: Option<MediaLocator>,
    volume: Volume,
}

impl AudioActor {
    pub fn new(backend: Arc<dyn AudioBackend>, volume: Volume) -> (Self, AudioHandle) {
        let (sender, receiver) = mpsc::channel(16);

        let actor = Self {
            receiver,
            backend,
            playback: None,
            locator: None,
            volume,
        };

        (actor, AudioHandle { sender })
    }

    pub async fn run(mut self) {
        info!(backend = self.backend.backend_name(), "audio actor started");

        while let Some(message) = self.receiver.recv().await {
            match message {
                AudioMessage::Play {
                    locator,
                    volume,
                    reply,
                } => {
                    let result = self.play(&locator, Volume::new(volume)).await;
                    let _ = reply.send(result);
                }
                AudioMessage::Stop { reply } => {
                    self.stop_playback().await;
                    let _ = reply.send(self.status());
                }
                AudioMessage::SetVolume { volume, reply } => {
                    let result = self.set_volume(Volume::new(volume)).await;
                    let _ = reply.send(result);
                }
                AudioMessage::GetStatus { reply } => {
                    let _ = reply.send(self.status());
                }
            }
        }

        self.stop_playback().await;
        debug!("audio actor stopped");
    }

    async fn play(&mut self, raw: &str, volume: Volume) -> Result<AudioStatus, MediaError> {
        let locator = MediaLocator::parse(raw)?;
        self.stop_playback().await;
        self.volume = volume;

        match self.backend.start_loop(&locator, volume).await {
            Ok(playback) => {
                info!(%locator, volume = volume.value(), "background audio playing");
                self.playback = Some(playback);
                self.locator = Some(locator);
                Ok(self.status())
            }
            Err(error) => {
                warn!(%error, %locator, "background audio failed to start");
                self.locator = None;
                Err(error)
            }
        }
    }

    /// The player takes its volume at launch, so a change while playing
    /// restarts it on the same locator.
    async fn set_volume(&mut self, volume: Volume) -> Result<AudioStatus, MediaError> {
        self.volume = volume;

        let playing = self.is_playing();
        let locator = match &self.locator {
            Some(locator) if playing => locator.clone(),
            _ => {
                debug!(volume = volume.value(), "volume stored");
                return Ok(self.status());
            }
        };

        self.play(locator.as_str(), volume).await
    }

    async fn stop_playback(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            playback.stop().await;
            info!("background audio stopped");
        }
        self.locator = None;
    }

    fn is_playing(&mut self) -> bool {
        match self.playback.as_mut() {
            Some(playback) => playback.is_active(),
            None => false,
        }
    }

    fn status(&mut self) -> AudioStatus {
        if !self.is_playing() && self.playback.take().is_some() {
            debug!("background player exited on its own");
            self.locator = None;
        }

        AudioStatus {
            playing: self.playback.is_some(),
            volume: self.volume,
            locator: self.locator.as_ref().map(|locator| locator.to_string()),
        }
    }
}
