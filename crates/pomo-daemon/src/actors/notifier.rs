use std::sync::Arc;

use notify_rust::{Notification, Urgency};
use pomo_core::{
    AcknowledgmentStyle, AudioBackend, NotificationConfig, NotificationUrgency, PhaseCompleted,
    Translator,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

pub enum NotifierMessage {
    SetSoundEnabled { enabled: bool },
}

#[derive(Clone)]
pub struct NotifierHandle {
    sender: mpsc::Sender<NotifierMessage>,
}

impl NotifierHandle {
    pub async fn set_sound_enabled(
        &self,
        enabled: bool,
    ) -> Result<(), mpsc::error::SendError<NotifierMessage>> {
        self.sender
            .send(NotifierMessage::SetSoundEnabled { enabled })
            .await
    }
}

/// Human-readable acknowledgment for a phase boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgment {
    pub title: String,
    pub body: String,
}

impl Acknowledgment {
    pub fn for_event(event: &PhaseCompleted, translator: &Translator) -> Self {
        let key = event.acknowledgment_key();
        Self {
            title: translator.get(&format!("{}_title", key)),
            body: translator.get(&format!("{}_body", key)),
        }
    }
}

/// Subscribes to phase completions: plays the cue and shows the acknowledgment.
pub struct NotifierActor {
    receiver: mpsc::Receiver<NotifierMessage>,
    urgency: Urgency,
    style: AcknowledgmentStyle,
    sound_enabled: bool,
    translator: Translator,
    audio: Arc<dyn AudioBackend>,
}

impl NotifierActor {
    pub fn new(
        config: &NotificationConfig,
        translator: Translator,
        audio: Arc<dyn AudioBackend>,
    ) -> (Self, NotifierHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let urgency = match config.urgency {
            NotificationUrgency::Low => Urgency::Low,
            NotificationUrgency::Normal => Urgency::Normal,
            NotificationUrgency::Critical => Urgency::Critical,
        };

        let actor = Self {
            receiver,
            urgency,
            style: config.style,
            sound_enabled: config.sound_enabled,
            translator,
            audio,
        };

        let handle = NotifierHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self, mut events: broadcast::Receiver<PhaseCompleted>) {
        info!(style = ?self.style, sound = self.sound_enabled, "notifier actor started");

        loop {
            tokio::select! {
                Some(message) = self.receiver.recv() => {
                    match message {
                        NotifierMessage::SetSoundEnabled { enabled } => {
                            self.sound_enabled = enabled;
                            info!(enabled, "sound notifications toggled");
                        }
                    }
                }
                event = events.recv() => {
                    match event {
                        Ok(event) => self.on_phase_completed(&event),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "notifier lagged behind phase events");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        }

        debug!("notifier actor stopped");
    }

    fn on_phase_completed(&self, event: &PhaseCompleted) {
        if self.sound_enabled {
            self.play_cue();
        }

        let acknowledgment = Acknowledgment::for_event(event, &self.translator);
        match self.style {
            AcknowledgmentStyle::Desktop => self.show_desktop(&acknowledgment),
            AcknowledgmentStyle::Log => log_acknowledgment(&acknowledgment),
        }
    }

    fn play_cue(&self) {
        let audio = self.audio.clone();
        tokio::spawn(async move {
            if let Err(error) = audio.play_cue().await {
                debug!(%error, backend = audio.backend_name(), "phase cue not played");
            }
        });
    }

    fn show_desktop(&self, acknowledgment: &Acknowledgment) {
        match self
            .build_notification(&acknowledgment.title, &acknowledgment.body)
            .show()
        {
            Ok(_) => {
                debug!(title = %acknowledgment.title, "phase notification sent");
            }
            Err(err) => {
                error!(%err, "failed to show phase notification");
                log_acknowledgment(acknowledgment);
            }
        }
    }

    fn build_notification(&self, summary: &str, body: &str) -> Notification {
        let mut notification = Notification::new();
        notification
            .summary(summary)
            .body(body)
            .urgency(self.urgency)
            .appname("Pomo");
        notification
    }
}

fn log_acknowledgment(acknowledgment: &Acknowledgment) {
    info!(title = %acknowledgment.title, body = %acknowledgment.body, "phase acknowledgment");
}
