use pomo_core::{PhaseCompleted, Statistics, StatisticsSnapshot};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

pub enum StatisticsMessage {
    GetSnapshot {
        reply: oneshot::Sender<StatisticsSnapshot>,
    },
}

#[derive(Clone)]
pub struct StatisticsHandle {
    sender: mpsc::Sender<StatisticsMessage>,
}

impl StatisticsHandle {
    pub async fn get_snapshot(&self) -> Option<StatisticsSnapshot> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(StatisticsMessage::GetSnapshot {
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }
}

pub struct StatisticsActor {
    receiver: mpsc::Receiver<StatisticsMessage>,
    statistics: Statistics,
}

impl StatisticsActor {
    pub fn new(statistics: Statistics) -> (Self, StatisticsHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let actor = Self {
            receiver,
            statistics,
        };

        let handle = StatisticsHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self, mut events: broadcast::Receiver<PhaseCompleted>) {
        loop {
            tokio::select! {
                Some(message) = self.receiver.recv() => {
                    match message {
                        StatisticsMessage::GetSnapshot { reply } => {
                            let _ = reply.send(self.statistics.snapshot());
                        }
                    }
                }
                event = events.recv() => {
                    match event {
                        Ok(event) => {
                            if self.statistics.record(&event) {
                                info!(
                                    completed_sessions = self.statistics.completed_sessions(),
                                    total_focus_hours = self.statistics.total_focus_hours(),
                                    "focus session recorded"
                                );
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "statistics missed phase events");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }
        }

        debug!("statistics actor stopped");
    }
}
