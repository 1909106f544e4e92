use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use pomo_core::{DurationChange, PhaseCompleted, PomodoroTimer, TimerSnapshot};

const TICK_PERIOD: Duration = Duration::from_secs(1);

pub enum TimerMessage {
    Start {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    Pause {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    Reset {
        reply: oneshot::Sender<TimerSnapshot>,
    },
    SetFocusDuration {
        minutes: i64,
        reply: oneshot::Sender<(DurationChange, TimerSnapshot)>,
    },
    SetBreakDuration {
        minutes: i64,
        reply: oneshot::Sender<(DurationChange, TimerSnapshot)>,
    },
    GetStatus {
        reply: oneshot::Sender<TimerSnapshot>,
    },
}

/// Sole owner of the countdown. Phase completions go out on the broadcast
/// channel; nothing flows back into the timer from its subscribers.
pub struct TimerActor {
    receiver: mpsc::Receiver<TimerMessage>,
    timer: PomodoroTimer,
    events: broadcast::Sender<PhaseCompleted>,
}

#[derive(Clone)]
pub struct TimerHandle {
    sender: mpsc::Sender<TimerMessage>,
}

impl TimerHandle {
    pub async fn start(&self) -> Option<TimerSnapshot> {
        self.request(|reply| TimerMessage::Start { reply }).await
    }

    pub async fn pause(&self) -> Option<TimerSnapshot> {
        self.request(|reply| TimerMessage::Pause { reply }).await
    }

    pub async fn reset(&self) -> Option<TimerSnapshot> {
        self.request(|reply| TimerMessage::Reset { reply }).await
    }

    pub async fn set_focus_duration(&self, minutes: i64) -> Option<(DurationChange, TimerSnapshot)> {
        self.request(|reply| TimerMessage::SetFocusDuration { minutes, reply })
            .await
    }

    pub async fn set_break_duration(&self, minutes: i64) -> Option<(DurationChange, TimerSnapshot)> {
        self.request(|reply| TimerMessage::SetBreakDuration { minutes, reply })
            .await
    }

    pub async fn get_status(&self) -> Option<TimerSnapshot> {
        self.request(|reply| TimerMessage::GetStatus { reply }).await
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TimerMessage,
    ) -> Option<T> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender.send(message(reply_sender)).await.ok()?;
        reply_receiver.await.ok()
    }
}

impl TimerActor {
    pub fn new(
        timer: PomodoroTimer,
        events: broadcast::Sender<PhaseCompleted>,
    ) -> (Self, TimerHandle) {
        let (sender, receiver) = mpsc::channel(32);

        let actor = Self {
            receiver,
            timer,
            events,
        };

        let handle = TimerHandle { sender };

        (actor, handle)
    }

    pub async fn run(mut self) {
        let mut tick_interval = tokio::time::interval(TICK_PERIOD);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                Some(message) = self.receiver.recv() => {
                    if self.handle_message(message) {
                        // first tick one full period after start
                        tick_interval.reset();
                    }
                }
                _ = tick_interval.tick(), if self.timer.is_running() => {
                    self.handle_tick();
                }
                else => break,
            }
        }

        debug!("timer actor stopped");
    }

    /// Returns true when the countdown just started running.
    fn handle_message(&mut self, message: TimerMessage) -> bool {
        match message {
            TimerMessage::Start { reply } => {
                let started = self.timer.start();
                if started {
                    info!(
                        phase = %self.timer.phase(),
                        remaining = self.timer.seconds_remaining(),
                        session = self.timer.session_index(),
                        "timer started"
                    );
                }
                let _ = reply.send(self.timer.snapshot());
                started
            }
            TimerMessage::Pause { reply } => {
                if self.timer.pause() {
                    info!(remaining = self.timer.seconds_remaining(), "timer paused");
                }
                let _ = reply.send(self.timer.snapshot());
                false
            }
            TimerMessage::Reset { reply } => {
                self.timer.reset();
                info!("timer reset");
                let _ = reply.send(self.timer.snapshot());
                false
            }
            TimerMessage::SetFocusDuration { minutes, reply } => {
                let change = self.timer.set_focus_duration(minutes);
                log_duration_change("focus", minutes, change);
                let _ = reply.send((change, self.timer.snapshot()));
                false
            }
            TimerMessage::SetBreakDuration { minutes, reply } => {
                let change = self.timer.set_break_duration(minutes);
                log_duration_change("break", minutes, change);
                let _ = reply.send((change, self.timer.snapshot()));
                false
            }
            TimerMessage::GetStatus { reply } => {
                let _ = reply.send(self.timer.snapshot());
                false
            }
        }
    }

    fn handle_tick(&mut self) {
        let Some(event) = self.timer.tick() else {
            return;
        };

        info!(
            ended = %event.ended,
            minutes = event.phase_minutes,
            session = event.session_index,
            next_phase = %event.starting(),
            "phase completed"
        );

        if let Err(error) = self.events.send(event) {
            debug!(%error, "no subscriber for phase events");
        }
    }
}

fn log_duration_change(phase: &str, requested: i64, change: DurationChange) {
    match change {
        DurationChange::Applied { minutes } => {
            info!(phase, requested, minutes, "duration updated");
        }
        DurationChange::Ignored => {
            debug!(phase, requested, "duration change ignored while running");
        }
    }
}
