use std::time::Duration;

use pomo_core::QuoteRotator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant};
use tracing::debug;

const MINIMUM_ROTATION: Duration = Duration::from_secs(1);
const MAXIMUM_ROTATION: Duration = Duration::from_secs(24 * 60 * 60);

pub enum QuoteMessage {
    GetQuote { reply: oneshot::Sender<String> },
}

#[derive(Clone)]
pub struct QuoteHandle {
    sender: mpsc::Sender<QuoteMessage>,
}

impl QuoteHandle {
    pub async fn current(&self) -> Option<String> {
        let (reply_sender, reply_receiver) = oneshot::channel();
        self.sender
            .send(QuoteMessage::GetQuote {
                reply: reply_sender,
            })
            .await
            .ok()?;
        reply_receiver.await.ok()
    }
}

/// Rotates the motivational message on its own clock, unrelated to the timer.
pub struct QuoteActor {
    receiver: mpsc::Receiver<QuoteMessage>,
    rotator: QuoteRotator,
    rng: StdRng,
    period: Duration,
}

impl QuoteActor {
    pub fn new(period: Duration) -> (Self, QuoteHandle) {
        Self::with_rng(period, StdRng::from_entropy())
    }

    pub fn with_rng(period: Duration, mut rng: StdRng) -> (Self, QuoteHandle) {
        let (sender, receiver) = mpsc::channel(8);

        let actor = Self {
            receiver,
            rotator: QuoteRotator::new(&mut rng),
            rng,
            period: period.clamp(MINIMUM_ROTATION, MAXIMUM_ROTATION),
        };

        (actor, QuoteHandle { sender })
    }

    pub async fn run(mut self) {
        let mut rotation = interval_at(Instant::now() + self.period, self.period);

        loop {
            tokio::select! {
                message = self.receiver.recv() => {
                    match message {
                        Some(QuoteMessage::GetQuote { reply }) => {
                            let _ = reply.send(self.rotator.current().to_string());
                        }
                        None => break,
                    }
                }
                _ = rotation.tick() => {
                    let quote = self.rotator.rotate(&mut self.rng);
                    debug!(quote, "quote rotated");
                }
            }
        }

        debug!("quote actor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::MOTIVATIONAL_QUOTES;

    #[tokio::test(start_paused = true)]
    async fn quote_changes_over_time() {
        let (actor, handle) = QuoteActor::with_rng(Duration::from_secs(30), StdRng::seed_from_u64(3));
        tokio::spawn(actor.run());

        let first = handle.current().await.unwrap();
        assert!(MOTIVATIONAL_QUOTES.contains(&first.as_str()));

        let mut seen = std::collections::HashSet::new();
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_secs(30)).await;
            seen.insert(handle.current().await.unwrap());
        }

        assert!(seen.len() > 1);
    }

    #[tokio::test(start_paused = true)]
    async fn quote_is_stable_between_rotations() {
        let (actor, handle) = QuoteActor::with_rng(Duration::from_secs(30), StdRng::seed_from_u64(9));
        tokio::spawn(actor.run());

        let first = handle.current().await.unwrap();
        tokio::time::sleep(Duration::from_secs(29)).await;

        assert_eq!(handle.current().await.unwrap(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn huge_rotation_period_is_capped_to_a_day() {
        let (actor, handle) = QuoteActor::with_rng(
            Duration::from_secs(i64::MAX as u64),
            StdRng::seed_from_u64(5),
        );
        assert_eq!(actor.period, MAXIMUM_ROTATION);
        let task = tokio::spawn(actor.run());

        let first = handle.current().await;
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert!(first.is_some());
        assert_eq!(handle.current().await, first);
        assert!(!task.is_finished());
    }
}
