mod audio;
mod notifier;
mod quotes;
mod statistics;
mod timer;

use std::sync::Arc;
use std::time::Duration;

use pomo_core::{AudioBackend, Config, PomodoroTimer, Statistics, Translator};
use tokio::sync::broadcast;
use tracing::info;

pub use audio::{AudioActor, AudioHandle};
pub use notifier::{NotifierActor, NotifierHandle};
pub use quotes::{QuoteActor, QuoteHandle};
pub use statistics::{StatisticsActor, StatisticsHandle};
pub use timer::{TimerActor, TimerHandle};

const PHASE_EVENT_CAPACITY: usize = 16;

#[derive(Clone)]
pub struct DaemonHandles {
    pub timer: TimerHandle,
    pub notifier: NotifierHandle,
    pub statistics: StatisticsHandle,
    pub audio: AudioHandle,
    pub quotes: QuoteHandle,
}

/// Spawns every actor. Subscribers attach to the phase channel before the
/// timer starts so no completion is missed.
pub fn spawn_all(config: &Config, backend: Arc<dyn AudioBackend>) -> DaemonHandles {
    let (events, _) = broadcast::channel(PHASE_EVENT_CAPACITY);
    let focus_minutes = config.timer.clamped_focus_minutes();
    let break_minutes = config.timer.clamped_break_minutes();

    info!(
        language = %config.general.language,
        focus_minutes,
        break_minutes,
        "spawning actors"
    );

    let translator = Translator::new(config.general.language);
    let (notifier_actor, notifier) =
        NotifierActor::new(&config.notifications, translator, backend.clone());
    tokio::spawn(notifier_actor.run(events.subscribe()));

    let (statistics_actor, statistics) =
        StatisticsActor::new(Statistics::seeded(&config.statistics));
    tokio::spawn(statistics_actor.run(events.subscribe()));

    let (audio_actor, audio) = AudioActor::new(backend, config.audio.initial_volume());
    tokio::spawn(audio_actor.run());

    let (quote_actor, quotes) =
        QuoteActor::new(Duration::from_secs(config.quotes.rotation_seconds));
    tokio::spawn(quote_actor.run());

    let timer = PomodoroTimer::new(i64::from(focus_minutes), i64::from(break_minutes));
    let (timer_actor, timer) = TimerActor::new(timer, events);
    tokio::spawn(timer_actor.run());

    DaemonHandles {
        timer,
        notifier,
        statistics,
        audio,
        quotes,
    }
}
