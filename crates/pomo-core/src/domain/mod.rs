mod media;
mod phase;
mod quotes;
mod statistics;
mod timer;

pub use media::{MediaLocator, Volume};
pub use phase::{Phase, PhaseCompleted};
pub use quotes::{QuoteRotator, MOTIVATIONAL_QUOTES};
pub use statistics::{Statistics, StatisticsSnapshot};
pub use timer::{
    clamp_break_minutes, clamp_focus_minutes, format_time, DurationChange, PomodoroTimer,
    TimerSnapshot, BREAK_MINUTES_RANGE, FOCUS_MINUTES_RANGE,
};
