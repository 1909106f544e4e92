//! Pomo core library
//!
//! Contains the focus/break timer state machine, statistics, quotes and the
//! port definitions (traits) for the Pomo application.
//! This crate has no knowledge of infrastructure concerns.

pub mod config;
pub mod domain;
pub mod i18n;
pub mod ports;

pub use config::{
    AcknowledgmentStyle, AudioConfig, Config, ConfigError, NotificationConfig,
    NotificationUrgency, PlayerKind, QuoteConfig, StatisticsConfig, TimerConfig,
};
pub use domain::{
    clamp_break_minutes, clamp_focus_minutes, format_time, DurationChange, MediaLocator, Phase,
    PhaseCompleted, PomodoroTimer, QuoteRotator, Statistics, StatisticsSnapshot, TimerSnapshot,
    Volume, BREAK_MINUTES_RANGE, FOCUS_MINUTES_RANGE, MOTIVATIONAL_QUOTES,
};
pub use i18n::{Language, Translator};
pub use ports::{AudioBackend, MediaError, Playback};
