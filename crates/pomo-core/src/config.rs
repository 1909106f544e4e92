use crate::domain::{clamp_break_minutes, clamp_focus_minutes, Volume};
use crate::i18n::Language;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    NotFound { path: String },

    #[error("read error: {source}")]
    Read {
        #[from]
        source: std::io::Error,
    },

    #[error("TOML parse error: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub timer: TimerConfig,
    pub notifications: NotificationConfig,
    pub audio: AudioConfig,
    pub quotes: QuoteConfig,
    pub statistics: StatisticsConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    pub language: Language,
}

/// Durations in minutes. Out-of-range values are clamped when read, not rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub focus_minutes: i64,
    pub break_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub sound_enabled: bool,
    pub urgency: NotificationUrgency,
    pub style: AcknowledgmentStyle,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationUrgency {
    Low,
    #[default]
    Normal,
    Critical,
}

/// How the end of a phase is acknowledged to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AcknowledgmentStyle {
    #[default]
    Desktop,
    Log,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub volume: f32,
    /// Forces a player instead of probing `PATH`.
    pub player: Option<PlayerKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Mpv,
    Ffplay,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub rotation_seconds: u64,
}

/// Starting values for the statistics counters.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StatisticsConfig {
    pub completed_sessions: u64,
    pub total_focus_hours: f64,
    pub tasks_completed: u64,
    pub current_streak_days: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
        }
    }
}

impl TimerConfig {
    pub fn clamped_focus_minutes(&self) -> u32 {
        clamp_focus_minutes(self.focus_minutes)
    }

    pub fn clamped_break_minutes(&self) -> u32 {
        clamp_break_minutes(self.break_minutes)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            urgency: NotificationUrgency::Normal,
            style: AcknowledgmentStyle::Desktop,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: Volume::default().value(),
            player: None,
        }
    }
}

impl AudioConfig {
    pub fn initial_volume(&self) -> Volume {
        Volume::new(self.volume)
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            rotation_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pomo")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = Config::default();

        assert_eq!(config.general.language, Language::En);
        assert_eq!(config.timer.focus_minutes, 25);
        assert_eq!(config.timer.break_minutes, 5);
        assert!(config.notifications.sound_enabled);
        assert_eq!(config.notifications.style, AcknowledgmentStyle::Desktop);
        assert_eq!(config.audio.initial_volume().as_percent(), 30);
        assert!(config.audio.player.is_none());
        assert_eq!(config.quotes.rotation_seconds, 30);
        assert_eq!(config.statistics.completed_sessions, 0);
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [timer]
            focus_minutes = 50
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.timer.focus_minutes, 50);
        assert_eq!(config.timer.break_minutes, 5);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [general]
            language = "fr"

            [timer]
            focus_minutes = 45
            break_minutes = 10

            [notifications]
            sound_enabled = false
            urgency = "critical"
            style = "log"

            [audio]
            volume = 0.8
            player = "ffplay"

            [quotes]
            rotation_seconds = 60

            [statistics]
            completed_sessions = 15
            total_focus_hours = 5.0
            tasks_completed = 23
            current_streak_days = 7
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.general.language, Language::Fr);
        assert_eq!(config.timer.clamped_focus_minutes(), 45);
        assert_eq!(config.timer.clamped_break_minutes(), 10);
        assert!(!config.notifications.sound_enabled);
        assert!(matches!(
            config.notifications.urgency,
            NotificationUrgency::Critical
        ));
        assert_eq!(config.notifications.style, AcknowledgmentStyle::Log);
        assert_eq!(config.audio.player, Some(PlayerKind::Ffplay));
        assert_eq!(config.quotes.rotation_seconds, 60);
        assert_eq!(config.statistics.tasks_completed, 23);
        assert_eq!(config.statistics.current_streak_days, 7);
    }

    #[test]
    fn out_of_range_durations_are_clamped() {
        let toml = r#"
            [timer]
            focus_minutes = 120
            break_minutes = 0
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.timer.clamped_focus_minutes(), 60);
        assert_eq!(config.timer.clamped_break_minutes(), 1);
    }

    #[test]
    fn volume_out_of_range_is_clamped() {
        let toml = r#"
            [audio]
            volume = 3.5
        "#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.audio.initial_volume(), Volume::FULL);
    }

    #[test]
    fn unknown_player_is_rejected() {
        let toml = r#"
            [audio]
            player = "winamp"
        "#;

        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn load_from_missing_file_reports_path() {
        let result = Config::load_from(std::path::Path::new("/nonexistent/pomo/config.toml"));

        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }
}
