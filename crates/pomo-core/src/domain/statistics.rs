use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Phase, PhaseCompleted};
use crate::config::StatisticsConfig;

/// Cumulative counters for the lifetime of the daemon.
///
/// Only focus completions move the counters. `tasks_completed` and
/// `current_streak_days` are display values supplied from configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    completed_sessions: u64,
    total_focus_hours: f64,
    tasks_completed: u64,
    current_streak_days: u64,
    last_focus_completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub completed_sessions: u64,
    pub total_focus_hours: f64,
    pub tasks_completed: u64,
    pub current_streak_days: u64,
    pub last_focus_completed_at: Option<DateTime<Utc>>,
}

impl Statistics {
    pub fn seeded(seed: &StatisticsConfig) -> Self {
        Self {
            completed_sessions: seed.completed_sessions,
            total_focus_hours: seed.total_focus_hours.max(0.0),
            tasks_completed: seed.tasks_completed,
            current_streak_days: seed.current_streak_days,
            last_focus_completed_at: None,
        }
    }

    /// Returns true when the event changed the counters.
    pub fn record(&mut self, event: &PhaseCompleted) -> bool {
        if event.ended != Phase::Focus {
            return false;
        }

        self.completed_sessions += 1;
        self.total_focus_hours += f64::from(event.focus_minutes) / 60.0;
        self.last_focus_completed_at = Some(event.completed_at);
        true
    }

    pub fn completed_sessions(&self) -> u64 {
        self.completed_sessions
    }

    pub fn total_focus_hours(&self) -> f64 {
        self.total_focus_hours
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            completed_sessions: self.completed_sessions,
            total_focus_hours: self.total_focus_hours,
            tasks_completed: self.tasks_completed,
            current_streak_days: self.current_streak_days,
            last_focus_completed_at: self.last_focus_completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(ended: Phase, focus_minutes: u32) -> PhaseCompleted {
        PhaseCompleted {
            ended,
            session_index: 1,
            phase_minutes: focus_minutes,
            focus_minutes,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn focus_completion_adds_session_and_hours() {
        let mut statistics = Statistics::default();

        assert!(statistics.record(&completed(Phase::Focus, 25)));

        assert_eq!(statistics.completed_sessions(), 1);
        assert!((statistics.total_focus_hours() - 25.0 / 60.0).abs() < f64::EPSILON);
        assert!(statistics.snapshot().last_focus_completed_at.is_some());
    }

    #[test]
    fn break_completion_is_ignored() {
        let mut statistics = Statistics::default();

        assert!(!statistics.record(&completed(Phase::Break, 25)));

        assert_eq!(statistics, Statistics::default());
    }

    #[test]
    fn seed_values_are_kept_and_extended() {
        let seed = StatisticsConfig {
            completed_sessions: 15,
            total_focus_hours: 5.0,
            tasks_completed: 23,
            current_streak_days: 7,
        };
        let mut statistics = Statistics::seeded(&seed);

        statistics.record(&completed(Phase::Focus, 30));
        let snapshot = statistics.snapshot();

        assert_eq!(snapshot.completed_sessions, 16);
        assert!((snapshot.total_focus_hours - 5.5).abs() < 1e-9);
        assert_eq!(snapshot.tasks_completed, 23);
        assert_eq!(snapshot.current_streak_days, 7);
    }
}
