//! Focus/break countdown.
//!
//! [`PomodoroTimer`] is a pure state machine: it never looks at a clock to
//! decide how much time elapsed. Whoever drives it calls [`PomodoroTimer::tick`]
//! once per elapsed second while it is running.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Phase, PhaseCompleted};

pub const FOCUS_MINUTES_RANGE: RangeInclusive<u32> = 5..=60;
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=30;

const DEFAULT_FOCUS_MINUTES: u32 = 25;
const DEFAULT_BREAK_MINUTES: u32 = 5;

pub fn clamp_focus_minutes(minutes: i64) -> u32 {
    clamp_to(minutes, &FOCUS_MINUTES_RANGE)
}

pub fn clamp_break_minutes(minutes: i64) -> u32 {
    clamp_to(minutes, &BREAK_MINUTES_RANGE)
}

fn clamp_to(minutes: i64, range: &RangeInclusive<u32>) -> u32 {
    minutes.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

/// Formats a number of seconds as `MM:SS`, minutes are not wrapped into hours.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationChange {
    Applied { minutes: u32 },
    /// Duration edits are refused while a countdown is in flight.
    Ignored,
}

impl DurationChange {
    pub fn is_applied(&self) -> bool {
        matches!(self, DurationChange::Applied { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub running: bool,
    pub session_index: u32,
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

impl TimerSnapshot {
    pub fn formatted_remaining(&self) -> String {
        format_time(self.seconds_remaining)
    }
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    phase: Phase,
    seconds_remaining: u32,
    running: bool,
    session_index: u32,
    focus_minutes: u32,
    break_minutes: u32,
}

impl PomodoroTimer {
    pub fn new(focus_minutes: i64, break_minutes: i64) -> Self {
        let focus_minutes = clamp_focus_minutes(focus_minutes);
        Self {
            phase: Phase::Focus,
            seconds_remaining: focus_minutes * 60,
            running: false,
            session_index: 1,
            focus_minutes,
            break_minutes: clamp_break_minutes(break_minutes),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session_index(&self) -> u32 {
        self.session_index
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    /// Returns true when the countdown went from paused to running.
    pub fn start(&mut self) -> bool {
        if self.running || self.seconds_remaining == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Returns true when the countdown went from running to paused.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Focus;
        self.seconds_remaining = self.focus_minutes * 60;
        self.running = false;
        self.session_index = 1;
    }

    pub fn tick(&mut self) -> Option<PhaseCompleted> {
        self.tick_at(Utc::now())
    }

    /// One elapsed second. Returns the completion event when this tick
    /// brought the countdown to zero.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Option<PhaseCompleted> {
        if !self.running || self.seconds_remaining == 0 {
            return None;
        }

        self.seconds_remaining -= 1;

        if self.seconds_remaining == 0 {
            Some(self.complete_phase(now))
        } else {
            None
        }
    }

    fn complete_phase(&mut self, now: DateTime<Utc>) -> PhaseCompleted {
        self.running = false;

        let event = PhaseCompleted {
            ended: self.phase,
            session_index: self.session_index,
            phase_minutes: self.phase_minutes(self.phase),
            focus_minutes: self.focus_minutes,
            completed_at: now,
        };

        self.phase = self.phase.next();
        self.seconds_remaining = self.phase_minutes(self.phase) * 60;
        if self.phase == Phase::Focus {
            self.session_index += 1;
        }

        event
    }

    pub fn set_focus_duration(&mut self, minutes: i64) -> DurationChange {
        if self.running {
            return DurationChange::Ignored;
        }
        self.focus_minutes = clamp_focus_minutes(minutes);
        if self.phase == Phase::Focus {
            self.seconds_remaining = self.focus_minutes * 60;
        }
        DurationChange::Applied {
            minutes: self.focus_minutes,
        }
    }

    pub fn set_break_duration(&mut self, minutes: i64) -> DurationChange {
        if self.running {
            return DurationChange::Ignored;
        }
        self.break_minutes = clamp_break_minutes(minutes);
        if self.phase == Phase::Break {
            self.seconds_remaining = self.break_minutes * 60;
        }
        DurationChange::Applied {
            minutes: self.break_minutes,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            running: self.running,
            session_index: self.session_index,
            focus_minutes: self.focus_minutes,
            break_minutes: self.break_minutes,
        }
    }

    fn phase_minutes(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_minutes,
            Phase::Break => self.break_minutes,
        }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(
            i64::from(DEFAULT_FOCUS_MINUTES),
            i64::from(DEFAULT_BREAK_MINUTES),
        )
    }
}
