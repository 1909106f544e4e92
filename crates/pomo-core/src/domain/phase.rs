use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Break => "break",
        }
    }

    pub fn next(&self) -> Phase {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emitted exactly once each time a countdown reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseCompleted {
    pub ended: Phase,
    /// Session the ended phase belonged to.
    pub session_index: u32,
    /// Length of the phase that just ended.
    pub phase_minutes: u32,
    /// Configured focus length at completion time.
    pub focus_minutes: u32,
    pub completed_at: DateTime<Utc>,
}

impl PhaseCompleted {
    pub fn starting(&self) -> Phase {
        self.ended.next()
    }

    /// Translation key prefix for the acknowledgment shown to the user.
    pub fn acknowledgment_key(&self) -> &'static str {
        match self.ended {
            Phase::Focus => "phase.focus_complete",
            Phase::Break => "phase.break_complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_alternate() {
        assert_eq!(Phase::Focus.next(), Phase::Break);
        assert_eq!(Phase::Break.next(), Phase::Focus);
    }

    #[test]
    fn acknowledgment_differs_per_ended_phase() {
        let mut event = PhaseCompleted {
            ended: Phase::Focus,
            session_index: 1,
            phase_minutes: 25,
            focus_minutes: 25,
            completed_at: Utc::now(),
        };
        let after_focus = event.acknowledgment_key();

        event.ended = Phase::Break;
        let after_break = event.acknowledgment_key();

        assert_ne!(after_focus, after_break);
        assert_eq!(event.starting(), Phase::Focus);
    }
}
