use crate::client::{ClientError, DaemonClient};
use anyhow::Result;
use pomo_core::Translator;
use pomo_protocol::{Phase, Request, Response, TimerSnapshot};
use serde::Serialize;

use super::get_translator;

#[derive(Serialize)]
struct StatusOutput {
    phase: &'static str,
    running: bool,
    seconds_remaining: u32,
    remaining_formatted: String,
    session_index: u32,
    focus_minutes: u32,
    break_minutes: u32,
}

impl From<&TimerSnapshot> for StatusOutput {
    fn from(snapshot: &TimerSnapshot) -> Self {
        Self {
            phase: snapshot.phase.as_str(),
            running: snapshot.running,
            seconds_remaining: snapshot.seconds_remaining,
            remaining_formatted: snapshot.formatted_remaining(),
            session_index: snapshot.session_index,
            focus_minutes: snapshot.focus_minutes,
            break_minutes: snapshot.break_minutes,
        }
    }
}

pub async fn execute(json: bool) -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    match client.send(Request::GetStatus).await {
        Ok(Response::Timer(snapshot)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&StatusOutput::from(&snapshot))?);
            } else {
                println!("{}", describe(&snapshot, &translator));
            }
        }
        Ok(Response::Error { message }) => {
            if json {
                println!("{}", serde_json::json!({ "error": message }));
            } else {
                eprintln!("{}", message);
            }
            std::process::exit(1);
        }
        Ok(_) => {
            if json {
                println!("{}", serde_json::json!({ "error": "unexpected response" }));
            } else {
                eprintln!("{}", translator.get("error.unexpected_response"));
            }
            std::process::exit(1);
        }
        Err(ClientError::DaemonNotRunning) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "error": "daemon not running", "running": false })
                );
            } else {
                println!("{}", translator.get("error.daemon_not_running"));
            }
        }
        Err(error) => {
            if json {
                println!("{}", serde_json::json!({ "error": error.to_string() }));
            } else {
                eprintln!("{}", error);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

pub(super) fn phase_label(phase: Phase, translator: &Translator) -> String {
    match phase {
        Phase::Focus => translator.get("status.focus_label"),
        Phase::Break => translator.get("status.break_label"),
    }
}

pub(super) fn session_line(snapshot: &TimerSnapshot, translator: &Translator) -> String {
    let state = if snapshot.running {
        translator.get("status.running")
    } else {
        translator.get("status.paused")
    };

    let index = snapshot.session_index.to_string();
    translator.format(
        "status.session",
        &[("index", index.as_str()), ("state", state.as_str())],
    )
}

/// Multi-line status block: phase, remaining time, session, durations.
pub(super) fn describe(snapshot: &TimerSnapshot, translator: &Translator) -> String {
    let focus = snapshot.focus_minutes.to_string();
    let break_minutes = snapshot.break_minutes.to_string();
    let durations = translator.format(
        "status.durations",
        &[("focus", focus.as_str()), ("break", break_minutes.as_str())],
    );

    format!(
        "{}\n{}\n{}\n{}",
        phase_label(snapshot.phase, translator),
        snapshot.formatted_remaining(),
        session_line(snapshot, translator),
        durations
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::Language;

    fn snapshot(phase: Phase, seconds_remaining: u32, running: bool) -> TimerSnapshot {
        TimerSnapshot {
            phase,
            seconds_remaining,
            running,
            session_index: 2,
            focus_minutes: 25,
            break_minutes: 5,
        }
    }

    #[test]
    fn describe_shows_fresh_focus_phase() {
        let translator = Translator::new(Language::En);

        let text = describe(&snapshot(Phase::Focus, 1500, false), &translator);

        assert_eq!(
            text,
            "Focus Time!\n25:00\nSession 2 • Paused\nFocus 25 min • Break 5 min"
        );
    }

    #[test]
    fn describe_shows_running_break() {
        let translator = Translator::new(Language::En);

        let text = describe(&snapshot(Phase::Break, 299, true), &translator);

        assert!(text.starts_with("Break Time!\n04:59\nSession 2 • Running"));
    }

    #[test]
    fn json_output_uses_lowercase_phase() {
        let output = StatusOutput::from(&snapshot(Phase::Break, 61, false));

        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["phase"], "break");
        assert_eq!(value["remaining_formatted"], "01:01");
        assert_eq!(value["running"], false);
    }
}
