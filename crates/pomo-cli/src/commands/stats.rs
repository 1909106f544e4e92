use crate::client::DaemonClient;
use anyhow::Result;
use chrono::Local;
use pomo_core::Translator;
use pomo_protocol::{Request, Response, StatisticsSnapshot};

use super::{get_translator, send, unexpected};

pub async fn execute(json: bool) -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    match send(&client, &translator, Request::GetStatistics).await? {
        Response::Statistics(snapshot) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render(&snapshot, &translator));
            }
        }
        _ => return Err(unexpected(&translator)),
    }

    Ok(())
}

fn render(snapshot: &StatisticsSnapshot, translator: &Translator) -> String {
    let hours = format!("{:.1}", snapshot.total_focus_hours);
    let days = snapshot.current_streak_days.to_string();

    let mut rows = vec![
        (
            translator.get("stats.completed_sessions"),
            snapshot.completed_sessions.to_string(),
        ),
        (
            translator.get("stats.focus_time"),
            translator.format("stats.hours", &[("value", hours.as_str())]),
        ),
        (
            translator.get("stats.tasks_completed"),
            snapshot.tasks_completed.to_string(),
        ),
        (
            translator.get("stats.current_streak"),
            translator.format("stats.days", &[("value", days.as_str())]),
        ),
    ];

    if let Some(completed_at) = snapshot.last_focus_completed_at {
        rows.push((
            translator.get("stats.last_focus"),
            completed_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        ));
    }

    let mut output = format!("\n{}\n\n", translator.get("stats.title"));
    for (index, (label, value)) in rows.iter().enumerate() {
        let prefix = if index == rows.len() - 1 {
            "└──"
        } else {
            "├──"
        };
        output.push_str(&format!("{} {:22} {}\n", prefix, format!("{}:", label), value));
    }
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::Language;

    fn snapshot() -> StatisticsSnapshot {
        StatisticsSnapshot {
            completed_sessions: 16,
            total_focus_hours: 5.0 + 25.0 / 60.0,
            tasks_completed: 23,
            current_streak_days: 7,
            last_focus_completed_at: None,
        }
    }

    #[test]
    fn render_rounds_hours_to_one_decimal() {
        let translator = Translator::new(Language::En);

        let output = render(&snapshot(), &translator);

        assert!(output.contains("Your Amazing Progress"));
        assert!(output.contains("16"));
        assert!(output.contains("5.4 h"));
        assert!(output.contains("7 days"));
        assert!(!output.contains("Last focus completed"));
    }

    #[test]
    fn render_shows_last_focus_when_known() {
        let translator = Translator::new(Language::En);
        let mut stats = snapshot();
        stats.last_focus_completed_at = Some(chrono::Utc::now());

        let output = render(&stats, &translator);

        assert!(output.contains("└── Last focus completed:"));
    }
}
