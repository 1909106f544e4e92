use crate::client::DaemonClient;
use anyhow::Result;
use pomo_core::Translator;
use pomo_protocol::{Request, Response};

use super::{get_translator, send, unexpected};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationKind {
    Focus,
    Break,
}

impl DurationKind {
    fn request(self, minutes: i64) -> Request {
        match self {
            DurationKind::Focus => Request::SetFocusDuration { minutes },
            DurationKind::Break => Request::SetBreakDuration { minutes },
        }
    }

    fn success_key(self) -> &'static str {
        match self {
            DurationKind::Focus => "command.focus_set",
            DurationKind::Break => "command.break_set",
        }
    }
}

pub async fn execute(kind: DurationKind, minutes: i64) -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    match send(&client, &translator, kind.request(minutes)).await? {
        Response::DurationChanged {
            applied, minutes, ..
        } => {
            let message = outcome_message(kind, applied, minutes, &translator);
            if applied {
                println!("{}", message);
            } else {
                eprintln!("{}", message);
            }
        }
        _ => return Err(unexpected(&translator)),
    }

    Ok(())
}

fn outcome_message(kind: DurationKind, applied: bool, minutes: u32, translator: &Translator) -> String {
    if !applied {
        return translator.get("command.duration_ignored");
    }

    let minutes = minutes.to_string();
    translator.format(kind.success_key(), &[("minutes", minutes.as_str())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomo_core::Language;

    #[test]
    fn applied_change_reports_clamped_minutes() {
        let translator = Translator::new(Language::En);

        assert_eq!(
            outcome_message(DurationKind::Focus, true, 60, &translator),
            "Focus duration set to 60 min"
        );
        assert_eq!(
            outcome_message(DurationKind::Break, true, 1, &translator),
            "Break duration set to 1 min"
        );
    }

    #[test]
    fn ignored_change_asks_to_pause_first() {
        let translator = Translator::new(Language::En);

        let message = outcome_message(DurationKind::Focus, false, 25, &translator);

        assert_eq!(message, translator.get("command.duration_ignored"));
    }

    #[test]
    fn kind_maps_to_its_request() {
        assert_eq!(
            DurationKind::Break.request(0),
            Request::SetBreakDuration { minutes: 0 }
        );
        assert_eq!(
            DurationKind::Focus.request(70),
            Request::SetFocusDuration { minutes: 70 }
        );
    }
}
