use std::io::Write;
use std::time::Duration;

use crate::client::DaemonClient;
use anyhow::Result;
use pomo_core::Translator;
use pomo_protocol::{Request, Response, TimerSnapshot};

use super::status::{phase_label, session_line};
use super::{get_translator, send, unexpected};

const REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// Redraws a one-line status every second until Ctrl+C.
pub async fn execute() -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();
    let mut refresh = tokio::time::interval(REFRESH_PERIOD);
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                match send(&client, &translator, Request::GetStatus).await? {
                    Response::Timer(snapshot) => {
                        print!("\r\x1b[2K{}", status_line(&snapshot, &translator));
                        std::io::stdout().flush()?;
                    }
                    _ => return Err(unexpected(&translator)),
                }
            }
            _ = &mut interrupted => break,
        }
    }

    println!();
    Ok(())
}

fn status_line(snapshot: &TimerSnapshot, translator: &Translator) -> String {
    format!(
        "{} {} • {}",
        phase_label(snapshot.phase, translator),
        snapshot.formatted_remaining(),
        session_line(snapshot, translator)
    )
}
