use crate::client::DaemonClient;
use anyhow::Result;
use pomo_protocol::{Request, Response};

use super::{get_translator, send, unexpected};

pub async fn execute() -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    let running = match send(&client, &translator, Request::GetStatus).await? {
        Response::Timer(snapshot) => snapshot.running,
        _ => return Err(unexpected(&translator)),
    };

    if !running {
        println!("{}", translator.get("command.pause_already"));
        return Ok(());
    }

    match send(&client, &translator, Request::Pause).await? {
        Response::Timer(snapshot) => {
            println!(
                "{} ({})",
                translator.get("command.pause_success"),
                snapshot.formatted_remaining()
            );
        }
        _ => return Err(unexpected(&translator)),
    }

    Ok(())
}
