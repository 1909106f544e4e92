use crate::client::{ClientError, DaemonClient};
use crate::daemon_launcher::ensure_daemon_running;
use anyhow::Result;
use pomo_protocol::{Request, Response};

use super::{get_translator, send, status::describe, unexpected};

pub async fn execute() -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    let already_running = match client.send(Request::GetStatus).await {
        Ok(Response::Timer(snapshot)) => snapshot.running,
        Err(ClientError::DaemonNotRunning) => {
            ensure_daemon_running(&translator).await?;
            false
        }
        _ => false,
    };

    if already_running {
        println!("{}", translator.get("command.start_already"));
        return Ok(());
    }

    match send(&client, &translator, Request::Start).await? {
        Response::Timer(snapshot) => {
            println!("{}", translator.get("command.start_success"));
            println!("{}", describe(&snapshot, &translator));
        }
        _ => return Err(unexpected(&translator)),
    }

    Ok(())
}
