use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use pomo_protocol::{Request, Response};

use super::get_translator;

pub async fn execute() -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    match client.send(Request::Shutdown).await {
        Ok(Response::Ok) => {
            println!("{}", translator.get("command.daemon_stopped"));
        }
        Ok(Response::Error { message }) => bail!("{}", message),
        Ok(_) => bail!("{}", translator.get("error.unexpected_response")),
        Err(ClientError::DaemonNotRunning) => {
            println!("{}", translator.get("error.daemon_not_running"));
        }
        Err(ClientError::Timeout) => bail!("{}", translator.get("error.connection_timeout")),
        Err(error) => bail!("{}", error),
    }

    Ok(())
}
