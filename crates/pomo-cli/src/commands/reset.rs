use crate::client::DaemonClient;
use anyhow::Result;
use pomo_protocol::{Request, Response};

use super::{get_translator, send, status::describe, unexpected};

pub async fn execute() -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    match send(&client, &translator, Request::Reset).await? {
        Response::Timer(snapshot) => {
            println!("{}", translator.get("command.reset_success"));
            println!("{}", describe(&snapshot, &translator));
        }
        _ => return Err(unexpected(&translator)),
    }

    Ok(())
}
