use crate::client::DaemonClient;
use anyhow::Result;
use pomo_protocol::{Request, Response};

use super::{get_translator, send, unexpected};

pub async fn execute() -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();

    match send(&client, &translator, Request::GetQuote).await? {
        Response::Quote { text } => println!("{}", text),
        _ => return Err(unexpected(&translator)),
    }

    Ok(())
}
