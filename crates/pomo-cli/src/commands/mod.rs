mod duration;
mod init;
mod music;
mod pause;
mod quote;
mod reset;
mod sound;
mod start;
mod stats;
mod status;
mod stop_daemon;
mod watch;

pub use duration::{execute as duration, DurationKind};
pub use init::execute as init;
pub use music::{execute as music, MusicCommand};
pub use pause::execute as pause;
pub use quote::execute as quote;
pub use reset::execute as reset;
pub use sound::{execute as sound, SoundSwitch};
pub use start::execute as start;
pub use stats::execute as stats;
pub use status::execute as status;
pub use stop_daemon::execute as stop_daemon;
pub use watch::execute as watch;

use crate::client::{ClientError, DaemonClient};
use anyhow::{bail, Result};
use pomo_core::{Config, Translator};
use pomo_protocol::{Request, Response};

fn get_translator() -> Translator {
    Config::load()
        .map(|config| Translator::new(config.general.language))
        .unwrap_or_default()
}

/// Sends `request`, turning transport failures and `Response::Error` into
/// user-facing errors. Exits when the daemon is not running.
async fn send(client: &DaemonClient, translator: &Translator, request: Request) -> Result<Response> {
    match client.send(request).await {
        Ok(Response::Error { message }) => bail!("{}", message),
        Ok(response) => Ok(response),
        Err(ClientError::DaemonNotRunning) => {
            eprintln!("{}", translator.get("error.daemon_not_running"));
            eprintln!("{}", translator.get("error.daemon_not_running_hint"));
            std::process::exit(1);
        }
        Err(ClientError::Timeout) => bail!("{}", translator.get("error.connection_timeout")),
        Err(error) => bail!("{}", error),
    }
}

fn unexpected(translator: &Translator) -> anyhow::Error {
    anyhow::anyhow!("{}", translator.get("error.unexpected_response"))
}
