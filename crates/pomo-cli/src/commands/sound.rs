use crate::client::DaemonClient;
use anyhow::Result;
use clap::ValueEnum;
use pomo_protocol::{Request, Response};

use super::{get_translator, send, unexpected};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SoundSwitch {
    On,
    Off,
}

impl SoundSwitch {
    fn enabled(self) -> bool {
        self == SoundSwitch::On
    }
}

pub async fn execute(switch: SoundSwitch) -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();
    let enabled = switch.enabled();

    match send(&client, &translator, Request::SetSoundEnabled { enabled }).await? {
        Response::Ok => {
            let key = if enabled {
                "command.sound_on"
            } else {
                "command.sound_off"
            };
            println!("{}", translator.get(key));
        }
        _ => return Err(unexpected(&translator)),
    }

    Ok(())
}
