use crate::client::DaemonClient;
use anyhow::{bail, Result};
use clap::Subcommand;
use pomo_core::{Config, Translator};
use pomo_protocol::{AudioStatus, Request, Response};

use super::{get_translator, send, unexpected};

#[derive(Subcommand)]
pub enum MusicCommand {
    /// Loop a URL or local file in the background
    Play {
        locator: String,
        /// Volume between 0.0 and 1.0, defaults to the configured one
        #[arg(long)]
        volume: Option<f32>,
    },
    /// Stop background audio
    Stop,
    /// Change the background audio volume (0.0 - 1.0)
    Volume { volume: f32 },
    /// Show what is playing
    Status,
}

impl MusicCommand {
    fn request(self, default_volume: f32) -> Request {
        match self {
            MusicCommand::Play { locator, volume } => Request::PlayBackgroundAudio {
                locator,
                volume: volume.unwrap_or(default_volume),
            },
            MusicCommand::Stop => Request::PauseBackgroundAudio,
            MusicCommand::Volume { volume } => Request::SetVolume { volume },
            MusicCommand::Status => Request::GetAudioStatus,
        }
    }
}

pub async fn execute(command: MusicCommand) -> Result<()> {
    let translator = get_translator();
    let client = DaemonClient::new();
    let default_volume = Config::load().unwrap_or_default().audio.initial_volume().value();
    let outcome = Outcome::of(&command);

    match send(&client, &translator, command.request(default_volume)).await? {
        Response::Audio(status) => {
            println!("{}", outcome.render(&status, &translator));
        }
        Response::MediaFailed { message } => {
            eprintln!("{}", translator.get("media.play_failed"));
            bail!("{}", message);
        }
        _ => return Err(unexpected(&translator)),
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Playback,
    Stopped,
    VolumeChanged,
}

impl Outcome {
    fn of(command: &MusicCommand) -> Self {
        match command {
            MusicCommand::Stop => Outcome::Stopped,
            MusicCommand::Volume { .. } => Outcome::VolumeChanged,
            MusicCommand::Play { .. } | MusicCommand::Status => Outcome::Playback,
        }
    }

    fn render(self, status: &AudioStatus, translator: &Translator) -> String {
        match self {
            Outcome::Stopped => translator.get("music.stopped"),
            Outcome::VolumeChanged if !status.playing => volume_line(status, translator),
            _ => describe(status, translator),
        }
    }
}

fn volume_line(status: &AudioStatus, translator: &Translator) -> String {
    let percent = status.volume.as_percent().to_string();
    translator.format("music.volume_set", &[("volume", percent.as_str())])
}

fn describe(status: &AudioStatus, translator: &Translator) -> String {
    match (&status.locator, status.playing) {
        (Some(locator), true) => {
            let percent = status.volume.as_percent().to_string();
            translator.format(
                "music.playing",
                &[("locator", locator.as_str()), ("volume", percent.as_str())],
            )
        }
        _ => translator.get("music.idle"),
    }
}
