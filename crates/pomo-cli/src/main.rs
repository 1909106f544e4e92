mod client;
mod commands;
mod daemon_launcher;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{DurationKind, MusicCommand, SoundSwitch};

#[derive(Parser)]
#[command(name = "pomo")]
#[command(about = "Pomo - a pomodoro timer for your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the configuration file interactively
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
    /// Start or resume the countdown, launching the daemon if needed
    Start,
    /// Pause the countdown
    Pause,
    /// Back to a fresh first focus session
    Reset,
    /// Show the timer state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Live countdown until Ctrl+C
    Watch,
    /// Set the focus duration in minutes (5-60)
    Focus {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Set the break duration in minutes (1-30)
    Break {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Turn the phase-change sound on or off
    Sound {
        #[arg(value_enum)]
        switch: SoundSwitch,
    },
    /// Background audio
    Music {
        #[command(subcommand)]
        command: MusicCommand,
    },
    /// Show session statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current motivational quote
    Quote,
    /// Stop the background daemon
    StopDaemon,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => commands::init(force),
        Commands::Start => commands::start().await,
        Commands::Pause => commands::pause().await,
        Commands::Reset => commands::reset().await,
        Commands::Status { json } => commands::status(json).await,
        Commands::Watch => commands::watch().await,
        Commands::Focus { minutes } => commands::duration(DurationKind::Focus, minutes).await,
        Commands::Break { minutes } => commands::duration(DurationKind::Break, minutes).await,
        Commands::Sound { switch } => commands::sound(switch).await,
        Commands::Music { command } => commands::music(command).await,
        Commands::Stats { json } => commands::stats(json).await,
        Commands::Quote => commands::quote().await,
        Commands::StopDaemon => commands::stop_daemon().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_music_play_with_volume() {
        let cli = Cli::try_parse_from(["pomo", "music", "play", "rain.ogg", "--volume", "0.5"])
            .unwrap();

        match cli.command {
            Commands::Music {
                command: MusicCommand::Play { locator, volume },
            } => {
                assert_eq!(locator, "rain.ogg");
                assert_eq!(volume, Some(0.5));
            }
            _ => panic!("expected music play"),
        }
    }

    #[test]
    fn accepts_out_of_range_durations_for_clamping() {
        let cli = Cli::try_parse_from(["pomo", "focus", "70"]).unwrap();
        assert!(matches!(cli.command, Commands::Focus { minutes: 70 }));

        let cli = Cli::try_parse_from(["pomo", "break", "0"]).unwrap();
        assert!(matches!(cli.command, Commands::Break { minutes: 0 }));
    }

    #[test]
    fn parses_sound_switch() {
        let cli = Cli::try_parse_from(["pomo", "sound", "off"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Sound {
                switch: SoundSwitch::Off
            }
        ));
    }
}
