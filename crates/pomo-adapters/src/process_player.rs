use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pomo_core::{AudioBackend, MediaError, MediaLocator, Playback, PlayerKind, Volume};
use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// A player that dies within this window is treated as a failed start.
const STARTUP_GRACE: Duration = Duration::from_millis(750);
const CUE_TIMEOUT: Duration = Duration::from_secs(5);
const FREEDESKTOP_COMPLETE_SOUND: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";
const PLAYER_PREFERENCE: [PlayerKind; 2] = [PlayerKind::Mpv, PlayerKind::Ffplay];

#[derive(Debug, Clone)]
struct PlayerProgram {
    kind: PlayerKind,
    path: PathBuf,
}

#[derive(Debug, Clone)]
struct CueProgram {
    path: PathBuf,
    arguments: Vec<String>,
}

/// Plays audio through external programs found on `PATH`.
#[derive(Debug, Clone)]
pub struct ProcessAudioBackend {
    player: Option<PlayerProgram>,
    candidates: Vec<PlayerKind>,
    cue: Option<CueProgram>,
}

impl ProcessAudioBackend {
    pub fn detect(preferred: Option<PlayerKind>) -> Self {
        let candidates: Vec<PlayerKind> = match preferred {
            Some(kind) => vec![kind],
            None => PLAYER_PREFERENCE.to_vec(),
        };

        let player = candidates.iter().copied().find_map(|kind| {
            which::which(program_name(kind))
                .ok()
                .map(|path| PlayerProgram { kind, path })
        });

        match &player {
            Some(program) => info!(player = %program.path.display(), "background audio player found"),
            None => warn!("no background audio player found, music playback disabled"),
        }

        let cue = detect_cue_program();
        if cue.is_none() {
            debug!("no cue player found, phase changes will be silent");
        }

        Self {
            player,
            candidates,
            cue,
        }
    }

    fn unavailable(&self) -> MediaError {
        MediaError::PlayerUnavailable {
            tried: self
                .candidates
                .iter()
                .map(|kind| program_name(*kind))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[async_trait]
impl AudioBackend for ProcessAudioBackend {
    async fn play_cue(&self) -> Result<(), MediaError> {
        let cue = self
            .cue
            .as_ref()
            .ok_or_else(|| MediaError::PlayerUnavailable {
                tried: "canberra-gtk-play, paplay".to_string(),
            })?;
        let name = display_name(&cue.path);

        let mut child = Command::new(&cue.path)
            .args(&cue.arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| MediaError::Spawn {
                player: name.clone(),
                message: error.to_string(),
            })?;

        match timeout(CUE_TIMEOUT, child.wait()).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(_)) => Err(MediaError::PlayerExited { player: name }),
            Ok(Err(error)) => Err(MediaError::Spawn {
                player: name,
                message: error.to_string(),
            }),
            Err(_) => {
                debug!(player = %name, "cue playback timed out");
                Ok(())
            }
        }
    }

    async fn start_loop(
        &self,
        locator: &MediaLocator,
        volume: Volume,
    ) -> Result<Box<dyn Playback>, MediaError> {
        let program = self.player.as_ref().ok_or_else(|| self.unavailable())?;
        let name = program_name(program.kind).to_string();

        let mut child = Command::new(&program.path)
            .args(loop_arguments(program.kind, locator, volume))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| MediaError::Spawn {
                player: name.clone(),
                message: error.to_string(),
            })?;

        match timeout(STARTUP_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                warn!(player = %name, ?status, %locator, "player exited during startup");
                Err(MediaError::PlayerExited { player: name })
            }
            Ok(Err(error)) => Err(MediaError::Spawn {
                player: name,
                message: error.to_string(),
            }),
            Err(_) => {
                info!(player = %name, %locator, volume = volume.as_percent(), "background audio started");
                Ok(Box::new(ProcessPlayback::new(child, name)))
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "process"
    }
}

pub struct ProcessPlayback {
    child: Child,
    player: String,
}

impl ProcessPlayback {
    fn new(child: Child, player: String) -> Self {
        Self { child, player }
    }
}

#[async_trait]
impl Playback for ProcessPlayback {
    async fn stop(&mut self) {
        if let Err(error) = self.child.kill().await {
            debug!(%error, player = %self.player, "player already gone");
        } else {
            debug!(player = %self.player, "background audio stopped");
        }
    }

    fn is_active(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}

fn program_name(kind: PlayerKind) -> &'static str {
    match kind {
        PlayerKind::Mpv => "mpv",
        PlayerKind::Ffplay => "ffplay",
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn loop_arguments(kind: PlayerKind, locator: &MediaLocator, volume: Volume) -> Vec<String> {
    let percent = volume.as_percent().to_string();
    match kind {
        PlayerKind::Mpv => vec![
            "--no-video".to_string(),
            "--really-quiet".to_string(),
            "--loop-file=inf".to_string(),
            format!("--volume={}", percent),
            "--".to_string(),
            locator.as_str().to_string(),
        ],
        PlayerKind::Ffplay => vec![
            "-nodisp".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-loop".to_string(),
            "0".to_string(),
            "-volume".to_string(),
            percent,
            "-i".to_string(),
            locator.as_str().to_string(),
        ],
    }
}

fn detect_cue_program() -> Option<CueProgram> {
    if let Ok(path) = which::which("canberra-gtk-play") {
        return Some(CueProgram {
            path,
            arguments: vec![
                "--id".to_string(),
                "complete".to_string(),
                "--description".to_string(),
                "pomo phase change".to_string(),
            ],
        });
    }

    if Path::new(FREEDESKTOP_COMPLETE_SOUND).exists() {
        if let Ok(path) = which::which("paplay") {
            return Some(CueProgram {
                path,
                arguments: vec![FREEDESKTOP_COMPLETE_SOUND.to_string()],
            });
        }
    }

    None
}
