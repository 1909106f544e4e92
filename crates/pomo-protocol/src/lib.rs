//! Pomo protocol definitions for CLI-daemon communication
//!
//! This crate defines the IPC protocol between the pomo CLI and daemon.
//! Every message travels as a 4-byte little-endian length followed by its
//! bincode payload.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use pomo_core::{Phase, StatisticsSnapshot, TimerSnapshot, Volume};

/// Requests sent from CLI to daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// Ping the daemon to check if it's alive
    Ping,
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Back to the first focus phase
    Reset,
    /// Change the focus length (clamped to 5..=60)
    SetFocusDuration { minutes: i64 },
    /// Change the break length (clamped to 1..=30)
    SetBreakDuration { minutes: i64 },
    /// Toggle the cue played at phase changes
    SetSoundEnabled { enabled: bool },
    /// Loop a URL or file in the background
    PlayBackgroundAudio { locator: String, volume: f32 },
    /// Stop background audio
    PauseBackgroundAudio,
    /// Change background audio volume (clamped to 0.0..=1.0)
    SetVolume { volume: f32 },
    /// Get the timer state
    GetStatus,
    /// Get the statistics counters
    GetStatistics,
    /// Get the motivational message on display
    GetQuote,
    /// Get the background audio state
    GetAudioStatus,
    /// Stop the daemon
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioStatus {
    pub playing: bool,
    pub volume: Volume,
    pub locator: Option<String>,
}

/// Responses sent from daemon to CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// Timer state after the request was handled
    Timer(TimerSnapshot),
    /// Outcome of a duration change, `applied` is false while running
    DurationChanged {
        applied: bool,
        minutes: u32,
        timer: TimerSnapshot,
    },
    Statistics(StatisticsSnapshot),
    Quote { text: String },
    Audio(AudioStatus),
    /// Audio playback could not start; nothing else is affected
    MediaFailed { message: String },
    /// Generic success acknowledgment
    Ok,
    /// Error response with message
    Error { message: String },
    /// Pong response to ping
    Pong,
}

#[cfg(unix)]
pub fn socket_path() -> PathBuf {
    let uid = unsafe { libc::getuid() };
    PathBuf::from(format!("/run/user/{}/pomo.sock", uid))
}

#[cfg(windows)]
pub fn socket_path() -> PathBuf {
    let local_app_data = std::env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(format!(r"{}\pomo\pomo.sock", local_app_data))
}

/// Serializes `message` into a length-prefixed frame.
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Vec<u8>, bincode::Error> {
    let payload = bincode::serialize(message)?;
    let mut frame = Vec::with_capacity(payload.len() + 4);
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Largest payload either side accepts. Real messages stay well under a kilobyte.
pub const MAX_FRAME_LENGTH: usize = 64 * 1024;

/// Payload length announced by a frame header, `None` past [`MAX_FRAME_LENGTH`].
pub fn frame_length(header: [u8; 4]) -> Option<usize> {
    let length = u32::from_le_bytes(header) as usize;
    (length <= MAX_FRAME_LENGTH).then_some(length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_header_matches_payload_length() {
        let frame = encode_frame(&Request::SetFocusDuration { minutes: 70 }).unwrap();

        let header: [u8; 4] = frame[..4].try_into().unwrap();
        assert_eq!(frame_length(header), Some(frame.len() - 4));

        let decoded: Request = bincode::deserialize(&frame[4..]).unwrap();
        assert_eq!(decoded, Request::SetFocusDuration { minutes: 70 });
    }

    #[test]
    fn oversized_frame_header_is_rejected() {
        assert_eq!(frame_length(u32::MAX.to_le_bytes()), None);
        assert_eq!(
            frame_length(((MAX_FRAME_LENGTH + 1) as u32).to_le_bytes()),
            None
        );
        assert_eq!(
            frame_length((MAX_FRAME_LENGTH as u32).to_le_bytes()),
            Some(MAX_FRAME_LENGTH)
        );
    }

    #[test]
    fn timer_response_survives_the_wire() {
        let response = Response::DurationChanged {
            applied: false,
            minutes: 25,
            timer: TimerSnapshot {
                phase: Phase::Break,
                seconds_remaining: 299,
                running: true,
                session_index: 2,
                focus_minutes: 25,
                break_minutes: 5,
            },
        };

        let bytes = bincode::serialize(&response).unwrap();
        let decoded: Response = bincode::deserialize(&bytes).unwrap();

        assert_eq!(response, decoded);
    }

    #[test]
    fn audio_request_keeps_raw_locator() {
        let request = Request::PlayBackgroundAudio {
            locator: "  https://example.com/rain.ogg".to_string(),
            volume: 1.5,
        };

        let bytes = bincode::serialize(&request).unwrap();
        let decoded: Request = bincode::deserialize(&bytes).unwrap();

        assert_eq!(request, decoded);
    }
}
