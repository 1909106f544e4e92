use crate::actors::DaemonHandles;
use anyhow::{Context, Result};
use interprocess::local_socket::{
    tokio::{prelude::*, Stream},
    GenericFilePath, ListenerOptions,
};
use pomo_protocol::{encode_frame, frame_length, Request, Response};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument};

pub struct Server {
    socket_path: PathBuf,
    handles: DaemonHandles,
    shutdown_sender: broadcast::Sender<()>,
}

impl Server {
    pub fn new(handles: DaemonHandles, shutdown_sender: broadcast::Sender<()>) -> Self {
        Self {
            socket_path: pomo_protocol::socket_path(),
            handles,
            shutdown_sender,
        }
    }

    fn cleanup_stale_socket(&self) -> Result<()> {
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path)
                .context("failed to remove stale socket")?;
            debug!("removed stale socket file");
        }
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        self.cleanup_stale_socket()?;

        let listener = ListenerOptions::new()
            .name(self.socket_path.as_os_str().to_fs_name::<GenericFilePath>()?)
            .create_tokio()?;

        info!(path = %self.socket_path.display(), "server listening");

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok(stream) => {
                            let handles = self.handles.clone();
                            let shutdown_sender = self.shutdown_sender.clone();
                            tokio::spawn(async move {
                                if let Err(error) = handle_connection(stream, handles, shutdown_sender).await {
                                    error!(%error, "connection handler failed");
                                }
                            });
                        }
                        Err(error) => {
                            error!(%error, "failed to accept connection");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        self.cleanup_socket();
        Ok(())
    }

    fn cleanup_socket(&self) {
        if let Err(error) = std::fs::remove_file(&self.socket_path) {
            debug!(%error, "socket file already removed");
        } else {
            debug!("socket file cleaned up");
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.cleanup_socket();
    }
}

async fn handle_connection(
    mut stream: Stream,
    handles: DaemonHandles,
    shutdown_sender: broadcast::Sender<()>,
) -> Result<()> {
    debug!("new connection accepted");

    let mut length_buffer = [0u8; 4];
    stream.read_exact(&mut length_buffer).await?;

    let length = frame_length(length_buffer).context("request frame exceeds maximum length")?;
    let mut payload = vec![0u8; length];
    stream.read_exact(&mut payload).await?;

    let request: Request =
        bincode::deserialize(&payload).context("failed to deserialize request")?;

    debug!(?request, "received request");

    let response = handle_request(request, &handles, &shutdown_sender).await;

    debug!(?response, "sending response");

    stream.write_all(&encode_frame(&response)?).await?;
    stream.flush().await?;

    Ok(())
}

fn unavailable(component: &str) -> Response {
    Response::Error {
        message: format!("{} is not responding", component),
    }
}

pub async fn handle_request(
    request: Request,
    handles: &DaemonHandles,
    shutdown_sender: &broadcast::Sender<()>,
) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Start => match handles.timer.start().await {
            Some(status) => Response::Timer(status),
            None => unavailable("timer"),
        },

        Request::Pause => match handles.timer.pause().await {
            Some(status) => Response::Timer(status),
            None => unavailable("timer"),
        },

        Request::Reset => match handles.timer.reset().await {
            Some(status) => Response::Timer(status),
            None => unavailable("timer"),
        },

        Request::GetStatus => match handles.timer.get_status().await {
            Some(status) => Response::Timer(status),
            None => unavailable("timer"),
        },

        Request::SetFocusDuration { minutes } => {
            match handles.timer.set_focus_duration(minutes).await {
                Some((change, timer)) => Response::DurationChanged {
                    applied: change.is_applied(),
                    minutes: timer.focus_minutes,
                    timer,
                },
                None => unavailable("timer"),
            }
        }

        Request::SetBreakDuration { minutes } => {
            match handles.timer.set_break_duration(minutes).await {
                Some((change, timer)) => Response::DurationChanged {
                    applied: change.is_applied(),
                    minutes: timer.break_minutes,
                    timer,
                },
                None => unavailable("timer"),
            }
        }

        Request::SetSoundEnabled { enabled } => {
            if handles.notifier.set_sound_enabled(enabled).await.is_ok() {
                Response::Ok
            } else {
                unavailable("notifier")
            }
        }

        Request::PlayBackgroundAudio { locator, volume } => {
            match handles.audio.play(locator, volume).await {
                Some(Ok(status)) => Response::Audio(status),
                Some(Err(error)) => Response::MediaFailed {
                    message: error.to_string(),
                },
                None => unavailable("audio"),
            }
        }

        Request::PauseBackgroundAudio => match handles.audio.stop().await {
            Some(status) => Response::Audio(status),
            None => unavailable("audio"),
        },

        Request::SetVolume { volume } => match handles.audio.set_volume(volume).await {
            Some(Ok(status)) => Response::Audio(status),
            Some(Err(error)) => Response::MediaFailed {
                message: error.to_string(),
            },
            None => unavailable("audio"),
        },

        Request::GetAudioStatus => match handles.audio.get_status().await {
            Some(status) => Response::Audio(status),
            None => unavailable("audio"),
        },

        Request::GetStatistics => match handles.statistics.get_snapshot().await {
            Some(snapshot) => Response::Statistics(snapshot),
            None => unavailable("statistics"),
        },

        Request::GetQuote => match handles.quotes.current().await {
            Some(text) => Response::Quote { text },
            None => unavailable("quotes"),
        },

        Request::Shutdown => {
            info!("shutdown requested by client");
            shutdown_sender.send(()).ok();
            Response::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::spawn_all;
    use pomo_adapters::{FailingAudioBackend, StubAudioBackend};
    use pomo_core::{AcknowledgmentStyle, AudioBackend, Config, Phase};
    use std::sync::Arc;
    use std::time::Duration;

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.notifications.style = AcknowledgmentStyle::Log;
        config
    }

    fn spawn_daemon(backend: Arc<dyn AudioBackend>) -> (DaemonHandles, broadcast::Sender<()>) {
        let (shutdown_sender, _) = broadcast::channel(1);
        (spawn_all(&quiet_config(), backend), shutdown_sender)
    }

    async fn send(
        request: Request,
        daemon: &(DaemonHandles, broadcast::Sender<()>),
    ) -> Response {
        handle_request(request, &daemon.0, &daemon.1).await
    }

    #[tokio::test(start_paused = true)]
    async fn full_focus_session_moves_to_break_and_counts() {
        let backend = Arc::new(StubAudioBackend::new());
        let daemon = spawn_daemon(backend.clone());

        let Response::Timer(started) = send(Request::Start, &daemon).await else {
            panic!("expected timer response");
        };
        assert!(started.running);
        assert_eq!(started.formatted_remaining(), "25:00");

        tokio::time::sleep(Duration::from_millis(1_500_500)).await;

        let Response::Timer(status) = send(Request::GetStatus, &daemon).await else {
            panic!("expected timer response");
        };
        assert_eq!(status.phase, Phase::Break);
        assert_eq!(status.seconds_remaining, 300);
        assert!(!status.running);

        let Response::Statistics(stats) = send(Request::GetStatistics, &daemon).await else {
            panic!("expected statistics response");
        };
        assert_eq!(stats.completed_sessions, 1);
        assert!((stats.total_focus_hours - 25.0 / 60.0).abs() < 1e-9);
        assert!(stats.last_focus_completed_at.is_some());

        assert_eq!(backend.cue_count(), 1);
    }

    #[tokio::test]
    async fn durations_are_clamped() {
        let daemon = spawn_daemon(Arc::new(StubAudioBackend::new()));

        let response = send(Request::SetFocusDuration { minutes: 70 }, &daemon).await;
        let Response::DurationChanged {
            applied,
            minutes,
            timer,
        } = response
        else {
            panic!("expected duration response");
        };
        assert!(applied);
        assert_eq!(minutes, 60);
        assert_eq!(timer.seconds_remaining, 3600);

        let response = send(Request::SetBreakDuration { minutes: 0 }, &daemon).await;
        assert!(matches!(
            response,
            Response::DurationChanged {
                applied: true,
                minutes: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn out_of_range_config_durations_are_clamped_at_startup() {
        let mut config = quiet_config();
        config.timer.focus_minutes = 90;
        config.timer.break_minutes = -3;
        let (shutdown_sender, _) = broadcast::channel(1);
        let handles = spawn_all(&config, Arc::new(StubAudioBackend::new()));

        let Response::Timer(status) =
            handle_request(Request::GetStatus, &handles, &shutdown_sender).await
        else {
            panic!("expected timer response");
        };

        assert_eq!(status.focus_minutes, 60);
        assert_eq!(status.break_minutes, 1);
        assert_eq!(status.formatted_remaining(), "60:00");
    }

    #[tokio::test]
    async fn duration_change_while_running_is_reported_as_ignored() {
        let daemon = spawn_daemon(Arc::new(StubAudioBackend::new()));

        send(Request::Start, &daemon).await;
        let response = send(Request::SetFocusDuration { minutes: 40 }, &daemon).await;

        assert!(matches!(
            response,
            Response::DurationChanged {
                applied: false,
                minutes: 25,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn media_failure_leaves_timer_untouched() {
        let daemon = spawn_daemon(Arc::new(FailingAudioBackend::unavailable()));

        send(Request::Start, &daemon).await;
        let response = send(
            Request::PlayBackgroundAudio {
                locator: "https://example.com/lofi.mp3".to_string(),
                volume: 0.3,
            },
            &daemon,
        )
        .await;
        assert!(matches!(response, Response::MediaFailed { .. }));

        let Response::Timer(status) = send(Request::GetStatus, &daemon).await else {
            panic!("expected timer response");
        };
        assert!(status.running);
    }

    #[tokio::test]
    async fn quote_comes_from_the_fixed_list() {
        let daemon = spawn_daemon(Arc::new(StubAudioBackend::new()));

        let Response::Quote { text } = send(Request::GetQuote, &daemon).await else {
            panic!("expected quote response");
        };
        assert!(pomo_core::MOTIVATIONAL_QUOTES.contains(&text.as_str()));
    }

    #[tokio::test]
    async fn shutdown_is_broadcast() {
        let daemon = spawn_daemon(Arc::new(StubAudioBackend::new()));
        let mut shutdown = daemon.1.subscribe();

        assert_eq!(send(Request::Shutdown, &daemon).await, Response::Ok);
        assert!(shutdown.recv().await.is_ok());
    }

    #[tokio::test]
    async fn ping_answers_pong() {
        let daemon = spawn_daemon(Arc::new(StubAudioBackend::new()));

        assert_eq!(send(Request::Ping, &daemon).await, Response::Pong);
    }
}
