use anyhow::{bail, Context, Result};
use pomo_core::Translator;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;

const DAEMON_STARTUP_TIMEOUT: Duration = Duration::from_secs(5);
const DAEMON_POLL_INTERVAL: Duration = Duration::from_millis(100);
const DAEMON_PATH_VARIABLE: &str = "POMO_DAEMON_PATH";

pub async fn ensure_daemon_running(translator: &Translator) -> Result<()> {
    println!("{}", translator.get("daemon.starting"));

    spawn_daemon()?;
    wait_for_socket().await?;

    Ok(())
}

fn spawn_daemon() -> Result<()> {
    let daemon_path = find_daemon_binary()?;

    Command::new(&daemon_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch {}", daemon_path.display()))?;

    Ok(())
}

fn find_daemon_binary() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(DAEMON_PATH_VARIABLE) {
        return Ok(PathBuf::from(path));
    }

    let current_exe = std::env::current_exe().context("cannot locate the pomo executable")?;
    let exe_dir = current_exe
        .parent()
        .context("cannot locate the pomo executable directory")?;

    let daemon_name = if cfg!(windows) {
        "pomo-daemon.exe"
    } else {
        "pomo-daemon"
    };

    let sibling_path = exe_dir.join(daemon_name);
    if sibling_path.exists() {
        return Ok(sibling_path);
    }

    if let Ok(path) = which::which(daemon_name) {
        return Ok(path);
    }

    bail!(
        "pomo-daemon not found. Install it next to pomo or set {}",
        DAEMON_PATH_VARIABLE
    );
}

async fn wait_for_socket() -> Result<()> {
    let socket_path = pomo_protocol::socket_path();
    let start = std::time::Instant::now();

    while start.elapsed() < DAEMON_STARTUP_TIMEOUT {
        if socket_path.exists() {
            return Ok(());
        }
        sleep(DAEMON_POLL_INTERVAL).await;
    }

    bail!(
        "timeout: the daemon did not start within {} seconds",
        DAEMON_STARTUP_TIMEOUT.as_secs()
    );
}
