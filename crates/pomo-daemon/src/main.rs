mod actors;
mod server;

use std::sync::Arc;

use actors::spawn_all;
use anyhow::Result;
use pomo_adapters::ProcessAudioBackend;
use pomo_core::Config;
use server::Server;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pomo_daemon=debug".parse()?))
        .init();

    info!("pomo daemon starting");

    let config = Config::load().unwrap_or_else(|error| {
        warn!(%error, "failed to load config, using defaults");
        Config::default()
    });

    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(1);
    let sigint_shutdown_sender = shutdown_sender.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("SIGINT received, initiating shutdown");
        sigint_shutdown_sender.send(()).ok();
    });

    let backend = ProcessAudioBackend::detect(config.audio.player);
    let handles = spawn_all(&config, Arc::new(backend));

    let server = Server::new(handles.clone(), shutdown_sender);
    server.run(shutdown_receiver).await?;

    // the exit below skips destructors, so the player child must go first
    handles.audio.stop().await;

    info!("pomo daemon stopped");
    std::process::exit(0);
}
