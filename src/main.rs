//! narwhal-solus - Solus community IRC bot

use narwhal_solus::client;
use narwhal_solus::config::{Config, validate};
use narwhal_solus::solus::SolusPlugin;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {config_path}", errors.len());
    }

    let mut plugin = SolusPlugin::new(&config.solus)?;

    info!(
        host = %config.server.host,
        port = config.server.port(),
        tls = config.server.tls,
        nick = %config.identity.nick,
        dev_channel = %plugin.tracker().dev_channel(),
        "Starting narwhal-solus"
    );

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C");
                let _ = signal_tx.send(());
            }
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });

    client::run_with_reconnect(&config, &mut plugin, &mut shutdown_rx).await?;
    drop(shutdown_tx);

    info!("Shutdown complete");
    Ok(())
}
