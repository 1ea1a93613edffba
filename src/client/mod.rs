//! IRC client connection loop.
//!
//! Drives one [`ClientState`] over a [`Connection`]: reads lines, feeds the
//! state machine, hands chat messages to the Solus plugin and flushes the
//! outbox after every inbound message. Events are processed strictly one at
//! a time, so the plugin never needs locking.

mod state;
pub mod transport;

pub use state::ClientState;
pub use transport::{Connection, connect};

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use narwhal_proto::{Command, Message};
use tokio::sync::broadcast;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::ClientError;
use crate::inbound::{AdminList, InboundCommand};
use crate::solus::SolusPlugin;

const QUIT_MESSAGE: &str = "Narwhal shutting down";

/// Connect once and run until shutdown or a connection error.
pub async fn run(
    config: &Config,
    plugin: &mut SolusPlugin,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<(), ClientError> {
    let mut conn = connect(&config.server).await?;
    let mut registered = false;
    run_session(&mut conn, config, plugin, shutdown, &mut registered).await
}

/// Run sessions back to back according to the reconnect policy.
///
/// Returns `Ok(())` on shutdown, or the last error once reconnecting is
/// disabled or `max_attempts` consecutive attempts failed. A session that
/// completed registration resets the failure count.
pub async fn run_with_reconnect(
    config: &Config,
    plugin: &mut SolusPlugin,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<(), ClientError> {
    let policy = &config.reconnect;
    let delay = Duration::from_secs(policy.delay_secs);
    let mut failures: u32 = 0;

    loop {
        let mut registered = false;
        let result = match connect(&config.server).await {
            Ok(mut conn) => {
                run_session(&mut conn, config, plugin, shutdown, &mut registered).await
            }
            Err(e) => Err(e),
        };

        let err = match result {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        if registered {
            failures = 0;
        }
        failures += 1;

        if !policy.enabled || (policy.max_attempts > 0 && failures >= policy.max_attempts) {
            error!(
                error = %err,
                code = err.error_code(),
                attempts = failures,
                "Giving up on IRC connection"
            );
            return Err(err);
        }

        warn!(
            error = %err,
            code = err.error_code(),
            attempt = failures,
            delay_secs = policy.delay_secs,
            "Connection lost, reconnecting"
        );

        tokio::select! {
            _ = shutdown.recv() => {
                info!("Shutdown requested while waiting to reconnect");
                return Ok(());
            }
            _ = sleep(delay) => {}
        }
    }
}

/// Run one session over an established connection.
///
/// `registered` is set once the server sends RPL_WELCOME.
pub async fn run_session(
    conn: &mut Connection,
    config: &Config,
    plugin: &mut SolusPlugin,
    shutdown: &mut broadcast::Receiver<()>,
    registered: &mut bool,
) -> Result<(), ClientError> {
    let admins = AdminList::new(&config.admins);
    if admins.is_empty() {
        warn!("No admins configured; topic commands are disabled");
    }

    let timeouts = &config.timeouts;
    let registration_deadline = Instant::now() + timeouts.registration();
    let mut awaiting_pong = false;

    let mut state = ClientState::new(config);
    state.start();
    flush(conn, &mut state).await?;

    loop {
        let wait = if !state.is_registered() {
            registration_deadline.saturating_duration_since(Instant::now())
        } else if awaiting_pong {
            timeouts.pong()
        } else {
            timeouts.ping()
        };

        tokio::select! {
            _ = shutdown.recv() => {
                info!("Shutdown requested, sending QUIT");
                state.quit(Some(QUIT_MESSAGE.to_string()));
                flush(conn, &mut state).await?;
                return Ok(());
            }
            next = timeout(wait, conn.next()) => {
                match next {
                    Err(_) if !state.is_registered() => {
                        return Err(ClientError::RegistrationTimeout(timeouts.registration()));
                    }
                    Err(_) if awaiting_pong => {
                        return Err(ClientError::PingTimeout(timeouts.pong()));
                    }
                    Err(_) => {
                        debug!("Connection idle, sending PING");
                        state.ping();
                        awaiting_pong = true;
                    }
                    Ok(None) => return Err(ClientError::ConnectionClosed),
                    Ok(Some(Err(e))) => return Err(e.into()),
                    Ok(Some(Ok(line))) => {
                        awaiting_pong = false;
                        handle_line(&line, &mut state, plugin, &admins, &config.solus.prefix)?;
                        *registered |= state.is_registered();
                    }
                }
            }
        }

        flush(conn, &mut state).await?;
    }
}

fn handle_line(
    line: &str,
    state: &mut ClientState,
    plugin: &mut SolusPlugin,
    admins: &AdminList,
    command_prefix: &str,
) -> Result<(), ClientError> {
    let msg = match line.parse::<Message>() {
        Ok(msg) => msg,
        Err(e) => {
            warn!(error = %e, line = %line, "Skipping unparseable line");
            return Ok(());
        }
    };
    debug!(line = %line, "<-");

    if let Command::ERROR(reason) = &msg.command {
        return Err(ClientError::Server(reason.clone()));
    }

    state.feed(&msg);

    if let Some(inbound) =
        InboundCommand::from_message(&msg, state.nick(), command_prefix, admins)
    {
        plugin.handle(state, &inbound);
    }
    Ok(())
}

/// Write out everything the state machine queued.
async fn flush(conn: &mut Connection, state: &mut ClientState) -> Result<(), ClientError> {
    for msg in state.drain() {
        if is_sensitive(&msg.command) {
            debug!("-> [credentials redacted]");
        } else {
            debug!(line = %msg, "->");
        }
        conn.send(msg.to_string()).await?;
    }
    Ok(())
}

/// Messages carrying passwords are kept out of the logs.
fn is_sensitive(command: &Command) -> bool {
    match command {
        Command::PASS(_) => true,
        Command::PRIVMSG(target, text) => {
            target.eq_ignore_ascii_case("NickServ")
                && text.to_ascii_uppercase().starts_with("IDENTIFY")
        }
        _ => false,
    }
}
