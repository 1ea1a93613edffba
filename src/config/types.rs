//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_command_prefix, default_dev_channel, default_ping_interval, default_pong_timeout,
    default_realname, default_reconnect_delay, default_registration_timeout, default_true,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Upstream IRC server.
    pub server: ServerConfig,
    /// How the bot presents itself.
    pub identity: IdentityConfig,
    /// Channels joined after registration.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Admin entries: a bare nick, or a `nick!user@host` mask with wildcards.
    #[serde(default)]
    pub admins: Vec<String>,
    /// Solus plugin settings.
    #[serde(default)]
    pub solus: SolusConfig,
    /// Registration and keepalive timeouts.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    /// Reconnect policy.
    #[serde(default)]
    pub reconnect: ReconnectConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Upstream server connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Hostname (also used for TLS server name verification).
    pub host: String,
    /// Port; defaults to 6697 with TLS and 6667 without.
    pub port: Option<u16>,
    /// Connect over TLS, verifying against the system root store.
    #[serde(default)]
    pub tls: bool,
    /// Connection password sent with PASS.
    pub password: Option<String>,
}

impl ServerConfig {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(if self.tls { 6697 } else { 6667 })
    }
}

/// Nick, user and services identity.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub nick: String,
    /// Username for USER; defaults to the nick.
    pub username: Option<String>,
    #[serde(default = "default_realname")]
    pub realname: String,
    /// When set, `IDENTIFY` is sent to NickServ after registration.
    pub nickserv_password: Option<String>,
}

impl IdentityConfig {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nick)
    }
}

/// Solus plugin settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SolusConfig {
    /// Prefix that marks a message as a bot command.
    #[serde(default = "default_command_prefix")]
    pub prefix: String,
    /// Channel whose topic carries the stable sync status.
    #[serde(default = "default_dev_channel")]
    pub dev_channel: String,
}

impl Default for SolusConfig {
    fn default() -> Self {
        Self {
            prefix: default_command_prefix(),
            dev_channel: default_dev_channel(),
        }
    }
}

/// Timeouts for connection registration and keepalive.
///
/// - `registration`: seconds allowed between connect and RPL_WELCOME (default: 60)
/// - `ping`: seconds of silence before the bot sends its own PING (default: 120)
/// - `pong`: seconds to wait for any traffic after that PING (default: 60)
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_registration_timeout")]
    pub registration: u64,
    #[serde(default = "default_ping_interval")]
    pub ping: u64,
    #[serde(default = "default_pong_timeout")]
    pub pong: u64,
}

impl TimeoutsConfig {
    pub fn registration(&self) -> Duration {
        Duration::from_secs(self.registration)
    }

    pub fn ping(&self) -> Duration {
        Duration::from_secs(self.ping)
    }

    pub fn pong(&self) -> Duration {
        Duration::from_secs(self.pong)
    }
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            registration: default_registration_timeout(),
            ping: default_ping_interval(),
            pong: default_pong_timeout(),
        }
    }
}

/// Reconnect policy after a lost connection.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconnectConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds to wait before reconnecting.
    #[serde(default = "default_reconnect_delay")]
    pub delay_secs: u64,
    /// Consecutive failed attempts before giving up (0 = never give up).
    #[serde(default)]
    pub max_attempts: u32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_secs: default_reconnect_delay(),
            max_attempts: 0,
        }
    }
}
