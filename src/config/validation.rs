//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use narwhal_proto::ChannelExt;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must not be 0")]
    InvalidPort,
    #[error("identity.nick is required")]
    MissingNick,
    #[error("identity.nick is not a valid nickname: '{0}'")]
    InvalidNick(String),
    #[error("'{0}' is not a valid channel name")]
    InvalidChannel(String),
    #[error("admins contains an empty entry")]
    EmptyAdminEntry,
    #[error("solus.prefix must be non-empty and contain no whitespace, got '{0}'")]
    InvalidCommandPrefix(String),
    #[error("timeouts.{0} must be greater than 0")]
    ZeroTimeout(&'static str),
    #[error("reconnect.delay_secs must be greater than 0 when reconnecting is enabled")]
    ZeroReconnectDelay,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == Some(0) {
        errors.push(ValidationError::InvalidPort);
    }

    let nick = &config.identity.nick;
    if nick.is_empty() {
        errors.push(ValidationError::MissingNick);
    } else if !is_valid_nick(nick) {
        errors.push(ValidationError::InvalidNick(nick.clone()));
    }

    for channel in config.channels.iter().chain([&config.solus.dev_channel]) {
        if !channel.is_channel_name() {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        }
    }

    if config.admins.iter().any(|a| a.trim().is_empty()) {
        errors.push(ValidationError::EmptyAdminEntry);
    }

    let prefix = &config.solus.prefix;
    if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidCommandPrefix(prefix.clone()));
    }

    let timeouts = &config.timeouts;
    for (name, value) in [
        ("registration", timeouts.registration),
        ("ping", timeouts.ping),
        ("pong", timeouts.pong),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if config.reconnect.enabled && config.reconnect.delay_secs == 0 {
        errors.push(ValidationError::ZeroReconnectDelay);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// RFC 2812 nickname shape: no leading digit or '-', no spaces or mask characters.
fn is_valid_nick(nick: &str) -> bool {
    let Some(first) = nick.chars().next() else {
        return false;
    };
    !first.is_ascii_digit()
        && first != '-'
        && !nick
            .chars()
            .any(|c| matches!(c, ' ' | ',' | '*' | '?' | '!' | '@' | '#' | ':' | '.'))
}
