//! Unified error handling for the bot client.
//!
//! Plugin-level failures never surface here: the Solus plugin degrades to
//! fallback values and logs instead. These errors end a connection and are
//! handled by the reconnect loop.

use std::time::Duration;
use thiserror::Error;
use tokio_rustls::rustls::pki_types::InvalidDnsNameError;
use tokio_util::codec::LinesCodecError;

/// Errors that terminate an IRC session.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line codec error: {0}")]
    Codec(#[from] LinesCodecError),

    #[error("invalid TLS server name: {0}")]
    InvalidServerName(#[from] InvalidDnsNameError),

    #[error("registration did not complete within {0:?}")]
    RegistrationTimeout(Duration),

    #[error("no traffic from server within {0:?} of our PING")]
    PingTimeout(Duration),

    #[error("server closed the connection")]
    ConnectionClosed,

    /// The server sent ERROR (usually right before closing the link).
    #[error("server error: {0}")]
    Server(String),
}

impl ClientError {
    /// Get a static error code string for log fields.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Codec(_) => "codec",
            Self::InvalidServerName(_) => "invalid_server_name",
            Self::RegistrationTimeout(_) => "registration_timeout",
            Self::PingTimeout(_) => "ping_timeout",
            Self::ConnectionClosed => "connection_closed",
            Self::Server(_) => "server_error",
        }
    }
}
