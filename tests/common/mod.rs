//! Integration test common infrastructure.
//!
//! Provides a scripted IRC server for driving the bot over a real socket,
//! a recording [`Session`](narwhal_solus::session::Session) for plugin-level
//! flows, and config builders.

pub mod server;
pub mod session;

#[allow(unused_imports)]
pub use server::{FakeServer, ServerConn};
#[allow(unused_imports)]
pub use session::RecordingSession;

use narwhal_solus::config::Config;

/// Config pointing at a local test server.
///
/// `extra` is appended after the `[identity]` table, so it may only add
/// keys to it or open further tables.
#[allow(dead_code)]
pub fn test_config(port: u16, extra: &str) -> Config {
    let text = format!(
        r##"
channels = ["#Solus", "#Solus-Dev"]
admins = ["*!*@solus/core/*"]

[server]
host = "127.0.0.1"
port = {port}

[identity]
nick = "Narwhal"
{extra}
"##
    );
    toml::from_str(&text).expect("test config should parse")
}
