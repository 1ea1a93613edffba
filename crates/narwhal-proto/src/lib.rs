//! Sans-IO IRC message layer for the narwhal bot.
//!
//! Parses and encodes the small set of client-side messages a bot needs
//! (registration, channel membership, topics, messaging, keepalive) and
//! exposes the RFC 1459 case mapping and hostmask matching helpers.
//!
//! ```
//! use narwhal_proto::{Command, Message};
//!
//! let msg: Message = ":alice!a@host PRIVMSG #solus :.budgie".parse().unwrap();
//! assert_eq!(msg.source_nickname(), Some("alice"));
//! assert!(matches!(msg.command, Command::PRIVMSG(_, _)));
//!
//! let out = Message::from(Command::TOPIC("#solus".into(), Some("new topic".into())));
//! assert_eq!(out.to_string(), "TOPIC #solus :new topic");
//! ```

#![deny(clippy::all)]

pub mod casemap;
pub mod chan;
pub mod command;
pub mod error;
pub mod mask;
pub mod message;
pub mod prefix;
pub mod response;

pub use self::casemap::{irc_eq, irc_to_lower};
pub use self::chan::ChannelExt;
pub use self::command::Command;
pub use self::error::MessageParseError;
pub use self::mask::{matches_hostmask, wildcard_match};
pub use self::message::Message;
pub use self::prefix::Prefix;
pub use self::response::Response;
