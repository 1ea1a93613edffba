//! Inbound chat messages as seen by the plugin, and admin identification.

use narwhal_proto::{ChannelExt, Command, Message, Prefix, irc_eq, matches_hostmask};

/// Set of users allowed to run topic-changing commands.
///
/// An entry containing `!` or `@` is a hostmask pattern (`*!*@solus/core/*`);
/// any other entry is a nickname compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    nicks: Vec<String>,
    masks: Vec<String>,
}

impl AdminList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = AdminList::default();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            if entry.contains(['!', '@']) {
                list.masks.push(entry.to_string());
            } else {
                list.nicks.push(entry.to_string());
            }
        }
        list
    }

    pub fn is_admin(&self, prefix: &Prefix) -> bool {
        let Some(nick) = prefix.nick() else {
            return false;
        };
        if self.nicks.iter().any(|n| irc_eq(n, nick)) {
            return true;
        }
        let hostmask = prefix.to_string();
        self.masks.iter().any(|m| matches_hostmask(m, &hostmask))
    }

    pub fn is_empty(&self) -> bool {
        self.nicks.is_empty() && self.masks.is_empty()
    }
}

/// A single chat message addressed to the plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundCommand {
    /// Full message text, prefix included.
    pub text: String,
    /// First word after the command prefix; empty when the text has no prefix.
    pub command: String,
    /// Rest of the line after the command, leading whitespace removed.
    pub args: String,
    /// Reply target: the channel, or the issuer's nick for private messages.
    pub channel: String,
    /// Nick of the sender.
    pub issuer: String,
    pub is_admin: bool,
}

impl InboundCommand {
    pub fn new(
        text: impl Into<String>,
        channel: impl Into<String>,
        issuer: impl Into<String>,
        is_admin: bool,
        command_prefix: &str,
    ) -> Self {
        let text = text.into();
        let (command, args) = match text.strip_prefix(command_prefix) {
            Some(rest) => match rest.split_once(char::is_whitespace) {
                Some((command, args)) => (command.to_string(), args.trim_start().to_string()),
                None => (rest.to_string(), String::new()),
            },
            None => (String::new(), String::new()),
        };

        InboundCommand {
            text,
            command,
            args,
            channel: channel.into(),
            issuer: issuer.into(),
            is_admin,
        }
    }

    /// Build from a PRIVMSG sent by a user other than `own_nick`.
    pub fn from_message(
        msg: &Message,
        own_nick: &str,
        command_prefix: &str,
        admins: &AdminList,
    ) -> Option<Self> {
        let Command::PRIVMSG(_, text) = &msg.command else {
            return None;
        };
        let prefix = msg.prefix.as_ref()?;
        let issuer = prefix.nick()?;
        if irc_eq(issuer, own_nick) {
            return None;
        }
        let channel = msg.response_target()?;

        Some(InboundCommand::new(
            text.as_str(),
            channel,
            issuer,
            admins.is_admin(prefix),
            command_prefix,
        ))
    }

    /// Whether the message was sent to a channel rather than privately.
    pub fn is_channel(&self) -> bool {
        self.channel.is_channel_name()
    }
}
