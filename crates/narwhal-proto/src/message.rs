//! Owned IRC messages.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::chan::ChannelExt;
use crate::command::Command;
use crate::error::MessageParseError;
use crate::prefix::Prefix;

/// A parsed IRC message. IRCv3 tags are skipped on input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Source of the message (`nick!user@host` or a server name).
    pub prefix: Option<Prefix>,
    /// The command and its parameters.
    pub command: Command,
}

impl Message {
    /// Nickname of the sender, if the message came from a user.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }

    /// Where a reply to this message should go.
    ///
    /// Channel messages are answered in the channel; private messages are
    /// answered to the sender.
    pub fn response_target(&self) -> Option<&str> {
        match &self.command {
            Command::PRIVMSG(target, _) | Command::NOTICE(target, _)
                if target.is_channel_name() =>
            {
                Some(target)
            }
            _ => self.source_nickname(),
        }
    }
}

impl From<Command> for Message {
    fn from(command: Command) -> Self {
        Message {
            prefix: None,
            command,
        }
    }
}

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim_end_matches(['\r', '\n']);
        if rest.trim().is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        if rest.starts_with('@') {
            let (_, after_tags) = rest
                .split_once(' ')
                .ok_or(MessageParseError::MissingCommand)?;
            rest = after_tags.trim_start_matches(' ');
        }

        let prefix = match rest.strip_prefix(':') {
            Some(stripped) => {
                let (prefix, after_prefix) = stripped
                    .split_once(' ')
                    .ok_or(MessageParseError::MissingCommand)?;
                rest = after_prefix.trim_start_matches(' ');
                Some(Prefix::new_from_str(prefix))
            }
            None => None,
        };

        let (head, trailing) = match rest.split_once(" :") {
            Some((head, trailing)) => (head, Some(trailing)),
            None => (rest, None),
        };

        let mut parts = head.split(' ').filter(|p| !p.is_empty());
        let name = parts.next().ok_or(MessageParseError::MissingCommand)?;
        let mut args: Vec<&str> = parts.collect();
        args.extend(trailing);

        Ok(Message {
            prefix,
            command: Command::new(name, args)?,
        })
    }
}

impl Display for Message {
    /// Renders the line without the CRLF terminator.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{prefix} ")?;
        }
        write!(f, "{}", self.command)
    }
}
