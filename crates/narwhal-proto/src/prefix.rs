//! Message source prefix.

use std::fmt::{self, Display, Formatter};

/// Origin of a message: a server, or a user's `nick!user@host`.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Prefix {
    /// Server name (e.g. `irc.libera.chat`).
    ServerName(String),
    /// User prefix as (nickname, username, hostname). User and host may be
    /// empty when the server sends a bare nick.
    Nickname(String, String, String),
}

impl Prefix {
    /// Parse a prefix leniently.
    ///
    /// Anything with `!` or `@` is a user mask; a bare token with a dot is a
    /// server name; anything else is a bare nick.
    pub fn new_from_str(s: &str) -> Self {
        if !s.contains(['!', '@']) {
            return if s.contains('.') {
                Prefix::ServerName(s.to_string())
            } else {
                Prefix::Nickname(s.to_string(), String::new(), String::new())
            };
        }

        let (rest, host) = match s.split_once('@') {
            Some((rest, host)) => (rest, host),
            None => (s, ""),
        };
        let (nick, user) = match rest.split_once('!') {
            Some((nick, user)) => (nick, user),
            None => (rest, ""),
        };
        Prefix::Nickname(nick.to_string(), user.to_string(), host.to_string())
    }

    /// The nickname, when the prefix names a user.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(nick, _, _) => Some(nick),
            Prefix::ServerName(_) => None,
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::ServerName(name) => f.write_str(name),
            Prefix::Nickname(nick, user, host) => {
                f.write_str(nick)?;
                if !user.is_empty() {
                    write!(f, "!{user}")?;
                }
                if !host.is_empty() {
                    write!(f, "@{host}")?;
                }
                Ok(())
            }
        }
    }
}
