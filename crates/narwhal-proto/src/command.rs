//! Client-side IRC commands.

use std::fmt::{self, Display, Formatter, Write};

use crate::error::MessageParseError;
use crate::response::Response;

/// An IRC command together with its parameters.
///
/// Commands the bot never inspects are kept verbatim in [`Command::Raw`] so
/// they still round-trip through logging.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Command {
    PASS(String),
    NICK(String),
    /// `USER <username> <mode> * :<realname>`
    USER(String, String, String),
    JOIN(String),
    PART(String, Option<String>),
    /// `KICK <channel> <nick> [:<reason>]`
    KICK(String, String, Option<String>),
    QUIT(Option<String>),
    PING(String, Option<String>),
    PONG(String, Option<String>),
    PRIVMSG(String, String),
    NOTICE(String, String),
    /// `TOPIC <channel> [:<topic>]`; `None` queries the topic.
    TOPIC(String, Option<String>),
    ERROR(String),
    Response(Response, Vec<String>),
    Raw(String, Vec<String>),
}

impl Command {
    /// Build a command from its name and already-split parameters.
    pub fn new(name: &str, args: Vec<&str>) -> Result<Command, MessageParseError> {
        if name.len() == 3
            && let Ok(code) = name.parse::<u16>()
        {
            return Ok(Command::Response(
                Response::from_code(code),
                args.into_iter().map(String::from).collect(),
            ));
        }

        let arg = |idx: usize, command: &'static str, expected: usize| {
            args.get(idx)
                .map(|s| s.to_string())
                .ok_or(MessageParseError::NotEnoughParams {
                    command,
                    expected,
                    got: args.len(),
                })
        };
        let opt = |idx: usize| args.get(idx).map(|s| s.to_string());

        let cmd = match name.to_ascii_uppercase().as_str() {
            "PASS" => Command::PASS(arg(0, "PASS", 1)?),
            "NICK" => Command::NICK(arg(0, "NICK", 1)?),
            "USER" => Command::USER(
                arg(0, "USER", 4)?,
                arg(1, "USER", 4)?,
                arg(3, "USER", 4)?,
            ),
            "JOIN" => Command::JOIN(arg(0, "JOIN", 1)?),
            "PART" => Command::PART(arg(0, "PART", 1)?, opt(1)),
            "KICK" => Command::KICK(arg(0, "KICK", 2)?, arg(1, "KICK", 2)?, opt(2)),
            "QUIT" => Command::QUIT(opt(0)),
            "PING" => Command::PING(arg(0, "PING", 1)?, opt(1)),
            "PONG" => Command::PONG(arg(0, "PONG", 1)?, opt(1)),
            "PRIVMSG" => Command::PRIVMSG(arg(0, "PRIVMSG", 2)?, arg(1, "PRIVMSG", 2)?),
            "NOTICE" => Command::NOTICE(arg(0, "NOTICE", 2)?, arg(1, "NOTICE", 2)?),
            "TOPIC" => Command::TOPIC(arg(0, "TOPIC", 1)?, opt(1)),
            "ERROR" => Command::ERROR(opt(0).unwrap_or_default()),
            _ => Command::Raw(name.to_string(), args.iter().map(|s| s.to_string()).collect()),
        };
        Ok(cmd)
    }
}

/// Whether a final parameter must be sent in trailing (`:`) form.
fn needs_colon_prefix(arg: &str) -> bool {
    arg.is_empty() || arg.contains(' ') || arg.starts_with(':')
}

/// Write a command whose last argument only takes a colon when required.
fn write_cmd<S: AsRef<str>>(f: &mut Formatter<'_>, cmd: &str, args: &[S]) -> fmt::Result {
    f.write_str(cmd)?;
    if let Some((last, middle)) = args.split_last() {
        for arg in middle {
            f.write_char(' ')?;
            f.write_str(arg.as_ref())?;
        }
        f.write_char(' ')?;
        if needs_colon_prefix(last.as_ref()) {
            f.write_char(':')?;
        }
        f.write_str(last.as_ref())?;
    }
    Ok(())
}

/// Write a command whose last argument is free text and always trailing.
fn write_cmd_freeform<S: AsRef<str>>(f: &mut Formatter<'_>, cmd: &str, args: &[S]) -> fmt::Result {
    f.write_str(cmd)?;
    if let Some((last, middle)) = args.split_last() {
        for arg in middle {
            f.write_char(' ')?;
            f.write_str(arg.as_ref())?;
        }
        f.write_str(" :")?;
        f.write_str(last.as_ref())?;
    }
    Ok(())
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(p) => write_cmd(f, "PASS", &[p]),
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            Command::USER(u, m, r) => {
                write_cmd_freeform(f, "USER", &[u.as_str(), m.as_str(), "*", r.as_str()])
            }
            Command::JOIN(c) => write_cmd(f, "JOIN", &[c]),
            Command::PART(c, Some(r)) => write_cmd_freeform(f, "PART", &[c, r]),
            Command::PART(c, None) => write_cmd(f, "PART", &[c]),
            Command::KICK(c, n, Some(r)) => write_cmd_freeform(f, "KICK", &[c, n, r]),
            Command::KICK(c, n, None) => write_cmd(f, "KICK", &[c, n]),
            Command::QUIT(Some(m)) => write_cmd_freeform(f, "QUIT", &[m]),
            Command::QUIT(None) => f.write_str("QUIT"),
            Command::PING(s, Some(t)) => write_cmd(f, "PING", &[s, t]),
            Command::PING(s, None) => write_cmd(f, "PING", &[s]),
            Command::PONG(s, Some(t)) => write_cmd(f, "PONG", &[s, t]),
            Command::PONG(s, None) => write_cmd(f, "PONG", &[s]),
            Command::PRIVMSG(t, m) => write_cmd_freeform(f, "PRIVMSG", &[t, m]),
            Command::NOTICE(t, m) => write_cmd_freeform(f, "NOTICE", &[t, m]),
            Command::TOPIC(c, Some(t)) => write_cmd_freeform(f, "TOPIC", &[c, t]),
            Command::TOPIC(c, None) => write_cmd(f, "TOPIC", &[c]),
            Command::ERROR(m) => write_cmd_freeform(f, "ERROR", &[m]),
            Command::Response(resp, args) => write_cmd(f, &format!("{:03}", resp.code()), args),
            Command::Raw(name, args) => write_cmd(f, name, args),
        }
    }
}
