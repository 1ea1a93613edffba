//! Sans-IO client session state.
//!
//! [`ClientState`] tracks what the bot knows about its connection (nick,
//! registration, joined channels and their topics) and queues outgoing
//! messages in an outbox. The connection loop feeds it every inbound message
//! and writes out whatever it queued.

use std::collections::HashMap;

use narwhal_proto::{Command, Message, Response, irc_eq, irc_to_lower};
use tracing::{info, warn};

use crate::config::Config;
use crate::session::Session;

#[derive(Debug, Clone)]
struct ChannelState {
    /// Channel name as the server spelled it in our JOIN.
    name: String,
    topic: Option<String>,
}

/// Connection state for one IRC session.
#[derive(Debug)]
pub struct ClientState {
    nick: String,
    username: String,
    realname: String,
    password: Option<String>,
    nickserv_password: Option<String>,
    autojoin: Vec<String>,
    registered: bool,
    /// Joined channels keyed by RFC 1459 lowercase name.
    channels: HashMap<String, ChannelState>,
    outbox: Vec<Message>,
}

impl ClientState {
    pub fn new(config: &Config) -> Self {
        Self {
            nick: config.identity.nick.clone(),
            username: config.identity.username().to_string(),
            realname: config.identity.realname.clone(),
            password: config.server.password.clone(),
            nickserv_password: config.identity.nickserv_password.clone(),
            autojoin: config.channels.clone(),
            registered: false,
            channels: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    /// Current nickname (as confirmed by the server once registered).
    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Names of the channels the client is in.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.channels.values().map(|c| c.name.as_str())
    }

    /// Queue the registration burst (PASS, NICK, USER).
    pub fn start(&mut self) {
        if let Some(password) = self.password.clone() {
            self.send(Command::PASS(password));
        }
        self.send(Command::NICK(self.nick.clone()));
        self.send(Command::USER(
            self.username.clone(),
            "0".to_string(),
            self.realname.clone(),
        ));
    }

    /// Queue a keepalive PING.
    pub fn ping(&mut self) {
        self.send(Command::PING(self.nick.clone(), None));
    }

    pub fn quit(&mut self, reason: Option<String>) {
        self.send(Command::QUIT(reason));
    }

    /// Take everything queued since the last drain.
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }

    fn send(&mut self, command: Command) {
        self.outbox.push(Message::from(command));
    }

    fn is_me(&self, msg: &Message) -> bool {
        msg.source_nickname().is_some_and(|n| irc_eq(n, &self.nick))
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut ChannelState> {
        self.channels.get_mut(&irc_to_lower(name))
    }

    /// Update state from one inbound message.
    pub fn feed(&mut self, msg: &Message) {
        match &msg.command {
            Command::PING(token, _) => {
                self.send(Command::PONG(token.clone(), None));
            }
            Command::Response(resp, args) => self.handle_numeric(*resp, args),
            Command::NICK(new_nick) if self.is_me(msg) => {
                info!(old = %self.nick, new = %new_nick, "Nick changed");
                self.nick = new_nick.clone();
            }
            Command::JOIN(channel) if self.is_me(msg) => {
                info!(channel = %channel, "Joined channel");
                self.channels.insert(
                    irc_to_lower(channel),
                    ChannelState {
                        name: channel.clone(),
                        topic: None,
                    },
                );
            }
            Command::PART(channel, _) if self.is_me(msg) => {
                info!(channel = %channel, "Left channel");
                self.channels.remove(&irc_to_lower(channel));
            }
            Command::KICK(channel, target, reason) if irc_eq(target, &self.nick) => {
                warn!(
                    channel = %channel,
                    by = msg.source_nickname().unwrap_or("?"),
                    reason = reason.as_deref().unwrap_or(""),
                    "Kicked from channel"
                );
                self.channels.remove(&irc_to_lower(channel));
            }
            Command::TOPIC(channel, Some(topic)) => {
                if let Some(state) = self.channel_mut(channel) {
                    state.topic = (!topic.is_empty()).then(|| topic.clone());
                }
            }
            _ => {}
        }
    }

    fn handle_numeric(&mut self, resp: Response, args: &[String]) {
        match resp {
            Response::RPL_WELCOME => {
                if let Some(nick) = args.first() {
                    self.nick = nick.clone();
                }
                self.registered = true;
                info!(nick = %self.nick, "Registered with server");

                if let Some(password) = self.nickserv_password.clone() {
                    self.send(Command::PRIVMSG(
                        "NickServ".to_string(),
                        format!("IDENTIFY {password}"),
                    ));
                }
                for channel in self.autojoin.clone() {
                    self.send(Command::JOIN(channel));
                }
            }
            Response::ERR_NICKNAMEINUSE | Response::ERR_ERRONEUSNICKNAME if !self.registered => {
                let taken = std::mem::take(&mut self.nick);
                self.nick = format!("{taken}_");
                warn!(taken = %taken, retry = %self.nick, "Nickname in use, retrying");
                self.send(Command::NICK(self.nick.clone()));
            }
            Response::RPL_TOPIC => {
                if let [_, channel, topic, ..] = args
                    && let Some(state) = self.channel_mut(channel)
                {
                    state.topic = Some(topic.clone());
                }
            }
            Response::RPL_NOTOPIC => {
                if let [_, channel, ..] = args
                    && let Some(state) = self.channel_mut(channel)
                {
                    state.topic = None;
                }
            }
            resp if resp.is_error() => {
                warn!(code = resp.code(), args = ?args, "Server reported an error");
            }
            _ => {}
        }
    }
}

impl Session for ClientState {
    fn is_in_channel(&self, channel: &str) -> bool {
        self.channels.contains_key(&irc_to_lower(channel))
    }

    fn join(&mut self, channel: &str) {
        self.send(Command::JOIN(channel.to_string()));
    }

    fn channel_topic(&self, channel: &str) -> Option<&str> {
        self.channels
            .get(&irc_to_lower(channel))
            .and_then(|c| c.topic.as_deref())
    }

    fn set_topic(&mut self, channel: &str, topic: &str) {
        self.send(Command::TOPIC(channel.to_string(), Some(topic.to_string())));
    }

    fn reply(&mut self, target: &str, text: &str) {
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            self.send(Command::PRIVMSG(target.to_string(), line.to_string()));
        }
    }
}
