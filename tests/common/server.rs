//! Scripted IRC server.
//!
//! Accepts the bot's connection on a local port and lets a test send raw
//! lines and assert on what the bot writes back.

use narwhal_proto::{Command, Message};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

pub const SERVER_NAME: &str = "irc.test";

/// A listening test server.
pub struct FakeServer {
    listener: TcpListener,
}

impl FakeServer {
    /// Bind on an ephemeral localhost port.
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Wait for the bot to connect.
    pub async fn accept(&self) -> anyhow::Result<ServerConn> {
        let (stream, _) = timeout(Duration::from_secs(5), self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(ServerConn {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }
}

/// The server side of one accepted connection.
pub struct ServerConn {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

#[allow(dead_code)]
impl ServerConn {
    /// Send a raw IRC line to the bot.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single message from the bot.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a message with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Message> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("bot closed the connection");
        }
        line.trim_end()
            .parse::<Message>()
            .map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive messages until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Message>>
    where
        F: FnMut(&Message) -> bool,
    {
        let mut messages = Vec::new();
        loop {
            let msg = self.recv().await?;
            let done = predicate(&msg);
            messages.push(msg);
            if done {
                break;
            }
        }
        Ok(messages)
    }

    /// Assert the bot stays quiet for `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(msg) => anyhow::bail!("expected silence, got {msg}"),
            Err(_) => Ok(()),
        }
    }

    /// Read the registration burst up to USER and answer with RPL_WELCOME.
    ///
    /// Returns what the bot sent before USER.
    pub async fn welcome(&mut self, nick: &str) -> anyhow::Result<Vec<Message>> {
        let burst = self
            .recv_until(|msg| matches!(msg.command, Command::USER(..)))
            .await?;
        self.send_raw(&format!(":{SERVER_NAME} 001 {nick} :Welcome to the test network"))
            .await?;
        Ok(burst)
    }

    /// Confirm a JOIN from the bot and report the channel topic.
    pub async fn confirm_join(
        &mut self,
        nick: &str,
        channel: &str,
        topic: Option<&str>,
    ) -> anyhow::Result<()> {
        self.send_raw(&format!(":{nick}!~narwhal@127.0.0.1 JOIN {channel}"))
            .await?;
        match topic {
            Some(topic) => {
                self.send_raw(&format!(":{SERVER_NAME} 332 {nick} {channel} :{topic}"))
                    .await
            }
            None => {
                self.send_raw(&format!(
                    ":{SERVER_NAME} 331 {nick} {channel} :No topic is set"
                ))
                .await
            }
        }
    }

    /// Deliver a PRIVMSG to the bot from `hostmask`.
    pub async fn privmsg_from(
        &mut self,
        hostmask: &str,
        target: &str,
        text: &str,
    ) -> anyhow::Result<()> {
        self.send_raw(&format!(":{hostmask} PRIVMSG {target} :{text}"))
            .await
    }
}
