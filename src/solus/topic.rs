//! Stable/Unstable status carried in the development channel topic.
//!
//! The topic always has the shape
//! `Solus Development | Stable: <status> | Unstable: <status>`. Once the
//! stable repository has been synced, the stable status embeds the sync time:
//! `Synced (Last on 2023-01-01T00:00:00-05:00)`.
//!
//! State transitions over the Unstable field are not enforced: any admin may
//! freeze, mark synced or set a message at any time.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use regex::Regex;
use tracing::{info, warn};

use crate::session::Session;

/// Leading label of the development topic.
pub const TOPIC_LABEL: &str = "Solus Development";

/// Answer given when no sync timestamp can be read from the topic.
pub const UNKNOWN_LAST_SYNCED: &str = "some point recently";

/// `strftime` format of the embedded sync timestamp (`2023-01-01T00:00:00-05:00`).
pub const SYNC_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Field separators accept ASCII whitespace only.
const SYNCED_TOPIC_PATTERN: &str = r"Solus Development(?-u:\s)\|(?-u:\s)Stable:(?-u:\s)Synced(?-u:\s)\(Last on ([0-9A-Za-z:\-\+]+)\)(?-u:\s)\|(?-u:\s)Unstable:.+$";

pub fn compose_synced_topic(timestamp: &str) -> String {
    format!("{TOPIC_LABEL} | Stable: Synced (Last on {timestamp}) | Unstable: Unfrozen")
}

pub fn compose_frozen_topic() -> String {
    format!("{TOPIC_LABEL} | Stable: Syncing | Unstable: Frozen")
}

pub fn compose_unstable_topic(last_synced: &str, message: &str) -> String {
    format!("{TOPIC_LABEL} | Stable: Synced (Last on {last_synced}) | Unstable: {message}")
}

/// Format a wall-clock instant the way it is embedded in the topic.
pub fn format_sync_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format(SYNC_TIMESTAMP_FORMAT).to_string()
}

/// Keeps the cached "last synced" timestamp consistent with the dev topic.
#[derive(Debug)]
pub struct TopicTracker {
    pattern: Regex,
    dev_channel: String,
    /// Empty until the first message or query; never expires.
    last_synced: Option<String>,
}

impl TopicTracker {
    /// Compile the topic pattern once. Failure is a startup error.
    pub fn new(dev_channel: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(SYNCED_TOPIC_PATTERN)?,
            dev_channel: dev_channel.into(),
            last_synced: None,
        })
    }

    pub fn dev_channel(&self) -> &str {
        &self.dev_channel
    }

    /// Cached timestamp, if one has been derived or set yet.
    pub fn last_synced(&self) -> Option<&str> {
        self.last_synced.as_deref()
    }

    fn find_timestamp<'t>(&self, topic: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(topic)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Pull the sync timestamp out of a topic, falling back to
    /// [`UNKNOWN_LAST_SYNCED`] when the topic carries none.
    pub fn extract_last_synced(&self, topic: &str) -> String {
        self.find_timestamp(topic)
            .unwrap_or(UNKNOWN_LAST_SYNCED)
            .to_string()
    }

    /// Re-derive the timestamp from the live dev channel topic and cache it.
    ///
    /// Joins the dev channel first when needed; the topic only becomes known
    /// after the server confirms the join, so the first call usually falls
    /// back.
    pub fn refresh_last_synced<S: Session + ?Sized>(&mut self, session: &mut S) -> String {
        if !session.is_in_channel(&self.dev_channel) {
            info!(channel = %self.dev_channel, "Joining dev channel to read its topic");
            session.join(&self.dev_channel);
        }

        let found = match session.channel_topic(&self.dev_channel) {
            Some(topic) => {
                let found = self.find_timestamp(topic).map(str::to_string);
                if found.is_none() {
                    warn!(topic = %topic, "Failed to get last synced date from topic");
                }
                found
            }
            None => {
                warn!(channel = %self.dev_channel, "Failed to look up dev channel topic");
                None
            }
        };

        let last_synced = found.unwrap_or_else(|| UNKNOWN_LAST_SYNCED.to_string());
        self.last_synced = Some(last_synced.clone());
        last_synced
    }

    /// Mark the stable repository as syncing and freeze unstable.
    pub fn freeze<S: Session + ?Sized>(&self, session: &mut S, channel: &str, issuer: &str) {
        let topic = compose_frozen_topic();
        info!(issuer = %issuer, channel = %channel, "Froze unstable for a sync");
        session.set_topic(channel, &topic);
    }

    /// Record a completed sync at `now` and unfreeze unstable.
    ///
    /// Returns the timestamp written into the topic, which is also cached.
    pub fn mark_synced<S, Tz>(
        &mut self,
        session: &mut S,
        channel: &str,
        issuer: &str,
        now: &DateTime<Tz>,
    ) -> String
    where
        S: Session + ?Sized,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let timestamp = format_sync_timestamp(now);
        info!(issuer = %issuer, at = %timestamp, "Performed a sync and updated the topic");
        session.set_topic(channel, &compose_synced_topic(&timestamp));
        self.last_synced = Some(timestamp.clone());
        timestamp
    }

    /// Replace the Unstable field, keeping the stable field current.
    pub fn set_unstable<S: Session + ?Sized>(
        &mut self,
        session: &mut S,
        channel: &str,
        issuer: &str,
        message: &str,
    ) {
        let last_synced = self.refresh_last_synced(session);
        let topic = compose_unstable_topic(&last_synced, message);
        info!(issuer = %issuer, channel = %channel, topic = %topic, "Updated the unstable message");
        session.set_topic(channel, &topic);
    }
}
