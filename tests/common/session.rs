//! In-memory [`Session`] that records every call.

use narwhal_proto::irc_to_lower;
use narwhal_solus::session::Session;
use std::collections::HashMap;

/// A session whose channel topics are set directly by the test.
///
/// `set_topic` both records the call and updates the stored topic, as if the
/// server had echoed the change.
#[derive(Debug, Default)]
pub struct RecordingSession {
    topics: HashMap<String, Option<String>>,
    pub joins: Vec<String>,
    pub replies: Vec<(String, String)>,
    pub topic_changes: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RecordingSession {
    /// Mark `channel` as joined with the given topic.
    pub fn in_channel(mut self, channel: &str, topic: Option<&str>) -> Self {
        self.topics
            .insert(irc_to_lower(channel), topic.map(str::to_string));
        self
    }

    pub fn topic(&self, channel: &str) -> Option<&str> {
        self.channel_topic(channel)
    }

    /// Drop recorded calls, keeping channel state.
    pub fn clear(&mut self) {
        self.joins.clear();
        self.replies.clear();
        self.topic_changes.clear();
    }
}

impl Session for RecordingSession {
    fn is_in_channel(&self, channel: &str) -> bool {
        self.topics.contains_key(&irc_to_lower(channel))
    }

    fn join(&mut self, channel: &str) {
        self.joins.push(channel.to_string());
    }

    fn channel_topic(&self, channel: &str) -> Option<&str> {
        self.topics
            .get(&irc_to_lower(channel))
            .and_then(|t| t.as_deref())
    }

    fn set_topic(&mut self, channel: &str, topic: &str) {
        self.topic_changes
            .push((channel.to_string(), topic.to_string()));
        if let Some(current) = self.topics.get_mut(&irc_to_lower(channel)) {
            *current = Some(topic.to_string());
        }
    }

    fn reply(&mut self, target: &str, text: &str) {
        self.replies.push((target.to_string(), text.to_string()));
    }
}
