//! The contract between the Solus plugin and the IRC client it runs in.
//!
//! Every call is fire-and-forget: the plugin never waits for the server to
//! acknowledge a JOIN or TOPIC. Topic state only becomes visible once the
//! client has joined the channel and the server has reported the topic.

/// Operations the plugin may perform on the connected IRC session.
pub trait Session {
    /// Whether the client is currently in `channel` (RFC 1459 case-insensitive).
    fn is_in_channel(&self, channel: &str) -> bool;

    /// Request to join `channel`.
    fn join(&mut self, channel: &str);

    /// Last known topic of `channel`.
    ///
    /// `None` when the client is not in the channel or has not seen its topic.
    fn channel_topic(&self, channel: &str) -> Option<&str>;

    /// Request a topic change on `channel`.
    fn set_topic(&mut self, channel: &str, topic: &str);

    /// Send `text` to `target`, one message per non-empty line.
    fn reply(&mut self, target: &str, text: &str);
}
