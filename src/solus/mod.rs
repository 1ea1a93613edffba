//! Solus community commands: canned replies and the dev topic workflow.

pub mod replies;
pub mod topic;

use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, info};

use crate::config::SolusConfig;
use crate::inbound::InboundCommand;
use crate::session::Session;

pub use topic::TopicTracker;

/// Wall-clock source used to stamp syncs.
pub type Clock = fn() -> DateTime<FixedOffset>;

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Dispatches prefixed chat commands.
#[derive(Debug)]
pub struct SolusPlugin {
    prefix: String,
    tracker: TopicTracker,
    clock: Clock,
}

impl SolusPlugin {
    pub fn new(config: &SolusConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            prefix: config.prefix.clone(),
            tracker: TopicTracker::new(config.dev_channel.as_str())?,
            clock: local_now,
        })
    }

    /// Replace the wall clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn tracker(&self) -> &TopicTracker {
        &self.tracker
    }

    /// Handle one inbound message to completion.
    pub fn handle<S: Session + ?Sized>(&mut self, session: &mut S, msg: &InboundCommand) {
        if self.tracker.last_synced().is_none() {
            self.tracker.refresh_last_synced(session);
        }

        let Some(command) = msg.text.strip_prefix(self.prefix.as_str()) else {
            return;
        };

        if let Some(lines) = replies::lookup(command) {
            for line in lines {
                session.reply(&msg.channel, line);
            }
        } else if command == "lastsynced" {
            let last_synced = self.tracker.refresh_last_synced(session);
            session.reply(
                &msg.channel,
                &format!("We last performed a sync to the stable repository on {last_synced}"),
            );
        }

        if msg.is_admin {
            self.handle_admin(session, msg);
        }
    }

    fn handle_admin<S: Session + ?Sized>(&mut self, session: &mut S, msg: &InboundCommand) {
        let command = msg.command.as_str();
        if !matches!(command, "frozen" | "synced" | "unstablemsg") {
            return;
        }
        if !msg.is_channel() {
            info!(issuer = %msg.issuer, command, "Ignoring topic command sent in a private message");
            return;
        }

        match command {
            "frozen" => self.tracker.freeze(session, &msg.channel, &msg.issuer),
            "synced" => {
                let now = (self.clock)();
                self.tracker
                    .mark_synced(session, &msg.channel, &msg.issuer, &now);
            }
            _ => {
                let message = msg.args.trim_end();
                if message.is_empty() {
                    debug!(issuer = %msg.issuer, "Ignoring empty unstable message");
                    return;
                }
                self.tracker
                    .set_unstable(session, &msg.channel, &msg.issuer, message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solus::topic::{UNKNOWN_LAST_SYNCED, compose_frozen_topic, compose_synced_topic};
    use chrono::TimeZone;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Recorder {
        topics: HashMap<String, String>,
        joins: Vec<String>,
        replies: Vec<(String, String)>,
        topics_set: Vec<(String, String)>,
    }

    impl Session for Recorder {
        fn is_in_channel(&self, channel: &str) -> bool {
            self.topics.contains_key(channel)
        }
        fn join(&mut self, channel: &str) {
            self.joins.push(channel.to_string());
        }
        fn channel_topic(&self, channel: &str) -> Option<&str> {
            self.topics.get(channel).map(String::as_str)
        }
        fn set_topic(&mut self, channel: &str, topic: &str) {
            self.topics_set.push((channel.to_string(), topic.to_string()));
        }
        fn reply(&mut self, target: &str, text: &str) {
            self.replies.push((target.to_string(), text.to_string()));
        }
    }

    fn fixed_now() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
            .unwrap()
    }

    fn plugin() -> SolusPlugin {
        SolusPlugin::new(&SolusConfig::default())
            .unwrap()
            .with_clock(fixed_now)
    }

    fn synced_session() -> Recorder {
        let mut session = Recorder::default();
        session.topics.insert(
            "#Solus-Dev".to_string(),
            compose_synced_topic("2022-12-24T10:00:00+01:00"),
        );
        session
    }

    fn msg(text: &str, admin: bool) -> InboundCommand {
        InboundCommand::new(text, "#Solus-Dev", "JoshStrobl", admin, ".")
    }

    #[test]
    fn public_command_replies_in_channel() {
        let mut session = synced_session();
        let mut p = plugin();
        p.handle(&mut session, &msg(".eta", false));
        assert_eq!(
            session.replies,
            vec![(
                "#Solus-Dev".to_string(),
                "Solus does not provide ETAs. It's ready when it's ready.".to_string()
            )]
        );
    }

    #[test]
    fn rules_emits_both_lines() {
        let mut session = synced_session();
        let mut p = plugin();
        p.handle(&mut session, &msg(".rules", false));
        assert_eq!(session.replies.len(), 2);
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let mut session = synced_session();
        let mut p = plugin();
        for text in [".Budgie", ".budgie extra", ". budgie", "budgie", "..budgie"] {
            p.handle(&mut session, &msg(text, true));
        }
        assert!(session.replies.is_empty());

        p.handle(&mut session, &msg(".budgie", false));
        assert_eq!(session.replies.len(), 2);
    }

    #[test]
    fn unprefixed_text_has_no_effect() {
        let mut session = synced_session();
        let mut p = plugin();
        for text in ["frozen", "synced", "unstablemsg hi", "hello .budgie", ""] {
            p.handle(&mut session, &msg(text, true));
        }
        assert!(session.replies.is_empty());
        assert!(session.topics_set.is_empty());
    }

    #[test]
    fn first_message_primes_cache() {
        let mut session = synced_session();
        let mut p = plugin();
        assert_eq!(p.tracker().last_synced(), None);
        p.handle(&mut session, &msg("hi all", false));
        assert_eq!(p.tracker().last_synced(), Some("2022-12-24T10:00:00+01:00"));
    }

    #[test]
    fn first_message_joins_dev_channel() {
        let mut session = Recorder::default();
        let mut p = plugin();
        p.handle(&mut session, &msg("hi all", false));
        assert_eq!(session.joins, vec!["#Solus-Dev"]);
        assert_eq!(p.tracker().last_synced(), Some(UNKNOWN_LAST_SYNCED));
    }

    #[test]
    fn lastsynced_rereads_topic() {
        let mut session = synced_session();
        let mut p = plugin();
        p.handle(&mut session, &msg("hi", false));
        session.topics.insert(
            "#Solus-Dev".to_string(),
            compose_synced_topic("2023-02-02T02:02:02+00:00"),
        );

        p.handle(&mut session, &msg(".lastsynced", false));
        assert_eq!(
            session.replies[0].1,
            "We last performed a sync to the stable repository on 2023-02-02T02:02:02+00:00"
        );
    }

    #[test]
    fn lastsynced_falls_back_when_unknown() {
        let mut session = Recorder::default();
        session
            .topics
            .insert("#Solus-Dev".to_string(), compose_frozen_topic());
        let mut p = plugin();
        p.handle(&mut session, &msg(".lastsynced", false));
        assert_eq!(
            session.replies[0].1,
            "We last performed a sync to the stable repository on some point recently"
        );
    }

    #[test]
    fn non_admin_cannot_change_topic() {
        let mut session = synced_session();
        let mut p = plugin();
        for text in [".frozen", ".synced", ".unstablemsg Mass rebuild"] {
            p.handle(&mut session, &msg(text, false));
        }
        assert!(session.topics_set.is_empty());
        assert!(session.replies.is_empty());
    }

    #[test]
    fn admin_synced_stamps_topic_and_cache() {
        let mut session = synced_session();
        let mut p = plugin();
        p.handle(&mut session, &msg(".synced", true));
        assert_eq!(
            session.topics_set,
            vec![(
                "#Solus-Dev".to_string(),
                "Solus Development | Stable: Synced (Last on 2023-01-01T00:00:00-05:00) | Unstable: Unfrozen".to_string()
            )]
        );
        assert_eq!(p.tracker().last_synced(), Some("2023-01-01T00:00:00-05:00"));
    }

    #[test]
    fn admin_frozen_sets_frozen_topic() {
        let mut session = synced_session();
        let mut p = plugin();
        p.handle(&mut session, &msg(".frozen", true));
        assert_eq!(
            session.topics_set,
            vec![("#Solus-Dev".to_string(), compose_frozen_topic())]
        );
    }

    #[test]
    fn admin_unstablemsg_keeps_synced_field() {
        let mut session = synced_session();
        let mut p = plugin();
        p.handle(&mut session, &msg(".unstablemsg   Rebuilds for Python 3.11 ", true));
        assert_eq!(
            session.topics_set[0].1,
            "Solus Development | Stable: Synced (Last on 2022-12-24T10:00:00+01:00) | Unstable: Rebuilds for Python 3.11"
        );
    }

    #[test]
    fn empty_unstablemsg_is_ignored() {
        let mut session = synced_session();
        let mut p = plugin();
        p.handle(&mut session, &msg(".unstablemsg", true));
        p.handle(&mut session, &msg(".unstablemsg    ", true));
        assert!(session.topics_set.is_empty());
    }

    #[test]
    fn topic_commands_ignored_in_private() {
        let mut session = synced_session();
        let mut p = plugin();
        let private = InboundCommand::new(".synced", "JoshStrobl", "JoshStrobl", true, ".");
        p.handle(&mut session, &private);
        assert!(session.topics_set.is_empty());
    }

    #[test]
    fn public_commands_answer_private_messages() {
        let mut session = synced_session();
        let mut p = plugin();
        let private = InboundCommand::new(".eta", "someone", "someone", false, ".");
        p.handle(&mut session, &private);
        assert_eq!(session.replies[0].0, "someone");
    }

    #[test]
    fn custom_prefix() {
        let config = SolusConfig {
            prefix: "!".to_string(),
            ..SolusConfig::default()
        };
        let mut p = SolusPlugin::new(&config).unwrap();
        let mut session = synced_session();
        p.handle(&mut session, &InboundCommand::new(".eta", "#Solus", "a", false, "!"));
        assert!(session.replies.is_empty());
        p.handle(&mut session, &InboundCommand::new("!eta", "#Solus", "a", false, "!"));
        assert_eq!(session.replies.len(), 1);
    }
}
