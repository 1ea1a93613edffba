//! Channel name classification.

/// Extension trait for checking whether a target names a channel.
pub trait ChannelExt {
    /// Returns true when the string carries a channel prefix and no
    /// characters that are forbidden in channel names.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        let mut chars = self.chars();
        if !matches!(chars.next(), Some('#' | '&' | '+' | '!')) {
            return false;
        }
        // RFC 2812 caps channel names at 50 characters including the prefix.
        self.chars().count() <= 50
            && !chars.any(|c| matches!(c, ' ' | ',' | '\x07' | '\0' | '\r' | '\n'))
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
