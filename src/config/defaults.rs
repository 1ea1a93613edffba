//! Default value functions for configuration.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Identity Defaults
// =============================================================================

pub fn default_realname() -> String {
    "Narwhal IRC Bot".to_string()
}

// =============================================================================
// Solus Plugin Defaults
// =============================================================================

pub fn default_command_prefix() -> String {
    ".".to_string()
}

pub fn default_dev_channel() -> String {
    "#Solus-Dev".to_string()
}

// =============================================================================
// Timeout Defaults
// =============================================================================

pub fn default_registration_timeout() -> u64 {
    60
}

pub fn default_ping_interval() -> u64 {
    120
}

pub fn default_pong_timeout() -> u64 {
    60
}

// =============================================================================
// Reconnect Defaults
// =============================================================================

pub fn default_reconnect_delay() -> u64 {
    15
}
