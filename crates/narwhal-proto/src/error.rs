//! Message parsing errors.

use thiserror::Error;

/// Errors produced while parsing a raw IRC line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty or whitespace only.
    #[error("empty message")]
    EmptyMessage,

    /// Tags or prefix were present but no command followed.
    #[error("missing command")]
    MissingCommand,

    /// A known command arrived with fewer parameters than it requires.
    #[error("{command} expects at least {expected} parameter(s), got {got}")]
    NotEnoughParams {
        command: &'static str,
        expected: usize,
        got: usize,
    },
}
