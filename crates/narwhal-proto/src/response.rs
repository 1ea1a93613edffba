//! Numeric replies.

/// A three-digit numeric reply code.
///
/// Only the numerics the bot reacts to have names; every other code still
/// parses and round-trips through [`Response::code`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Response(u16);

impl Response {
    pub const RPL_WELCOME: Response = Response(1);
    pub const RPL_NOTOPIC: Response = Response(331);
    pub const RPL_TOPIC: Response = Response(332);
    pub const ERR_ERRONEUSNICKNAME: Response = Response(432);
    pub const ERR_NICKNAMEINUSE: Response = Response(433);

    #[inline]
    pub const fn from_code(code: u16) -> Self {
        Response(code)
    }

    #[inline]
    pub const fn code(self) -> u16 {
        self.0
    }

    /// Error numerics live in the 400-599 range.
    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 >= 400 && self.0 < 600
    }
}
