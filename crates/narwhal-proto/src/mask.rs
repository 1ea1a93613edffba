//! Wildcard and hostmask matching.

use crate::casemap::irc_lower_char;

/// Match `text` against a glob `pattern` supporting `*` and `?`.
///
/// Comparison is case-insensitive under RFC 1459 rules.
///
/// ```
/// use narwhal_proto::wildcard_match;
///
/// assert!(wildcard_match("*.getsol.us", "Core.GetSol.us"));
/// assert!(wildcard_match("j?sh*", "joshstrobl"));
/// assert!(!wildcard_match("admin", "administrator"));
/// ```
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(irc_lower_char).collect();
    let text: Vec<char> = text.chars().map(irc_lower_char).collect();

    let (mut p, mut t) = (0, 0);
    // Position after the last '*' seen, and the text index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p + 1, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star_p, star_t)) => {
                    p = star_p;
                    t = star_t + 1;
                    backtrack = Some((star_p, star_t + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Match a `nick!user@host` string against a ban-style mask.
#[inline]
pub fn matches_hostmask(pattern: &str, hostmask: &str) -> bool {
    wildcard_match(pattern, hostmask)
}
