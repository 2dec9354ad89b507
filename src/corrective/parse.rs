use crate::constants::{MAX_RELEVANCE_SCORE, ORACLE_REPLY_SCAN_CHARS};

/// Extracts a relevance score from a free-text oracle reply.
///
/// Leading whitespace is skipped, then the first run of ASCII digits within the next
/// five characters is read and clamped to `100`. Returns `None` when that window holds
/// no digit; callers substitute the lenient default.
///
/// ```
/// use sieve::corrective::parse_relevance_reply;
///
/// assert_eq!(parse_relevance_reply("85"), Some(85));
/// assert_eq!(parse_relevance_reply("\n 42."), Some(42));
/// assert_eq!(parse_relevance_reply("250"), Some(100));
/// assert_eq!(parse_relevance_reply("Score: 85"), None);
/// ```
pub fn parse_relevance_reply(reply: &str) -> Option<u32> {
    let digits: String = reply
        .trim_start()
        .chars()
        .take(ORACLE_REPLY_SCAN_CHARS)
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return None;
    }

    // At most five digits, so this cannot overflow.
    digits
        .parse::<u32>()
        .ok()
        .map(|score| score.min(MAX_RELEVANCE_SCORE))
}
