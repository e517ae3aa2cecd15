//! Front-end payload conventions layered on the plain text query.

use regex::Regex;
use std::sync::OnceLock;

static USER_ID_BLOCK: OnceLock<Regex> = OnceLock::new();
static USER_ID_LINE: OnceLock<Regex> = OnceLock::new();

/// `user_id: <id>` line followed by one or more newlines and the query.
fn user_id_block() -> &'static Regex {
    USER_ID_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)^user_id:\s*([^\n]+)\s*\n+(\S.*)").expect("Invalid regex pattern")
    })
}

fn user_id_line() -> &'static Regex {
    USER_ID_LINE.get_or_init(|| Regex::new(r"^user_id:\s*([^\n\r]+)").expect("Invalid regex pattern"))
}

/// Query text with an optional leading caller id removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub user_id: Option<String>,
    pub text: String,
}

/// Split a leading `user_id: <id>` line off `raw`.
///
/// Text without the prefix is returned unchanged. A prefix with nothing
/// after it yields an empty query.
pub fn extract_user_id(raw: &str) -> Payload {
    if let Some(caps) = user_id_block().captures(raw) {
        return Payload {
            user_id: Some(caps[1].trim().to_string()),
            text: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = user_id_line().captures(raw) {
        let text = raw.find('\n').map(|pos| raw[pos + 1..].trim().to_string()).unwrap_or_default();
        return Payload { user_id: Some(caps[1].trim().to_string()), text };
    }

    Payload { user_id: None, text: raw.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_with_blank_line() {
        let payload = extract_user_id("user_id: farmer-42\n\nOnion price in Lasalgaon?");
        assert_eq!(payload.user_id.as_deref(), Some("farmer-42"));
        assert_eq!(payload.text, "Onion price in Lasalgaon?");
    }

    #[test]
    fn test_prefix_keeps_multiline_query() {
        let payload = extract_user_id("user_id:u7\nline one\nline two");
        assert_eq!(payload.user_id.as_deref(), Some("u7"));
        assert_eq!(payload.text, "line one\nline two");
    }

    #[test]
    fn test_prefix_only() {
        let payload = extract_user_id("user_id: lonely");
        assert_eq!(payload.user_id.as_deref(), Some("lonely"));
        assert_eq!(payload.text, "");
    }

    #[test]
    fn test_no_prefix() {
        let payload = extract_user_id("  Will it rain in Indore?");
        assert_eq!(payload, Payload { user_id: None, text: "  Will it rain in Indore?".into() });
    }
}
