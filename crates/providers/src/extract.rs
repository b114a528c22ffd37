//! Lenient extraction of a structured reply from raw model output.
//!
//! Models are asked for a pure JSON object but routinely wrap it in
//! code fences, prepend commentary, or truncate it. Extraction is an
//! ordered chain of fallible strategies, first success wins:
//!
//! 1. empty input → a default "no response" message;
//! 2. strip the first code fence pair (or everything after a lone fence)
//!    and a leading `json` language tag;
//! 3. parse the cleaned snippet directly;
//! 4. parse the substring between the first `{` and the last `}`;
//! 5. degrade to the whole snippet as the message text.
//!
//! Extraction never fails. Whether the result carries a usable message
//! is the caller's check: a JSON object without one is an
//! upstream-format failure, not this module's concern.

use serde_json::Value;
use uniplan_core::Schedule;

/// What extraction recovered from the raw text.
///
/// `message` is `None` only when the model produced a JSON object that
/// lacks a message key — the degraded plain-text path always fills it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedReply {
    pub message: Option<String>,
    pub schedule: Option<Schedule>,
}

/// Message used when the model returned nothing at all.
pub const NO_RESPONSE_MESSAGE: &str = "No response received";

/// The parsing strategies, tried left to right.
const STRATEGIES: &[fn(&str) -> Option<ExtractedReply>] = &[parse_direct, parse_delimited];

/// Extract a reply from raw model text.
pub fn extract(text: &str) -> ExtractedReply {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ExtractedReply {
            message: Some(NO_RESPONSE_MESSAGE.into()),
            schedule: None,
        };
    }

    let snippet = strip_fences(trimmed);

    for strategy in STRATEGIES {
        if let Some(reply) = strategy(snippet) {
            return reply;
        }
    }

    // Last resort: the whole snippet is the message.
    ExtractedReply {
        message: Some(snippet.trim().to_string()),
        schedule: None,
    }
}

/// Reduce a fenced snippet to its inner content.
///
/// Takes the content between the first pair of triple-backtick fences,
/// or the remainder after the first fence if no closing fence exists,
/// then strips a leading `json` language tag.
fn strip_fences(text: &str) -> &str {
    let snippet = match text.split_once("```") {
        Some((_, rest)) => match rest.split_once("```") {
            Some((inner, _)) => inner,
            None => rest,
        },
        None => text,
    };

    let snippet = snippet.trim();
    snippet
        .strip_prefix("json")
        .map(str::trim_start)
        .unwrap_or(snippet)
}

/// Parse the snippet as a JSON object directly.
fn parse_direct(snippet: &str) -> Option<ExtractedReply> {
    let value: Value = serde_json::from_str(snippet).ok()?;
    reply_from_value(value)
}

/// Recover a JSON object surrounded by prose: parse only the substring
/// between the first `{` and the last `}`.
fn parse_delimited(snippet: &str) -> Option<ExtractedReply> {
    let start = snippet.find('{')?;
    let end = snippet.rfind('}')?;
    if end <= start {
        return None;
    }
    let value: Value = serde_json::from_str(&snippet[start..=end]).ok()?;
    reply_from_value(value)
}

/// Turn a parsed JSON value into a reply fragment.
///
/// Non-objects are not a success (the ladder continues). The message key
/// may be absent; a non-string message is stringified. A schedule that
/// does not decode into the canonical shape is dropped rather than
/// failing the whole extraction.
fn reply_from_value(value: Value) -> Option<ExtractedReply> {
    let Value::Object(map) = value else {
        return None;
    };

    let message = map.get("message").map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    });

    let schedule = map
        .get("schedule")
        .cloned()
        .and_then(|v| serde_json::from_value::<Schedule>(v).ok())
        .filter(|s| !s.is_empty());

    Some(ExtractedReply { message, schedule })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniplan_core::Day;

    const PLAIN_JSON: &str = r#"{
        "message": "Two sections fit your Monday block.",
        "schedule": {
            "mon": [{"from": "09:00", "to": "09:50", "course": "CSE-1310", "prof": "B. Liskov"}]
        }
    }"#;

    #[test]
    fn empty_input_yields_default_message() {
        let reply = extract("");
        assert_eq!(reply.message.as_deref(), Some(NO_RESPONSE_MESSAGE));
        assert!(reply.schedule.is_none());

        let reply = extract("   \n ");
        assert_eq!(reply.message.as_deref(), Some(NO_RESPONSE_MESSAGE));
    }

    #[test]
    fn parses_bare_json() {
        let reply = extract(PLAIN_JSON);
        assert_eq!(
            reply.message.as_deref(),
            Some("Two sections fit your Monday block.")
        );
        let schedule = reply.schedule.unwrap();
        assert_eq!(schedule[&Day::Mon][0].course, "CSE-1310");
    }

    #[test]
    fn fenced_json_with_tag_extracts_identically_to_bare() {
        let fenced = format!("```json\n{PLAIN_JSON}\n```");
        assert_eq!(extract(&fenced), extract(PLAIN_JSON));
    }

    #[test]
    fn fenced_json_without_tag() {
        let fenced = format!("```\n{PLAIN_JSON}\n```");
        assert_eq!(extract(&fenced), extract(PLAIN_JSON));
    }

    #[test]
    fn unclosed_fence_uses_remainder() {
        let truncated = format!("Here you go:\n```json\n{PLAIN_JSON}");
        assert_eq!(extract(&truncated), extract(PLAIN_JSON));
    }

    #[test]
    fn prose_around_object_is_recovered() {
        let wrapped = format!("Sure! Here is your plan: {PLAIN_JSON} Hope that helps.");
        let reply = extract(&wrapped);
        assert_eq!(
            reply.message.as_deref(),
            Some("Two sections fit your Monday block.")
        );
        assert!(reply.schedule.is_some());
    }

    #[test]
    fn plain_prose_degrades_to_message_text() {
        let reply = extract("  I could not produce a schedule today.  ");
        assert_eq!(
            reply.message.as_deref(),
            Some("I could not produce a schedule today.")
        );
        assert!(reply.schedule.is_none());
    }

    #[test]
    fn json_without_message_key_has_no_message() {
        let reply = extract(r#"{"foo": 1}"#);
        assert!(reply.message.is_none());
    }

    #[test]
    fn non_string_message_is_stringified() {
        let reply = extract(r#"{"message": 42}"#);
        assert_eq!(reply.message.as_deref(), Some("42"));
    }

    #[test]
    fn malformed_schedule_is_dropped_but_message_kept() {
        let reply = extract(r#"{"message": "hi", "schedule": "not a map"}"#);
        assert_eq!(reply.message.as_deref(), Some("hi"));
        assert!(reply.schedule.is_none());
    }

    #[test]
    fn json_array_is_not_a_reply() {
        // Arrays fall through the ladder and degrade to text.
        let reply = extract("[1, 2, 3]");
        assert_eq!(reply.message.as_deref(), Some("[1, 2, 3]"));
    }
}
