//! Recovery of a JSON object from free-form model replies.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced json regex should compile")
});

/// Decodes a reply into a JSON object.
///
/// Tries, in order, the whole reply, the body of a ```` ```json ```` fence,
/// and the span from the first `{` to the last `}`. Returns `None` when no
/// candidate decodes to an object.
pub fn extract_json_object(content: &str) -> Option<Map<String, Value>> {
    decode_object(content)
        .or_else(|| fenced_block(content).and_then(decode_object))
        .or_else(|| brace_span(content).and_then(decode_object))
}

fn decode_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn fenced_block(content: &str) -> Option<&str> {
    FENCED_JSON
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str())
}

fn brace_span(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    content.get(start..=end)
}
