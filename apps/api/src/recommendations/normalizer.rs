//! Response Normalizer: coerces free-form model text into the CareerReport mapping.
//!
//! Three tiers, in order:
//! 1. the whole reply parses as a JSON object → returned unchanged
//! 2. the span from the first `{` to the last `}` parses as a JSON object → returned
//! 3. otherwise → the fixed single-profession fallback report
//!
//! Tier 1 and 2 do not check the object against the CareerReport schema; an
//! object without `professions` is passed through as-is.
//!
//! `normalize` never fails and holds no state.

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

/// Normalizes a raw model reply. Always returns a JSON object.
pub fn normalize(raw: &str) -> Map<String, Value> {
    if let Some(report) = parse_object(raw) {
        return report;
    }
    debug!("Model reply is not a bare JSON object, searching for an embedded one");

    match brace_span(raw) {
        Some(span) => {
            if let Some(report) = parse_object(span) {
                return report;
            }
        }
        None => debug!("No brace-delimited span in model reply"),
    }

    warn!(
        raw_len = raw.len(),
        "No JSON object found in model reply, returning fallback report"
    );
    fallback_report()
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            debug!("Parsed JSON is not an object");
            None
        }
        Err(e) => {
            debug!("JSON parse failed: {e}");
            None
        }
    }
}

/// Greedy brace-delimited span: first `{` through last `}` inclusive.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// The placeholder report returned when no JSON object can be recovered.
pub fn fallback_report() -> Map<String, Value> {
    let profession: Map<String, Value> = [
        ("name", json!("Career Option")),
        ("requiredSkills", json!(["Based on provided information"])),
        (
            "careerPath",
            json!(["Please try again with more specific information"]),
        ),
        ("salaryRange", json!("Varies")),
        ("marketStats", json!("Data unavailable")),
        ("successStory", json!("Please try again")),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();

    Map::from_iter([(
        "professions".to_string(),
        Value::Array(vec![Value::Object(profession)]),
    )])
}
