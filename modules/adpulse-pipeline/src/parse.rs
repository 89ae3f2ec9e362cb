//! Parsers for the two annotation reply shapes. This is the boundary where
//! untrusted model output becomes typed values: both functions are total,
//! and every failure path resolves to a sentinel rather than an error.

use regex::Regex;
use std::sync::LazyLock;

use adpulse_common::{normalize, LABEL_NONE};

/// Hard cap on a persisted summary, slightly above the prompt's 140-char ask.
const MAX_SUMMARY_CHARS: usize = 160;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());
static LABEL_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)labels\s*:\s*(.+)$").unwrap());

/// Extract the one-sentence summary from a `{"summary": ...}` reply.
/// Unparseable JSON, a missing/empty field, or the literal `NULL` all
/// resolve to the `NONE` sentinel.
pub fn parse_summary(raw: &str) -> String {
    let raw = raw.trim();
    let value = parse_json_object(raw);
    let summary = value
        .as_ref()
        .and_then(|v| v.get("summary"))
        .and_then(|s| s.as_str())
        .map(str::trim)
        .unwrap_or("");

    if summary.is_empty() || summary.eq_ignore_ascii_case("null") {
        return LABEL_NONE.to_string();
    }

    let stripped = URL_RE.replace_all(summary, "");
    let summary = normalize(&stripped);
    if summary.chars().count() <= MAX_SUMMARY_CHARS {
        return summary;
    }
    let cut: String = summary.chars().take(MAX_SUMMARY_CHARS).collect();
    format!("{}.", cut.trim_end_matches([' ', ',', '.', ';', ':']))
}

/// Direct parse, else the first-`{`-to-last-`}` slice. json_object mode
/// usually returns clean JSON, but fenced or prefixed output happens.
fn parse_json_object(raw: &str) -> Option<serde_json::Value> {
    if let Ok(v) = serde_json::from_str(raw) {
        return Some(v);
    }
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

/// Parse the `Labels: <A>; <B>; <C>` reply line into at most three ordered
/// labels, right-padded with `None`. No matching line yields all-`None`;
/// callers substitute the sentinel when persisting the first slot.
pub fn parse_labels(raw: &str) -> [Option<String>; 3] {
    let mut out: [Option<String>; 3] = [None, None, None];
    let Some(caps) = LABEL_LINE_RE.captures(raw.trim()) else {
        return out;
    };
    let parts = caps[1].split(';').map(str::trim).filter(|p| !p.is_empty());
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = Some(part.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary_happy_path() {
        assert_eq!(
            parse_summary(r#"{"summary":"Buy shoes at 50% off"}"#),
            "Buy shoes at 50% off"
        );
    }

    #[test]
    fn test_parse_summary_not_json_is_sentinel() {
        assert_eq!(parse_summary("not json"), LABEL_NONE);
        assert_eq!(parse_summary(""), LABEL_NONE);
    }

    #[test]
    fn test_parse_summary_null_is_sentinel() {
        assert_eq!(parse_summary(r#"{"summary":"NULL"}"#), LABEL_NONE);
        assert_eq!(parse_summary(r#"{"summary":"null"}"#), LABEL_NONE);
        assert_eq!(parse_summary(r#"{"summary":""}"#), LABEL_NONE);
        assert_eq!(parse_summary(r#"{"other":"field"}"#), LABEL_NONE);
    }

    #[test]
    fn test_parse_summary_accepts_fenced_json() {
        assert_eq!(
            parse_summary("```json\n{\"summary\":\"Weekend deal\"}\n```"),
            "Weekend deal"
        );
    }

    #[test]
    fn test_parse_summary_strips_urls() {
        assert_eq!(
            parse_summary(r#"{"summary":"Sale at https://shop.example/now ends Sunday"}"#),
            "Sale at ends Sunday"
        );
    }

    #[test]
    fn test_parse_summary_caps_length_with_period() {
        let long = format!(r#"{{"summary":"{}"}}"#, "a".repeat(400));
        let parsed = parse_summary(&long);
        assert_eq!(parsed.chars().count(), MAX_SUMMARY_CHARS + 1);
        assert!(parsed.ends_with('.'));
    }

    #[test]
    fn test_parse_labels_three() {
        let parsed = parse_labels("Labels: A; B; C");
        assert_eq!(parsed[0].as_deref(), Some("A"));
        assert_eq!(parsed[1].as_deref(), Some("B"));
        assert_eq!(parsed[2].as_deref(), Some("C"));
    }

    #[test]
    fn test_parse_labels_one_right_padded() {
        let parsed = parse_labels("Labels: A");
        assert_eq!(parsed[0].as_deref(), Some("A"));
        assert!(parsed[1].is_none());
        assert!(parsed[2].is_none());
    }

    #[test]
    fn test_parse_labels_missing_line() {
        assert_eq!(parse_labels("no labels here"), [None, None, None]);
    }

    #[test]
    fn test_parse_labels_case_insensitive_and_embedded() {
        let parsed = parse_labels("Here you go.\nlabels: Sports and Fitness; OTHER");
        assert_eq!(parsed[0].as_deref(), Some("Sports and Fitness"));
        assert_eq!(parsed[1].as_deref(), Some("OTHER"));
        assert!(parsed[2].is_none());
    }

    #[test]
    fn test_parse_labels_drops_empty_segments_and_extras() {
        let parsed = parse_labels("Labels: A;; B ; C; D");
        assert_eq!(parsed[0].as_deref(), Some("A"));
        assert_eq!(parsed[1].as_deref(), Some("B"));
        assert_eq!(parsed[2].as_deref(), Some("C"));
    }
}
