use regex::Regex;
use std::sync::LazyLock;

/// Character budget for one ad body before it reaches the enrichment calls.
pub const MAX_CHARS_PER_AD: usize = 1400;

/// Marker appended to a body that was cut at the budget.
pub const ELLIPSIS: char = '…';

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());
static HORIZONTAL_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Canonicalize whitespace: CR becomes LF, newline runs collapse to one,
/// horizontal whitespace runs collapse to one space, ends are trimmed.
/// Idempotent.
pub fn normalize(s: &str) -> String {
    let s = s.replace('\r', "\n");
    let s = NEWLINE_RUNS.replace_all(&s, "\n");
    let s = HORIZONTAL_WS.replace_all(&s, " ");
    s.trim().to_string()
}

/// Normalize, then cut at `limit` characters plus a single ellipsis marker.
/// Re-applying to already-truncated text is a no-op.
pub fn truncate(s: &str, limit: usize) -> String {
    let s = normalize(s);
    if s.chars().count() <= limit {
        return s;
    }
    let mut cut: String = s.chars().take(limit).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Lower-cased, whitespace-normalized form of an ad body. Used only to
/// decide enrichment-unit identity, never persisted as the canonical text.
pub fn dedup_key(s: &str) -> String {
    normalize(s).to_lowercase()
}

/// Fast hash for content identity in logs. Not cryptographic.
pub fn content_hash(content: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("a \t b"), "a b");
        assert_eq!(normalize("a\r\n\r\nb"), "a\nb");
        assert_eq!(normalize("  padded  "), "padded");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = ["a \t b\r\nc", "  x \n\n\n y ", "", "one"];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_truncate_within_limit_is_untouched() {
        assert_eq!(truncate("short text", 100), "short text");
    }

    #[test]
    fn test_truncate_cuts_to_limit_plus_marker() {
        let long = "x".repeat(2000);
        let cut = truncate(&long, MAX_CHARS_PER_AD);
        assert_eq!(cut.chars().count(), MAX_CHARS_PER_AD + 1);
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_is_idempotent_once_truncated() {
        let long = "word ".repeat(500);
        let once = truncate(&long, 100);
        assert_eq!(truncate(&once, 100), once);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "ą".repeat(50);
        let cut = truncate(&long, 10);
        assert_eq!(cut.chars().count(), 11);
    }

    #[test]
    fn test_dedup_key_folds_case_and_spacing() {
        assert_eq!(dedup_key("Hello  world"), dedup_key("hello world"));
        assert_ne!(dedup_key("Hello world"), dedup_key("Goodbye"));
    }
}
