//! Flatten raw Ad Library items into working records and apply the
//! recency window.

use chrono::NaiveDate;
use tracing::info;

use adpulse_common::{truncate, AdRecord, MAX_CHARS_PER_AD};
use apify_client::AdLibraryItem;

/// Placeholder the Ad Library leaves in dynamic-creative bodies that were
/// never interpolated. The real copy lives on the first carousel card.
const PRODUCT_BRAND_TEMPLATE: &str = "{{product.brand}}";

/// Flatten items into records. Template-only bodies fall back to the first
/// card body; text is normalized and truncated at the per-ad budget.
pub fn records_from_items(items: Vec<AdLibraryItem>) -> Vec<AdRecord> {
    let mut card_substitutions = 0u32;
    let records: Vec<AdRecord> = items
        .into_iter()
        .map(|item| {
            let mut text = item.body_text().unwrap_or_default().to_string();
            if text.contains(PRODUCT_BRAND_TEMPLATE) {
                if let Some(card_body) = item.first_card_body() {
                    text = card_body.to_string();
                    card_substitutions += 1;
                }
            }
            AdRecord {
                ad_archive_id: item.ad_archive_id.clone().unwrap_or_default(),
                page_id: item.page_id.clone().unwrap_or_default(),
                page_name: item.page_name().unwrap_or_default().to_string(),
                source_url: item.source_url.clone().unwrap_or_default(),
                start_date: item.start_date().unwrap_or_default().to_string(),
                text: truncate(&text, MAX_CHARS_PER_AD),
                summary: None,
                labels: [None, None, None],
            }
        })
        .collect();

    if card_substitutions > 0 {
        info!(
            count = card_substitutions,
            "Substituted card bodies for template-only ads"
        );
    }
    records
}

/// Keep records whose start date parses and falls inside the closed window.
pub fn filter_recent(records: Vec<AdRecord>, start: NaiveDate, end: NaiveDate) -> Vec<AdRecord> {
    records
        .into_iter()
        .filter(|r| {
            NaiveDate::parse_from_str(&r.start_date, "%Y-%m-%d")
                .is_ok_and(|d| d >= start && d <= end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> AdLibraryItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_flatten_basic_item() {
        let records = records_from_items(vec![item(json!({
            "adArchiveID": "123",
            "pageID": "77",
            "startDateFormatted": "2026-08-01",
            "snapshot": {
                "body": {"text": "Big   summer\r\nsale"},
                "page_name": "Shop"
            }
        }))]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ad_archive_id, "123");
        assert_eq!(records[0].page_name, "Shop");
        assert_eq!(records[0].text, "Big summer\nsale");
        assert_eq!(records[0].start_date, "2026-08-01");
    }

    #[test]
    fn test_template_body_uses_first_card() {
        let records = records_from_items(vec![item(json!({
            "snapshot": {
                "body": {"text": "Shop {{product.brand}} now"},
                "cards": [
                    {"body": null},
                    {"body": "Fresh bread every morning"}
                ]
            }
        }))]);
        assert_eq!(records[0].text, "Fresh bread every morning");
    }

    #[test]
    fn test_template_body_without_cards_is_kept() {
        let records = records_from_items(vec![item(json!({
            "snapshot": {"body": {"text": "Shop {{product.brand}} now"}}
        }))]);
        assert_eq!(records[0].text, "Shop {{product.brand}} now");
    }

    #[test]
    fn test_page_name_prefers_ad_details_path() {
        let records = records_from_items(vec![item(json!({
            "snapshot": {"body": {"text": "hi"}, "page_name": "Snapshot Name"},
            "ad_details": {
                "advertiser": {
                    "ad_library_page_info": {
                        "page_info": {"page_name": "Details Name"}
                    }
                }
            }
        }))]);
        assert_eq!(records[0].page_name, "Details Name");
    }

    #[test]
    fn test_filter_recent_window_edges() {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 7, 31).unwrap();

        let mut a = AdRecord::from_text("a");
        a.start_date = "2026-07-01".to_string();
        let mut b = AdRecord::from_text("b");
        b.start_date = "2026-07-31".to_string();
        let mut c = AdRecord::from_text("c");
        c.start_date = "2026-08-01".to_string();
        let mut d = AdRecord::from_text("d");
        d.start_date = "not a date".to_string();

        let kept = filter_recent(vec![a, b, c, d], start, end);
        let texts: Vec<&str> = kept.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }
}
