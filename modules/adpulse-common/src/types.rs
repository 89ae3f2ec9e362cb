use serde::{Deserialize, Serialize};

use crate::taxonomy::LABEL_NONE;

fn empty_labels() -> [Option<String>; 3] {
    [None, None, None]
}

/// One row of the working table. Identity and provenance columns come from
/// the scrape; `summary` and `labels` are filled by enrichment exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdRecord {
    #[serde(default)]
    pub ad_archive_id: String,
    #[serde(default)]
    pub page_id: String,
    #[serde(default)]
    pub page_name: String,
    #[serde(default)]
    pub source_url: String,
    /// ISO `YYYY-MM-DD`; empty when the scrape had no usable date.
    #[serde(default)]
    pub start_date: String,
    /// Bounded body copy, normalized and truncated at construction.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Ordered labels, most appropriate first. A populated slot never
    /// follows an empty one.
    #[serde(default = "empty_labels")]
    pub labels: [Option<String>; 3],
}

impl AdRecord {
    /// A record carrying only body text. Used by callers that enrich
    /// ad-hoc tables without scrape provenance.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            ad_archive_id: String::new(),
            page_id: String::new(),
            page_name: String::new(),
            source_url: String::new(),
            start_date: String::new(),
            text: text.into(),
            summary: None,
            labels: empty_labels(),
        }
    }

    /// Attach annotation results. The first label slot is always persisted,
    /// substituting the sentinel when the parser produced nothing.
    pub fn apply(&mut self, annotation: Annotation) {
        self.summary = Some(annotation.summary);
        let mut labels = annotation.labels;
        if labels[0].is_none() {
            labels[0] = Some(LABEL_NONE.to_string());
        }
        self.labels = labels;
    }

    pub fn is_annotated(&self) -> bool {
        self.summary.is_some()
    }
}

/// Output of one unit of annotation work (summary plus ranked labels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub summary: String,
    pub labels: [Option<String>; 3],
}

impl Annotation {
    /// All-sentinel annotation, used when a unit of work fails outright.
    pub fn sentinel() -> Self {
        Self {
            summary: LABEL_NONE.to_string(),
            labels: [Some(LABEL_NONE.to_string()), None, None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_fills_first_slot_with_sentinel() {
        let mut record = AdRecord::from_text("50% off shoes");
        record.apply(Annotation {
            summary: "Shoes at half price".to_string(),
            labels: [None, None, None],
        });
        assert_eq!(record.summary.as_deref(), Some("Shoes at half price"));
        assert_eq!(record.labels[0].as_deref(), Some(LABEL_NONE));
        assert!(record.labels[1].is_none());
    }

    #[test]
    fn test_apply_keeps_parsed_labels() {
        let mut record = AdRecord::from_text("wine tasting friday");
        record.apply(Annotation {
            summary: "Wine tasting on Friday".to_string(),
            labels: [
                Some("Food and Culinary Experiences".to_string()),
                Some("Entertainment and Leisure Activities".to_string()),
                None,
            ],
        });
        assert!(record.is_annotated());
        assert_eq!(
            record.labels[0].as_deref(),
            Some("Food and Culinary Experiences")
        );
        assert!(record.labels[2].is_none());
    }
}
