//! Label-frequency aggregation and the run summary block.

use std::collections::HashMap;
use std::fmt;

use adpulse_common::{AdRecord, LABEL_NONE};

/// Count label occurrences across all three label slots, sentinel excluded.
/// Sorted by descending count; ties keep first-seen order.
pub fn label_stats(records: &[AdRecord]) -> Vec<(String, u32)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for record in records {
        for label in record.labels.iter().flatten() {
            if label == LABEL_NONE {
                continue;
            }
            if !counts.contains_key(label) {
                order.push(label.clone());
            }
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
    }

    let mut out: Vec<(String, u32)> = order
        .into_iter()
        .map(|label| {
            let count = counts[&label];
            (label, count)
        })
        .collect();
    // Stable sort keeps first-seen order within equal counts.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Stats from a pipeline run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub urls_scraped: u32,
    pub urls_failed: u32,
    pub items_fetched: u32,
    pub records_flattened: u32,
    pub records_in_window: u32,
    pub unique_enriched: u32,
    pub unit_failures: u32,
    pub master_rows: u32,
    pub label_counts: Vec<(String, u32)>,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Pipeline Run Complete ===")?;
        writeln!(f, "URLs scraped:      {}", self.urls_scraped)?;
        writeln!(f, "URLs failed:       {}", self.urls_failed)?;
        writeln!(f, "Items fetched:     {}", self.items_fetched)?;
        writeln!(f, "Records flattened: {}", self.records_flattened)?;
        writeln!(f, "In window:         {}", self.records_in_window)?;
        writeln!(f, "Unique enriched:   {}", self.unique_enriched)?;
        writeln!(f, "Unit failures:     {}", self.unit_failures)?;
        writeln!(f, "Master rows:       {}", self.master_rows)?;
        if !self.label_counts.is_empty() {
            writeln!(f, "\nLabel counts:")?;
            for (label, count) in &self.label_counts {
                writeln!(f, "  {label}: {count}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adpulse_common::Annotation;

    fn record(labels: [Option<&str>; 3]) -> AdRecord {
        let mut r = AdRecord::from_text("some ad");
        r.apply(Annotation {
            summary: "s".to_string(),
            labels: labels.map(|l| l.map(String::from)),
        });
        r
    }

    #[test]
    fn test_counts_across_all_slots() {
        let records = vec![
            record([Some("A"), Some("B"), None]),
            record([Some("A"), None, None]),
        ];
        assert_eq!(
            label_stats(&records),
            vec![("A".to_string(), 2), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn test_sentinel_is_excluded() {
        let records = vec![record([Some(LABEL_NONE), None, None])];
        assert!(label_stats(&records).is_empty());
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            record([Some("Zeta"), Some("Alpha"), None]),
            record([Some("Both"), Some("Both"), None]),
        ];
        let stats = label_stats(&records);
        assert_eq!(stats[0].0, "Both");
        assert_eq!(stats[1].0, "Zeta");
        assert_eq!(stats[2].0, "Alpha");
    }

    #[test]
    fn test_empty_input() {
        assert!(label_stats(&[]).is_empty());
    }
}
