//! The orchestration core: deduplicate the working table by normalized
//! text, fan one annotation unit per unique row across a bounded pool, and
//! reassemble results in row order.
//!
//! Units share no mutable state. Every unit is scheduled immediately; the
//! semaphore is the only admission control, sized conservatively for the
//! service's rate limit. A failed unit fills its own row with sentinels and
//! never touches the rest of the batch.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{info, warn};

use adpulse_common::{
    dedup_key, truncate, AdPulseError, AdRecord, Annotation, MAX_CHARS_PER_AD,
};

use crate::annotator::Annotator;

/// Outcome of an enrichment batch.
#[derive(Debug)]
pub struct EnrichOutcome {
    /// Deduplicated records in first-occurrence order, all annotated.
    pub records: Vec<AdRecord>,
    /// Unique units of work executed.
    pub units_run: usize,
    /// Units that failed at the worker boundary and were filled with
    /// sentinels. Per-call service failures are not counted here; those are
    /// contained inside the annotator.
    pub unit_failures: usize,
}

pub struct Enricher {
    annotator: Arc<Annotator>,
    workers: usize,
}

impl Enricher {
    pub fn new(annotator: Annotator, workers: usize) -> Self {
        Self {
            annotator: Arc::new(annotator),
            workers: workers.max(1),
        }
    }

    /// Annotate every distinct ad text exactly once. Output row order equals
    /// post-dedup input order regardless of completion order; duplicate rows
    /// (same normalized text) are dropped, first occurrence kept.
    pub async fn enrich(&self, records: Vec<AdRecord>) -> Result<EnrichOutcome, AdPulseError> {
        // Re-bound text and drop rows with nothing to annotate.
        let mut records: Vec<AdRecord> = records
            .into_iter()
            .filter_map(|mut r| {
                r.text = truncate(&r.text, MAX_CHARS_PER_AD);
                (!r.text.is_empty()).then_some(r)
            })
            .collect();

        // Stable first-occurrence dedup on normalized text.
        let mut seen = HashSet::new();
        records.retain(|r| seen.insert(dedup_key(&r.text)));

        if records.is_empty() {
            info!("No ad texts to enrich");
            return Ok(EnrichOutcome {
                records,
                units_run: 0,
                unit_failures: 0,
            });
        }

        let units_run = records.len();
        info!(
            unique_ads = units_run,
            workers = self.workers,
            "Enriching unique ads"
        );

        // Schedule every unit immediately; each task owns a disjoint slot of
        // the pre-sized results buffer via its index.
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut handles = Vec::with_capacity(units_run);
        for (idx, record) in records.iter().enumerate() {
            let annotator = Arc::clone(&self.annotator);
            let semaphore = Arc::clone(&semaphore);
            let text = record.text.clone();
            handles.push((
                idx,
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| AdPulseError::PoolClosed)?;
                    Ok::<Annotation, AdPulseError>(annotator.annotate(&text).await)
                }),
            ));
        }

        let mut results: Vec<Option<Annotation>> = vec![None; units_run];
        let mut unit_failures = 0usize;
        for (idx, handle) in handles {
            match handle.await {
                Ok(Ok(annotation)) => results[idx] = Some(annotation),
                // Pool teardown before the batch completed is batch-fatal.
                Ok(Err(e)) => return Err(e),
                Err(join_err) => {
                    warn!(row = idx, error = %join_err, "Annotation unit failed, filling sentinels");
                    unit_failures += 1;
                }
            }
        }

        for (record, annotation) in records.iter_mut().zip(results) {
            record.apply(annotation.unwrap_or_else(Annotation::sentinel));
        }

        if unit_failures > 0 {
            warn!(unit_failures, units_run, "Some annotation units failed");
        }

        Ok(EnrichOutcome {
            records,
            units_run,
            unit_failures,
        })
    }
}
