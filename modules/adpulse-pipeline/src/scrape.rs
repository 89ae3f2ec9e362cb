//! Parallel fan-out over the source URLs, with per-URL failure containment.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use apify_client::{AdLibraryItem, ApifyClient};

/// Scrape every source URL in parallel. A failed URL contributes zero items
/// and never aborts the batch; each fetched item is tagged with its source.
/// Returns the combined items plus the failed-URL count.
pub async fn scrape_all(
    client: &ApifyClient,
    urls: &[String],
    limit: u32,
    workers: usize,
) -> (Vec<AdLibraryItem>, u32) {
    info!(urls = urls.len(), workers, "Starting parallel ad scrape");

    let results: Vec<(String, Option<Vec<AdLibraryItem>>)> =
        stream::iter(urls.iter().map(|url| {
            let url = url.clone();
            async move {
                match client.scrape_ad_library(&url, limit).await {
                    Ok(items) => (url, Some(items)),
                    Err(e) => {
                        warn!(url = url.as_str(), error = %e, "Ad scrape failed");
                        (url, None)
                    }
                }
            }
        }))
        .buffer_unordered(workers.max(1))
        .collect()
        .await;

    let mut all = Vec::new();
    let mut failed = 0u32;
    for (url, items) in results {
        match items {
            Some(mut items) => {
                for item in &mut items {
                    item.source_url = Some(url.clone());
                }
                all.append(&mut items);
            }
            None => failed += 1,
        }
    }

    info!(total = all.len(), failed, "Parallel ad scrape complete");
    (all, failed)
}
