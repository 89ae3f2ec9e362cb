use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use adpulse_common::{AdPulseError, AdRecord, Config};
use adpulse_pipeline::annotator::Annotator;
use adpulse_pipeline::enricher::Enricher;
use adpulse_pipeline::stats::{label_stats, RunStats};
use adpulse_pipeline::{scrape, store, transform};
use apify_client::ApifyClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("adpulse=info".parse()?))
        .init();

    info!("AdPulse pipeline starting...");

    let config = Config::from_env();
    config.log_redacted();

    let mut stats = RunStats::default();
    let mut fresh: Vec<AdRecord> = Vec::new();

    // 1. Scrape
    if !config.enable_scraping {
        info!("Scraping disabled, nothing new to ingest");
    } else if config.apify_api_token.is_empty() {
        warn!("APIFY_API_TOKEN not set, skipping scrape");
    } else if config.source_urls.is_empty() {
        return Err(
            AdPulseError::Config("ENABLE_SCRAPING is on but SOURCE_URLS is empty".to_string())
                .into(),
        );
    } else {
        let apify = ApifyClient::new(config.apify_api_token.clone());
        let (items, urls_failed) = scrape::scrape_all(
            &apify,
            &config.source_urls,
            config.max_ads_per_url,
            config.scrape_workers,
        )
        .await;
        stats.urls_scraped = config.source_urls.len() as u32 - urls_failed;
        stats.urls_failed = urls_failed;
        stats.items_fetched = items.len() as u32;

        // 2. Transform + recency filter
        fresh = transform::records_from_items(items);
        stats.records_flattened = fresh.len() as u32;
        if let (Some(start), Some(end)) = (config.analysis_start, config.analysis_end) {
            fresh = transform::filter_recent(fresh, start, end);
        }
        stats.records_in_window = fresh.len() as u32;
        info!(records = fresh.len(), "Records after transform and recency filter");
    }

    // 3. Enrich
    if config.enable_enrichment && !fresh.is_empty() {
        let annotator = Annotator::openai(&config.openai_api_key, &config.chat_model);
        let enricher = Enricher::new(annotator, config.enrich_workers);
        let outcome = enricher.enrich(fresh).await?;
        stats.unique_enriched = outcome.units_run as u32;
        stats.unit_failures = outcome.unit_failures as u32;
        stats.label_counts = label_stats(&outcome.records);
        fresh = outcome.records;
    } else if !fresh.is_empty() {
        info!("Enrichment disabled, persisting unannotated records");
    }

    // 4. Merge into the master table
    if fresh.is_empty() {
        info!("No fresh records, master table unchanged");
    } else {
        let master = store::load_master(&config.master_path)?;
        let combined = store::merge_dedup(master, fresh);
        stats.master_rows = combined.len() as u32;
        store::save_master(&config.master_path, &combined)?;
        info!(
            path = %config.master_path.display(),
            rows = stats.master_rows,
            "Master table updated"
        );
    }

    info!("{stats}");
    Ok(())
}
