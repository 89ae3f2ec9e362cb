use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::info;

/// Pipeline configuration loaded from environment variables.
/// Constructed once at process start and passed by reference; no global
/// client state anywhere.
#[derive(Debug, Clone)]
pub struct Config {
    // AI provider
    pub openai_api_key: String,
    pub chat_model: String,

    // Scraping
    pub apify_api_token: String,
    /// Ad Library page URLs, comma-separated in SOURCE_URLS.
    pub source_urls: Vec<String>,
    pub max_ads_per_url: u32,
    pub scrape_workers: usize,

    // Enrichment
    pub enrich_workers: usize,

    // Storage
    pub master_path: PathBuf,

    // Stage toggles
    pub enable_scraping: bool,
    pub enable_enrichment: bool,

    // Analysis window (both bounds inclusive); unset means no date filter
    pub analysis_start: Option<NaiveDate>,
    pub analysis_end: Option<NaiveDate>,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        let enable_scraping = flag_env("ENABLE_SCRAPING", true);
        let enable_enrichment = flag_env("ENABLE_ENRICHMENT", true);

        Self {
            openai_api_key: if enable_enrichment {
                required_env("OPENAI_API_KEY")
            } else {
                String::new()
            },
            chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            apify_api_token: env::var("APIFY_API_TOKEN").unwrap_or_default(),
            source_urls: env::var("SOURCE_URLS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            max_ads_per_url: env::var("MAX_ADS_PER_URL")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .expect("MAX_ADS_PER_URL must be a number"),
            scrape_workers: env::var("SCRAPE_WORKERS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .expect("SCRAPE_WORKERS must be a number"),
            enrich_workers: env::var("ENRICH_WORKERS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("ENRICH_WORKERS must be a number"),
            master_path: PathBuf::from(
                env::var("MASTER_PATH").unwrap_or_else(|_| "data/master.jsonl".to_string()),
            ),
            enable_scraping,
            enable_enrichment,
            analysis_start: date_env("ANALYSIS_START_DATE"),
            analysis_end: date_env("ANALYSIS_END_DATE"),
        }
    }

    /// Log the effective configuration without exposing secrets.
    pub fn log_redacted(&self) {
        info!(
            chat_model = %self.chat_model,
            source_urls = self.source_urls.len(),
            max_ads_per_url = self.max_ads_per_url,
            scrape_workers = self.scrape_workers,
            enrich_workers = self.enrich_workers,
            master_path = %self.master_path.display(),
            enable_scraping = self.enable_scraping,
            enable_enrichment = self.enable_enrichment,
            openai_key_set = !self.openai_api_key.is_empty(),
            apify_token_set = !self.apify_api_token.is_empty(),
            "Configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}

fn flag_env(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn date_env(key: &str) -> Option<NaiveDate> {
    env::var(key).ok().map(|v| {
        NaiveDate::parse_from_str(&v, "%Y-%m-%d")
            .unwrap_or_else(|_| panic!("{key} must be a YYYY-MM-DD date"))
    })
}
