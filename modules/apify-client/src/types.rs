use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Ad Library scraper types ---

/// Input for the apify/facebook-ads-scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct AdsScraperInput {
    #[serde(rename = "startUrls")]
    pub start_urls: Vec<StartUrl>,
    #[serde(rename = "resultsLimit")]
    pub results_limit: u32,
    #[serde(rename = "isDetailsPerAd")]
    pub is_details_per_ad: bool,
    #[serde(rename = "onlyTotal")]
    pub only_total: bool,
    /// Empty string scrapes both active and inactive ads.
    #[serde(rename = "activeStatus")]
    pub active_status: String,
}

/// A start URL entry for the scraper input.
#[derive(Debug, Clone, Serialize)]
pub struct StartUrl {
    pub url: String,
}

/// A single ad from the Ad Library dataset. The actor returns a deeply
/// nested document; only the paths the pipeline consumes are modeled, and
/// unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AdLibraryItem {
    #[serde(rename = "adArchiveID", alias = "adArchiveId")]
    pub ad_archive_id: Option<String>,
    #[serde(rename = "pageID", alias = "pageId")]
    pub page_id: Option<String>,
    #[serde(rename = "startDateFormatted")]
    pub start_date_formatted: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    pub snapshot: Option<AdSnapshot>,
    pub ad_details: Option<AdDetails>,
    /// Tagged by the caller after fetch, not part of the actor payload.
    #[serde(default)]
    pub source_url: Option<String>,
}

impl AdLibraryItem {
    /// Main body copy of the ad, if the snapshot carries one.
    pub fn body_text(&self) -> Option<&str> {
        self.snapshot.as_ref()?.body.as_ref()?.text.as_deref()
    }

    /// Body of the first carousel card that has one. Dynamic-creative ads
    /// leave an uninterpolated template in the main body and put the real
    /// copy here.
    pub fn first_card_body(&self) -> Option<&str> {
        self.snapshot
            .as_ref()?
            .cards
            .as_ref()?
            .iter()
            .find_map(|c| c.body.as_deref())
    }

    /// Advertiser page name, preferring the per-ad details path.
    pub fn page_name(&self) -> Option<&str> {
        let from_details = self
            .ad_details
            .as_ref()
            .and_then(|d| d.advertiser.as_ref())
            .and_then(|a| a.ad_library_page_info.as_ref())
            .and_then(|i| i.page_info.as_ref())
            .and_then(|p| p.page_name.as_deref());
        from_details.or_else(|| self.snapshot.as_ref()?.page_name.as_deref())
    }

    /// Delivery start date as `YYYY-MM-DD`, from whichever field is present.
    pub fn start_date(&self) -> Option<&str> {
        self.start_date_formatted
            .as_deref()
            .or(self.start_date.as_deref())
    }
}

/// Creative snapshot nested inside an ad item.
#[derive(Debug, Clone, Deserialize)]
pub struct AdSnapshot {
    pub body: Option<AdBody>,
    pub cards: Option<Vec<AdCard>>,
    pub page_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdBody {
    pub text: Option<String>,
}

/// A carousel card inside a snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct AdCard {
    pub body: Option<String>,
}

/// Per-ad details block (`ad_details/advertiser/.../page_name` path).
#[derive(Debug, Clone, Deserialize)]
pub struct AdDetails {
    pub advertiser: Option<Advertiser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Advertiser {
    pub ad_library_page_info: Option<AdLibraryPageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdLibraryPageInfo {
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    pub page_name: Option<String>,
}

// --- Run plumbing ---

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}
