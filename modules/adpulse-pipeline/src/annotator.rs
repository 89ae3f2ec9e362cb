//! Annotation client: two fixed-prompt calls against the text-generation
//! service, one per annotation kind. Each call contains its own failures:
//! a dead service or garbage reply degrades to the sentinel for that item
//! and never reaches the enricher as an error. No internal retry; bounded
//! latency matters more than completeness for optional annotation.

use std::fmt::Write as _;
use std::sync::{Arc, LazyLock};

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use adpulse_common::{is_taxonomy_label, Annotation, LABEL_NONE, TAXONOMY};
use openai_client::{ChatRequest, OpenAiClient, WireMessage};

use crate::parse::{parse_labels, parse_summary};

/// Response-size caps per annotation kind.
const SUMMARY_MAX_TOKENS: u32 = 200;
const LABELS_MAX_TOKENS: u32 = 80;

const SUMMARY_SYSTEM_PROMPT: &str = "\
You are a precise annotator of ad copy.
Given an ad's text, return a ONE-SENTENCE description of the clear product/service/promotion being advertised.
Rules:
- If a clear single product/service/promotion/venue/event is identifiable, describe it succinctly in one sentence.
- If the ad is only brand building, employer branding, atmosphere, or ambiguous with no concrete offer, still summarize the ad in one sentence.
- Keep it factual (no hype), <= 140 characters where feasible, no emojis, no hashtags, no URLs.
- Treat promotions/discount weekends/contests as valid 'products' (e.g., '50% off non-food at Maxima 05-16 to 05-18').
- ALWAYS return everything in English, even if the ad is in another language!
Return STRICT JSON ONLY as: {\"summary\":\"<ONE_SENTENCE_OR_NONE>\"}";

/// Labeling prompt, assembled once from the closed taxonomy.
static LABELS_SYSTEM_PROMPT: LazyLock<String> = LazyLock::new(|| {
    let mut prompt = String::from(
        "You are labeling a product/promotion one-liner against a FIXED taxonomy.
Rules:
- Choose 1 to 3 labels from ALLOWED THEMES (listed below with examples).
- The FIRST label must be the single MOST APPROPRIATE theme.
- If no theme fits, output OTHER.
- VERY IMPORTANT: do NOT force-fit; keep OTHER if uncertain.
- Output ENGLISH only in EXACTLY this format:
Labels: <Theme A>; <Theme B>; <Theme C>
(Use 1 to 3 labels; separate with semicolons; do not number them.)
- Prefer the most specific matching themes.

Output requirement:
- Each theme name is followed by a dash and examples. RETURN ONLY the text before the dash (the theme name itself), not the examples.

Key distinction:
- Seasonal Promotions and Discounts = time-bound events linked to a specific season, holiday, or calendar moment.
- General Discounts and Promotions = price cuts or deals not tied to a season or holiday.

Clarification:
- Shopping Experiences = initiatives improving the overall mall/supermarket visit, unrelated to individual store products.

Available themes (with illustrative examples - DO NOT RETURN the examples, just the theme name before the dash!):
",
    );
    for (i, theme) in TAXONOMY.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {} - {}.", i + 1, theme.name, theme.examples);
    }
    prompt
});

/// Seam to the text-generation service. Production uses the OpenAI client;
/// tests substitute a scripted fake.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn chat(&self, system: &str, user: &str, max_tokens: u32, json_mode: bool)
        -> Result<String>;
}

/// Live OpenAI chat backend with deterministic decoding.
pub struct OpenAiChat {
    client: OpenAiClient,
    model: String,
}

impl OpenAiChat {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: OpenAiClient::new(api_key.to_string()),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ChatApi for OpenAiChat {
    async fn chat(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
        json_mode: bool,
    ) -> Result<String> {
        let mut request = ChatRequest::new(&self.model)
            .message(WireMessage::system(system))
            .message(WireMessage::user(user))
            .temperature(0.0)
            .max_tokens(max_tokens);
        if json_mode {
            request = request.json_object();
        }
        Ok(self.client.completion_text(&request).await?)
    }
}

/// Issues the annotation calls for one ad and maps failures to sentinels.
pub struct Annotator {
    chat: Arc<dyn ChatApi>,
}

impl Annotator {
    pub fn new(chat: Arc<dyn ChatApi>) -> Self {
        Self { chat }
    }

    pub fn openai(api_key: &str, model: &str) -> Self {
        Self::new(Arc::new(OpenAiChat::new(api_key, model)))
    }

    /// One-sentence summary for an ad. Any transport or service failure
    /// degrades to the `NONE` sentinel; this never errors.
    pub async fn summarize(&self, ad_text: &str) -> String {
        let user = format!("Ad text:\n{ad_text}");
        match self
            .chat
            .chat(SUMMARY_SYSTEM_PROMPT, &user, SUMMARY_MAX_TOKENS, true)
            .await
        {
            Ok(raw) => parse_summary(&raw),
            Err(e) => {
                warn!(error = %e, "Summary generation failed");
                LABEL_NONE.to_string()
            }
        }
    }

    /// Ranked taxonomy labels for an ad. Failures degrade to `(NONE, -, -)`.
    pub async fn label(&self, ad_text: &str) -> [Option<String>; 3] {
        let user = format!("Item:\n{ad_text}\n\nChoose 1 to 3 from ALLOWED THEMES.");
        match self
            .chat
            .chat(&LABELS_SYSTEM_PROMPT, &user, LABELS_MAX_TOKENS, false)
            .await
        {
            Ok(raw) => {
                let labels = parse_labels(&raw);
                for label in labels.iter().flatten() {
                    if !is_taxonomy_label(label) {
                        warn!(label = label.as_str(), "Label outside the closed taxonomy");
                    }
                }
                labels
            }
            Err(e) => {
                warn!(error = %e, "Label generation failed");
                [Some(LABEL_NONE.to_string()), None, None]
            }
        }
    }

    /// One unit of work: summary then labels, back-to-back on the same
    /// worker. The two calls are independent but are kept sequential so
    /// per-unit latency stays bounded by the pool size alone.
    pub async fn annotate(&self, ad_text: &str) -> Annotation {
        let summary = self.summarize(ad_text).await;
        let labels = self.label(ad_text).await;
        Annotation { summary, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct DeadService;

    #[async_trait]
    impl ChatApi for DeadService {
        async fn chat(&self, _: &str, _: &str, _: u32, _: bool) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    struct ScriptedService;

    #[async_trait]
    impl ChatApi for ScriptedService {
        async fn chat(&self, _: &str, _: &str, _: u32, json_mode: bool) -> Result<String> {
            if json_mode {
                Ok(r#"{"summary":"Two-for-one pizza all week"}"#.to_string())
            } else {
                Ok("Labels: Food and Culinary Experiences; General Discounts and Promotions"
                    .to_string())
            }
        }
    }

    #[test]
    fn test_labels_prompt_embeds_all_themes() {
        for theme in TAXONOMY.iter() {
            assert!(LABELS_SYSTEM_PROMPT.contains(theme.name));
        }
    }

    #[tokio::test]
    async fn test_dead_service_degrades_to_sentinels() {
        let annotator = Annotator::new(Arc::new(DeadService));
        let annotation = annotator.annotate("anything").await;
        assert_eq!(annotation.summary, LABEL_NONE);
        assert_eq!(annotation.labels[0].as_deref(), Some(LABEL_NONE));
        assert!(annotation.labels[1].is_none());
    }

    #[tokio::test]
    async fn test_scripted_service_round_trip() {
        let annotator = Annotator::new(Arc::new(ScriptedService));
        let annotation = annotator.annotate("pizza ad").await;
        assert_eq!(annotation.summary, "Two-for-one pizza all week");
        assert_eq!(
            annotation.labels[0].as_deref(),
            Some("Food and Culinary Experiences")
        );
        assert!(annotation.labels[2].is_none());
    }
}
