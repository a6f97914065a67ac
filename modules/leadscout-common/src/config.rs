use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LeadScoutError;

/// How the profile enricher talks to the enrichment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichmentMode {
    /// One enrichment call per candidate, lazily, stopping at the cap.
    #[default]
    PerCandidate,
    /// One enrichment call carrying every candidate handle up front.
    Batched,
}

/// Shape of the emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSchema {
    #[default]
    Rich,
    Compact,
}

/// Run configuration, read once at startup from a JSON input file.
/// Unknown fields are ignored. Keys are accepted in both snake_case and
/// the camelCase spelling the actor-input format uses.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub hashtags: Vec<String>,
    #[serde(default = "default_max_accepted", alias = "maxAccepted")]
    pub max_accepted: u32,
    #[serde(default = "default_min_followers", alias = "minFollowers")]
    pub min_followers: u64,
    #[serde(default = "default_lookback_posts", alias = "lookbackPosts")]
    pub lookback_posts: u32,
    #[serde(default = "default_min_hit_rate_pct", alias = "minHashtagHitRatePct")]
    pub min_hashtag_hit_rate_pct: u32,
    #[serde(default = "default_per_tag_sample", alias = "perTagSampleSize")]
    pub per_tag_sample_size: u32,
    #[serde(default = "default_true", alias = "useProxy")]
    pub use_proxy: bool,
    #[serde(default, alias = "proxyGroups")]
    pub proxy_groups: Vec<String>,
    #[serde(default, alias = "sessionToken")]
    pub session_token: Option<String>,
    #[serde(default, alias = "enrichmentMode")]
    pub enrichment_mode: EnrichmentMode,
    #[serde(default, alias = "outputSchema")]
    pub output_schema: OutputSchema,
    #[serde(default = "default_true", alias = "bareTagFallback")]
    pub bare_tag_fallback: bool,
    #[serde(default = "default_inter_request_ms", alias = "interRequestMs")]
    pub inter_request_ms: u64,
}

impl RunConfig {
    /// Load from a JSON input file.
    pub fn load(path: &Path) -> Result<Self, LeadScoutError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| LeadScoutError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: RunConfig = serde_json::from_str(&raw)
            .map_err(|e| LeadScoutError::Config(format!("invalid input JSON: {e}")))?;
        Ok(config)
    }

    /// Relevance threshold as a fraction, with the percentage clamped to 0–100.
    pub fn min_hit_rate(&self) -> f64 {
        f64::from(self.min_hashtag_hit_rate_pct.min(100)) / 100.0
    }

    pub fn log_redacted(&self) {
        tracing::info!(
            hashtags = ?self.hashtags,
            max_accepted = self.max_accepted,
            min_followers = self.min_followers,
            lookback_posts = self.lookback_posts,
            min_hashtag_hit_rate_pct = self.min_hashtag_hit_rate_pct,
            per_tag_sample_size = self.per_tag_sample_size,
            use_proxy = self.use_proxy,
            enrichment_mode = ?self.enrichment_mode,
            output_schema = ?self.output_schema,
            has_session_token = self.session_token.is_some(),
            "Run configuration loaded"
        );
    }
}

fn default_max_accepted() -> u32 {
    100
}

fn default_min_followers() -> u64 {
    1000
}

fn default_lookback_posts() -> u32 {
    20
}

fn default_min_hit_rate_pct() -> u32 {
    20
}

fn default_per_tag_sample() -> u32 {
    200
}

fn default_true() -> bool {
    true
}

fn default_inter_request_ms() -> u64 {
    500
}

/// Read the Apify API token from the environment.
/// Panics with a clear message if missing.
pub fn apify_token_from_env() -> String {
    env::var("APIFY_TOKEN").unwrap_or_else(|_| panic!("APIFY_TOKEN environment variable is required"))
}
