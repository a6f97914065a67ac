use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform base URL used to derive profile permalinks.
pub const PLATFORM_BASE_URL: &str = "https://www.instagram.com";

/// An account discovered in the hashtag samples, accumulated across tags.
/// Keyed externally by the lowercased handle; `handle` keeps the
/// case-preserving display form from the first sighting.
#[derive(Debug, Clone)]
pub struct AuthorCandidate {
    pub handle: String,
    pub sample_post_ids: HashSet<String>,
    pub hashtags_matched: BTreeSet<String>,
}

impl AuthorCandidate {
    pub fn new(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
            sample_post_ids: HashSet::new(),
            hashtags_matched: BTreeSet::new(),
        }
    }

    /// Canonical identity: account equality is case-insensitive.
    pub fn key(&self) -> String {
        self.handle.to_lowercase()
    }
}

/// Account metadata resolved during enrichment. Never mutated afterward.
#[derive(Debug, Clone)]
pub struct Profile {
    pub follower_count: u64,
    pub following_count: Option<i64>,
    pub is_verified: Option<bool>,
    pub biography: Option<String>,
    pub external_url: Option<String>,
    pub display_name: Option<String>,
    pub category: Option<String>,
}

/// One recent content item for a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Emitted record. Serializes flat as either the rich or compact shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutputRecord {
    Rich(RichRecord),
    Compact(CompactRecord),
}

impl OutputRecord {
    pub fn username(&self) -> &str {
        match self {
            OutputRecord::Rich(r) => &r.username,
            OutputRecord::Compact(r) => &r.username,
        }
    }
}

/// Canonical output shape, one record per accepted account.
#[derive(Debug, Clone, Serialize)]
pub struct RichRecord {
    pub username: String,
    pub full_name: Option<String>,
    pub profile_url: String,
    pub followers: u64,
    pub following: Option<i64>,
    pub is_verified: Option<bool>,
    pub biography: Option<String>,
    pub external_url: Option<String>,
    /// 0–1, rounded to 2 decimals.
    pub recent_hashtag_hit_rate: f64,
    pub hashtags_matched_initial: Vec<String>,
    pub recent_posts_analyzed: usize,
    pub recent_sample: Vec<ContentItem>,
    pub scraped_at: DateTime<Utc>,
}

/// Compact output shape for downstream consumers that only want the lead.
#[derive(Debug, Clone, Serialize)]
pub struct CompactRecord {
    pub username: String,
    pub primary_hashtag: Option<String>,
    pub followers: u64,
    pub category: Option<String>,
    pub profile_url: String,
}

/// Derive the profile permalink for a handle.
pub fn profile_url(handle: &str) -> String {
    format!("{PLATFORM_BASE_URL}/{handle}/")
}
