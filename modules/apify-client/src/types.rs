use serde::{Deserialize, Serialize};

// --- Actor run plumbing ---

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Metadata for an actor run, as returned by the runs endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
}

// --- Proxy / session pass-through ---

/// Proxy block accepted by official Apify actors. Groups are omitted from
/// the serialized input when empty, which selects the default pool.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyConfig {
    #[serde(rename = "useApifyProxy")]
    pub use_apify_proxy: bool,
    #[serde(rename = "apifyProxyGroups", skip_serializing_if = "Option::is_none")]
    pub apify_proxy_groups: Option<Vec<String>>,
}

impl ProxyConfig {
    pub fn new(groups: &[String]) -> Self {
        Self {
            use_apify_proxy: true,
            apify_proxy_groups: if groups.is_empty() {
                None
            } else {
                Some(groups.to_vec())
            },
        }
    }
}

// --- Instagram hashtag scraper ---

/// Input for the apify/instagram-hashtag-scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct HashtagScraperInput {
    pub hashtags: Vec<String>,
    #[serde(rename = "resultsLimit")]
    pub results_limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessionid: Option<String>,
}

/// Handle-bearing object nested inside some post payload shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct NestedAccount {
    pub username: Option<String>,
}

/// A single post from the hashtag scraper dataset. The actor has shipped
/// several payload shapes over time, so author and post-id fields are all
/// optional and resolved by priority.
#[derive(Debug, Clone, Deserialize)]
pub struct HashtagPost {
    pub caption: Option<String>,
    #[serde(rename = "ownerUsername")]
    pub owner_username: Option<String>,
    pub username: Option<String>,
    pub user: Option<NestedAccount>,
    pub owner: Option<NestedAccount>,
    #[serde(rename = "shortCode")]
    pub short_code: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "postId")]
    pub post_id: Option<String>,
    pub url: Option<String>,
}

impl HashtagPost {
    /// Resolve the author handle: owner handle, then flat handle, then the
    /// nested user/owner objects. First non-empty wins.
    pub fn author_handle(&self) -> Option<&str> {
        [
            self.owner_username.as_deref(),
            self.username.as_deref(),
            self.user.as_ref().and_then(|u| u.username.as_deref()),
            self.owner.as_ref().and_then(|o| o.username.as_deref()),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
    }

    /// Resolve a post identifier by the same priority scheme. May be empty.
    pub fn post_ref(&self) -> &str {
        self.short_code
            .as_deref()
            .or(self.id.as_deref())
            .or(self.post_id.as_deref())
            .unwrap_or("")
    }
}

// --- Instagram profile scraper ---

/// Input for the apify/instagram-profile-scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileScraperInput {
    pub usernames: Vec<String>,
    #[serde(rename = "resultsLimit")]
    pub results_limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessionid: Option<String>,
}

/// One item from the profile scraper's mixed dataset: each resolvable
/// account yields a single profile item plus its recent posts, in one
/// stream, discriminated by field shape rather than position.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDatasetItem {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub username: Option<String>,
    #[serde(rename = "ownerUsername")]
    pub owner_username: Option<String>,

    // profile-shaped fields
    #[serde(rename = "followersCount")]
    pub followers_count: Option<u64>,
    pub followers: Option<u64>,
    #[serde(rename = "followsCount")]
    pub follows_count: Option<i64>,
    #[serde(rename = "followingCount")]
    pub following_count: Option<i64>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "isVerified")]
    pub is_verified: Option<bool>,
    pub biography: Option<String>,
    #[serde(rename = "externalUrl")]
    pub external_url: Option<String>,
    #[serde(rename = "businessCategoryName")]
    pub business_category: Option<String>,

    // post-shaped fields
    pub caption: Option<String>,
    #[serde(rename = "shortCode")]
    pub short_code: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "postUrl")]
    pub post_url: Option<String>,
}

impl ProfileDatasetItem {
    /// Profile items carry an explicit type marker or a follower count.
    /// An explicit marker wins; the follower-count heuristic applies only
    /// when the marker is absent or blank.
    pub fn is_profile(&self) -> bool {
        match self.item_type.as_deref() {
            Some("") | None => self.followers_count.is_some(),
            Some(t) => t == "profile",
        }
    }

    /// Whether this item is recognizable as a content item at all.
    /// Items with none of caption/shortCode/url are noise and get dropped.
    pub fn is_content(&self) -> bool {
        self.caption.is_some()
            || self.short_code.is_some()
            || self.url.is_some()
            || self.post_url.is_some()
    }

    /// Follower count with the legacy `followers` field as fallback.
    pub fn resolved_followers(&self) -> u64 {
        self.followers_count.or(self.followers).unwrap_or(0)
    }

    /// Following count across the two field spellings the actor has used.
    pub fn resolved_following(&self) -> Option<i64> {
        self.follows_count.or(self.following_count)
    }

    /// Account this item belongs to, lowercased for keying.
    pub fn account_key(&self) -> Option<String> {
        self.username
            .as_deref()
            .or(self.owner_username.as_deref())
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Best-effort permalink for a content item.
    pub fn content_url(&self) -> Option<String> {
        self.url
            .clone()
            .or_else(|| self.post_url.clone())
            .or_else(|| {
                self.short_code
                    .as_ref()
                    .map(|sc| format!("https://www.instagram.com/p/{sc}/"))
            })
    }
}
