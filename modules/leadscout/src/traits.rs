// Trait abstractions for the pipeline's external collaborators.
//
// ContentDiscovery — samples recent posts for one tag.
// ProfileEnrichment — resolves profiles plus recent content for accounts.
// StorageSink — append-only destination for accepted records.
//
// These enable deterministic testing with mock collaborators: no network,
// no Apify account. `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

use apify_client::HashtagPost;
use leadscout_common::{ContentItem, OutputRecord, Profile};

/// One item from the enrichment collaborator's mixed response stream,
/// discriminated once at the boundary. `account` is the lowercased handle
/// the item belongs to, when the payload carries one.
#[derive(Debug, Clone)]
pub struct AccountItem {
    pub account: Option<String>,
    pub item: ResponseItem,
}

#[derive(Debug, Clone)]
pub enum ResponseItem {
    Profile(Profile),
    Content(ContentItem),
}

#[async_trait]
pub trait ContentDiscovery: Send + Sync {
    /// Sample up to `limit` recent posts for a single canonical tag.
    async fn sample_tag(&self, tag: &str, limit: u32) -> Result<Vec<HashtagPost>>;
}

#[async_trait]
pub trait ProfileEnrichment: Send + Sync {
    /// Fetch the mixed profile/content stream for one or many accounts,
    /// requesting at least `lookback` recent items per account.
    async fn fetch_accounts(&self, handles: &[String], lookback: u32) -> Result<Vec<AccountItem>>;
}

#[async_trait]
pub trait StorageSink: Send {
    /// Append one record. At-least-once; nothing is rolled back on a later
    /// fatal error.
    async fn append(&mut self, record: &OutputRecord) -> Result<()>;
}
