//! Hashtag discovery: one bounded sample of recent posts per tag, folded
//! into a run-local map of unique authors. The map records which tags each
//! author's sampled posts matched and which post ids were seen; both feed
//! the ranker.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use leadscout_common::{AuthorCandidate, LeadScoutError};

use crate::throttle::{retry_with_backoff, Throttle, CALL_ATTEMPTS};
use crate::traits::ContentDiscovery;

pub struct DiscoveryCollector<'a, D: ContentDiscovery> {
    discovery: &'a D,
    per_tag_sample_size: u32,
    backoff: Duration,
}

impl<'a, D: ContentDiscovery> DiscoveryCollector<'a, D> {
    pub fn new(discovery: &'a D, per_tag_sample_size: u32, backoff: Duration) -> Self {
        Self {
            discovery,
            per_tag_sample_size,
            backoff,
        }
    }

    /// Process every tag in input order and aggregate unique authors,
    /// keyed by lowercased handle. An empty sample for a tag logs and
    /// continues; it is never an error.
    pub async fn collect(
        &self,
        tags: &[String],
        throttle: &mut Throttle,
    ) -> Result<HashMap<String, AuthorCandidate>> {
        let mut authors: HashMap<String, AuthorCandidate> = HashMap::new();

        for tag in tags {
            info!(tag, "Sampling posts for hashtag");
            throttle.pause().await;

            let items = retry_with_backoff("discovery", self.backoff, CALL_ATTEMPTS, || {
                self.discovery.sample_tag(tag, self.per_tag_sample_size)
            })
            .await
            .map_err(|e| LeadScoutError::Discovery(format!("sample for #{tag} failed: {e}")))?;

            let mut mapped = 0usize;
            for item in &items {
                // Items with no resolvable author are skipped, not errored.
                let Some(handle) = item.author_handle() else {
                    continue;
                };
                let key = handle.to_lowercase();
                let rec = authors
                    .entry(key)
                    .or_insert_with(|| AuthorCandidate::new(handle));

                let post_id = item.post_ref();
                if !post_id.is_empty() {
                    rec.sample_post_ids.insert(post_id.to_string());
                }
                rec.hashtags_matched.insert(tag.clone());
                mapped += 1;
            }

            info!(
                tag,
                posts_mapped = mapped,
                unique_authors = authors.len(),
                "Hashtag sample processed"
            );
        }

        Ok(authors)
    }
}
