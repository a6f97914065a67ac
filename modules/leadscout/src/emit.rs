//! Result emission: case-insensitive dedup, the acceptance cap, and
//! record building for both output schemas. Records append to the sink in
//! acceptance order, which follows ranked order.

use anyhow::Result;
use chrono::Utc;
use std::collections::HashSet;
use tracing::info;

use leadscout_common::{
    profile_url, AuthorCandidate, CompactRecord, ContentItem, OutputRecord, OutputSchema, Profile,
    RichRecord,
};

use crate::traits::StorageSink;

/// Number of analyzed content items carried into the rich record.
const RECORD_SAMPLE_SIZE: usize = 5;

pub struct ResultEmitter<S: StorageSink> {
    sink: S,
    schema: OutputSchema,
    max_accepted: u32,
    picked: HashSet<String>,
    accepted: u32,
}

impl<S: StorageSink> ResultEmitter<S> {
    pub fn new(sink: S, schema: OutputSchema, max_accepted: u32) -> Self {
        Self {
            sink,
            schema,
            max_accepted,
            picked: HashSet::new(),
            accepted: 0,
        }
    }

    /// Whether the acceptance cap has been reached. Once true, the caller
    /// stops walking the pool entirely.
    pub fn is_full(&self) -> bool {
        self.accepted >= self.max_accepted
    }

    pub fn accepted(&self) -> u32 {
        self.accepted
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Emit one filter-accepted candidate. Returns false when the account
    /// was already accepted (upstream duplication) or the cap is reached.
    pub async fn emit(
        &mut self,
        candidate: &AuthorCandidate,
        profile: &Profile,
        hit_rate: f64,
        analyzed: &[ContentItem],
    ) -> Result<bool> {
        if self.is_full() || !self.picked.insert(candidate.key()) {
            return Ok(false);
        }

        let record = self.build_record(candidate, profile, hit_rate, analyzed);
        self.sink.append(&record).await?;
        self.accepted += 1;

        info!(
            accepted = self.accepted,
            cap = self.max_accepted,
            handle = candidate.handle.as_str(),
            followers = profile.follower_count,
            hit_rate = format!("{:.1}%", hit_rate * 100.0),
            "Lead accepted"
        );
        Ok(true)
    }

    fn build_record(
        &self,
        candidate: &AuthorCandidate,
        profile: &Profile,
        hit_rate: f64,
        analyzed: &[ContentItem],
    ) -> OutputRecord {
        match self.schema {
            OutputSchema::Rich => OutputRecord::Rich(RichRecord {
                username: candidate.handle.clone(),
                full_name: profile.display_name.clone(),
                profile_url: profile_url(&candidate.handle),
                followers: profile.follower_count,
                following: profile.following_count,
                is_verified: profile.is_verified,
                biography: profile.biography.clone(),
                external_url: profile.external_url.clone(),
                recent_hashtag_hit_rate: (hit_rate * 100.0).round() / 100.0,
                hashtags_matched_initial: candidate.hashtags_matched.iter().cloned().collect(),
                recent_posts_analyzed: analyzed.len(),
                recent_sample: analyzed.iter().take(RECORD_SAMPLE_SIZE).cloned().collect(),
                scraped_at: Utc::now(),
            }),
            OutputSchema::Compact => OutputRecord::Compact(CompactRecord {
                username: candidate.handle.clone(),
                primary_hashtag: candidate.hashtags_matched.iter().next().cloned(),
                followers: profile.follower_count,
                category: profile.category.clone(),
                profile_url: profile_url(&candidate.handle),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Default)]
    struct VecSink {
        records: Vec<OutputRecord>,
    }

    #[async_trait]
    impl StorageSink for VecSink {
        async fn append(&mut self, record: &OutputRecord) -> Result<()> {
            self.records.push(record.clone());
            Ok(())
        }
    }

    fn candidate(handle: &str, tags: &[&str]) -> AuthorCandidate {
        let mut c = AuthorCandidate::new(handle);
        for t in tags {
            c.hashtags_matched.insert(t.to_string());
        }
        c
    }

    fn profile() -> Profile {
        Profile {
            follower_count: 9000,
            following_count: Some(150),
            is_verified: Some(true),
            biography: Some("bio".to_string()),
            external_url: None,
            display_name: Some("Display".to_string()),
            category: Some("Blogger".to_string()),
        }
    }

    fn analyzed(n: usize) -> Vec<ContentItem> {
        (0..n)
            .map(|i| ContentItem {
                caption: format!("caption {i}"),
                url: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_cap_enforced() {
        let mut emitter = ResultEmitter::new(VecSink::default(), OutputSchema::Rich, 1);
        assert!(emitter
            .emit(&candidate("a", &["travel"]), &profile(), 0.5, &analyzed(3))
            .await
            .unwrap());
        assert!(emitter.is_full());
        assert!(!emitter
            .emit(&candidate("b", &["travel"]), &profile(), 0.5, &analyzed(3))
            .await
            .unwrap());
        assert_eq!(emitter.accepted(), 1);
        assert_eq!(emitter.into_sink().records.len(), 1);
    }

    #[tokio::test]
    async fn test_dedup_is_case_insensitive() {
        let mut emitter = ResultEmitter::new(VecSink::default(), OutputSchema::Rich, 10);
        assert!(emitter
            .emit(&candidate("Wanderer", &["travel"]), &profile(), 0.5, &[])
            .await
            .unwrap());
        assert!(!emitter
            .emit(&candidate("wanderer", &["travel"]), &profile(), 0.5, &[])
            .await
            .unwrap());
        assert_eq!(emitter.accepted(), 1);
    }

    #[tokio::test]
    async fn test_rich_record_fields() {
        let mut emitter = ResultEmitter::new(VecSink::default(), OutputSchema::Rich, 10);
        emitter
            .emit(
                &candidate("Wanderer", &["hiking", "travel"]),
                &profile(),
                0.314,
                &analyzed(8),
            )
            .await
            .unwrap();
        let records = emitter.into_sink().records;
        let OutputRecord::Rich(r) = &records[0] else {
            panic!("expected rich record");
        };
        assert_eq!(r.username, "Wanderer");
        assert_eq!(r.profile_url, "https://www.instagram.com/Wanderer/");
        assert_eq!(r.recent_hashtag_hit_rate, 0.31);
        assert_eq!(r.hashtags_matched_initial, vec!["hiking", "travel"]);
        assert_eq!(r.recent_posts_analyzed, 8);
        assert_eq!(r.recent_sample.len(), 5);
    }

    #[tokio::test]
    async fn test_compact_record_fields() {
        let mut emitter = ResultEmitter::new(VecSink::default(), OutputSchema::Compact, 10);
        emitter
            .emit(&candidate("chef", &["food"]), &profile(), 0.9, &analyzed(2))
            .await
            .unwrap();
        let records = emitter.into_sink().records;
        let OutputRecord::Compact(r) = &records[0] else {
            panic!("expected compact record");
        };
        assert_eq!(r.username, "chef");
        assert_eq!(r.primary_hashtag.as_deref(), Some("food"));
        assert_eq!(r.category.as_deref(), Some("Blogger"));
    }
}
