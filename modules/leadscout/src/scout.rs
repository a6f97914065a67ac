//! Run orchestration: discovery → rank → enrich → filter → emit, one
//! strictly sequential pass per invocation. The only suspension points
//! are the collaborator calls and the throttle pauses.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};
use uuid::Uuid;

use leadscout_common::{AuthorCandidate, EnrichmentMode, LeadScoutError, RunConfig};

use crate::discovery::DiscoveryCollector;
use crate::emit::ResultEmitter;
use crate::enrich::{partition_accounts, Enrichment};
use crate::filter::{RelevanceFilter, Verdict};
use crate::rank::rank_candidates;
use crate::tags::normalize_tags;
use crate::throttle::{retry_with_backoff, Throttle, CALL_ATTEMPTS};
use crate::traits::{ContentDiscovery, ProfileEnrichment, StorageSink};

#[derive(Debug, Default)]
pub struct RunStats {
    pub authors_discovered: usize,
    pub candidates_ranked: usize,
    pub enriched: u32,
    pub skipped_no_profile: u32,
    pub rejected_low_followers: u32,
    pub rejected_low_hit_rate: u32,
    pub accepted: u32,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} authors discovered, {} ranked, {} enriched, \
             {} no-profile, {} below follower threshold, \
             {} below hit-rate threshold, {} accepted",
            self.authors_discovered,
            self.candidates_ranked,
            self.enriched,
            self.skipped_no_profile,
            self.rejected_low_followers,
            self.rejected_low_hit_rate,
            self.accepted,
        )
    }
}

pub struct LeadScout<D, E> {
    discovery: D,
    enrichment: E,
    config: RunConfig,
}

impl<D: ContentDiscovery, E: ProfileEnrichment> LeadScout<D, E> {
    pub fn new(discovery: D, enrichment: E, config: RunConfig) -> Self {
        Self {
            discovery,
            enrichment,
            config,
        }
    }

    /// Execute one full pipeline run. The sink receives accepted records
    /// in acceptance order; anything appended before a fatal error stays.
    pub async fn run<S: StorageSink>(&self, sink: S) -> Result<RunStats> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Lead discovery run starting");

        // Fatal before any collaborator call.
        let tags = normalize_tags(&self.config.hashtags)?;

        let backoff = Duration::from_millis(self.config.inter_request_ms);
        let mut throttle = Throttle::from_millis(self.config.inter_request_ms);
        let mut stats = RunStats::default();

        let collector =
            DiscoveryCollector::new(&self.discovery, self.config.per_tag_sample_size, backoff);
        let authors = collector.collect(&tags, &mut throttle).await?;
        stats.authors_discovered = authors.len();

        let ranked = rank_candidates(authors, self.config.max_accepted);
        stats.candidates_ranked = ranked.len();
        info!(candidates = ranked.len(), "Candidates for validation");

        let filter = RelevanceFilter::new(
            tags,
            self.config.min_followers,
            self.config.min_hit_rate(),
            self.config.bare_tag_fallback,
        );
        let mut emitter = ResultEmitter::new(
            sink,
            self.config.output_schema,
            self.config.max_accepted,
        );

        match self.config.enrichment_mode {
            EnrichmentMode::PerCandidate => {
                for candidate in &ranked {
                    // Lazy short-circuit: once the cap is reached, the
                    // rest of the pool is never enriched.
                    if emitter.is_full() {
                        break;
                    }
                    throttle.pause().await;
                    let handles = std::slice::from_ref(&candidate.handle);
                    let items = retry_with_backoff("enrichment", backoff, CALL_ATTEMPTS, || {
                        self.enrichment
                            .fetch_accounts(handles, self.config.lookback_posts)
                    })
                    .await
                    .map_err(|e| {
                        LeadScoutError::Enrichment(format!(
                            "lookup for @{} failed: {e}",
                            candidate.handle
                        ))
                    })?;

                    let mut by_account = partition_accounts(items, Some(&candidate.handle));
                    let enrichment = by_account.remove(&candidate.key()).unwrap_or_default();
                    self.consider(candidate, enrichment, &filter, &mut emitter, &mut stats)
                        .await?;
                }
            }
            EnrichmentMode::Batched => {
                if !ranked.is_empty() {
                    throttle.pause().await;
                    let handles: Vec<String> =
                        ranked.iter().map(|c| c.handle.clone()).collect();
                    let items = retry_with_backoff("enrichment", backoff, CALL_ATTEMPTS, || {
                        self.enrichment
                            .fetch_accounts(&handles, self.config.lookback_posts)
                    })
                    .await
                    .map_err(|e| {
                        LeadScoutError::Enrichment(format!(
                            "batched lookup for {} accounts failed: {e}",
                            handles.len()
                        ))
                    })?;

                    let mut by_account = partition_accounts(items, None);
                    for candidate in &ranked {
                        if emitter.is_full() {
                            break;
                        }
                        let enrichment =
                            by_account.remove(&candidate.key()).unwrap_or_default();
                        self.consider(candidate, enrichment, &filter, &mut emitter, &mut stats)
                            .await?;
                    }
                }
            }
        }

        stats.accepted = emitter.accepted();
        info!(%run_id, %stats, "Lead discovery run complete");
        Ok(stats)
    }

    /// Filter one enriched candidate and emit it if accepted. Every
    /// outcome here is terminal and non-fatal.
    async fn consider<S: StorageSink>(
        &self,
        candidate: &AuthorCandidate,
        enrichment: Enrichment,
        filter: &RelevanceFilter,
        emitter: &mut ResultEmitter<S>,
        stats: &mut RunStats,
    ) -> Result<()> {
        let handle = candidate.handle.as_str();

        let Some(profile) = enrichment.profile.as_ref() else {
            warn!(handle, "Profile not found or blocked, skipping");
            stats.skipped_no_profile += 1;
            return Ok(());
        };
        stats.enriched += 1;

        let analyzed = enrichment.analyzed(self.config.lookback_posts);
        match filter.evaluate(profile, analyzed) {
            Verdict::LowFollowers { followers } => {
                debug!(handle, followers, "Rejected below follower threshold");
                stats.rejected_low_followers += 1;
            }
            Verdict::LowHitRate { hit_rate } => {
                debug!(
                    handle,
                    hit_rate = format!("{:.1}%", hit_rate * 100.0),
                    "Rejected below hashtag hit-rate threshold"
                );
                stats.rejected_low_hit_rate += 1;
            }
            Verdict::Accepted { hit_rate } => {
                emitter.emit(candidate, profile, hit_rate, analyzed).await?;
            }
        }
        Ok(())
    }
}
