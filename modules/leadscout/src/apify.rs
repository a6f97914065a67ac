//! Apify-backed implementations of the collaborator traits. Both actors
//! take the same proxy block and optional session cookie; those are built
//! once from the run configuration and passed through opaquely.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use apify_client::{
    ApifyClient, HashtagPost, HashtagScraperInput, ProfileScraperInput, ProxyConfig,
};
use leadscout_common::{ContentItem, Profile, RunConfig};

use crate::traits::{AccountItem, ContentDiscovery, ProfileEnrichment, ResponseItem};

fn proxy_from_config(config: &RunConfig) -> Option<ProxyConfig> {
    config
        .use_proxy
        .then(|| ProxyConfig::new(&config.proxy_groups))
}

pub struct ApifyDiscovery {
    client: Arc<ApifyClient>,
    proxy: Option<ProxyConfig>,
    session_token: Option<String>,
}

impl ApifyDiscovery {
    pub fn new(client: Arc<ApifyClient>, config: &RunConfig) -> Self {
        Self {
            client,
            proxy: proxy_from_config(config),
            session_token: config.session_token.clone(),
        }
    }
}

#[async_trait]
impl ContentDiscovery for ApifyDiscovery {
    async fn sample_tag(&self, tag: &str, limit: u32) -> Result<Vec<HashtagPost>> {
        let input = HashtagScraperInput {
            hashtags: vec![tag.to_string()],
            results_limit: limit,
            proxy: self.proxy.clone(),
            sessionid: self.session_token.clone(),
        };
        Ok(self.client.search_hashtag(&input).await?)
    }
}

pub struct ApifyEnrichment {
    client: Arc<ApifyClient>,
    proxy: Option<ProxyConfig>,
    session_token: Option<String>,
}

impl ApifyEnrichment {
    pub fn new(client: Arc<ApifyClient>, config: &RunConfig) -> Self {
        Self {
            client,
            proxy: proxy_from_config(config),
            session_token: config.session_token.clone(),
        }
    }
}

#[async_trait]
impl ProfileEnrichment for ApifyEnrichment {
    async fn fetch_accounts(&self, handles: &[String], lookback: u32) -> Result<Vec<AccountItem>> {
        let input = ProfileScraperInput {
            usernames: handles.to_vec(),
            results_limit: lookback,
            proxy: self.proxy.clone(),
            sessionid: self.session_token.clone(),
        };
        let raw = self.client.scrape_profiles(&input).await?;

        // Discriminate the mixed stream once, here at the boundary.
        let items = raw
            .into_iter()
            .filter_map(|item| {
                let account = item.account_key();
                if item.is_profile() {
                    Some(AccountItem {
                        account,
                        item: ResponseItem::Profile(Profile {
                            follower_count: item.resolved_followers(),
                            following_count: item.resolved_following(),
                            is_verified: item.is_verified,
                            biography: item.biography,
                            external_url: item.external_url,
                            display_name: item.full_name,
                            category: item.business_category,
                        }),
                    })
                } else if item.is_content() {
                    let url = item.content_url();
                    Some(AccountItem {
                        account,
                        item: ResponseItem::Content(ContentItem {
                            caption: item.caption.unwrap_or_default(),
                            url,
                        }),
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(items)
    }
}
