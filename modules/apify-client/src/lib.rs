pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{
    HashtagPost, HashtagScraperInput, ProfileDatasetItem, ProfileScraperInput, ProxyConfig,
    RunData,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for apify/instagram-hashtag-scraper.
const INSTAGRAM_HASHTAG_SCRAPER: &str = "apify~instagram-hashtag-scraper";

/// Actor ID for apify/instagram-profile-scraper.
const INSTAGRAM_PROFILE_SCRAPER: &str = "apify~instagram-profile-scraper";

/// Dataset page size for the limit/offset fetch loop.
const DATASET_PAGE_LIMIT: usize = 1000;

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
        }
    }

    /// Start an actor run. Returns immediately with run metadata.
    pub async fn start_actor_run<I: Serialize>(&self, actor_id: &str, input: &I) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", BASE_URL, actor_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    pub async fn wait_for_run(&self, actor_id: &str, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!("{}/actor-runs/{}?waitForFinish=60", BASE_URL, run_id);
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(ApifyError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let api_resp: ApiResponse<RunData> = resp.json().await?;
            match api_resp.data.status.as_str() {
                "SUCCEEDED" => return Ok(api_resp.data),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ApifyError::RunFailed {
                        actor: actor_id.to_string(),
                        status: api_resp.data.status,
                    });
                }
                _ => {
                    tracing::debug!(run_id, status = %api_resp.data.status, "Run still in progress");
                    continue;
                }
            }
        }
    }

    /// Fetch every item from a dataset, paging with limit/offset until the
    /// dataset is exhausted.
    pub async fn dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let mut all = Vec::new();
        let mut offset = 0usize;
        loop {
            let url = format!(
                "{}/datasets/{}/items?format=json&limit={}&offset={}",
                BASE_URL, dataset_id, DATASET_PAGE_LIMIT, offset
            );
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(ApifyError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let page: Vec<T> = resp.json().await?;
            let count = page.len();
            all.extend(page);
            if count < DATASET_PAGE_LIMIT {
                return Ok(all);
            }
            offset += count;
        }
    }

    /// Append items to a dataset. The dataset is append-only; there is no
    /// update or delete.
    pub async fn push_items<T: Serialize>(&self, dataset_id: &str, items: &[T]) -> Result<()> {
        let url = format!("{}/datasets/{}/items", BASE_URL, dataset_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(items)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }

    /// Call an actor end-to-end: start run, poll, fetch the default dataset.
    pub async fn call_actor<I: Serialize, T: DeserializeOwned>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<Vec<T>> {
        let run = self.start_actor_run(actor_id, input).await?;
        tracing::info!(actor_id, run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(actor_id, &run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        self.dataset_items(&completed.default_dataset_id).await
    }

    /// Sample recent posts for a hashtag via apify/instagram-hashtag-scraper.
    pub async fn search_hashtag(&self, input: &HashtagScraperInput) -> Result<Vec<HashtagPost>> {
        tracing::info!(hashtags = ?input.hashtags, limit = input.results_limit, "Starting hashtag scrape");
        let posts: Vec<HashtagPost> = self.call_actor(INSTAGRAM_HASHTAG_SCRAPER, input).await?;
        tracing::info!(count = posts.len(), "Fetched hashtag posts");
        Ok(posts)
    }

    /// Resolve profiles plus recent posts via apify/instagram-profile-scraper.
    /// The returned stream mixes one profile item per resolvable account with
    /// that account's content items.
    pub async fn scrape_profiles(
        &self,
        input: &ProfileScraperInput,
    ) -> Result<Vec<ProfileDatasetItem>> {
        tracing::info!(usernames = ?input.usernames, limit = input.results_limit, "Starting profile scrape");
        let items: Vec<ProfileDatasetItem> =
            self.call_actor(INSTAGRAM_PROFILE_SCRAPER, input).await?;
        tracing::info!(count = items.len(), "Fetched profile dataset items");
        Ok(items)
    }
}
