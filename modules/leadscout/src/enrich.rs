//! Profile enrichment. The enrichment collaborator answers with one mixed
//! stream per request: a single profile item per resolvable account plus
//! that account's recent content, discriminated at the adapter boundary
//! into `ResponseItem`s. This module partitions the stream back into
//! per-account state and truncates content to the lookback window.
//!
//! Two request strategies exist (one call per candidate, or one batched
//! call for the whole pool); both land here and both key results by the
//! case-insensitive account identity.

use std::collections::HashMap;

use tracing::debug;

use leadscout_common::{ContentItem, Profile};

use crate::traits::{AccountItem, ResponseItem};

/// Per-account enrichment result. `profile: None` means the account was
/// not found or blocked; the candidate is skipped, not failed.
#[derive(Debug, Default)]
pub struct Enrichment {
    pub profile: Option<Profile>,
    pub recent: Vec<ContentItem>,
}

impl Enrichment {
    /// Recent content bounded to the lookback window, as analyzed by the
    /// relevance filter. Ordering beyond "as returned" is not guaranteed.
    pub fn analyzed(&self, lookback: u32) -> &[ContentItem] {
        let n = (lookback as usize).min(self.recent.len());
        &self.recent[..n]
    }
}

/// Partition a mixed response stream into per-account enrichments.
///
/// `fallback_account` attributes items that carry no account field; the
/// per-candidate strategy passes the one requested handle, the batched
/// strategy passes `None` (unattributable items are dropped).
pub fn partition_accounts(
    items: Vec<AccountItem>,
    fallback_account: Option<&str>,
) -> HashMap<String, Enrichment> {
    let fallback = fallback_account.map(str::to_lowercase);
    let mut by_account: HashMap<String, Enrichment> = HashMap::new();

    for AccountItem { account, item } in items {
        let Some(key) = account.or_else(|| fallback.clone()) else {
            debug!("Dropping enrichment item with no account attribution");
            continue;
        };
        let entry = by_account.entry(key).or_default();
        match item {
            ResponseItem::Profile(profile) => {
                // One profile per account is the contract; keep the first.
                if entry.profile.is_none() {
                    entry.profile = Some(profile);
                }
            }
            ResponseItem::Content(content) => entry.recent.push(content),
        }
    }

    by_account
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(followers: u64) -> ResponseItem {
        ResponseItem::Profile(Profile {
            follower_count: followers,
            following_count: None,
            is_verified: None,
            biography: None,
            external_url: None,
            display_name: None,
            category: None,
        })
    }

    fn content(caption: &str) -> ResponseItem {
        ResponseItem::Content(ContentItem {
            caption: caption.to_string(),
            url: None,
        })
    }

    fn item(account: Option<&str>, item: ResponseItem) -> AccountItem {
        AccountItem {
            account: account.map(str::to_string),
            item,
        }
    }

    #[test]
    fn test_partition_splits_profile_and_content() {
        let out = partition_accounts(
            vec![
                item(Some("alice"), profile(500)),
                item(Some("alice"), content("post one")),
                item(Some("alice"), content("post two")),
            ],
            None,
        );
        let e = &out["alice"];
        assert_eq!(e.profile.as_ref().unwrap().follower_count, 500);
        assert_eq!(e.recent.len(), 2);
    }

    #[test]
    fn test_unattributed_items_fall_back_to_requested_handle() {
        let out = partition_accounts(
            vec![item(None, profile(9)), item(None, content("x"))],
            Some("Bob"),
        );
        assert!(out.contains_key("bob"));
        assert!(out["bob"].profile.is_some());
    }

    #[test]
    fn test_unattributed_items_dropped_in_batched_mode() {
        let out = partition_accounts(vec![item(None, content("x"))], None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_profile_means_skippable_account() {
        let out = partition_accounts(vec![item(Some("ghost"), content("x"))], None);
        assert!(out["ghost"].profile.is_none());
    }

    #[test]
    fn test_analyzed_truncates_to_lookback() {
        let mut e = Enrichment::default();
        for i in 0..30 {
            e.recent.push(ContentItem {
                caption: format!("c{i}"),
                url: None,
            });
        }
        assert_eq!(e.analyzed(20).len(), 20);
        assert_eq!(e.analyzed(40).len(), 30);
    }
}
