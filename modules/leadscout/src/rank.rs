//! Candidate ranking. Tag breadth is weighted twice as heavily as raw
//! sample volume, so accounts that show up across multiple target tags
//! outrank accounts that merely flood one tag's sample.

use std::collections::HashMap;

use leadscout_common::AuthorCandidate;

/// The ranked pool keeps this multiple of the acceptance cap, bounding
/// enrichment cost while leaving the filter room to reject.
pub const POOL_MULTIPLIER: usize = 3;

pub fn score(candidate: &AuthorCandidate) -> usize {
    candidate.sample_post_ids.len() + candidate.hashtags_matched.len() * 2
}

/// Sort discovered authors by score descending and truncate to the
/// candidate pool bound. Ties are unordered. Pure; no side effects.
pub fn rank_candidates(
    authors: HashMap<String, AuthorCandidate>,
    max_accepted: u32,
) -> Vec<AuthorCandidate> {
    let mut candidates: Vec<AuthorCandidate> = authors.into_values().collect();
    candidates.sort_unstable_by(|a, b| score(b).cmp(&score(a)));
    candidates.truncate(max_accepted as usize * POOL_MULTIPLIER);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(handle: &str, post_ids: usize, tags: usize) -> AuthorCandidate {
        let mut c = AuthorCandidate::new(handle);
        for i in 0..post_ids {
            c.sample_post_ids.insert(format!("{handle}-{i}"));
        }
        for i in 0..tags {
            c.hashtags_matched.insert(format!("tag{i}"));
        }
        c
    }

    fn pool(candidates: Vec<AuthorCandidate>) -> HashMap<String, AuthorCandidate> {
        candidates.into_iter().map(|c| (c.key(), c)).collect()
    }

    #[test]
    fn test_score_weights_tag_breadth_double() {
        assert_eq!(score(&candidate("a", 3, 2)), 7);
        assert_eq!(score(&candidate("b", 0, 1)), 2);
    }

    #[test]
    fn test_highest_score_first() {
        // scores: a=5, b=5, c=8, d=2
        let ranked = rank_candidates(
            pool(vec![
                candidate("a", 5, 0),
                candidate("b", 3, 1),
                candidate("c", 4, 2),
                candidate("d", 2, 0),
            ]),
            100,
        );
        assert_eq!(ranked[0].handle, "c");
        assert_eq!(score(&ranked[0]), 8);
        assert_eq!(ranked[3].handle, "d");
    }

    #[test]
    fn test_pool_truncated_to_multiple_of_cap() {
        let many = (0..50).map(|i| candidate(&format!("u{i}"), i, 0)).collect();
        let ranked = rank_candidates(pool(many), 10);
        assert_eq!(ranked.len(), 30);
        // the survivors are the highest-scoring ones
        assert!(ranked.iter().all(|c| c.sample_post_ids.len() >= 20));
    }
}
