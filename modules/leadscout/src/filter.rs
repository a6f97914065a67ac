//! Relevance filtering. Two independent gates, both terminal: the
//! follower threshold, then the fraction of analyzed recent content whose
//! caption references any target tag.

use leadscout_common::{ContentItem, Profile};

/// Outcome of evaluating one enriched candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted { hit_rate: f64 },
    LowFollowers { followers: u64 },
    LowHitRate { hit_rate: f64 },
}

/// Whether a caption references any target tag. The primary match is the
/// literal `#tag` substring of the lowercased caption. With
/// `bare_fallback` on, the bare tag text also matches, catching tags
/// written without the marker at the cost of false positives (a caption
/// containing the word "travel" matches tag "travel").
pub fn caption_matches(caption: &str, tags: &[String], bare_fallback: bool) -> bool {
    if caption.is_empty() {
        return false;
    }
    let lower = caption.to_lowercase();
    tags.iter().any(|tag| {
        lower.contains(&format!("#{tag}")) || (bare_fallback && lower.contains(tag.as_str()))
    })
}

/// Fraction of analyzed items whose caption matches any target tag.
/// Zero analyzed items yields 0, which fails any positive threshold.
pub fn hit_rate(analyzed: &[ContentItem], tags: &[String], bare_fallback: bool) -> f64 {
    if analyzed.is_empty() {
        return 0.0;
    }
    let hits = analyzed
        .iter()
        .filter(|item| caption_matches(&item.caption, tags, bare_fallback))
        .count();
    hits as f64 / analyzed.len() as f64
}

pub struct RelevanceFilter {
    tags: Vec<String>,
    min_followers: u64,
    min_hit_rate: f64,
    bare_fallback: bool,
}

impl RelevanceFilter {
    pub fn new(tags: Vec<String>, min_followers: u64, min_hit_rate: f64, bare_fallback: bool) -> Self {
        Self {
            tags,
            min_followers,
            min_hit_rate,
            bare_fallback,
        }
    }

    /// Follower gate first, evaluated independently of the hit rate.
    pub fn evaluate(&self, profile: &Profile, analyzed: &[ContentItem]) -> Verdict {
        if profile.follower_count < self.min_followers {
            return Verdict::LowFollowers {
                followers: profile.follower_count,
            };
        }
        let rate = hit_rate(analyzed, &self.tags, self.bare_fallback);
        if rate < self.min_hit_rate {
            return Verdict::LowHitRate { hit_rate: rate };
        }
        Verdict::Accepted { hit_rate: rate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn items(captions: &[&str]) -> Vec<ContentItem> {
        captions
            .iter()
            .map(|c| ContentItem {
                caption: c.to_string(),
                url: None,
            })
            .collect()
    }

    fn profile(followers: u64) -> Profile {
        Profile {
            follower_count: followers,
            following_count: None,
            is_verified: None,
            biography: None,
            external_url: None,
            display_name: None,
            category: None,
        }
    }

    #[test]
    fn test_marker_match_is_case_insensitive() {
        assert!(caption_matches("Loved this trip! #Travel", &tags(&["travel"]), false));
    }

    #[test]
    fn test_bare_fallback_toggle() {
        let t = tags(&["travel"]);
        assert!(!caption_matches("travel diaries", &t, false));
        assert!(caption_matches("travel diaries", &t, true));
    }

    #[test]
    fn test_empty_caption_never_matches() {
        assert!(!caption_matches("", &tags(&["travel"]), true));
    }

    #[test]
    fn test_hit_rate_4_of_20() {
        let mut captions = vec!["#travel day"; 4];
        captions.extend(vec!["sunset pics"; 16]);
        let rate = hit_rate(&items(&captions), &tags(&["travel"]), false);
        assert!((rate - 0.20).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_rate_zero_when_nothing_analyzed() {
        assert_eq!(hit_rate(&[], &tags(&["travel"]), true), 0.0);
    }

    #[test]
    fn test_follower_gate_evaluated_first() {
        let filter = RelevanceFilter::new(tags(&["travel"]), 5000, 0.25, false);
        // every caption matches, but followers fail
        let verdict = filter.evaluate(&profile(4000), &items(&["#travel"; 10]));
        assert_eq!(verdict, Verdict::LowFollowers { followers: 4000 });
    }

    #[test]
    fn test_accept_when_both_gates_pass() {
        let filter = RelevanceFilter::new(tags(&["travel"]), 5000, 0.25, false);
        let mut captions = vec!["#travel"; 3];
        captions.extend(vec!["other"; 7]);
        let verdict = filter.evaluate(&profile(10_000), &items(&captions));
        assert_eq!(verdict, Verdict::Accepted { hit_rate: 0.30 });
    }

    #[test]
    fn test_reject_low_hit_rate() {
        let filter = RelevanceFilter::new(tags(&["travel"]), 1000, 0.20, false);
        let mut captions = vec!["#travel"; 1];
        captions.extend(vec!["other"; 9]);
        let verdict = filter.evaluate(&profile(10_000), &items(&captions));
        assert_eq!(
            verdict,
            Verdict::LowHitRate {
                hit_rate: 0.1
            }
        );
    }

    #[test]
    fn test_no_content_fails_positive_threshold() {
        let filter = RelevanceFilter::new(tags(&["travel"]), 1000, 0.20, true);
        let verdict = filter.evaluate(&profile(10_000), &[]);
        assert_eq!(verdict, Verdict::LowHitRate { hit_rate: 0.0 });
    }
}
