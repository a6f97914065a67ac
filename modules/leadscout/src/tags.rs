//! Tag canonicalization. Raw input tags arrive with mixed case, stray
//! whitespace, and optional leading `#`; everything downstream (discovery
//! scoping, caption matching) works on the canonical lowercase form.

use leadscout_common::LeadScoutError;

/// Canonicalize a single raw tag: trim, strip one leading `#`, lowercase.
fn normalize_tag(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).to_lowercase()
}

/// Canonicalize the configured tag list, dropping blank entries.
/// Duplicates are left alone; they are harmless downstream.
///
/// An empty result is a fatal configuration error and is raised before
/// any collaborator call is made.
pub fn normalize_tags(raw: &[String]) -> Result<Vec<String>, LeadScoutError> {
    let tags: Vec<String> = raw
        .iter()
        .map(|t| normalize_tag(t))
        .filter(|t| !t.is_empty())
        .collect();

    if tags.is_empty() {
        return Err(LeadScoutError::Config(
            "at least one hashtag is required".to_string(),
        ));
    }
    Ok(tags)
}
