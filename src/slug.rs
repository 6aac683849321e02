//! URL-safe slug derivation for blog posts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STRIP: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHENS: Regex = Regex::new(r"-+").unwrap();
}

/// Lowercases, trims, strips everything outside `[\w\s-]`, turns whitespace
/// runs into single hyphens, collapses repeated hyphens, and trims
/// leading/trailing hyphens. Idempotent on already-clean input.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = STRIP.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Forces uniqueness after a collision by appending the current epoch
/// millis. Applied only in reaction to a unique-index violation; under very
/// high write concurrency two retries in the same millisecond could still
/// collide, which then surfaces as an error.
pub fn with_unique_suffix(slug: &str) -> String {
    format!("{}-{}", slug, chrono::Utc::now().timestamp_millis())
}
