// ABOUTME: The externally observable result of a detection run.
// ABOUTME: One fresh value per invocation; optional fields stay absent when probes degrade.

use serde::{Deserialize, Serialize};

use crate::resolve::Icon;
use crate::routes::Platform;

/// Outcome of probing a blog URL.
///
/// `feed`, when present, returned HTTP 200 during this invocation and holds
/// the final redirect target of that fetch, never an unverified guess.
/// `url` is the normalized form of where the root fetch actually landed,
/// later overwritten by the validated feed's declared permalink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Canonical blog URL after redirects.
    pub url: String,
    /// Detected platform; `Other` when no heuristic matched.
    #[serde(rename = "type")]
    pub platform: Platform,
    /// Validated feed URL.
    pub feed: Option<String>,
    /// Resolved favicon/icon.
    pub icon: Option<Icon>,
    /// Pub/sub hub, feed-declared or the platform default.
    pub hub: Option<String>,
    /// Feed title, empty when unavailable.
    pub title: String,
    /// Feed description, empty when unavailable.
    pub description: String,
    /// Guessed content language code.
    pub language: Option<String>,
    /// Verified comments-feed URL, credentials redacted.
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_serializes_under_type_key() {
        let result = DetectionResult {
            url: "https://blog.example.com/".to_string(),
            platform: Platform::Blogspot,
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "blogspot");
        assert_eq!(json["title"], "");
        assert!(json["feed"].is_null());
    }

    #[test]
    fn default_platform_is_other() {
        assert_eq!(DetectionResult::default().platform, Platform::Other);
    }
}
