// ABOUTME: Ghost signature checker.
// ABOUTME: A ghost generator meta tag, confirmed by the default rss/ feed declaring ghost too.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::checkers::{ProbeContext, SignatureChecker, SignatureMatch};
use crate::links::meta_tags;
use crate::routes::{format_feed_url, Platform};

static GENERATOR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)name\s*=\s*["']?generator"#).unwrap());
static GHOST_CONTENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)content\s*=\s*["']?\s*ghost"#).unwrap());
static GHOST_FEED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bgenerator\b[^>]*>\s*ghost\b").unwrap());

pub struct GhostChecker;

#[async_trait]
impl SignatureChecker for GhostChecker {
    fn name(&self) -> &'static str {
        "ghost"
    }

    async fn probe(&self, cx: &ProbeContext<'_>) -> Option<SignatureMatch> {
        let tagged = meta_tags(cx.body)
            .iter()
            .any(|tag| GENERATOR_NAME_RE.is_match(tag) && GHOST_CONTENT_RE.is_match(tag));
        if !tagged {
            return None;
        }

        // The page claims ghost; believe it only if the feed agrees.
        let feed = format_feed_url(cx.url, Platform::Ghost)?;
        let resp = cx.probe_fetch(&feed).await?;
        if resp.status == 200 && GHOST_FEED_RE.is_match(&resp.text()) {
            return Some(SignatureMatch {
                platform: Platform::Ghost,
                feed: Some(resp.final_url),
            });
        }
        None
    }
}
