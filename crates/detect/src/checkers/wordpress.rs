// ABOUTME: Wordpress signature checker.
// ABOUTME: Matches on wp.me Link headers or wp-content bodies, falling back to a feed generator probe.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::checkers::{ProbeContext, SignatureChecker, SignatureMatch};
use crate::routes::{format_feed_url, Platform};

static WP_ME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bwp\.me\b").unwrap());
static WP_CONTENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bwp-content\b").unwrap());
static WP_GENERATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bgenerator\s*=\s*"?wordpress\b"#).unwrap());

pub struct WordpressChecker;

#[async_trait]
impl SignatureChecker for WordpressChecker {
    fn name(&self) -> &'static str {
        "wordpress"
    }

    async fn probe(&self, cx: &ProbeContext<'_>) -> Option<SignatureMatch> {
        let feed = format_feed_url(cx.url, Platform::Wordpress)?;

        // Shortlink headers and theme assets identify wordpress without
        // another request.
        if cx
            .response
            .header("link")
            .is_some_and(|link| WP_ME_RE.is_match(link))
            || WP_CONTENT_RE.is_match(cx.body)
        {
            return Some(SignatureMatch {
                platform: Platform::Wordpress,
                feed: Some(feed),
            });
        }

        // Fallback: the default feed path declaring a wordpress generator.
        let resp = cx.probe_fetch(&feed).await?;
        if resp.status == 200 && WP_GENERATOR_RE.is_match(&resp.text()) {
            return Some(SignatureMatch {
                platform: Platform::Wordpress,
                feed: Some(resp.final_url),
            });
        }
        None
    }
}
