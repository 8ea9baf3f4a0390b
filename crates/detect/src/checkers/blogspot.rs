// ABOUTME: Blogspot signature checker.
// ABOUTME: Positive when the Server response header carries the GSE token.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::checkers::{ProbeContext, SignatureChecker, SignatureMatch};
use crate::routes::{format_feed_url, Platform};

static GSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bGSE\b").unwrap());

pub struct BlogspotChecker;

#[async_trait]
impl SignatureChecker for BlogspotChecker {
    fn name(&self) -> &'static str {
        "blogspot"
    }

    async fn probe(&self, cx: &ProbeContext<'_>) -> Option<SignatureMatch> {
        let server = cx.response.header("server")?;
        if !GSE_RE.is_match(server) {
            return None;
        }
        Some(SignatureMatch {
            platform: Platform::Blogspot,
            feed: format_feed_url(cx.url, Platform::Blogspot),
        })
    }
}
