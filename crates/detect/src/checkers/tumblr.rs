// ABOUTME: Tumblr signature checker.
// ABOUTME: Positive when the root response carries an x-tumblr-user header.

use async_trait::async_trait;

use crate::checkers::{ProbeContext, SignatureChecker, SignatureMatch};
use crate::routes::{format_feed_url, Platform};

pub struct TumblrChecker;

#[async_trait]
impl SignatureChecker for TumblrChecker {
    fn name(&self) -> &'static str {
        "tumblr"
    }

    async fn probe(&self, cx: &ProbeContext<'_>) -> Option<SignatureMatch> {
        cx.response.header("x-tumblr-user")?;
        Some(SignatureMatch {
            platform: Platform::Tumblr,
            feed: format_feed_url(cx.url, Platform::Tumblr),
        })
    }
}
