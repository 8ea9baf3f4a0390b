// ABOUTME: Movable Type signature checker.
// ABOUTME: Probes the default atom.xml path and inspects its generator element.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::checkers::{ProbeContext, SignatureChecker, SignatureMatch};
use crate::routes::{format_feed_url, Platform};

static GENERATOR_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<generator[^>]*>([^<]*)</generator[^>]*>").unwrap());
static MT_GENERATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)typepad|movable type").unwrap());

pub struct MovabletypeChecker;

#[async_trait]
impl SignatureChecker for MovabletypeChecker {
    fn name(&self) -> &'static str {
        "movabletype"
    }

    async fn probe(&self, cx: &ProbeContext<'_>) -> Option<SignatureMatch> {
        let feed = format_feed_url(cx.url, Platform::Movabletype)?;
        let resp = cx.probe_fetch(&feed).await?;
        if resp.status != 200 {
            return None;
        }

        let body = resp.text();
        let generator = GENERATOR_TAG_RE.captures(&body)?;
        if !MT_GENERATOR_RE.is_match(&generator[1]) {
            return None;
        }
        Some(SignatureMatch {
            platform: Platform::Movabletype,
            feed: Some(resp.final_url),
        })
    }
}
