// ABOUTME: Signature checker contract and the first-positive-wins race.
// ABOUTME: Each platform checker inspects the root response, optionally confirming with a capped secondary fetch.

mod blogspot;
mod ghost;
mod medium;
mod movabletype;
mod tumblr;
mod wordpress;

pub use blogspot::BlogspotChecker;
pub use ghost::GhostChecker;
pub use medium::MediumChecker;
pub use movabletype::MovabletypeChecker;
pub use tumblr::TumblrChecker;
pub use wordpress::WordpressChecker;

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use url::Url;

use crate::resource::{fetch, FetchOptions, FetchResult, MAX_PROBE_BYTES};
use crate::routes::Platform;

/// A positive identification from a checker.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureMatch {
    pub platform: Platform,
    /// Candidate feed URL, when the checker knows one. Still unvalidated.
    pub feed: Option<String>,
}

/// What a checker gets to look at: the canonical URL, the root response,
/// its decoded body, and a way to issue its own capped secondary probe.
pub struct ProbeContext<'a> {
    pub url: &'a Url,
    pub response: &'a FetchResult,
    pub body: &'a str,
    client: &'a reqwest::Client,
    timeout: Duration,
}

impl<'a> ProbeContext<'a> {
    pub fn new(
        client: &'a reqwest::Client,
        timeout: Duration,
        url: &'a Url,
        response: &'a FetchResult,
        body: &'a str,
    ) -> Self {
        Self {
            url,
            response,
            body,
            client,
            timeout,
        }
    }

    /// Secondary fetch for confirmation probes.
    ///
    /// Small cap, short timeout, and every transport failure mapped to
    /// `None`: a probe that cannot complete is a negative signal, never an
    /// error.
    pub async fn probe_fetch(&self, url: &str) -> Option<FetchResult> {
        fetch(
            self.client,
            url,
            &FetchOptions::get(MAX_PROBE_BYTES, self.timeout),
        )
        .await
        .ok()
    }
}

/// One platform's identification heuristic.
#[async_trait]
pub trait SignatureChecker: Send + Sync {
    /// Checker identifier for tracing.
    fn name(&self) -> &'static str;

    /// Probes the page; `Some` claims the platform, `None` is a pass.
    async fn probe(&self, cx: &ProbeContext<'_>) -> Option<SignatureMatch>;
}

/// Builds the checker set for a hostname.
/// Medium joins the race only for medium.com hosts.
fn build_checkers(hostname: &str) -> Vec<Box<dyn SignatureChecker>> {
    let mut checkers: Vec<Box<dyn SignatureChecker>> = vec![
        Box::new(TumblrChecker),
        Box::new(BlogspotChecker),
        Box::new(WordpressChecker),
        Box::new(MovabletypeChecker),
        Box::new(GhostChecker),
    ];
    if hostname.contains("medium.com") {
        checkers.insert(0, Box::new(MediumChecker));
    }
    checkers
}

/// Races every applicable checker and adopts the first positive outcome.
///
/// Completion order decides the winner, not registration order. Once a
/// checker reports a match the stream is dropped: losing probes are
/// abandoned mid-flight and their results discarded. All-negative -> `None`.
pub async fn run_signature_race(cx: &ProbeContext<'_>) -> Option<SignatureMatch> {
    let hostname = cx.url.host_str().unwrap_or("");
    let checkers = build_checkers(hostname);

    let mut pending: FuturesUnordered<_> = checkers
        .iter()
        .map(|checker| async move { (checker.name(), checker.probe(cx).await) })
        .collect();

    while let Some((name, outcome)) = pending.next().await {
        if let Some(matched) = outcome {
            tracing::debug!(checker = name, platform = %matched.platform, "signature race won");
            return Some(matched);
        }
    }
    None
}
