// ABOUTME: Medium signature checker, only raced for medium.com hostnames.
// ABOUTME: Synthesizes the profile feed from an article:author meta handle.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::checkers::{ProbeContext, SignatureChecker, SignatureMatch};
use crate::links::meta_tags;
use crate::routes::Platform;

static MEDIUM_HOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([^.]+\.)?medium\.com$").unwrap());
static AUTHOR_PROP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)property\s*=\s*["']?article:author"#).unwrap());
static MEDIUM_HANDLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"medium\.com/(@[^'"]+)"#).unwrap());

pub struct MediumChecker;

#[async_trait]
impl SignatureChecker for MediumChecker {
    fn name(&self) -> &'static str {
        "medium"
    }

    async fn probe(&self, cx: &ProbeContext<'_>) -> Option<SignatureMatch> {
        let hostname = cx.url.host_str()?;
        if !MEDIUM_HOST_RE.is_match(hostname) {
            return None;
        }

        for tag in meta_tags(cx.body) {
            if !AUTHOR_PROP_RE.is_match(&tag) {
                continue;
            }
            if let Some(cap) = MEDIUM_HANDLE_RE.captures(&tag) {
                return Some(SignatureMatch {
                    platform: Platform::Medium,
                    feed: Some(format!("https://medium.com/feed/{}", &cap[1])),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::tests::response_with;
    use std::time::Duration;
    use url::Url;

    fn probe_on(host_url: &str, body: &'static str) -> (reqwest::Client, Url, &'static str) {
        (reqwest::Client::new(), Url::parse(host_url).unwrap(), body)
    }

    #[tokio::test]
    async fn author_meta_yields_profile_feed() {
        let (client, url, body) = probe_on(
            "https://medium.com/some-story",
            r#"<meta property="article:author" content="https://medium.com/@writer"/>"#,
        );
        let response = response_with(&[]);
        let cx = ProbeContext::new(&client, Duration::from_secs(1), &url, &response, body);

        let matched = MediumChecker.probe(&cx).await.unwrap();
        assert_eq!(matched.platform, Platform::Medium);
        assert_eq!(
            matched.feed.as_deref(),
            Some("https://medium.com/feed/@writer")
        );
    }

    #[tokio::test]
    async fn no_author_meta_passes() {
        let (client, url, body) = probe_on(
            "https://medium.com/some-story",
            "<meta property=\"og:title\" content=\"A story\"/>",
        );
        let response = response_with(&[]);
        let cx = ProbeContext::new(&client, Duration::from_secs(1), &url, &response, body);

        assert_eq!(MediumChecker.probe(&cx).await, None);
    }

    #[tokio::test]
    async fn lookalike_hostnames_pass() {
        let (client, url, body) = probe_on(
            "https://notmedium.com/",
            r#"<meta property="article:author" content="https://medium.com/@writer"/>"#,
        );
        let response = response_with(&[]);
        let cx = ProbeContext::new(&client, Duration::from_secs(1), &url, &response, body);

        assert_eq!(MediumChecker.probe(&cx).await, None);
    }
}
