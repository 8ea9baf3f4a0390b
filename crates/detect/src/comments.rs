// ABOUTME: Comments-feed discovery: platform transforms, Disqus shortnames, credential redaction.
// ABOUTME: Candidates are HEAD-verified and rejected when they collapse into the feed URL itself.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::resource::{fetch, FetchOptions};
use crate::routes::Platform;

/// Placeholder substituted for the Disqus API key in returned URLs.
pub const DISQUS_KEY_PLACEHOLDER: &str = "DISQUS_API_KEY";

static DISQUS_VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bdisqus_shortname\s*=\s*['"](\w+)['"]"#).unwrap());
static DISQUS_META_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+name\s*=\s*["']text:Disqus Shortname["']\s+content\s*=\s*["'](\w+)["']"#)
        .unwrap()
});
static DISQUS_SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http://disqus\.com/forums/(\w+)/get_num_replies\.js").unwrap());

/// Finds a Disqus shortname in page markup.
///
/// Three legacy embed styles, tried in order: the inline configuration
/// variable, a themed meta tag, and the old reply-count script URL.
pub fn disqus_shortname(html: &str) -> Option<String> {
    for re in [&*DISQUS_VAR_RE, &*DISQUS_META_RE, &*DISQUS_SCRIPT_RE] {
        if let Some(cap) = re.captures(html) {
            return Some(cap[1].to_string());
        }
    }
    None
}

/// Builds the credentialed Disqus posts-list feed URL for a shortname.
pub fn disqus_api_url(shortname: &str, api_key: &str) -> String {
    format!("https://disqus.com/api/3.0/posts/list.rss?forum={shortname}&api_key={api_key}")
}

/// Replaces an embedded credential with a fixed placeholder.
pub fn redact_credential(url: &str, api_key: &str) -> String {
    url.replace(api_key, DISQUS_KEY_PLACEHOLDER)
}

/// Derives and verifies a comments-feed URL.
///
/// The platform transform produces a candidate from the (still unvalidated)
/// feed URL; a Disqus shortname plus caller credential overrides it. The
/// candidate must survive a HEAD probe with a 200 and land on a URL other
/// than the feed itself. Credentials never appear in the returned value.
pub async fn resolve_comments(
    client: &reqwest::Client,
    platform: Platform,
    feed: Option<&str>,
    body: &str,
    disqus_api_key: Option<&str>,
    timeout: Duration,
) -> Option<String> {
    let mut candidate = feed.and_then(|f| platform.comments_candidate(f));

    if let Some(key) = disqus_api_key {
        if let Some(shortname) = disqus_shortname(body) {
            candidate = Some(disqus_api_url(&shortname, key));
        }
    }

    let candidate = candidate?;
    // Transforms may hand back a relative path; anchor it to the feed.
    let candidate = match Url::parse(&candidate) {
        Ok(url) => url.to_string(),
        Err(_) => Url::parse(feed?).ok()?.join(&candidate).ok()?.to_string(),
    };

    let resp = fetch(client, &candidate, &FetchOptions::head(timeout))
        .await
        .ok()?;
    if resp.status != 200 {
        return None;
    }
    // A comments candidate that redirects back onto the feed is no comments
    // feed at all.
    if feed == Some(resp.final_url.as_str()) {
        return None;
    }

    let mut comments = resp.final_url;
    if let Some(key) = disqus_api_key {
        comments = redact_credential(&comments, key);
    }
    Some(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;
    use pretty_assertions::assert_eq;

    #[test]
    fn shortname_from_inline_variable() {
        let html = r#"<script>var disqus_shortname = 'myblog';</script>"#;
        assert_eq!(disqus_shortname(html).as_deref(), Some("myblog"));
    }

    #[test]
    fn shortname_from_meta_tag() {
        let html = r#"<meta name="text:Disqus Shortname" content="tumblrblog">"#;
        assert_eq!(disqus_shortname(html).as_deref(), Some("tumblrblog"));
    }

    #[test]
    fn shortname_from_legacy_script() {
        let html = r#"<script src="http://disqus.com/forums/oldblog/get_num_replies.js"></script>"#;
        assert_eq!(disqus_shortname(html).as_deref(), Some("oldblog"));
    }

    #[test]
    fn no_shortname_found() {
        assert_eq!(disqus_shortname("<html><body>nothing</body></html>"), None);
    }

    #[test]
    fn api_url_and_redaction_round() {
        let url = disqus_api_url("myblog", "sekrit123");
        assert!(url.contains("forum=myblog"));
        assert!(url.contains("api_key=sekrit123"));

        let redacted = redact_credential(&url, "sekrit123");
        assert!(!redacted.contains("sekrit123"));
        assert!(redacted.contains(DISQUS_KEY_PLACEHOLDER));
    }

    #[tokio::test]
    async fn verified_candidate_is_returned() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(HEAD).path("/").query_param("feed", "comments-rss2");
            then.status(200);
        });

        let client = reqwest::Client::new();
        let feed = server.url("/?feed=rss");
        let comments = resolve_comments(
            &client,
            Platform::Wordpress,
            Some(&feed),
            "",
            None,
            Duration::from_secs(1),
        )
        .await
        .unwrap();
        mock.assert();
        assert!(comments.contains("feed=comments-rss2"));
    }

    #[tokio::test]
    async fn failed_probe_yields_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD).path("/").query_param("feed", "comments-rss2");
            then.status(404);
        });

        let client = reqwest::Client::new();
        let feed = server.url("/?feed=rss");
        assert_eq!(
            resolve_comments(
                &client,
                Platform::Wordpress,
                Some(&feed),
                "",
                None,
                Duration::from_secs(1),
            )
            .await,
            None
        );
    }

    #[tokio::test]
    async fn relative_candidate_resolves_against_feed() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(HEAD).path("/blog/comments.xml");
            then.status(200);
        });

        let client = reqwest::Client::new();
        let feed = server.url("/blog/atom.xml");
        let comments = resolve_comments(
            &client,
            Platform::Movabletype,
            Some(&feed),
            "",
            None,
            Duration::from_secs(1),
        )
        .await
        .unwrap();
        mock.assert();
        assert!(comments.ends_with("/blog/comments.xml"));
    }

    #[tokio::test]
    async fn candidate_matching_feed_is_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD);
            then.status(200);
        });

        let client = reqwest::Client::new();
        // Blogspot transform is a no-op when the feed has no /posts/ segment,
        // so the candidate equals the feed URL and must be refused.
        let feed = server.url("/feeds/default");
        assert_eq!(
            resolve_comments(
                &client,
                Platform::Blogspot,
                Some(&feed),
                "",
                None,
                Duration::from_secs(1),
            )
            .await,
            None
        );
    }

    #[tokio::test]
    async fn platforms_without_transform_yield_none() {
        let client = reqwest::Client::new();
        assert_eq!(
            resolve_comments(
                &client,
                Platform::Ghost,
                Some("https://blog.example.com/rss/"),
                "",
                None,
                Duration::from_secs(1),
            )
            .await,
            None
        );
    }

    #[tokio::test]
    async fn credential_never_appears_in_result() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD);
            then.status(200);
        });

        // Contrived feed whose transform candidate embeds the key, to pin
        // down redaction through the full resolve path.
        let client = reqwest::Client::new();
        let feed = server.url("/?feed=rss&api_key=sekrit123");
        let comments = resolve_comments(
            &client,
            Platform::Wordpress,
            Some(&feed),
            "",
            Some("sekrit123"),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
        assert!(!comments.contains("sekrit123"));
        assert!(comments.contains(DISQUS_KEY_PLACEHOLDER));
    }
}
