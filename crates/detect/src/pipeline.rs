// ABOUTME: The detection orchestrator: root fetch, permalink recursion, classification, resolution, validation.
// ABOUTME: One bounded-depth recursive pass per invocation; probe failures degrade, root failures abort.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;
use url::Url;

use feedscout_feed::{strip_html, FeedSummary};

use crate::checkers::{run_signature_race, ProbeContext};
use crate::comments::resolve_comments;
use crate::error::DetectError;
use crate::lang::{LanguageDetector, WhatlangDetector};
use crate::links::parse_link_header;
use crate::options::{DetectorBuilder, Options};
use crate::resolve::{feed_url_from_html, resolve_icon};
use crate::resource::{fetch, FetchOptions, MAX_FEED_BYTES, MAX_HTML_BYTES};
use crate::result::DetectionResult;
use crate::routes::{classify_domain, format_feed_url, Platform};

/// Permalink recursion stops at this depth and falls back to HTML detection.
const MAX_PERMALINK_DEPTH: u8 = 3;

/// Items sampled for language identification.
const LANGUAGE_SAMPLE_ITEMS: usize = 3;

/// The feed detector.
///
/// Holds the HTTP client and collaborators; `detect` runs the full pipeline
/// and every invocation is independent.
pub struct Detector {
    opts: Options,
    client: reqwest::Client,
    language: Arc<dyn LanguageDetector>,
}

impl Detector {
    /// Create a new DetectorBuilder for configuring the detector.
    pub fn builder() -> DetectorBuilder {
        DetectorBuilder::new()
    }

    /// Create a new Detector with the given options.
    pub fn new(opts: Options) -> Self {
        let client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });
        let language = opts
            .language
            .clone()
            .unwrap_or_else(|| Arc::new(WhatlangDetector));

        Self {
            opts,
            client,
            language,
        }
    }

    /// Detects the platform, feed, icon, and comments feed for a blog URL.
    ///
    /// Errors only when the root page is unreachable or answers non-200, or
    /// when the feed-validation fetch fails at the transport level. Every
    /// other probe failure degrades into an absent field.
    pub async fn detect(&self, blog_url: &str) -> Result<DetectionResult, DetectError> {
        self.detect_at(blog_url, 0).await
    }

    /// One full pipeline pass at the given recursion depth.
    fn detect_at<'a>(
        &'a self,
        blog_url: &'a str,
        depth: u8,
    ) -> BoxFuture<'a, Result<DetectionResult, DetectError>> {
        Box::pin(async move {
            let root = fetch(
                &self.client,
                blog_url,
                &FetchOptions::get(MAX_HTML_BYTES, self.opts.timeout),
            )
            .await?;
            if root.status != 200 {
                return Err(DetectError::status(blog_url, "Detect", root.status));
            }

            // A root that is itself a feed restarts the whole pipeline on its
            // declared site URL, up to the depth bound. Parse failures mean
            // "not a feed" and fall through to HTML detection.
            if depth < MAX_PERMALINK_DEPTH {
                if let Ok(summary) = FeedSummary::parse(&root.body) {
                    if let Some(permalink) = summary.permalink() {
                        debug!(permalink, depth, "root is a feed, following its permalink");
                        let permalink = permalink.to_string();
                        return self.detect_at(&permalink, depth + 1).await;
                    }
                }
            }

            let canonical = Url::parse(&root.final_url).map_err(|e| {
                DetectError::invalid_url(
                    &root.final_url,
                    "Detect",
                    Some(anyhow::anyhow!("unparseable final URL: {}", e)),
                )
            })?;
            let body = root.text();
            let header_links = parse_link_header(root.header("link").unwrap_or_default());

            // Conclusive hostnames skip the signature race entirely.
            let hostname = canonical.host_str().unwrap_or("");
            let (platform, mut feed) = match classify_domain(hostname) {
                Some(platform) => {
                    debug!(%platform, hostname, "domain classified");
                    (platform, format_feed_url(&canonical, platform))
                }
                None => {
                    let cx = ProbeContext::new(
                        &self.client,
                        self.opts.timeout,
                        &canonical,
                        &root,
                        &body,
                    );
                    match run_signature_race(&cx).await {
                        Some(matched) => (matched.platform, matched.feed),
                        None => (Platform::Other, None),
                    }
                }
            };

            let icon = resolve_icon(
                &self.client,
                &canonical,
                header_links.get("icon").map(String::as_str),
                &body,
                self.opts.timeout,
            )
            .await;

            if feed.is_none() {
                feed = feed_url_from_html(&canonical, &body);
            }

            let mut result = DetectionResult {
                url: canonical.to_string(),
                platform,
                feed,
                icon,
                ..Default::default()
            };

            // Comments run against the still-unvalidated candidate feed.
            result.comments = resolve_comments(
                &self.client,
                platform,
                result.feed.as_deref(),
                &body,
                self.opts
                    .disqus_api_key
                    .as_deref()
                    .filter(|key| !key.is_empty()),
                self.opts.timeout,
            )
            .await;

            let Some(feed_url) = result.feed.clone() else {
                return Ok(result);
            };

            // Validation: transport failure aborts, anything else degrades.
            let resp = fetch(
                &self.client,
                &feed_url,
                &FetchOptions::get(MAX_FEED_BYTES, self.opts.timeout),
            )
            .await?;
            if resp.status != 200 {
                debug!(feed = %feed_url, status = resp.status, "feed validation failed");
                result.feed = None;
                return Ok(result);
            }
            result.feed = Some(resp.final_url.clone());

            // Feed bytes go to the parser raw; feeds declare their own
            // encoding in the XML prolog.
            let summary = match FeedSummary::parse(&resp.body) {
                Ok(summary) => summary,
                Err(_) => {
                    result.feed = None;
                    return Ok(result);
                }
            };

            if let Some(permalink) = summary.permalink() {
                result.url = permalink.to_string();
            }
            result.hub = summary
                .hub()
                .map(str::to_string)
                .or_else(|| platform.default_hub().map(str::to_string));
            result.title = summary.title().unwrap_or_default().to_string();
            result.description = summary.description().unwrap_or_default().to_string();

            let sample = language_sample(&summary);
            if !sample.is_empty() {
                result.language = self.language.detect(&sample).await;
            }

            Ok(result)
        })
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Concatenated plain text of the first few items, for language guessing.
fn language_sample(summary: &FeedSummary) -> String {
    let mut sample = String::new();
    for item in summary.items(0, LANGUAGE_SAMPLE_ITEMS) {
        let text = strip_html(&format!("{} {}", item.title, item.content));
        if !text.is_empty() {
            sample.push_str(&text);
            sample.push(' ');
        }
    }
    sample.trim_end().to_string()
}

/// Detects with default options. See [`Detector`] for configuration.
pub async fn detect_feed_url(blog_url: &str) -> Result<DetectionResult, DetectError> {
    Detector::builder().build().detect(blog_url).await
}
