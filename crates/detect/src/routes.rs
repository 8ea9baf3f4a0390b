// ABOUTME: Static platform knowledge: domain patterns, feed paths, comments transforms, hubs.
// ABOUTME: Pure string/URL transforms; the only process-wide shared state, all immutable.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// A known publishing platform, or `Other` when nothing matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Blogspot,
    Wordpress,
    Livejournal,
    Tumblr,
    Movabletype,
    Medium,
    Ghost,
    #[default]
    Other,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Blogspot => "blogspot",
            Platform::Wordpress => "wordpress",
            Platform::Livejournal => "livejournal",
            Platform::Tumblr => "tumblr",
            Platform::Movabletype => "movabletype",
            Platform::Medium => "medium",
            Platform::Ghost => "ghost",
            Platform::Other => "other",
        }
    }

    /// Relative feed path for the platform; carries a query suffix where the
    /// platform routes feeds through one.
    pub fn feed_path(&self) -> Option<&'static str> {
        match self {
            Platform::Blogspot => Some("feeds/posts/default"),
            Platform::Wordpress => Some("?feed=rss"),
            Platform::Livejournal => Some("data/rss"),
            Platform::Tumblr => Some("rss"),
            Platform::Movabletype => Some("atom.xml"),
            Platform::Ghost => Some("rss/"),
            Platform::Medium | Platform::Other => None,
        }
    }

    /// Derives a comments-feed candidate from a feed URL.
    ///
    /// The candidate may be relative (Movable Type); callers resolve it
    /// against the feed URL before probing.
    pub fn comments_candidate(&self, feed_url: &str) -> Option<String> {
        static WP_FEED_QUERY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"=rss\d?\b").unwrap());
        match self {
            Platform::Blogspot => Some(feed_url.replacen("/posts/", "/comments/", 1)),
            Platform::Wordpress => Some(
                WP_FEED_QUERY_RE
                    .replace(feed_url, "=comments-rss2")
                    .into_owned(),
            ),
            Platform::Movabletype => Some("comments.xml".to_string()),
            _ => None,
        }
    }

    /// Default pub/sub hub, for platforms that run one.
    pub fn default_hub(&self) -> Option<&'static str> {
        match self {
            Platform::Blogspot => Some("http://pubsubhubbub.appspot.com/"),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hostname patterns checked in priority order; first match wins.
static DOMAIN_ROUTES: Lazy<Vec<(Regex, Platform)>> = Lazy::new(|| {
    [
        (r"(?i)^[^.]+\.blogspot\.com$", Platform::Blogspot),
        (r"(?i)^[^.]+\.wordpress\.com$", Platform::Wordpress),
        (r"(?i)^[^.]+\.livejournal\.com$", Platform::Livejournal),
        (r"(?i)^[^.]+\.tumblr\.com$", Platform::Tumblr),
        (r"(?i)^[^.]+\.typepad\.com$", Platform::Movabletype),
    ]
    .iter()
    .map(|(pattern, platform)| (Regex::new(pattern).unwrap(), *platform))
    .collect()
});

/// Matches a hostname against the known platform domains.
///
/// A match here is conclusive: it short-circuits the signature race and the
/// feed derives from the route table alone.
pub fn classify_domain(hostname: &str) -> Option<Platform> {
    DOMAIN_ROUTES
        .iter()
        .find(|(re, _)| re.is_match(hostname))
        .map(|(_, platform)| *platform)
}

/// Builds the platform's default feed URL from a canonical blog URL.
///
/// Strips any query and fragment, appends the platform's path component to
/// the existing path, and installs the path's own query suffix when it
/// carries one. Pure string/URL work, no network.
pub fn format_feed_url(base: &Url, platform: Platform) -> Option<String> {
    let feed_path = platform.feed_path()?;
    let (path_part, query_part) = match feed_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (feed_path, None),
    };

    let mut out = base.clone();
    out.set_fragment(None);
    out.set_query(None);
    if !path_part.is_empty() {
        let joined = format!("{}{}", out.path(), path_part);
        out.set_path(&joined);
    }
    if let Some(query) = query_part {
        out.set_query(Some(query));
    }
    Some(out.to_string())
}
