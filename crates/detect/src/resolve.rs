// ABOUTME: Feed and icon resolution from extracted page links.
// ABOUTME: Shortest alternate feed link wins; icon candidates are probed one at a time.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::links::parse_link_elements;
use crate::resource::{fetch, FetchOptions};

/// Feed MIME types eligible for autodiscovery.
const FEED_LINK_TYPES: &[&str] = &["application/rss+xml", "application/atom+xml"];

/// Icon content types accepted by the icon probe.
const ICON_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/x-icon"];

static REL_ICON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bicon\b").unwrap());
static ICON_CT_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bicon?$").unwrap());

/// A resolved icon and its content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub url: String,
    pub content_type: String,
}

/// Picks the most likely canonical feed URL from `<link rel="alternate">` tags.
///
/// The shortest resolved URL wins, ties keep document order: shorter URLs
/// tend to be the platform feed rather than a per-tag or per-category
/// permutation of it.
pub fn feed_url_from_html(base: &Url, body: &str) -> Option<String> {
    let mut candidates: Vec<String> = parse_link_elements(body)
        .iter()
        .filter(|link| {
            link.get("rel")
                .is_some_and(|rel| rel.eq_ignore_ascii_case("alternate"))
        })
        .filter(|link| {
            link.get("type")
                .is_some_and(|t| FEED_LINK_TYPES.contains(&t.to_lowercase().as_str()))
        })
        .filter_map(|link| link.get("href"))
        .filter_map(|href| base.join(href).ok())
        .map(|u| u.to_string())
        .collect();

    // Stable sort: equal lengths keep their document order.
    candidates.sort_by_key(String::len);
    candidates.into_iter().next()
}

/// Resolves the page icon by probing candidates one at a time.
///
/// Candidate order: the header-declared icon, each `rel~=icon` link, then a
/// same-origin /favicon.ico fallback. Probes are deliberately sequential so
/// an early hit spends no extra requests. The first 200 response with an
/// allowed image content type wins; exhausting the list yields `None`.
pub async fn resolve_icon(
    client: &reqwest::Client,
    base: &Url,
    header_icon: Option<&str>,
    body: &str,
    timeout: Duration,
) -> Option<Icon> {
    let mut candidates = Vec::new();

    if let Some(href) = header_icon {
        if let Ok(u) = base.join(href) {
            candidates.push(u.to_string());
        }
    }
    for link in parse_link_elements(body) {
        let rel_is_icon = link.get("rel").is_some_and(|rel| REL_ICON_RE.is_match(rel));
        if let (true, Some(href)) = (rel_is_icon, link.get("href")) {
            if let Ok(u) = base.join(href) {
                candidates.push(u.to_string());
            }
        }
    }
    if let Ok(u) = base.join("/favicon.ico") {
        candidates.push(u.to_string());
    }

    for candidate in candidates {
        let Ok(resp) = fetch(client, &candidate, &FetchOptions::head(timeout)).await else {
            continue;
        };
        if resp.status != 200 {
            continue;
        }
        let Some(mut content_type) = resp.content_type() else {
            continue;
        };
        if ICON_CT_SUFFIX_RE.is_match(&content_type) {
            content_type = "image/x-icon".to_string();
        }
        if ICON_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Some(Icon {
                url: resp.final_url,
                content_type,
            });
        }
    }
    None
}
