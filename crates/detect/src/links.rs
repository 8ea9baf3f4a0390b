// ABOUTME: Lightweight tag and header scanners used by the detection heuristics.
// ABOUTME: Regex-extracts link/meta tags and Link response headers; no DOM parser involved.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<link[^>]+>").unwrap());
static META_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<meta\b[^>]*>").unwrap());
static TAG_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([\w-]+)\s*=\s*['"]([^'"]+)['"]"#).unwrap());
static LINK_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<([^>]+)>\s*(?:;\s*rel=['"]([^'"]+)['"])?"#).unwrap());

/// Folds newlines to a NUL sentinel so the tag regexes see one-line tags.
/// Real pages break attributes across lines inside a single tag.
fn fold_newlines(s: &str) -> String {
    s.replace("\r\n", "\u{0}").replace('\n', "\u{0}")
}

fn restore_newlines(s: &str) -> String {
    s.replace('\u{0}', "\n")
}

/// Extracts attribute maps for every `<link>` element, in document order.
///
/// Keys are lower-cased attribute names, values whitespace-trimmed.
/// Malformed markup yields fewer matches, never an error.
pub fn parse_link_elements(body: &str) -> Vec<HashMap<String, String>> {
    let folded = fold_newlines(body);
    LINK_TAG_RE
        .find_iter(&folded)
        .map(|tag| {
            TAG_ATTR_RE
                .captures_iter(tag.as_str())
                .map(|cap| {
                    (
                        restore_newlines(&cap[1]).trim().to_lowercase(),
                        restore_newlines(&cap[2]).trim().to_string(),
                    )
                })
                .collect()
        })
        .collect()
}

/// Returns every `<meta>` tag as a single-line string, in document order.
///
/// Checker heuristics run their own patterns over the raw tags so that
/// unquoted attribute values stay matchable.
pub fn meta_tags(body: &str) -> Vec<String> {
    let folded = fold_newlines(body);
    META_TAG_RE
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parses an HTTP `Link` response header into rel -> URL pairs.
/// Entries without a rel parameter land under the empty key.
pub fn parse_link_header(value: &str) -> HashMap<String, String> {
    LINK_HEADER_RE
        .captures_iter(value)
        .map(|cap| {
            (
                cap.get(2)
                    .map(|m| m.as_str().to_lowercase())
                    .unwrap_or_default(),
                cap[1].to_string(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_links_in_document_order() {
        let html = r#"<html><head>
            <link rel="alternate" type="application/rss+xml" href="/feed">
            <link rel="icon" href="/favicon.png">
        </head></html>"#;

        let links = parse_link_elements(html);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].get("rel").map(String::as_str), Some("alternate"));
        assert_eq!(links[0].get("href").map(String::as_str), Some("/feed"));
        assert_eq!(links[1].get("rel").map(String::as_str), Some("icon"));
    }

    #[test]
    fn keys_lowercased_values_trimmed() {
        let html = r#"<link REL="Alternate" HREF=" /feed ">"#;
        let links = parse_link_elements(html);
        assert_eq!(links[0].get("rel").map(String::as_str), Some("Alternate"));
        assert_eq!(links[0].get("href").map(String::as_str), Some("/feed"));
    }

    #[test]
    fn tolerates_newlines_inside_a_tag() {
        let html = "<link rel=\"alternate\"\n      type=\"application/atom+xml\"\r\n      href=\"/atom\">";
        let links = parse_link_elements(html);
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].get("type").map(String::as_str),
            Some("application/atom+xml")
        );
    }

    #[test]
    fn malformed_markup_yields_nothing() {
        assert!(parse_link_elements("<link").is_empty());
        assert!(parse_link_elements("no tags here").is_empty());
        // RSS-style value-only link elements carry no attributes.
        let links = parse_link_elements("<link>https://example.com</link>");
        assert!(links.is_empty() || links.iter().all(|l| l.is_empty()));
    }

    #[test]
    fn meta_tags_are_single_lines() {
        let html = "<meta name=\"generator\"\n content=\"Ghost 5.0\"><meta charset=utf-8>";
        let tags = meta_tags(html);
        assert_eq!(tags.len(), 2);
        assert!(!tags[0].contains('\n'));
        assert!(tags[0].contains("generator"));
    }

    #[test]
    fn link_header_rel_pairs() {
        let header = r#"<https://example.com/icon.png>; rel="icon", <https://example.com/hub>; rel="hub""#;
        let rels = parse_link_header(header);
        assert_eq!(
            rels.get("icon").map(String::as_str),
            Some("https://example.com/icon.png")
        );
        assert_eq!(
            rels.get("hub").map(String::as_str),
            Some("https://example.com/hub")
        );
        assert!(parse_link_header("").is_empty());
    }
}
