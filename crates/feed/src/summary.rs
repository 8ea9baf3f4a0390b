// ABOUTME: Feed summary parsing on top of feed-rs.
// ABOUTME: Exposes permalink, hub, title, description, and item text from raw feed bytes.

use crate::error::FeedError;
use feed_rs::model::{Entry, Link};
use serde::{Deserialize, Serialize};

/// A single feed entry reduced to the text a sampling step needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub title: String,
    pub content: String,
}

/// Metadata summary of a parsed syndication feed.
///
/// This is the detection pipeline's view of a feed: enough to follow the
/// declared site permalink, pick up a pub/sub hub, and sample item text.
/// Everything is extracted eagerly at parse time; accessors are cheap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedSummary {
    title: Option<String>,
    description: Option<String>,
    permalink: Option<String>,
    hub: Option<String>,
    items: Vec<SummaryItem>,
}

impl FeedSummary {
    /// Parses raw feed bytes (RSS or Atom) into a summary.
    ///
    /// Fails on malformed bytes; callers treat that as "not a feed".
    pub fn parse(data: &[u8]) -> Result<Self, FeedError> {
        if data.is_empty() {
            return Err(FeedError::invalid("empty input"));
        }
        let parsed = feed_rs::parser::parse(data).map_err(FeedError::parse)?;

        Ok(FeedSummary {
            title: parsed.title.map(|t| t.content),
            description: parsed.description.map(|d| d.content),
            permalink: extract_permalink(&parsed.links),
            hub: extract_hub(&parsed.links),
            items: parsed.entries.iter().map(map_entry).collect(),
        })
    }

    /// The feed's declared website URL, if any.
    pub fn permalink(&self) -> Option<&str> {
        self.permalink.as_deref()
    }

    /// The feed's declared pub/sub hub, if any.
    pub fn hub(&self) -> Option<&str> {
        self.hub.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns up to `count` items starting at `offset`, in document order.
    pub fn items(&self, offset: usize, count: usize) -> &[SummaryItem] {
        let start = offset.min(self.items.len());
        let end = start.saturating_add(count).min(self.items.len());
        &self.items[start..end]
    }
}

/// Picks the feed's website link.
/// Prefers rel="alternate"; otherwise the first link that is not the feed
/// itself or its hub.
fn extract_permalink(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate"))
        .or_else(|| {
            links
                .iter()
                .find(|l| !matches!(l.rel.as_deref(), Some("self") | Some("hub")))
        })
        .map(|l| l.href.clone())
}

fn extract_hub(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref() == Some("hub"))
        .map(|l| l.href.clone())
}

/// Maps a feed-rs entry to its title and body text.
/// Full content wins over the summary when both are present.
fn map_entry(entry: &Entry) -> SummaryItem {
    SummaryItem {
        title: entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        content: entry
            .content
            .as_ref()
            .and_then(|c| c.body.clone())
            .or_else(|| entry.summary.as_ref().map(|s| s.content.clone()))
            .unwrap_or_default(),
    }
}
