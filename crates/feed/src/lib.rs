// ABOUTME: Feed summary library for the feedscout detection pipeline.
// ABOUTME: Wraps feed-rs parsing and provides plain-text helpers for item sampling.

pub mod error;
pub mod html_utils;
pub mod summary;

pub use error::FeedError;
pub use html_utils::{decode_entities, strip_html};
pub use summary::{FeedSummary, SummaryItem};
