// ABOUTME: Error types for feed summary parsing.
// ABOUTME: Provides FeedError with Parse and Invalid variants.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while summarizing a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The bytes did not parse as a syndication feed.
    #[error("failed to parse feed: {0}")]
    Parse(String),

    /// The data parsed but is not usable as a feed.
    #[error("invalid feed: {0}")]
    Invalid(String),
}

impl FeedError {
    /// Creates a Parse error from an underlying feed-rs error.
    pub fn parse(err: impl fmt::Display) -> Self {
        FeedError::Parse(err.to_string())
    }

    /// Creates an Invalid error with a custom message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        FeedError::Invalid(msg.into())
    }
}
