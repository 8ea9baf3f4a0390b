// ABOUTME: Main library entry point for the feedscout detection pipeline.
// ABOUTME: Re-exports the public API: detect_feed_url, Detector, DetectionResult, DetectError.

//! Feedscout - blog platform and syndication feed detection.
//!
//! Give it a URL a user pasted in - a homepage, a platform-specific path, or
//! the feed itself - and it chases redirects, races platform signature
//! probes, and returns the canonical feed URL along with an icon, a comments
//! feed, and basic feed metadata.
//!
//! # Example
//!
//! ```no_run
//! use feedscout_detect::detect_feed_url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), feedscout_detect::DetectError> {
//!     let result = detect_feed_url("https://example.blogspot.com/").await?;
//!     println!("{}: {:?}", result.platform, result.feed);
//!     Ok(())
//! }
//! ```

pub mod checkers;
pub mod comments;
pub mod error;
pub mod lang;
pub mod links;
pub mod options;
pub mod pipeline;
pub mod resolve;
pub mod resource;
pub mod result;
pub mod routes;

pub use crate::error::{DetectError, ErrorCode};
pub use crate::lang::{LanguageDetector, WhatlangDetector};
pub use crate::options::{DetectorBuilder, Options};
pub use crate::pipeline::{detect_feed_url, Detector};
pub use crate::resolve::Icon;
pub use crate::result::DetectionResult;
pub use crate::routes::Platform;
