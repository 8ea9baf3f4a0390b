// ABOUTME: Detector configuration and builder.
// ABOUTME: Collaborators (HTTP client, language detector) slot in through here.

use std::sync::Arc;
use std::time::Duration;

use crate::lang::LanguageDetector;
use crate::pipeline::Detector;
use crate::resource::PROBE_TIMEOUT;

/// Configuration options for a `Detector`.
#[derive(Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    /// Enables Disqus-shortname comments discovery with this credential.
    pub disqus_api_key: Option<String>,
    pub http_client: Option<reqwest::Client>,
    pub language: Option<Arc<dyn LanguageDetector>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: PROBE_TIMEOUT,
            user_agent: "feedscout/0.1".to_string(),
            disqus_api_key: None,
            http_client: None,
            language: None,
        }
    }
}

/// Builder for constructing Detector instances with custom configuration.
#[derive(Clone, Default)]
pub struct DetectorBuilder {
    opts: Options,
}

impl DetectorBuilder {
    /// Create a new DetectorBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the per-request timeout applied to every probe.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Supply a Disqus API credential for comments discovery.
    pub fn disqus_api_key(mut self, key: impl Into<String>) -> Self {
        self.opts.disqus_api_key = Some(key.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Use a custom language detector.
    pub fn language_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.opts.language = Some(detector);
        self
    }

    /// Build the Detector with the configured options.
    pub fn build(self) -> Detector {
        Detector::new(self.opts)
    }
}
