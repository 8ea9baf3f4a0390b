// ABOUTME: Language identification seam for feed text samples.
// ABOUTME: Default implementation guesses with whatlang; custom detectors plug in via the builder.

use async_trait::async_trait;

/// Guesses a language code from a text sample.
///
/// Implementations are best-effort classifiers: return `None` rather than a
/// low-confidence guess. The pipeline records a guess verbatim or leaves the
/// language absent.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, sample: &str) -> Option<String>;
}

/// Default detector backed by whatlang.
///
/// Returns ISO 639-3 codes ("eng", "spa", ...) and only for guesses whatlang
/// marks reliable.
#[derive(Debug, Default)]
pub struct WhatlangDetector;

#[async_trait]
impl LanguageDetector for WhatlangDetector {
    async fn detect(&self, sample: &str) -> Option<String> {
        let info = whatlang::detect(sample)?;
        if !info.is_reliable() {
            return None;
        }
        Some(info.lang().code().to_string())
    }
}
