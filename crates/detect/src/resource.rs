// ABOUTME: HTTP transport for detection probes with per-request timeouts and hard byte caps.
// ABOUTME: Follows redirects, streams bodies up to the cap, and decodes charsets for HTML text.

use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;

use crate::error::DetectError;

/// Byte cap for the root page fetch.
pub const MAX_HTML_BYTES: usize = 2 * 1024 * 1024;

/// Byte cap for the feed validation fetch.
pub const MAX_FEED_BYTES: usize = 3 * 1024 * 1024;

/// Byte cap for signature-checker secondary fetches.
pub const MAX_PROBE_BYTES: usize = 512 * 1024;

/// Default per-request timeout for every probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP method for a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

/// Options for a single fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub method: Method,
    pub max_bytes: usize,
    pub timeout: Duration,
}

impl FetchOptions {
    /// GET with a body cap.
    pub fn get(max_bytes: usize, timeout: Duration) -> Self {
        Self {
            method: Method::Get,
            max_bytes,
            timeout,
        }
    }

    /// Header-only probe; no body is read.
    pub fn head(timeout: Duration) -> Self {
        Self {
            method: Method::Head,
            max_bytes: 0,
            timeout,
        }
    }
}

/// Result of a fetch, redirects already followed.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub headers: reqwest::header::HeaderMap,
    pub body: Bytes,
}

impl FetchResult {
    /// Returns a response header as a string, if present and readable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Content type with parameters stripped, lower-cased.
    pub fn content_type(&self) -> Option<String> {
        self.header("content-type")
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_lowercase())
    }

    /// Decodes the body as text using the content-type charset, falling back
    /// to chardetng detection. Feed bytes skip this and go to the parser raw.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.header("content-type"))
    }
}

/// Fetch a URL with the given method, timeout, and byte cap.
///
/// Transport failures and timeouts surface as `DetectError`; callers that
/// treat probes as best-effort map the error to a negative signal.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, DetectError> {
    let parsed = url::Url::parse(url).map_err(|e| {
        DetectError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(DetectError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    let method = match opts.method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
    };

    let response = client
        .request(method, parsed)
        .timeout(opts.timeout)
        .send()
        .await
        .map_err(|e| DetectError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e))))?;

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let headers = response.headers().clone();

    let body = if opts.method == Method::Head {
        Bytes::new()
    } else {
        read_capped(response, opts.max_bytes).await.map_err(|e| {
            DetectError::fetch(url, "Fetch", Some(anyhow::anyhow!("failed to read body: {}", e)))
        })?
    };

    Ok(FetchResult {
        status,
        url: url.to_string(),
        final_url,
        headers,
        body,
    })
}

/// Reads the response body, truncating at `max_bytes`.
async fn read_capped(response: reqwest::Response, max_bytes: usize) -> Result<Bytes, reqwest::Error> {
    let mut body: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let room = max_bytes.saturating_sub(body.len());
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            tracing::debug!(max_bytes, "response body truncated at byte cap");
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(body))
}

/// Decodes body bytes using the charset from a content-type header, falling
/// back to chardetng detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(charset) = content_type.and_then(extract_charset) {
        if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
            let (decoded, _, _) = encoding.decode(body);
            return decoded.into_owned();
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let (decoded, _, _) = detector.guess(None, true).decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type.to_lowercase().split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|c| c.trim_matches(|ch| ch == '"' || ch == '\'').to_string())
    })
}
