//! Page fetching over HTTP with safe logging.
//!
//! - One GET per call, no retries
//! - Status codes are reported, never turned into errors: any body is handed
//!   back to the caller
//! - Optional *raw* request/response logging via `WORDHUNT_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```no_run
//! # async fn demo() -> Result<(), wordhunt_http::HttpError> {
//! use wordhunt_http::{HttpClient, PageFetcher};
//!
//! let client = HttpClient::new()?;
//! let html = client.fetch_page("https://www.rust-lang.org/").await?;
//! # let _ = html;
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, body snippets (truncated), final errors, and
//! (optionally) raw request/response lines (target `http.raw`).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, StatusCode, Url};
use std::env;
use std::time::Duration;
use thiserror::Error;
use wordhunt_common::WordhuntError;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "WORDHUNT_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)

pub const DEFAULT_USER_AGENT: &str = concat!("wordhunt/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if key.eq_ignore_ascii_case("authorization") || key.eq_ignore_ascii_case("cookie") {
                val = "<redacted>".into();
            }
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("failed reading response body: {0}")]
    Body(String),
}

impl From<HttpError> for WordhuntError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Body(_) => WordhuntError::Read(err.to_string()),
            HttpError::Url(_) | HttpError::Build(_) | HttpError::Network(_) => {
                WordhuntError::Transport(err.to_string())
            }
        }
    }
}

// ==============================
// Request options & response
// ==============================

/// A fully read response.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL after redirects.
    pub url: Url,
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Page {
    /// Body decoded as UTF-8; invalid sequences become U+FFFD.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Settings applied when the underlying `reqwest` client is built.
#[derive(Clone, Debug)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    user_agent: String,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client with default settings.
    ///
    /// ```no_run
    /// use wordhunt_http::{HttpClient, HttpError, DEFAULT_TIMEOUT};
    ///
    /// let client = HttpClient::new()?;
    /// assert_eq!(client.default_timeout, DEFAULT_TIMEOUT);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new() -> Result<Self, HttpError> {
        Self::from_settings(&ClientSettings::default())
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            user_agent: settings.user_agent.clone(),
            default_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the whole-request timeout (send plus body).
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use wordhunt_http::{HttpClient, HttpError};
    ///
    /// let client = HttpClient::new()?.with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// GET an absolute URL and read the whole body.
    ///
    /// Non-2xx responses are returned like any other; only URL, transport
    /// and body-read failures are errors.
    pub async fn get(&self, url: &str) -> Result<Page, HttpError> {
        let url = Url::parse(url).map_err(|e| HttpError::Url(e.to_string()))?;
        let method = Method::GET;

        let timeout = self.default_timeout;
        let rb = self
            .inner
            .request(method.clone(), url.clone())
            .timeout(timeout);

        // Lightweight request id without extra deps
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            timeout_ms=timeout.as_millis() as u64,
            "http.request.start"
        );

        if raw_enabled() {
            let mut shown = HeaderMap::new();
            if let Ok(agent) = HeaderValue::from_str(&self.user_agent) {
                shown.entry(USER_AGENT).or_insert(agent);
            }
            let curl = make_curl(&method, &url, &shown);
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send -----
        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(
                req_id=%req_id,
                timeout=err.is_timeout(),
                connect=err.is_connect(),
                message=%message,
                "http.network_error.send"
            );
            HttpError::Network(message)
        })?;

        let status = resp.status();
        let final_url = resp.url().clone();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(
                req_id=%req_id,
                %status,
                timeout=err.is_timeout(),
                message=%message,
                "http.network_error.body"
            );
            HttpError::Body(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        let content_type = headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            content_length=content_len(&headers, bytes.len()),
            content_type=%content_type,
            redirected=%(final_url != url),
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let truncated = bytes.len() > RAW_MAX_BODY;
            let shown = &bytes[..bytes.len().min(RAW_MAX_BODY)];
            let text = String::from_utf8_lossy(shown);
            tracing::info!(
                target:"http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        let snippet = snip_body(&bytes);
        tracing::trace!(
            req_id=%req_id,
            body_snippet=%snippet,
            "http.response.body_snippet"
        );

        if !status.is_success() {
            tracing::warn!(
                req_id=%req_id,
                %status,
                body_snippet=%snippet,
                "http.response.non_success"
            );
        }

        Ok(Page {
            url: final_url,
            status,
            body: bytes.to_vec(),
        })
    }
}

/// Source of page bodies for the word-count pipeline.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body as text.
    async fn fetch_page(&self, url: &str) -> Result<String, HttpError>;
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &str) -> Result<String, HttpError> {
        let page = self.get(url).await?;
        Ok(page.text())
    }
}

// ==============================
// Helpers
// ==============================

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

fn content_len(headers: &HeaderMap, body_len: usize) -> usize {
    headers
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(body_len)
}
