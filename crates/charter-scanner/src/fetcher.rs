//! HTTP fetching with a header/scheme fallback ladder.
//!
//! Booking sites regularly answer scrapers with 403, and a handful only serve
//! plain http. The fetcher walks a fixed ladder of attempts and always hands
//! back a [`FetchResult`], never an error.

use crate::error::ScanError;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, REFERER, USER_AGENT,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent sent on the first attempt.
pub const PRIMARY_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0 Safari/537.36";

/// User-Agent sent on the alternate and downgraded attempts.
pub const ALTERNATE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0";

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_KO: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// Rung of the fetch ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Browser-like headers, Referer at the site root
    Primary,
    /// Different User-Agent, Referer set to the page itself
    Alternate,
    /// Alternate headers over plain http
    Downgraded,
}

/// What one attempt produced, reduced to what the ladder cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// HTTP 200
    Ok,
    /// HTTP 403
    Forbidden,
    /// Any other status code
    Status(u16),
    /// Timeout, connection or body-read failure
    Transport,
}

impl Attempt {
    /// Next rung after `outcome`, or `None` when the ladder stops here.
    #[must_use]
    pub fn advance(self, outcome: AttemptOutcome, secure: bool) -> Option<Self> {
        let retryable = matches!(outcome, AttemptOutcome::Forbidden | AttemptOutcome::Transport);
        match self {
            Self::Primary if retryable => Some(Self::Alternate),
            Self::Alternate if retryable && secure => Some(Self::Downgraded),
            _ => None,
        }
    }
}

/// Result of fetching one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// URL of the last attempt made (http after a downgrade)
    pub final_url: String,
    /// Status of the last attempt that got a response
    pub status_code: Option<u16>,
    /// Body, present only on HTTP 200
    pub body: Option<String>,
    /// Why no body is present
    pub error: Option<ScanError>,
}

/// HTTP client wrapper that runs the attempt ladder.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with the default 10 second per-attempt timeout.
    pub fn new() -> Result<Self, ScanError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom per-attempt timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ScanError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ScanError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch `url`, stopping at the first HTTP 200.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let mut current = url.to_string();
        let mut attempt = Attempt::Primary;
        let mut last_status = None;

        loop {
            let (outcome, body, error) = self.try_once(&current, attempt).await;
            last_status = match outcome {
                AttemptOutcome::Ok => Some(StatusCode::OK.as_u16()),
                AttemptOutcome::Forbidden => Some(StatusCode::FORBIDDEN.as_u16()),
                AttemptOutcome::Status(code) => Some(code),
                AttemptOutcome::Transport => last_status,
            };

            if outcome == AttemptOutcome::Ok {
                return FetchResult {
                    final_url: current,
                    status_code: last_status,
                    body,
                    error: None,
                };
            }

            let secure = current.starts_with("https://");
            match attempt.advance(outcome, secure) {
                Some(next) => {
                    tracing::debug!(url = %current, ?attempt, ?outcome, ?next, "fetch attempt failed, retrying");
                    if next == Attempt::Downgraded {
                        current = format!("http://{}", &current["https://".len()..]);
                    }
                    attempt = next;
                }
                None => {
                    let error = error.unwrap_or_else(|| {
                        ScanError::HttpStatus(last_status.unwrap_or_default())
                    });
                    tracing::warn!(url = %current, %error, "fetch gave up");
                    return FetchResult {
                        final_url: current,
                        status_code: last_status,
                        body: None,
                        error: Some(error),
                    };
                }
            }
        }
    }

    async fn try_once(
        &self,
        url: &str,
        attempt: Attempt,
    ) -> (AttemptOutcome, Option<String>, Option<ScanError>) {
        let response = match self.client.get(url).headers(headers_for(url, attempt)).send().await {
            Ok(response) => response,
            Err(e) => {
                return (
                    AttemptOutcome::Transport,
                    None,
                    Some(ScanError::Transport(e.to_string())),
                )
            }
        };

        match response.status() {
            StatusCode::OK => match response.text().await {
                Ok(body) => (AttemptOutcome::Ok, Some(body), None),
                Err(e) => (
                    AttemptOutcome::Transport,
                    None,
                    Some(ScanError::Transport(e.to_string())),
                ),
            },
            StatusCode::FORBIDDEN => (AttemptOutcome::Forbidden, None, None),
            other => (AttemptOutcome::Status(other.as_u16()), None, None),
        }
    }
}

/// Request headers for one rung of the ladder.
#[must_use]
pub fn headers_for(url: &str, attempt: Attempt) -> HeaderMap {
    let site_root = Url::parse(url)
        .map(|u| format!("{}/", u.origin().ascii_serialization()))
        .unwrap_or_default();

    let (user_agent, referer) = match attempt {
        Attempt::Primary => (PRIMARY_USER_AGENT, site_root.as_str()),
        Attempt::Alternate | Attempt::Downgraded => (ALTERNATE_USER_AGENT, url),
    };

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(user_agent));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_KO));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    if let Ok(value) = HeaderValue::from_str(referer) {
        headers.insert(REFERER, value);
    }
    headers
}
