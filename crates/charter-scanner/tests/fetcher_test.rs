use charter_scanner::fetcher::{ALTERNATE_USER_AGENT, PRIMARY_USER_AGENT};
use charter_scanner::{Fetcher, ScanError};
use httpmock::prelude::*;
use std::time::Duration;

fn fetcher() -> Fetcher {
    Fetcher::with_timeout(Duration::from_secs(3)).expect("client")
}

#[tokio::test]
async fn test_forbidden_retries_with_alternate_headers() {
    let server = MockServer::start_async().await;
    let primary = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/board")
                .header("user-agent", PRIMARY_USER_AGENT);
            then.status(403);
        })
        .await;
    let alternate = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/board")
                .header("user-agent", ALTERNATE_USER_AGENT)
                .header_exists("referer");
            then.status(200).body("<html><body>ok</body></html>");
        })
        .await;

    let url = server.url("/board");
    let fetched = fetcher().fetch(&url).await;

    primary.assert_async().await;
    alternate.assert_async().await;
    assert_eq!(fetched.final_url, url);
    assert_eq!(fetched.status_code, Some(200));
    assert!(fetched.error.is_none());
    assert!(fetched.body.expect("body").contains("ok"));
}

#[tokio::test]
async fn test_forbidden_twice_over_http_stops() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/board");
            then.status(403);
        })
        .await;

    let fetched = fetcher().fetch(&server.url("/board")).await;

    assert_eq!(page.hits_async().await, 2);
    assert_eq!(fetched.status_code, Some(403));
    assert_eq!(fetched.error, Some(ScanError::HttpStatus(403)));
    assert!(fetched.body.is_none());
}

#[tokio::test]
async fn test_https_failure_downgrades_to_http() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/board")
                .header("user-agent", ALTERNATE_USER_AGENT);
            then.status(200).body("<html><body>plain</body></html>");
        })
        .await;

    // The mock server speaks plain http, so both https attempts fail.
    let secure = format!("https://{}/board", server.address());
    let fetched = fetcher().fetch(&secure).await;

    page.assert_async().await;
    assert_eq!(fetched.final_url, server.url("/board"));
    assert!(fetched.final_url.starts_with("http://"));
    assert!(fetched.error.is_none());
    assert!(fetched.body.expect("body").contains("plain"));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        })
        .await;

    let fetched = fetcher().fetch(&server.url("/missing")).await;

    assert_eq!(page.hits_async().await, 1);
    assert_eq!(fetched.error, Some(ScanError::HttpStatus(404)));
}
