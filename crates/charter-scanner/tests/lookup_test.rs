use charter_core::{BoatQuery, ShipStatus};
use charter_scanner::{lookup, lookup_with, Fetcher};
use httpmock::prelude::*;
use std::time::Duration;

const BOARD_HTML: &str = include_str!("fixtures/board_listing.html");
const FLEET_HTML: &str = include_str!("fixtures/fleet_schedule.html");

fn fetcher() -> Fetcher {
    Fetcher::with_timeout(Duration::from_secs(3)).expect("client")
}

#[tokio::test]
async fn test_board_lookup_end_to_end() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/index.php")
                .query_param("mid", "bk")
                .query_param("year", "2024")
                .query_param("month", "05")
                .query_param("day", "01")
                .query_param("mode", "list")
                .query_param("sel", "day");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(BOARD_HTML);
        })
        .await;

    let base = server.url("/index.php?mid=bk&year=2023");
    let result = lookup(&base, 2024, 5, 1, true).await;

    page.assert_async().await;
    assert!(result.error.is_none(), "{:?}", result.error);
    assert!(result.matched);
    assert_eq!(result.tide.as_deref(), Some("7물"));
    assert_eq!(result.display_date, "2024-05-01(수)");
    assert!(result.debug_excerpt.is_some());

    let names: Vec<_> = result.entries.iter().map(|e| e.ship_name.as_str()).collect();
    assert_eq!(names, vec!["금강7호", "조커호"]);

    let open = &result.entries[0];
    assert_eq!(open.status, ShipStatus::Open);
    assert_eq!(open.available, Some(5));
    assert_eq!(open.display_status, "남은자리 5명");
    assert_eq!(open.fish.as_deref(), Some("광어, 다운샷, 광어다운샷"));

    let full = &result.entries[1];
    assert_eq!(full.status, ShipStatus::Full);
    assert_eq!(full.available, Some(0));
    assert_eq!(full.raw_status_text, "예약마감");
}

#[tokio::test]
async fn test_fleet_lookup_end_to_end() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/ship/schedule_fleet/202405");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(FLEET_HTML);
        })
        .await;

    let query = BoatQuery::new(server.url("/ship/schedule_fleet/202312?x=1"), 2024, 5, 1)
        .expect("valid date");
    let result = lookup_with(&fetcher(), &query, false).await;

    page.assert_async().await;
    assert!(result.matched);
    assert_eq!(result.date_id.as_deref(), Some("d2024-05-01"));
    assert_eq!(result.tide.as_deref(), Some("5월 1일 (수) 7물"));
    assert_eq!(result.entries.len(), 2);

    let first = &result.entries[0];
    assert_eq!(first.ship_name, "팀만수");
    assert_eq!(first.status, ShipStatus::Open);
    assert_eq!(first.available, Some(7));
    assert_eq!(first.fish.as_deref(), Some("쭈꾸미, 갑오징어"));

    let second = &result.entries[1];
    assert_eq!(second.ship_name, "레드헌터");
    assert_eq!(second.status, ShipStatus::Full);
    assert_eq!(second.fish.as_deref(), Some("광어 다운샷"));
}

#[tokio::test]
async fn test_fleet_lookup_without_day_block() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ship/schedule_fleet/202406");
            then.status(200).body("<html><body><p>일정 없음</p></body></html>");
        })
        .await;

    let query =
        BoatQuery::new(server.url("/ship/schedule_fleet/"), 2024, 6, 9).expect("valid date");
    let result = lookup_with(&fetcher(), &query, false).await;

    assert!(!result.matched);
    assert!(result.error.is_none());
    assert!(result.entries.is_empty());
    assert_eq!(result.date_id.as_deref(), Some("d2024-06-09"));
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/board");
            then.status(500);
        })
        .await;

    let query = BoatQuery::new(server.url("/board"), 2024, 5, 1).expect("valid date");
    let result = lookup_with(&fetcher(), &query, false).await;

    assert_eq!(page.hits_async().await, 1);
    assert_eq!(result.error.as_deref(), Some("http_status:500"));
    assert!(result.matched);
    assert!(result.entries.is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_reported() {
    let query = BoatQuery::new("http://127.0.0.1:1/board", 2024, 5, 1).expect("valid date");
    let result = lookup_with(&fetcher(), &query, false).await;

    let error = result.error.expect("error");
    assert!(error.starts_with("http_error:"), "{error}");
    assert!(result.entries.is_empty());
}
