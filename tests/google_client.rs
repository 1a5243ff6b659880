//! Integration tests for `GoogleTrendsClient` using wiremock HTTP mocks.

use std::time::Duration;

use tagtrends::trends::google::GoogleTrendsClient;
use tagtrends::trends::models::QuerySettings;
use tagtrends::trends::traits::TrendSource;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GoogleTrendsClient {
    GoogleTrendsClient::new(base_url, "en-US", 360, Duration::from_secs(5))
        .expect("client construction should not fail")
}

fn explore_body(widget_id: &str) -> String {
    let body = serde_json::json!({
        "widgets": [
            {
                "id": "GEO_MAP",
                "token": "geo-token",
                "request": {}
            },
            {
                "id": widget_id,
                "token": "series-token",
                "request": {
                    "time": "2025-01-01 2026-01-01",
                    "resolution": "WEEK",
                    "comparisonItem": [{"geo": {"country": "US"}, "complexKeywordsRestriction": {}}],
                    "requestOptions": {"property": "youtube", "backend": "IZG", "category": 0}
                }
            }
        ]
    });
    format!(")]}}'\n{body}")
}

fn multiline_body(values: &[(f64, bool)]) -> String {
    let timeline: Vec<serde_json::Value> = values
        .iter()
        .enumerate()
        .map(|(i, (value, has_data))| {
            serde_json::json!({
                "time": (1_700_000_000 + i as i64 * 604_800).to_string(),
                "formattedTime": "Nov 2023",
                "value": [value],
                "hasData": [has_data],
                "formattedValue": [value.to_string()]
            })
        })
        .collect();
    let body = serde_json::json!({"default": {"timelineData": timeline, "averages": []}});
    format!(")]}}',\n{body}")
}

async fn mount_landing_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "NID=abc; Path=/"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn interest_over_time_returns_parsed_series() {
    let server = MockServer::start().await;
    mount_landing_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/trends/api/explore"))
        .and(query_param("hl", "en-US"))
        .and(query_param("tz", "360"))
        .respond_with(ResponseTemplate::new(200).set_body_string(explore_body("TIMESERIES")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/multiline"))
        .and(query_param("token", "series-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(multiline_body(&[(10.0, true), (20.0, true), (60.0, true)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = QuerySettings::default().query_for("rust");
    let series = client
        .interest_over_time(&query)
        .await
        .expect("should parse series");

    assert_eq!(series.keyword, "rust");
    assert_eq!(series.len(), 3);
    assert!((series.mean().unwrap() - 30.0).abs() < 1e-9);
    assert_eq!(
        series.points[0].time.map(|t| t.timestamp()),
        Some(1_700_000_000)
    );
    assert!(client.is_usable(&series));
}

#[tokio::test]
async fn explore_request_carries_keyword_and_property() {
    let server = MockServer::start().await;
    mount_landing_page(&server).await;

    let expected_req = r#"{"comparisonItem":[{"keyword":"lofi beats","time":"today 12-m","geo":"US"}],"category":0,"property":"youtube"}"#;

    Mock::given(method("POST"))
        .and(path("/trends/api/explore"))
        .and(query_param("req", expected_req))
        .respond_with(ResponseTemplate::new(200).set_body_string(explore_body("TIMESERIES")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/multiline"))
        .respond_with(ResponseTemplate::new(200).set_body_string(multiline_body(&[(5.0, true)])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let series = client
        .interest_over_time(&QuerySettings::default().query_for("lofi beats"))
        .await
        .expect("explore request should match");
    assert_eq!(series.len(), 1);
}

#[tokio::test]
async fn empty_timeline_is_an_empty_series() {
    let server = MockServer::start().await;
    mount_landing_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_string(explore_body("TIMESERIES")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/multiline"))
        .respond_with(ResponseTemplate::new(200).set_body_string(multiline_body(&[])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let series = client
        .interest_over_time(&QuerySettings::default().query_for("zzzz"))
        .await
        .expect("empty timeline is not an error");
    assert!(series.is_empty());
    assert!(!client.is_usable(&series));
}

#[tokio::test]
async fn rate_limit_is_an_error() {
    let server = MockServer::start().await;
    mount_landing_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .interest_over_time(&QuerySettings::default().query_for("rust"))
        .await
        .expect_err("429 should fail");
    assert!(err.to_string().contains("429"), "unexpected error: {err:#}");
}

#[tokio::test]
async fn server_error_is_an_error() {
    let server = MockServer::start().await;
    mount_landing_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_string(explore_body("TIMESERIES")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/multiline"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .interest_over_time(&QuerySettings::default().query_for("rust"))
        .await
        .expect_err("500 should fail");
    let message = format!("{err:#}");
    assert!(message.contains("500"), "unexpected error: {message}");
    assert!(message.contains("backend down"), "unexpected error: {message}");
}

#[tokio::test]
async fn missing_timeseries_widget_is_an_error() {
    let server = MockServer::start().await;
    mount_landing_page(&server).await;

    Mock::given(method("POST"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_string(explore_body("RELATED_QUERIES")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .interest_over_time(&QuerySettings::default().query_for("rust"))
        .await
        .expect_err("no TIMESERIES widget should fail");
    assert!(err.to_string().contains("TIMESERIES"));
}

#[tokio::test]
async fn cookie_warm_up_happens_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("geo", "US"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_string(explore_body("TIMESERIES")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/multiline"))
        .respond_with(ResponseTemplate::new(200).set_body_string(multiline_body(&[(1.0, true)])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let settings = QuerySettings::default();
    client.interest_over_time(&settings.query_for("a")).await.unwrap();
    client.interest_over_time(&settings.query_for("b")).await.unwrap();
    // MockServer verifies the expect(1) on drop
}

#[tokio::test]
async fn failed_warm_up_does_not_block_queries() {
    let server = MockServer::start().await;
    // No landing page mock: wiremock answers 404

    Mock::given(method("POST"))
        .and(path("/trends/api/explore"))
        .respond_with(ResponseTemplate::new(200).set_body_string(explore_body("TIMESERIES")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trends/api/widgetdata/multiline"))
        .respond_with(ResponseTemplate::new(200).set_body_string(multiline_body(&[(7.0, true)])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let series = client
        .interest_over_time(&QuerySettings::default().query_for("rust"))
        .await
        .expect("warm-up failure is only logged");
    assert_eq!(series.len(), 1);
}
