//! Integration tests for the recommendation client against a mock service.

use oshima_core::recommend::{ClientConfig, HttpTimeouts, endpoint_url};
use oshima_core::{
    HttpRecommender, RecommendError, Recommender, SourceAggregator, extract, submit,
};
use serde_json::json;
use wiremock::matchers::{body_json, header_regex, method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::{should_skip_socket_bound_test, start_mock_server_or_skip};

fn config_for(uri: &str) -> ClientConfig {
    ClientConfig {
        api_url: uri.to_string(),
        timeouts: HttpTimeouts {
            connect_secs: 2,
            read_secs: 5,
        },
        ..ClientConfig::default()
    }
}

fn sample_response() -> serde_json::Value {
    json!({
        "recommendations": [
            {
                "title": "Attention Is All You Need",
                "doi": "10.5555/3295222.3295349",
                "year": 2017,
                "score": 0.93,
                "authors": ["A. Vaswani", "N. Shazeer"],
                "journal": "NeurIPS",
                "abstract": "The dominant sequence transduction models..."
            },
            { "title": null, "doi": null, "score": 0.41 }
        ]
    })
}

#[tokio::test]
async fn test_submit_posts_aggregate_and_parses_recommendations() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/recommend"))
        .and(header_regex("user-agent", "^oshima/"))
        .and(body_json(json!({
            "queries": ["10.1038/nphys1170", "10.1000/182", "10.1016/j.cell.2020.01.001"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&server)
        .await;

    let mut sources = SourceAggregator::new();
    sources.set_pasted_source(extract(
        "see doi:10.1038/nphys1170 and https://doi.org/10.1000/182",
    ));
    sources.upsert_file_source(
        "library.bib",
        extract("@article{x, doi = {10.1000/182}}\n@article{y, doi = {10.1016/j.cell.2020.01.001}}"),
    );

    let recommender = HttpRecommender::new(&config_for(&server.uri())).unwrap();
    let submission = submit(&sources, &recommender, 50).await.unwrap();

    assert_eq!(submission.queries.len(), 3);
    assert_eq!(submission.recommendations.len(), 2);
    let first = &submission.recommendations[0];
    assert_eq!(first.display_title(), "Attention Is All You Need");
    assert_eq!(first.authors.as_deref(), Some("A. Vaswani, N. Shazeer"));
    assert_eq!(
        first.doi_url().as_deref(),
        Some("https://dx.doi.org/10.5555/3295222.3295349")
    );
    assert_eq!(
        submission.recommendations[1].display_title(),
        "No title available"
    );
}

#[tokio::test]
async fn test_submit_caps_request_at_limit() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    let all: Vec<String> = (0..60).map(|i| format!("10.1000/paper{i}")).collect();
    Mock::given(method("POST"))
        .and(path("/recommend"))
        .and(body_json(json!({ "queries": &all[..50] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "recommendations": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut sources = SourceAggregator::new();
    sources.set_pasted_source(extract(&all.join(" ")));
    assert_eq!(sources.get_aggregate().len(), 60);

    let recommender = HttpRecommender::new(&config_for(&server.uri())).unwrap();
    let submission = submit(&sources, &recommender, 50).await.unwrap();
    assert_eq!(submission.queries, &all[..50]);
    assert!(submission.recommendations.is_empty());
}

#[tokio::test]
async fn test_custom_endpoint_is_used() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/api/v2/similar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "recommendations": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig {
        endpoint: "similar".to_string(),
        ..config_for(&format!("{}/api/v2/", server.uri()))
    };
    let recommender = HttpRecommender::new(&config).unwrap();
    let result = recommender.recommend(&["10.1000/182".to_string()]).await;
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_error_maps_to_retryable_status() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/recommend"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let recommender = HttpRecommender::new(&config_for(&server.uri())).unwrap();
    let err = recommender
        .recommend(&["10.1000/182".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::Status { status: 500, .. }), "{err:?}");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_missing_endpoint_maps_to_non_retryable_status() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let recommender = HttpRecommender::new(&config_for(&server.uri())).unwrap();
    let err = recommender
        .recommend(&["10.1000/182".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, RecommendError::Status { status: 404, .. }), "{err:?}");
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("endpoint not found"));
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let recommender = HttpRecommender::new(&config_for(&server.uri())).unwrap();
    let err = recommender
        .recommend(&["10.1000/182".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn test_empty_query_sends_nothing() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let recommender = HttpRecommender::new(&config_for(&server.uri())).unwrap();
    let err = recommender.recommend(&[]).await.unwrap_err();
    assert!(matches!(err, RecommendError::EmptyQuery));

    let err = submit(&SourceAggregator::new(), &recommender, 50)
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::EmptyQuery));
}

#[tokio::test]
async fn test_unreachable_service_maps_to_network_error() {
    if should_skip_socket_bound_test() {
        return;
    }

    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let recommender =
        HttpRecommender::new(&config_for(&format!("http://127.0.0.1:{port}"))).unwrap();

    let err = recommender
        .recommend(&["10.1000/182".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Network { .. }), "{err:?}");
    assert!(err.is_retryable());
}

#[test]
fn test_invalid_api_url_rejected_before_any_request() {
    let err = HttpRecommender::new(&config_for("localhost:5001")).unwrap_err();
    assert!(matches!(err, RecommendError::InvalidApiUrl { .. }), "{err:?}");
    assert!(endpoint_url("http://localhost:5001", "recommend").is_ok());
}
