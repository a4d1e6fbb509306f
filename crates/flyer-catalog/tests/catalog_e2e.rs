//! Integration tests for the catalog load lifecycle and query pipeline.
//!
//! These tests use wiremock to mock the feed server and verify that the
//! catalog loads exactly once, retries after failures, and keeps its query
//! guarantees over a realistic dataset.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flyer_catalog_rs::{sort_records, Catalog, FilterCriteria, SortKey};
use flyer_feed_rs::client::{FeedClient, FeedSource};

fn feed_body() -> serde_json::Value {
    serde_json::json!([
        {
            "name": "Milk",
            "brand": "Lactel",
            "store": "SuperMart",
            "current_price": "2,00",
            "previous_price": "3,00",
            "validity": "du 3 au 9 janvier 2025"
        },
        {
            "name": "Bread",
            "brand": "BakeHouse",
            "store": "SuperMart",
            "current_price": "1,50",
            "previous_price": "1,50",
            "validity": "du 3 au 9 janvier 2025"
        },
        {
            "name": "Cola 2L",
            "brand": "Coca-Cola",
            "store": "BudgetGrocer",
            "current_price": "2,99",
            "validity": "du 10 au 16 janvier 2025"
        }
    ])
}

fn catalog_for(server: &MockServer) -> Catalog {
    Catalog::new(FeedClient::new(FeedSource::Url(format!(
        "{}/data.json",
        server.uri()
    ))))
}

#[tokio::test]
async fn test_repeated_queries_hit_the_feed_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut catalog = catalog_for(&mock_server);

    catalog.ensure_loaded().await.expect("first load");
    catalog.ensure_loaded().await.expect("idempotent reload");
    let _ = catalog.search_by_name("milk").await.unwrap();
    let _ = catalog.filter_by_promotion(true).await.unwrap();

    assert!(catalog.is_loaded());
    assert_eq!(catalog.records().len(), 3);
    // wiremock verifies expect(1) on drop
}

#[tokio::test]
async fn test_failed_load_leaves_catalog_unloaded_and_retries() {
    let mock_server = MockServer::start().await;

    // One server error, then a good body
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .mount(&mock_server)
        .await;

    let mut catalog = catalog_for(&mock_server);

    let err = catalog.ensure_loaded().await.unwrap_err();
    assert!(err.is_fetch_failure());
    assert!(!catalog.is_loaded());
    assert!(catalog.records().is_empty());

    catalog.ensure_loaded().await.expect("retry should succeed");
    assert!(catalog.is_loaded());
    assert_eq!(catalog.records().len(), 3);
}

#[tokio::test]
async fn test_malformed_feed_leaves_catalog_unloaded_and_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .mount(&mock_server)
        .await;

    let mut catalog = catalog_for(&mock_server);

    let err = catalog.ensure_loaded().await.unwrap_err();
    assert!(err.is_parse_failure());
    assert!(!catalog.is_loaded());

    catalog.ensure_loaded().await.expect("refetch should succeed");
    assert_eq!(catalog.records().len(), 3);
}

#[tokio::test]
async fn test_promotion_and_price_window_worked_example() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .mount(&mock_server)
        .await;

    let mut catalog = catalog_for(&mock_server);

    let promos = catalog.filter_by_promotion(true).await.unwrap();
    let names: Vec<&str> = promos.iter().filter_map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec!["Milk"]);

    let cheap = catalog.filter_by_price_range(0.0, 2.5).await.unwrap();
    let names: Vec<&str> = cheap.iter().filter_map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec!["Milk", "Bread"]);
}

#[tokio::test]
async fn test_facets_and_fuzzy_suggestion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .mount(&mock_server)
        .await;

    let mut catalog = catalog_for(&mock_server);

    let brands = catalog.distinct_values("brand").await.unwrap();
    assert_eq!(brands.len(), 3);
    assert!(brands.contains("Coca-Cola"));

    let stores = catalog.distinct_values("store").await.unwrap();
    assert_eq!(stores.len(), 2);

    let suggestion = flyer_catalog_rs::facet::suggest(
        "Lactol",
        brands.iter().map(String::as_str),
    );
    assert_eq!(suggestion.as_deref(), Some("Lactel"));
}

#[tokio::test]
async fn test_filter_then_sort_pipeline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .mount(&mock_server)
        .await;

    let mut catalog = catalog_for(&mock_server);

    let criteria = FilterCriteria {
        store: Some("supermart".to_string()),
        ..FilterCriteria::default()
    };
    let matches = catalog.filter(&criteria).await.unwrap();
    assert_eq!(matches.len(), 2);

    let sorted = sort_records(matches, SortKey::PriceDesc);
    let names: Vec<&str> = sorted.iter().filter_map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec!["Milk", "Bread"]);

    // Sorting borrowed the records; the dataset order is untouched
    assert_eq!(catalog.records()[0].name.as_deref(), Some("Milk"));
    assert_eq!(catalog.records()[1].name.as_deref(), Some("Bread"));
}

#[tokio::test]
async fn test_max_price_over_loaded_feed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .mount(&mock_server)
        .await;

    let mut catalog = catalog_for(&mock_server);
    assert_eq!(catalog.max_price().await.unwrap(), Some(3.0));
}
