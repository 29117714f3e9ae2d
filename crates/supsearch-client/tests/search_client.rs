//! Integration tests for `SupplierSearchClient` and `SearchSession` using
//! wiremock HTTP mocks. No real network traffic is made.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use supsearch_client::{SearchError, SearchPhase, SearchSession, SupplierSearchClient};
use supsearch_rank::SortKey;

const BASE_PATH: &str = "/api/v1/suppliers";

fn test_client(server: &MockServer) -> SupplierSearchClient {
    SupplierSearchClient::new(
        &format!("{}{BASE_PATH}", server.uri()),
        Some(5),
        "supsearch-test/0.1",
    )
    .expect("failed to build test client")
}

fn three_suppliers() -> serde_json::Value {
    json!({
        "suppliers": [
            {
                "product_name": "Hex Bolt M8",
                "product_url": "https://alpha.made-in-china.com/product/hex-bolt",
                "price": "US$ 10.00",
                "detailed_price": "US$ 10.00-12.00 / Box",
                "moq": "10 Boxes",
                "rating": "4 out of 5 stars",
                "store_name": "Alpha Hardware",
                "store_url": "https://alpha.made-in-china.com",
                "orders": "N/A"
            },
            {
                "product_name": "Carriage Bolt",
                "product_url": "https://beta.made-in-china.com/product/carriage-bolt",
                "price": "US$ 5,00",
                "moq": "Not available",
                "rating": "5 out of 5 stars",
                "store_name": "beta fasteners",
                "store_url": "https://beta.made-in-china.com",
                "orders": "N/A"
            },
            {
                "product_name": "Product from Gamma Metal",
                "product_url": "https://gamma.made-in-china.com",
                "price": "Price not available",
                "rating": "No rating",
                "store_name": "Gamma Metal",
                "store_url": "https://gamma.made-in-china.com",
                "orders": "N/A"
            }
        ],
        "query": "bolt"
    })
}

// ---------------------------------------------------------------------------
// SupplierSearchClient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_returns_parsed_suppliers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/search")))
        .and(query_param("product_name", "bolt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_suppliers()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client.search_suppliers("bolt").await.expect("should parse");

    assert_eq!(response.query, "bolt");
    assert_eq!(response.suppliers.len(), 3);
    assert_eq!(response.suppliers[0].store_name, "Alpha Hardware");
    assert_eq!(
        response.suppliers[0].detailed_price.as_deref(),
        Some("US$ 10.00-12.00 / Box")
    );
    assert!(response.suppliers[2].moq.is_none());
}

#[tokio::test]
async fn search_sends_trimmed_encoded_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/search")))
        .and(query_param("product_name", "stainless steel bolt & nut"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"suppliers": [], "query": "stainless steel bolt & nut"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let response = client
        .search_suppliers("  stainless steel bolt & nut  ")
        .await
        .expect("should succeed");
    assert!(response.suppliers.is_empty());
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/search")))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            json!({"detail": "Error searching for suppliers: browser crashed"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.search_suppliers("bolt").await.unwrap_err();
    assert!(
        matches!(err, SearchError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
}

#[tokio::test]
async fn bad_request_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/search")))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"detail": "Product name cannot be empty"}),
        ))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.search_suppliers("bolt").await.unwrap_err();
    assert!(matches!(err, SearchError::UnexpectedStatus { status: 400, .. }));
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/search")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.search_suppliers("bolt").await.unwrap_err();
    assert!(matches!(err, SearchError::Deserialize { .. }));
}

#[tokio::test]
async fn blank_query_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_suppliers()))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.search_suppliers(" \n ").await.unwrap_err();
    assert!(matches!(err, SearchError::EmptyQuery));
}

// ---------------------------------------------------------------------------
// SearchSession end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_ranks_fetched_suppliers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/search")))
        .and(query_param("product_name", "bolt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(three_suppliers()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut session = SearchSession::new();
    let phase = session.run(&client, "bolt").await.expect("query is valid");
    assert_eq!(phase.name(), "results");

    session.select_sort(SortKey::Price);
    let view = session.view().expect("results phase has a view");
    let order: Vec<&str> = view
        .rows
        .iter()
        .map(|row| row.record.store_name.as_str())
        .collect();
    assert_eq!(order, ["beta fasteners", "Alpha Hardware", "Gamma Metal"]);
    assert_eq!(view.best_price, Some(5.0));
    assert!(view.rows[0].is_best);
    assert_eq!(view.rows[1].display_price(), "US$ 10.00-12.00 / Box");

    session.select_sort(SortKey::Rating);
    session.select_sort(SortKey::Rating);
    let view = session.view().expect("results phase has a view");
    assert_eq!(view.rows[0].record.store_name, "beta fasteners");
    assert_eq!(view.rows[2].record.store_name, "Gamma Metal");
}

#[tokio::test]
async fn session_server_failure_is_error_phase() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{BASE_PATH}/search")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut session = SearchSession::new();
    let phase = session.run(&client, "bolt").await.expect("query is valid");
    assert!(matches!(phase, SearchPhase::Error { .. }));
    assert!(session.view().is_none());
}

#[tokio::test]
async fn session_connection_failure_is_error_phase() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = SupplierSearchClient::new(&format!("{uri}{BASE_PATH}"), Some(2), "supsearch-test/0.1")
        .expect("failed to build test client");
    let mut session = SearchSession::new();
    let phase = session.run(&client, "bolt").await.expect("query is valid");
    assert!(matches!(phase, SearchPhase::Error { .. }));
}
