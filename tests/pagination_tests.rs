//! Integration tests for paged document queries.

use cosmosdb_api::clients::{headers, RetryPolicy};
use cosmosdb_api::rest::QueryWithParameters;
use cosmosdb_api::{CosmosClient, CosmosConfig, EndpointUrl, MasterKey};
use serde::Deserialize;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCS_PATH: &str = "/dbs/shop/colls/orders/docs/";

#[derive(Debug, Deserialize, PartialEq)]
struct Order {
    id: String,
    total: u32,
}

fn client(uri: &str) -> CosmosClient {
    let config = CosmosConfig::builder()
        .endpoint(EndpointUrl::new(uri).unwrap())
        .master_key(MasterKey::new("YXJpZWwNCg==").unwrap())
        .retry(RetryPolicy::no_retry())
        .build()
        .unwrap();
    CosmosClient::new(config).unwrap()
}

fn page(orders: serde_json::Value) -> serde_json::Value {
    let count = orders.as_array().map_or(0, Vec::len);
    json!({"_rid": "d9RzAJRFKgw=", "Documents": orders, "_count": count})
}

// ============================================================================
// Paging
// ============================================================================

#[tokio::test]
async fn test_two_pages_follow_continuation() {
    let server = MockServer::start().await;
    let query = QueryWithParameters::new("SELECT * FROM c WHERE c.total > @min").parameter("@min", 5);

    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .and(header(headers::MAX_ITEM_COUNT, "1"))
        .and(header(headers::IS_QUERY, "true"))
        .and(body_json(json!({
            "query": "SELECT * FROM c WHERE c.total > @min",
            "parameters": [{"name": "@min", "value": 5}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(headers::CONTINUATION, "page-2-token")
                .insert_header(headers::SESSION_TOKEN, "0:7")
                .set_body_json(page(json!([{"id": "a", "total": 10}]))),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .and(header(headers::MAX_ITEM_COUNT, "1"))
        .and(header(headers::CONTINUATION, "page-2-token"))
        .and(header(headers::SESSION_TOKEN, "0:7"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(headers::SESSION_TOKEN, "0:8")
                .set_body_json(page(json!([{"id": "b", "total": 20}]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let mut pages = client.pageable_query::<Order>("dbs/shop/colls/orders", query, 1);
    let mut orders = Vec::new();

    assert!(pages.has_more());
    assert_ok!(pages.next(&mut orders).await);
    assert_eq!(orders, vec![Order { id: "a".into(), total: 10 }]);
    assert_eq!(pages.offset(), 1);
    assert_eq!(pages.continuation(), Some("page-2-token"));
    assert_eq!(pages.session_token(), Some("0:7"));
    assert!(pages.has_more());

    assert_ok!(pages.next(&mut orders).await);
    assert_eq!(orders, vec![Order { id: "b".into(), total: 20 }]);
    assert_eq!(pages.offset(), 2);
    assert_eq!(pages.continuation(), None);
    // The session token of the first page is kept.
    assert_eq!(pages.session_token(), Some("0:7"));
    assert!(!pages.has_more());
}

#[tokio::test]
async fn test_failed_page_does_not_advance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "BadRequest",
            "message": "Syntax error, incorrect syntax near 'SELEC'."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let mut pages = client.pageable_query::<Order>("dbs/shop/colls/orders", "SELEC * FROM c", 10);
    let mut orders = vec![Order { id: "kept".into(), total: 1 }];

    let error = assert_err!(pages.next(&mut orders).await);
    assert_eq!(error.status_code(), Some(400));
    assert_eq!(pages.offset(), 0);
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "kept");
}

#[tokio::test]
async fn test_empty_last_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DOCS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let mut pages = client.pageable_query::<Order>("dbs/shop/colls/orders", "SELECT * FROM c", 10);
    let mut orders = vec![Order { id: "stale".into(), total: 1 }];

    assert_ok!(pages.next(&mut orders).await);
    assert!(orders.is_empty());
    assert!(!pages.has_more());
}
