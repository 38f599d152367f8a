//! Integration tests for request construction.
//!
//! These tests verify link parsing, signing and option application on a
//! `ResourceRequest` without sending anything.

use chrono::{TimeZone, Utc};
use cosmosdb_api::auth::{authorization_token, http_date};
use cosmosdb_api::clients::{
    headers, CallOption, ConsistencyLevel, CosmosError, HttpMethod, ParseError, PartitionKey,
    ResourceRequest,
};
use cosmosdb_api::{ApiVersion, CosmosConfig, EndpointUrl, MasterKey};

const ENDPOINT: &str = "https://localhost:8081";

fn config() -> CosmosConfig {
    CosmosConfig::builder()
        .endpoint(EndpointUrl::new(ENDPOINT).unwrap())
        .master_key(MasterKey::new("YXJpZWwNCg==").unwrap())
        .build()
        .unwrap()
}

fn request(link: &str) -> ResourceRequest {
    ResourceRequest::new(HttpMethod::Get, ENDPOINT, link)
}

// ============================================================================
// Signing
// ============================================================================

#[test]
fn test_known_signature() {
    let key = MasterKey::new("YXJpZWwNCg==").unwrap();
    let token = authorization_token(&key, "GET", "dbs", "dbs/mydb", "Mon, 02 Jan 2006 15:04:05 GMT").unwrap();
    assert_eq!(
        token,
        "type%3Dmaster%26ver%3D1.0%26sig%3D5IxGgkd8v7vbWT3sWOzuqenNawk8XrP30zY7%2BpDqL5w%3D"
    );
}

#[test]
fn test_empty_options_still_sign() {
    let mut request = request("dbs/mydb");
    request.apply_options(&config(), &[] as &[CallOption]).unwrap();

    assert!(!request.header(headers::AUTHORIZATION).unwrap().is_empty());
    assert!(request.header(headers::DATE).unwrap().ends_with(" GMT"));
    assert_eq!(request.header(headers::VERSION), Some(ApiVersion::latest().to_string().as_str()));
    assert!(request.header(headers::USER_AGENT).unwrap().starts_with("cosmosdb-api-rust/"));
}

#[test]
fn test_fixed_clock_signature_is_deterministic() {
    let now = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
    let key = MasterKey::new("YXJpZWwNCg==").unwrap();

    let mut first = request("/dbs/mydb/");
    first.default_headers_at(&key, &ApiVersion::latest(), "test", now).unwrap();
    let mut second = request("dbs/mydb");
    second.default_headers_at(&key, &ApiVersion::latest(), "test", now).unwrap();

    assert_eq!(first.header(headers::DATE), Some(http_date(now).as_str()));
    assert_eq!(first.header(headers::AUTHORIZATION), second.header(headers::AUTHORIZATION));
    assert_eq!(
        first.header(headers::AUTHORIZATION),
        Some("type%3Dmaster%26ver%3D1.0%26sig%3D5IxGgkd8v7vbWT3sWOzuqenNawk8XrP30zY7%2BpDqL5w%3D")
    );
}

#[test]
fn test_feed_requests_sign_with_parent_link() {
    let now = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
    let key = MasterKey::new("YXJpZWwNCg==").unwrap();

    let mut request = ResourceRequest::new(HttpMethod::Post, ENDPOINT, "dbs/mydb/colls/");
    assert_eq!(request.link.link(), "dbs/mydb");
    assert_eq!(request.link.resource_type(), "colls");
    assert_eq!(request.link.id(), "");

    request.default_headers_at(&key, &ApiVersion::latest(), "test", now).unwrap();
    let expected = authorization_token(&key, "POST", "colls", "dbs/mydb", &http_date(now)).unwrap();
    assert_eq!(request.header(headers::AUTHORIZATION), Some(expected.as_str()));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_partition_key_header() {
    let mut request = request("dbs/db/colls/c/docs/d");
    request
        .apply_options(&config(), &[CallOption::PartitionKey(PartitionKey::from("abc"))])
        .unwrap();
    assert_eq!(request.header(headers::PARTITION_KEY), Some(r#"["abc"]"#));
}

#[test]
fn test_set_options_are_idempotent() {
    let mut request = request("dbs/db/colls/c/docs/");
    request
        .apply_options(&config(), &[CallOption::Limit(100), CallOption::Limit(100)])
        .unwrap();
    assert_eq!(request.header_values(headers::MAX_ITEM_COUNT), vec!["100"]);
}

#[test]
fn test_later_set_option_overrides_earlier() {
    let mut request = request("dbs/db");
    request
        .apply_options(
            &config(),
            &[
                CallOption::ConsistencyLevel(ConsistencyLevel::Strong),
                CallOption::ConsistencyLevel(ConsistencyLevel::Eventual),
            ],
        )
        .unwrap();
    assert_eq!(request.header_values(headers::CONSISTENCY_LEVEL), vec!["Eventual"]);
}

#[test]
fn test_add_options_accumulate() {
    let mut request = request("dbs/db/colls/c/docs/");
    request
        .apply_options(&config(), &[CallOption::QueryVersion, CallOption::QueryVersion])
        .unwrap();
    assert_eq!(request.header_values(headers::QUERY_VERSION), vec!["1.0", "1.0"]);
}

#[test]
fn test_missing_options_are_skipped() {
    let upsert = CallOption::Upsert;
    let options: [Option<&CallOption>; 3] = [None, Some(&upsert), None];

    let mut request = request("dbs/db/colls/c/docs/");
    request.apply_options(&config(), options).unwrap();
    assert_eq!(request.header(headers::UPSERT), Some("true"));
}

#[test]
fn test_first_failing_option_stops_the_pipeline() {
    let mut request = request("dbs/db/colls/c/docs/");
    let result = request.apply_options(
        &config(),
        &[
            CallOption::Limit(10),
            CallOption::SessionToken("bad\ntoken".to_string()),
            CallOption::Upsert,
        ],
    );

    assert!(matches!(
        result,
        Err(CosmosError::Parse(ParseError::InvalidHeaderValue { name })) if name == headers::SESSION_TOKEN
    ));
    assert_eq!(request.header(headers::MAX_ITEM_COUNT), Some("10"));
    assert_eq!(request.header(headers::UPSERT), None);
}

#[test]
fn test_empty_tokens_are_ignored() {
    let mut request = request("dbs/db/colls/c/docs/");
    request
        .apply_options(
            &config(),
            &[
                CallOption::Continuation(String::new()),
                CallOption::SessionToken(String::new()),
            ],
        )
        .unwrap();
    assert_eq!(request.header(headers::CONTINUATION), None);
    assert_eq!(request.header(headers::SESSION_TOKEN), None);
}

#[test]
fn test_query_headers() {
    let mut request = ResourceRequest::new(HttpMethod::Post, ENDPOINT, "dbs/db/colls/c/docs/");
    request.apply_options(&config(), &[CallOption::CrossPartition]).unwrap();
    request.query_headers().unwrap();

    assert_eq!(request.header(headers::CONTENT_TYPE), Some("application/query+json"));
    assert_eq!(request.header(headers::IS_QUERY), Some("true"));
    assert_eq!(request.header(headers::QUERY_VERSION), Some("1.0"));
    assert_eq!(request.header(headers::ENABLE_CROSS_PARTITION), Some("true"));
}

#[test]
fn test_curl_masks_authorization() {
    let mut request = request("dbs/db");
    request.apply_options(&config(), &[] as &[CallOption]).unwrap();

    let curl = request.to_curl(false);
    assert!(curl.starts_with("curl -X GET 'https://localhost:8081/dbs/db'"));
    assert!(curl.contains("authorization: *****"));
    assert!(request.to_curl(true).contains("type%3Dmaster"));
}
