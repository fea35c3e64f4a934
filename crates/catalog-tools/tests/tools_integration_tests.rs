//! End-to-end tests for object resolution and column extraction against a
//! wiremock catalog.

use edc_catalog_client::{class_types, CatalogClient, ClientConfig, ClientError};
use edc_catalog_tools::{CatalogTools, ColumnExtraction, ToolsError};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/access/2/catalog/data/search";

fn test_tools(server: &MockServer) -> CatalogTools {
    let config = ClientConfig::builder(server.uri())
        .timeout(Duration::from_secs(5))
        .max_retries(1)
        .retry_initial_delay(Duration::from_millis(10))
        .retry_max_delay(Duration::from_millis(50))
        .build()
        .unwrap();
    CatalogTools::new(CatalogClient::new(config).unwrap())
}

fn hit(id: &str, name: &str, class_type: &str) -> Value {
    json!({
        "id": id,
        "values": [
            {"attributeId": "core.name", "value": name},
            {"attributeId": "core.classType", "value": class_type}
        ]
    })
}

async fn mount_page(server: &MockServer, offset: &str, hits: Vec<Value>, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", "Orders"))
        .and(query_param("offset", offset))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": hits })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_object_match_at_position_seven() {
    let server = MockServer::start().await;

    let first_page = vec![
        hit("resource://DW/SALES/ORDERS_ARCHIVE", "ORDERS_ARCHIVE", class_types::TABLE),
        hit("resource://DW/SALES/V_ORDERS", "ORDERS", class_types::VIEW),
        hit("resource://DW/SALES/ORDER_LINES/ORDERS", "ORDERS", class_types::COLUMN),
        hit("resource://DW/STAGE/ORDERS_TMP", "ORDERS_TMP", class_types::TABLE),
        hit("resource://DW/SALES/ORDER_ITEMS", "ORDER_ITEMS", class_types::TABLE),
    ];
    let second_page = vec![
        hit("resource://DW/SALES/ORDERS_2019", "ORDERS_2019", class_types::TABLE),
        hit("resource://DW/SALES/ORDERS", "ORDERS", class_types::TABLE),
        hit("resource://DW/OTHER/ORDERS", "ORDERS", class_types::TABLE),
    ];

    mount_page(&server, "0", first_page, 1).await;
    mount_page(&server, "5", second_page, 1).await;
    mount_page(&server, "8", Vec::new(), 0).await;

    let tools = test_tools(&server);
    let found = tools
        .search_object("Orders", class_types::TABLE)
        .await
        .unwrap();

    assert_eq!(found.as_deref(), Some("resource://DW/SALES/ORDERS"));
}

#[tokio::test]
async fn test_search_object_not_found() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "0",
        vec![hit("resource://DW/SALES/V_ORDERS", "ORDERS", class_types::VIEW)],
        1,
    )
    .await;
    mount_page(&server, "1", Vec::new(), 1).await;

    let tools = test_tools(&server);
    let found = tools
        .search_object("Orders", class_types::TABLE)
        .await
        .unwrap();

    assert_eq!(found, None);
}

#[tokio::test]
async fn test_search_object_propagates_transport_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let tools = test_tools(&server);
    let err = tools
        .search_object("Orders", class_types::TABLE)
        .await
        .unwrap_err();

    assert!(matches!(err, ToolsError::Client(ClientError::Unauthorized(_))));
}

#[tokio::test]
async fn test_extract_table_columns_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/access/2/catalog/data/objects/resource~3A~2F~2FDW~2FSALES~2FORDERS",
        ))
        .and(query_param("includeRefObjects", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "resource://DW/SALES/ORDERS",
            "facts": [
                {"attributeId": "core.name", "value": "ORDERS"},
                {"attributeId": "core.classType", "value": class_types::TABLE}
            ],
            "dstLinks": [
                {"classType": class_types::COLUMN, "name": "ORDER_ID"},
                {"classType": class_types::COLUMN, "name": "AMOUNT"},
                {"classType": "com.infa.ldm.relational.Schema", "name": "SALES"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tools = test_tools(&server);
    let result = tools
        .extract_table_columns("resource://DW/SALES/ORDERS")
        .await
        .unwrap();

    assert_eq!(
        result,
        ColumnExtraction::Columns(vec!["AMOUNT".to_string(), "ORDER_ID".to_string()])
    );
}
