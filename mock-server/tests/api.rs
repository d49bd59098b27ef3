use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_config, Item, ServerConfig};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- info ---

#[tokio::test]
async fn health_reports_item_count() {
    let resp = app().oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["items_count"], 3);
    assert_eq!(body["environment"], "development");
}

#[tokio::test]
async fn root_describes_api() {
    let resp = app().oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Item Management API");
    assert_eq!(body["health"], "/health");
}

// --- list ---

#[tokio::test]
async fn list_items_returns_seed_in_order() {
    let resp = app().oneshot(empty_request("GET", "/items")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<Item> = body_json(resp).await;
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, ["Apple", "Banana", "Orange"]);
}

// --- create ---

#[tokio::test]
async fn create_item_returns_201_with_next_id() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"name":"Test Item","quantity":10}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Item = body_json(resp).await;
    assert_eq!(item.id, 4);
    assert_eq!(item.name, "Test Item");
    assert_eq!(item.quantity, 10);
}

#[tokio::test]
async fn create_item_empty_name_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"name":"","quantity":10}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn create_item_negative_quantity_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"name":"Test","quantity":-1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_item_not_found_has_detail() {
    let resp = app()
        .oneshot(empty_request("GET", "/items/99999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "Item with id 99999 not found");
}

#[tokio::test]
async fn get_item_non_numeric_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/items/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_item_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/items/99999", r#"{"name":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_item_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/items/99999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- cors ---

#[tokio::test]
async fn preflight_allows_known_origin() {
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/items")
        .header(http::header::ORIGIN, "http://localhost:3000")
        .header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(http::header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(
        headers[http::header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    let methods = headers[http::header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    for method in ["GET", "POST", "PUT", "DELETE"] {
        assert!(methods.contains(method), "missing {method} in {methods}");
    }
}

#[tokio::test]
async fn unknown_origin_gets_no_allow_header() {
    let req = Request::builder()
        .uri("/items")
        .header(http::header::ORIGIN, "http://evil.example")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert!(resp
        .headers()
        .get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn wildcard_origin_allows_any_origin() {
    let config = ServerConfig {
        allowed_origins: vec!["*".to_string()],
        ..ServerConfig::default()
    };
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/items")
        .header(http::header::ORIGIN, "http://anywhere.example")
        .header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(String::new())
        .unwrap();
    let resp = app_with_config(&config).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/items", r#"{"name":"Kiwi","quantity":5}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Item = body_json(resp).await;
    let id = created.id;

    // list — seed plus the new item, appended last
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/items"))
        .await
        .unwrap();
    let items: Vec<Item> = body_json(resp).await;
    assert_eq!(items.len(), 4);
    assert_eq!(items[3], created);

    // update — partial: only name
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/items/{id}"), r#"{"name":"Gold Kiwi"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Item = body_json(resp).await;
    assert_eq!(updated.name, "Gold Kiwi");
    assert_eq!(updated.quantity, 5); // unchanged

    // update — full
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/items/{id}"),
            r#"{"name":"Kiwi","quantity":20}"#,
        ))
        .await
        .unwrap();
    let updated: Item = body_json(resp).await;
    assert_eq!(updated.name, "Kiwi");
    assert_eq!(updated.quantity, 20);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/items/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/items/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
