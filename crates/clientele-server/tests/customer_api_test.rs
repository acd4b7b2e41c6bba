//! End-to-end tests of the customer endpoints: the real router served on
//! a local port over an in-memory SurrealDB.

use std::time::Duration;

use clientele_core::models::customer::Customer;
use clientele_db::{DbConfig, DbManager};
use clientele_server::{AppState, build_router};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serve the app on an ephemeral port and return the API base URL.
async fn spawn_app(db: DbConfig) -> String {
    let state = AppState::new(DbManager::new(db));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_router(state))
            .await
            .expect("serve")
    });
    format!("http://{addr}/api")
}

async fn spawn_mem_app() -> String {
    spawn_app(DbConfig::new("mem://")).await
}

fn jane() -> Value {
    json!({
        "name": "Jane Doe",
        "dateOfBirth": "1990-05-01",
        "memberNumber": 42,
        "interests": "reading"
    })
}

async fn create(client: &reqwest::Client, base: &str, body: &Value) -> reqwest::Response {
    client
        .post(format!("{base}/customer"))
        .json(body)
        .send()
        .await
        .expect("POST /customer")
}

async fn list(client: &reqwest::Client, base: &str) -> Vec<Customer> {
    let response = client
        .get(format!("{base}/customer"))
        .send()
        .await
        .expect("GET /customer");
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("customer array")
}

#[tokio::test]
async fn listing_without_customers_returns_empty_array() {
    let base = spawn_mem_app().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{base}/customer")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn duplicate_member_number_is_rejected_and_not_stored() {
    let base = spawn_mem_app().await;
    let client = reqwest::Client::new();

    let response = create(&client, &base, &jane()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["memberNumber"], 42);
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(created.get("createdAt").is_some());
    assert!(created.get("updatedAt").is_some());

    let duplicate = json!({
        "name": "John Roe",
        "dateOfBirth": "1985-01-01",
        "memberNumber": 42,
        "interests": "golf"
    });
    let response = create(&client, &base, &duplicate).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let all = list(&client, &base).await;
    assert_eq!(all.iter().filter(|c| c.member_number == 42).count(), 1);
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn created_customer_reads_back_equal() {
    let base = spawn_mem_app().await;
    let client = reqwest::Client::new();

    let created: Customer = create(&client, &base, &jane()).await.json().await.unwrap();

    let response = client
        .get(format!("{base}/customer/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = response.json().await.unwrap();

    assert_eq!(fetched["name"], "Jane Doe");
    assert_eq!(fetched["dateOfBirth"], "1990-05-01");
    assert_eq!(fetched["memberNumber"], 42);
    assert_eq!(fetched["interests"], "reading");
    assert_eq!(fetched["id"], created.id.to_string());

    let fetched: Customer = serde_json::from_value(fetched).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_changes_only_the_given_field() {
    let base = spawn_mem_app().await;
    let client = reqwest::Client::new();
    let created: Customer = create(&client, &base, &jane()).await.json().await.unwrap();

    let response = client
        .put(format!("{base}/customer/{}", created.id))
        .json(&json!({ "interests": "chess" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Customer = response.json().await.unwrap();

    assert_eq!(updated.interests, "chess");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.date_of_birth, created.date_of_birth);
    assert_eq!(updated.member_number, created.member_number);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn deleted_customer_is_gone() {
    let base = spawn_mem_app().await;
    let client = reqwest::Client::new();
    let created: Customer = create(&client, &base, &jane()).await.json().await.unwrap();

    let response = client
        .delete(format!("{base}/customer/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Customer deleted successfully" }));

    let response = client
        .get(format!("{base}/customer/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn unknown_ids_yield_not_found_body() {
    let base = spawn_mem_app().await;
    let client = reqwest::Client::new();
    let expected = json!({ "error": "Customer not found" });

    for id in [uuid::Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let url = format!("{base}/customer/{id}");

        let get = client.get(&url).send().await.unwrap();
        assert_eq!(get.status(), StatusCode::NOT_FOUND);
        assert_eq!(get.json::<Value>().await.unwrap(), expected);

        let put = client
            .put(&url)
            .json(&json!({ "interests": "chess" }))
            .send()
            .await
            .unwrap();
        assert_eq!(put.status(), StatusCode::NOT_FOUND);
        assert_eq!(put.json::<Value>().await.unwrap(), expected);

        let delete = client.delete(&url).send().await.unwrap();
        assert_eq!(delete.status(), StatusCode::NOT_FOUND);
        assert_eq!(delete.json::<Value>().await.unwrap(), expected);
    }
}

#[tokio::test]
async fn invalid_payloads_are_client_errors() {
    let base = spawn_mem_app().await;
    let client = reqwest::Client::new();

    let missing_member_number = json!({
        "name": "Jane Doe",
        "dateOfBirth": "1990-05-01",
        "interests": "reading"
    });
    let blank_name = json!({
        "name": "",
        "dateOfBirth": "1990-05-01",
        "memberNumber": 7,
        "interests": "reading"
    });
    let bad_date = json!({
        "name": "Jane Doe",
        "dateOfBirth": "yesterday",
        "memberNumber": 8,
        "interests": "reading"
    });

    for payload in [missing_member_number, blank_name, bad_date] {
        let response = create(&client, &base, &payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn unreachable_database_is_service_unavailable() {
    let mut db = DbConfig::new("unsupported://nowhere");
    db.connect_timeout = Duration::from_millis(200);
    let base = spawn_app(db).await;

    let response = reqwest::get(format!("{base}/customer")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Database unavailable");
}

#[tokio::test]
async fn health_check_does_not_need_the_database() {
    let base = spawn_app(DbConfig::new("unsupported://nowhere")).await;
    let root = base.trim_end_matches("/api");

    let response = reqwest::get(format!("{root}/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}
