mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use cadence_api::api::{create_router, AppState};
use common::{recommender, seed_metadata, StubLookup};

fn create_test_server() -> TestServer {
    let state = AppState::new(recommender(), Arc::new(StubLookup::new()));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn titles(recommendations: &Value) -> Vec<String> {
    recommendations
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server();
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_model_info() {
    let server = create_test_server();
    let response = server.get("/api/v1/model").await;
    response.assert_status_ok();

    let info: Value = response.json();
    assert_eq!(info["cluster_count"], 3);
    assert_eq!(info["catalog_size"], 6);
    assert_eq!(info["feature_columns"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn test_recommend_end_to_end() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "metadata": seed_metadata(),
            "genres": ["pop rock"],
            "limit": 10
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["cluster"], 2);
    assert_eq!(
        titles(&body["recommendations"]),
        vec!["Ninety", "Seventy", "Sixty"]
    );

    let popularity: Vec<u64> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["popularity"].as_u64().unwrap())
        .collect();
    assert_eq!(popularity, vec![90, 70, 60]);
}

#[tokio::test]
async fn test_recommend_explicit_exclude_title() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "metadata": seed_metadata(),
            "genres": ["pop rock"],
            "exclude_title": "Ninety",
            "limit": 2
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    // The seed's own title is only excluded by default
    assert_eq!(titles(&body["recommendations"]), vec!["X", "Seventy"]);
}

#[tokio::test]
async fn test_recommend_missing_field() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "metadata": {
                "title": "X",
                "artist": "Y",
                "release_date": "1999-01-01",
                "duration_ms": 200000,
                "explicit": false
            }
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("popularity"));
}

#[tokio::test]
async fn test_recommend_malformed_date() {
    let server = create_test_server();

    let mut metadata = seed_metadata();
    metadata.release_date = Some("99".to_string());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "metadata": metadata }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Malformed release date"));
}

#[tokio::test]
async fn test_track_search() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/tracks/search?title=X&artist=Y")
        .await;
    response.assert_status_ok();
    let tracks: Vec<Value> = response.json();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0]["track_id"], "track-x");

    let response = server
        .get("/api/v1/tracks/search?title=X&artist=")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_flow() {
    let server = create_test_server();

    // Create
    let response = server.post("/api/v1/sessions").await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["state"], "search");
    let id = created["id"].as_str().unwrap().to_string();

    // Selecting before searching is not allowed
    let response = server
        .post(&format!("/api/v1/sessions/{}/select", id))
        .json(&json!({ "index": 0 }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Search
    let response = server
        .post(&format!("/api/v1/sessions/{}/search", id))
        .json(&json!({ "title": "X", "artist": "Y" }))
        .await;
    response.assert_status_ok();
    let selection: Value = response.json();
    assert_eq!(selection["state"], "selection");
    assert_eq!(selection["candidates"].as_array().unwrap().len(), 2);

    // Select the seed
    let response = server
        .post(&format!("/api/v1/sessions/{}/select", id))
        .json(&json!({ "index": 0, "enrich": true }))
        .await;
    response.assert_status_ok();
    let recommendation: Value = response.json();
    assert_eq!(recommendation["state"], "recommendation");
    assert_eq!(recommendation["cluster"], 2);
    assert_eq!(recommendation["selected"]["title"], "X");
    assert_eq!(
        titles(&recommendation["recommendations"]),
        vec!["Ninety", "Seventy", "Sixty"]
    );
    // The stub resolves every lookup to its first candidate
    assert_eq!(
        recommendation["recommendations"][0]["external_url"],
        "https://open/x"
    );

    // State persists between requests
    let response = server.get(&format!("/api/v1/sessions/{}", id)).await;
    response.assert_status_ok();
    let current: Value = response.json();
    assert_eq!(current["state"], "recommendation");

    // Back to selection
    let response = server
        .post(&format!("/api/v1/sessions/{}/back", id))
        .await;
    response.assert_status_ok();
    let back: Value = response.json();
    assert_eq!(back["state"], "selection");
}

#[tokio::test]
async fn test_session_search_without_results() {
    let server = create_test_server();
    let created: Value = server.post("/api/v1/sessions").await.json();
    let id = created["id"].as_str().unwrap();

    let response = server
        .post(&format!("/api/v1/sessions/{}/search", id))
        .json(&json!({ "title": "nothing", "artist": "nobody" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let current: Value = server.get(&format!("/api/v1/sessions/{}", id)).await.json();
    assert_eq!(current["state"], "search");
}

#[tokio::test]
async fn test_session_select_out_of_range() {
    let server = create_test_server();
    let created: Value = server.post("/api/v1/sessions").await.json();
    let id = created["id"].as_str().unwrap();

    server
        .post(&format!("/api/v1/sessions/{}/search", id))
        .json(&json!({ "title": "X", "artist": "Y" }))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/v1/sessions/{}/select", id))
        .json(&json!({ "index": 7 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_session() {
    let server = create_test_server();
    let response = server
        .get(&format!("/api/v1/sessions/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_session_is_gone() {
    let server = create_test_server();
    let created: Value = server.post("/api/v1/sessions").await.json();
    let id = created["id"].as_str().unwrap().to_string();

    let response = server.delete(&format!("/api/v1/sessions/{}", id)).await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/v1/sessions/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.delete(&format!("/api/v1/sessions/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}
