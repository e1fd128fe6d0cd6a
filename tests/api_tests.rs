//! HTTP API tests driving the router in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use food_quality::config::QualityConfig;
use food_quality::db::store::Store;
use food_quality::quality::FoodItemRecord;
use food_quality::server::{router, AppState};
use food_quality::service::QualityService;

async fn app_with(items: Vec<Value>) -> Router {
    let store = Store::new(":memory:").await.expect("should create store");
    for item in items {
        let record: FoodItemRecord = serde_json::from_value(item).expect("valid record");
        store.insert_food_item(&record).await.expect("should insert");
    }
    router(AppState::new(QualityService::new(store, QualityConfig::default())))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request should complete");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&body).expect("body should be JSON");
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn sample_items() -> Vec<Value> {
    vec![
        json!({
            "id": "kibble-1",
            "name": "Turkey & Oat",
            "brand": "Fieldstone",
            "barcode": "0012345678905",
            "nutritional_info": {
                "calories_per_100g": 360,
                "protein_percentage": 26,
                "fat_percentage": 15,
                "fiber_percentage": 4,
                "moisture_percentage": 10,
                "ingredients": ["turkey", "oats", "barley", "turkey fat", "pumpkin", "flaxseed"],
                "allergens": ["turkey"]
            }
        }),
        json!({"id": "bare-1", "name": "Plain Chews"}),
    ]
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app_with(vec![]).await;
    let (status, body) = send(app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn single_item_quality() {
    let app = app_with(sample_items()).await;
    let (status, body) = send(app, get("/api/food-items/kibble-1/quality")).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["food_item_id"], "kibble-1");
    assert_eq!(data["food_name"], "Turkey & Oat");
    assert_eq!(data["brand"], "Fieldstone");
    assert_eq!(data["quality_level"], "excellent");
    assert!(data["overall_score"].as_f64().unwrap() <= 1.0);
    assert!(data["breakdown"]["nutritional_score"].is_number());
}

#[tokio::test]
async fn unknown_item_is_404_envelope() {
    let app = app_with(vec![]).await;
    let (status, body) = send(app, get("/api/food-items/missing/quality")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Food item not found: missing");
}

#[tokio::test]
async fn batch_quality() {
    let app = app_with(sample_items()).await;
    let request = post_json(
        "/api/food-items/quality/batch",
        json!({"food_item_ids": ["bare-1", "kibble-1", "gone"]}),
    );
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_assessed"], 2);
    assert_eq!(body["data"]["results"][0]["food_item_id"], "bare-1");
    assert_eq!(body["data"]["results"][0]["quality_level"], "poor");
    assert_eq!(body["data"]["not_found"], json!(["gone"]));
}

#[tokio::test]
async fn oversized_batch_is_400() {
    let app = app_with(vec![]).await;
    let ids: Vec<String> = (0..60).map(|i| format!("id-{i}")).collect();
    let request = post_json("/api/food-items/quality/batch", json!({ "food_item_ids": ids }));
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn malformed_batch_body_is_400_envelope() {
    let app = app_with(vec![]).await;
    let request = post_json("/api/food-items/quality/batch", json!({"ids": "nope"}));
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn statistics_overview() {
    let app = app_with(sample_items()).await;
    let (status, body) = send(app, get("/api/quality/statistics?sample_size=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_assessed"], 2);
    assert_eq!(body["data"]["level_distribution"]["excellent"], 1);
    assert_eq!(body["data"]["level_distribution"]["poor"], 1);
}

#[tokio::test]
async fn low_quality_listing() {
    let app = app_with(sample_items()).await;
    let (status, body) = send(app, get("/api/quality/low-quality?threshold=0.6&limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["food_item_id"], "bare-1");
}

#[tokio::test]
async fn low_quality_bad_threshold_is_400() {
    let app = app_with(vec![]).await;
    let (status, body) = send(app, get("/api/quality/low-quality?threshold=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("between 0 and 1"));
}

#[tokio::test]
async fn assess_posted_record() {
    let app = app_with(vec![]).await;
    let request = post_json(
        "/api/quality/assess",
        json!({"name": "Inline", "nutritional_info": {"calories_per_100g": 300}}),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quality_level"], "poor");
    assert_eq!(body["data"]["nutritional_fields_count"], 1);
    assert_eq!(
        body["data"]["recommendations"][0],
        "Add ingredient list for better product transparency"
    );
}

#[tokio::test]
async fn assess_posted_record_with_unusual_values() {
    let app = app_with(vec![]).await;
    let request = post_json(
        "/api/quality/assess",
        json!({
            "name": "Odd Label",
            "nutritional_info": {
                "calories_per_100g": 300,
                "ash_percentage": true,
                "sodium_percentage": {"value": 0.2},
                "ingredients": ["chicken", null, "rice"]
            }
        }),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["nutritional_fields_count"], 3);
    assert_eq!(body["data"]["ingredients_count"], 2);
}
