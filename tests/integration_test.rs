//! Integration test: artifact load, HTTP routes, validation, end-to-end scoring with a linear model.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::path::Path;
use subscription_api::{
    api::{build_router, AppState},
    artifacts::ServingContext,
    config::{ArtifactsConfig, EncodingConfig, ServiceConfig},
    ArtifactError,
};
use tempfile::TempDir;
use tower::ServiceExt;

const SCHEMA: &str = r#"[
    "age", "balance", "campaign", "pdays", "previous",
    "campaign_intensity", "had_previous_contact",
    "job_admin.", "job_blue-collar", "job_retired",
    "marital_married", "marital_single",
    "education_university.degree", "education_basic.9y",
    "default_no", "housing_yes", "loan_no",
    "contact_cellular", "contact_telephone",
    "day_of_week_mon", "month_may", "month_oct",
    "poutcome_unknown", "poutcome_success",
    "age_group_young", "age_group_adult", "age_group_mid", "age_group_senior"
]"#;

const MODEL: &str = r#"{
    "intercept": -2.0,
    "coefficients": {
        "campaign": -0.1,
        "had_previous_contact": 0.8,
        "job_retired": 0.9,
        "contact_cellular": 0.6,
        "month_oct": 1.2,
        "poutcome_success": 2.0,
        "age_group_senior": 0.7
    }
}"#;

fn write_artifacts(dir: &Path, threshold: &str) -> ArtifactsConfig {
    std::fs::write(dir.join("feature_columns.json"), SCHEMA).unwrap();
    std::fs::write(dir.join("model.json"), MODEL).unwrap();
    std::fs::write(dir.join("business_threshold.json"), threshold).unwrap();
    ArtifactsConfig {
        model_path: dir.join("model.json"),
        schema_path: dir.join("feature_columns.json"),
        threshold_path: dir.join("business_threshold.json"),
    }
}

fn app(threshold: &str) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = write_artifacts(dir.path(), threshold);
    let ctx = ServingContext::load(&artifacts, &EncodingConfig::default()).unwrap();
    (build_router(AppState::new(ctx)), dir)
}

fn sample_input() -> Value {
    json!({
        "age": 35,
        "job": "admin.",
        "marital": "married",
        "education": "university.degree",
        "default": "no",
        "balance": 1200,
        "housing": "yes",
        "loan": "no",
        "contact": "cellular",
        "day_of_week": "mon",
        "month": "may",
        "campaign": 1,
        "pdays": 999,
        "previous": 0,
        "poutcome": "unknown"
    })
}

async fn post_predict(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[test]
fn config_load_default() {
    let c = ServiceConfig::load(Path::new("nonexistent.json")).unwrap();
    assert_eq!(c.artifacts.threshold_path, Path::new("models/business_threshold.json"));
    assert_eq!(c.encoding.separator, "_");
}

#[test]
fn missing_artifacts_refuse_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = ArtifactsConfig {
        model_path: dir.path().join("gb_model.onnx"),
        schema_path: dir.path().join("feature_columns.json"),
        threshold_path: dir.path().join("business_threshold.json"),
    };
    let err = ServingContext::load(&artifacts, &EncodingConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, ArtifactError::Io { .. }));
}

#[tokio::test]
async fn health_check() {
    let (app, _dir) = app("0.5");
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "API is running"}));
}

#[tokio::test]
async fn prediction_endpoint() {
    let (app, _dir) = app("0.5");
    let (status, result) = post_predict(app, sample_input().to_string()).await;
    assert_eq!(status, StatusCode::OK);

    assert!(result["prediction"].is_u64());
    assert!(result["subscription_probability"].is_f64());
    let prediction = result["prediction"].as_u64().unwrap();
    let probability = result["subscription_probability"].as_f64().unwrap();
    assert!(prediction == 0 || prediction == 1);
    assert!((0.0..=1.0).contains(&probability));
    let decision = result["business_decision"].as_str().unwrap();
    assert!(["Target Customer", "Do Not Target"].contains(&decision));

    // sigmoid(-2.0 - 0.1 + 0.6) = 0.1824
    assert_eq!(probability, 0.1824);
    assert_eq!(prediction, 0);
    assert_eq!(decision, "Do Not Target");
}

#[tokio::test]
async fn low_threshold_targets_customer() {
    let (app, _dir) = app("0.15");
    let (status, result) = post_predict(app, sample_input().to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["prediction"], 1);
    assert_eq!(result["business_decision"], "Target Customer");
}

#[tokio::test]
async fn promising_customer_is_targeted() {
    let (app, _dir) = app("0.5");
    let mut input = sample_input();
    input["age"] = json!(67);
    input["job"] = json!("retired");
    input["month"] = json!("oct");
    input["previous"] = json!(2);
    input["poutcome"] = json!("success");

    let (status, result) = post_predict(app, input.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["prediction"], 1);
    assert_eq!(result["business_decision"], "Target Customer");
}

#[tokio::test]
async fn unseen_categories_still_score() {
    let (app, _dir) = app("0.5");
    let mut input = sample_input();
    input["job"] = json!("astronaut");
    input["contact"] = json!("carrier pigeon");
    input["age"] = json!(120);

    let (status, result) = post_predict(app, input.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    // sigmoid(-2.0 - 0.1) = 0.1091
    assert_eq!(result["subscription_probability"], 0.1091);
}

#[tokio::test]
async fn numeric_string_age_is_coerced() {
    let (app, _dir) = app("0.5");
    let mut input = sample_input();
    input["age"] = json!("35");
    input["campaign"] = json!(1.0);

    let (status, result) = post_predict(app, input.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["subscription_probability"], 0.1824);
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let (app, _dir) = app("0.5");
    let mut input = sample_input();
    input.as_object_mut().unwrap().remove("age");

    let (status, body) = post_predict(app, input.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["details"],
        json!([{"field": "age", "reason": "field required"}])
    );
    assert!(body.get("prediction").is_none());
}

#[tokio::test]
async fn wrong_types_are_reported_per_field() {
    let (app, _dir) = app("0.5");
    let mut input = sample_input();
    input["age"] = json!("thirty-five");
    input["loan"] = json!(false);

    let (status, body) = post_predict(app, input.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["age", "loan"]);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (app, _dir) = app("0.5");
    let (status, body) = post_predict(app, "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MALFORMED_BODY");
}
