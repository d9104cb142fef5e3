use crate::api::AppState;
use crate::decision::PredictionResult;
use crate::error::{AppError, Result};
use crate::features::CustomerRecord;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Liveness probe. Does not touch the loaded artifacts.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "API is running".to_string(),
    })
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Score one customer
pub async fn predict_subscription(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResult>> {
    let Json(body) = payload.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
    let record = CustomerRecord::from_json(body)?;

    let request_id = Uuid::new_v4();
    let result = state.context.predict(record)?;

    tracing::debug!(
        %request_id,
        probability = result.probability,
        decision = result.decision.label(),
        "prediction served"
    );

    Ok(Json(result))
}
