use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::DeliveryInput;
use super::pipeline::TriagePipeline;

/// Body accepted by the triage endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRequest {
    pub description: String,
    #[serde(default)]
    pub pickup: Option<String>,
    #[serde(default)]
    pub dropoff: Option<String>,
}

impl TriageRequest {
    pub fn into_input(self) -> DeliveryInput {
        DeliveryInput::with_route(
            self.description,
            self.pickup.as_deref(),
            self.dropoff.as_deref(),
        )
    }
}

/// Router builder exposing the triage pipeline over HTTP.
pub fn dispatch_router(pipeline: Arc<TriagePipeline>) -> Router {
    Router::new()
        .route("/ai/analyze", post(triage_handler))
        .route("/api/v1/dispatch/triage", post(triage_handler))
        .with_state(pipeline)
}

pub(crate) async fn triage_handler(
    State(pipeline): State<Arc<TriagePipeline>>,
    axum::Json(request): axum::Json<TriageRequest>,
) -> Response {
    let input = request.into_input();
    // the fallback classifier blocks on network I/O
    let outcome = tokio::task::spawn_blocking(move || pipeline.evaluate(&input)).await;

    match outcome {
        Ok(Ok(decision)) => (StatusCode::OK, axum::Json(decision.view())).into_response(),
        Ok(Err(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({ "error": format!("triage task failed: {join_error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
