//! HTTP endpoint handlers. These are thin wrappers that forward to the service layer.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument, warn};

use crate::domain::Question;
use crate::protocol::*;
use crate::service::{serve_question, stage_labels};
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorOut>);

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state), fields(stage = %q.stage))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuestionQuery>,
) -> Result<Json<Question>, ApiError> {
  match serve_question(&state, &q.stage, q.character.as_deref(), q.difficulty.as_deref()) {
    Ok(question) => Ok(Json(question)),
    Err(error) => {
      warn!(target: "question", stage = %q.stage, %error, "HTTP question rejected");
      Err((StatusCode::BAD_REQUEST, Json(ErrorOut { error })))
    }
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_stages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let stages: Vec<StageSummaryOut> = state.stages.iter().map(StageSummaryOut::from).collect();
  info!(target: "question", count = stages.len(), "HTTP stage list served");
  Json(stages)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_stage_labels(
  State(state): State<Arc<AppState>>,
  Path(stage_id): Path<String>,
) -> impl IntoResponse {
  let labels = stage_labels(&state, &stage_id);
  Json(LabelsOut { stage_id, labels })
}
