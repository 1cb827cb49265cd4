use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use motivation_catalyst::error::AppError;
use motivation_catalyst::workflows::assessment::{
    assessment_router, validate_answers, AnswerSheetImporter, AssessmentService, EventSink,
    FeedbackRepository, ScoredRespondent,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreSheetRequest {
    pub(crate) csv: String,
    /// Reject the sheet when any respondent skipped a question.
    #[serde(default)]
    pub(crate) require_complete: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreSheetResponse {
    pub(crate) total: usize,
    pub(crate) respondents: Vec<ScoredRespondent>,
}

pub(crate) fn with_assessment_routes<S, F>(service: Arc<AssessmentService<S, F>>) -> axum::Router
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessment/score-sheet",
            axum::routing::post(score_sheet_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_sheet_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ScoreSheetRequest>,
) -> Result<Json<ScoreSheetResponse>, AppError> {
    let ScoreSheetRequest {
        csv,
        require_complete,
    } = payload;

    let reader = Cursor::new(csv.into_bytes());
    let sheet = AnswerSheetImporter::from_reader(reader, &state.catalog)?;

    let mut respondents = Vec::with_capacity(sheet.len());
    for row in &sheet {
        if require_complete {
            validate_answers(&row.answers, &state.catalog)?;
        }
        respondents.push(row.score(&state.catalog));
    }

    Ok(Json(ScoreSheetResponse {
        total: respondents.len(),
        respondents,
    }))
}
