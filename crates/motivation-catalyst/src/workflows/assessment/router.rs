use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::Language;
use super::events::EventSink;
use super::feedback::{FeedbackError, FeedbackRepository, FeedbackSubmission};
use super::service::{
    AssessmentService, AssessmentServiceError, AssessmentSubmission, DemoRequest,
    InteractionRequest, ReportRequest,
};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuestionsQuery {
    pub(crate) lang: Option<String>,
}

/// Router builder exposing the questionnaire, scoring, report, and feedback endpoints.
pub fn assessment_router<S, F>(service: Arc<AssessmentService<S, F>>) -> Router
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessment/questions",
            get(questions_handler::<S, F>),
        )
        .route(
            "/api/v1/assessment/submissions",
            post(submit_handler::<S, F>),
        )
        .route("/api/v1/assessment/demo", post(demo_handler::<S, F>))
        .route("/api/v1/assessment/report", post(report_handler::<S, F>))
        .route(
            "/api/v1/assessment/feedback",
            post(feedback_handler::<S, F>),
        )
        .route(
            "/api/v1/assessment/interactions",
            post(interaction_handler::<S, F>),
        )
        .with_state(service)
}

pub(crate) async fn questions_handler<S, F>(
    State(service): State<Arc<AssessmentService<S, F>>>,
    Query(query): Query<QuestionsQuery>,
) -> Response
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    let language = match query.lang.as_deref() {
        None => None,
        Some(code) => match Language::from_code(code) {
            Some(language) => Some(language),
            None => {
                let payload = json!({
                    "error": format!("unsupported language '{code}' (expected 'he' or 'en')"),
                });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
    };

    let view = service.questions(language);
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn submit_handler<S, F>(
    State(service): State<Arc<AssessmentService<S, F>>>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    match service.submit(submission) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn demo_handler<S, F>(
    State(service): State<Arc<AssessmentService<S, F>>>,
    axum::Json(request): axum::Json<DemoRequest>,
) -> Response
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    match service.demo(request) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn report_handler<S, F>(
    State(service): State<Arc<AssessmentService<S, F>>>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    match service.report(request) {
        Ok(export) => (StatusCode::OK, axum::Json(export)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn feedback_handler<S, F>(
    State(service): State<Arc<AssessmentService<S, F>>>,
    axum::Json(submission): axum::Json<FeedbackSubmission>,
) -> Response
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    match service.record_feedback(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn interaction_handler<S, F>(
    State(service): State<Arc<AssessmentService<S, F>>>,
    axum::Json(request): axum::Json<InteractionRequest>,
) -> Response
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    match service.record_interaction(request) {
        Ok(()) => {
            let payload = json!({ "status": "recorded" });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Validation(_)
        | AssessmentServiceError::InvalidInteraction(_)
        | AssessmentServiceError::Feedback(
            FeedbackError::InvalidRating(_)
            | FeedbackError::CommentTooLong { .. }
            | FeedbackError::ResultsUnavailable,
        ) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Feedback(FeedbackError::Storage(_))
        | AssessmentServiceError::Content(_)
        | AssessmentServiceError::Session(_) => {
            error!(%error, "assessment request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
