use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::domain::{AnswerSet, Language, RespondentDetails};
use crate::workflows::assessment::events::{EventError, EventSink, TelemetryEvent};
use crate::workflows::assessment::feedback::{FeedbackError, FeedbackRecord, FeedbackRepository};
use crate::workflows::assessment::{
    assessment_router, AssessmentService, AssessmentSession, InMemoryEventSink, NarrativeTable,
    QuestionCatalog,
};

pub(super) const APP_ID: &str = "motivation-catalyst-test";

pub(super) fn respondent() -> RespondentDetails {
    RespondentDetails {
        employee_name: "Dana Levi".to_string(),
        employee_email: "dana@example.com".to_string(),
        manager_name: "Avi Cohen".to_string(),
        manager_email: "avi@example.com".to_string(),
    }
}

/// Every catalog question answered with the same rating.
pub(super) fn uniform_answers(rating: u8) -> AnswerSet {
    QuestionCatalog::standard()
        .questions()
        .iter()
        .map(|question| (question.id, rating))
        .collect()
}

pub(super) fn build_service() -> (
    AssessmentService<InMemoryEventSink, MemoryFeedback>,
    Arc<InMemoryEventSink>,
    Arc<MemoryFeedback>,
) {
    let sink = Arc::new(InMemoryEventSink::default());
    let feedback = Arc::new(MemoryFeedback::default());
    let service = AssessmentService::new(
        Arc::new(QuestionCatalog::standard()),
        Arc::new(NarrativeTable::standard()),
        APP_ID,
        Language::En,
        sink.clone(),
        feedback.clone(),
    );
    (service, sink, feedback)
}

pub(super) fn session() -> (AssessmentSession<InMemoryEventSink>, Arc<InMemoryEventSink>) {
    let sink = Arc::new(InMemoryEventSink::default());
    let session = AssessmentSession::new(
        Arc::new(QuestionCatalog::standard()),
        Arc::new(NarrativeTable::standard()),
        sink.clone(),
        APP_ID,
        Language::En,
    );
    (session, sink)
}

#[derive(Default, Clone)]
pub(super) struct MemoryFeedback {
    records: Arc<Mutex<Vec<FeedbackRecord>>>,
}

impl FeedbackRepository for MemoryFeedback {
    fn save(&self, record: FeedbackRecord) -> Result<FeedbackRecord, FeedbackError> {
        self.records
            .lock()
            .expect("feedback mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        Ok(self.records.lock().expect("feedback mutex poisoned").clone())
    }
}

pub(super) struct UnavailableFeedback;

impl FeedbackRepository for UnavailableFeedback {
    fn save(&self, _record: FeedbackRecord) -> Result<FeedbackRecord, FeedbackError> {
        Err(FeedbackError::Storage("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        Err(FeedbackError::Storage("database offline".to_string()))
    }
}

pub(super) struct FailingSink;

impl EventSink for FailingSink {
    fn publish(&self, _event: TelemetryEvent) -> Result<(), EventError> {
        Err(EventError::Unavailable("webhook offline".to_string()))
    }
}

pub(super) fn assessment_router_with_service(
    service: AssessmentService<InMemoryEventSink, MemoryFeedback>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
