//! Self-Determination Theory motivation assessment.
//!
//! The question catalog feeds a small wizard state machine; completing it runs the
//! scoring engine once, and the insight selector maps the resulting scores onto the
//! bilingual narrative table. Sessions own the wizard and emit telemetry after each
//! committed transition.

pub mod catalog;
pub mod domain;
pub mod events;
pub mod feedback;
pub mod import;
pub mod narrative;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, QuestionCatalog};
pub use domain::{
    AnswerSet, Bucket, Category, DemoProfile, Language, LocalizedText, Question, QuestionId,
    RespondentDetails, Role, ScoreResult, Weight,
};
pub use events::{
    configured_sink, DisabledEventSink, EventError, EventSink, InMemoryEventSink,
    InteractionAction, TelemetryEvent, WebhookEventSink,
};
pub use feedback::{
    FeedbackError, FeedbackRating, FeedbackRecord, FeedbackRepository, FeedbackSubmission,
};
pub use import::{AnswerImportError, AnswerSheetImporter, RespondentAnswers, ScoredRespondent};
pub use narrative::{AnalysisDetail, NarrativeError, NarrativeTable, TipTopic};
pub use report::{
    build_results_view, conversation_starter, full_report, priority_topic, render_report,
    section_report, select_insight, AssessmentResultsView, ReportScope,
};
pub use router::assessment_router;
pub use scoring::compute_scores;
pub use service::{
    validate_answers, AnswerValidationError, AssessmentService, AssessmentServiceError,
    AssessmentSubmission, DemoRequest, InteractionRequest, ReportRequest,
};
pub use session::{AssessmentSession, SessionError};
pub use wizard::{
    synthetic_answers, RefusalReason, Transition, WizardEvent, WizardPhase, WizardState,
};
