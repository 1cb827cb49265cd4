use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::catalog::QuestionCatalog;
use super::domain::{
    AnswerSet, Category, DemoProfile, Language, QuestionId, RespondentDetails, ScoreResult,
    MAX_RATING, MIN_RATING,
};
use super::events::{EventSink, InteractionAction, TelemetryEvent};
use super::feedback::{FeedbackError, FeedbackRecord, FeedbackRepository, FeedbackSubmission};
use super::narrative::{NarrativeError, NarrativeTable};
use super::report::{
    render_report, AssessmentResultsView, QuestionnaireView, ReportExportView, ReportScope,
};
use super::session::{
    export_action, publish_logged, save_feedback, AssessmentSession, SessionError,
};
use super::wizard::{RefusalReason, Transition, WizardEvent};

/// A complete questionnaire submitted in one request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssessmentSubmission {
    pub details: RespondentDetails,
    #[serde(default)]
    pub language: Option<Language>,
    pub answers: AnswerSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DemoRequest {
    pub profile: DemoProfile,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportRequest {
    pub details: RespondentDetails,
    pub scores: ScoreResult,
    #[serde(default)]
    pub scope: ReportScope,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InteractionRequest {
    #[serde(default)]
    pub details: RespondentDetails,
    #[serde(default)]
    pub language: Option<Language>,
    pub platform: String,
}

/// Shared entry point for HTTP handlers and the CLI.
pub struct AssessmentService<S: ?Sized, F: ?Sized> {
    catalog: Arc<QuestionCatalog>,
    narrative: Arc<NarrativeTable>,
    app_id: String,
    default_language: Language,
    sink: Arc<S>,
    feedback: Arc<F>,
}

impl<S, F> AssessmentService<S, F>
where
    S: EventSink + ?Sized + 'static,
    F: FeedbackRepository + ?Sized + 'static,
{
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        narrative: Arc<NarrativeTable>,
        app_id: impl Into<String>,
        default_language: Language,
        sink: Arc<S>,
        feedback: Arc<F>,
    ) -> Self {
        Self {
            catalog,
            narrative,
            app_id: app_id.into(),
            default_language,
            sink,
            feedback,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn narrative(&self) -> &NarrativeTable {
        &self.narrative
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn feedback_repository(&self) -> &F {
        &self.feedback
    }

    /// Fresh wizard session sharing this service's content and sink.
    pub fn session(&self, language: Option<Language>) -> AssessmentSession<S> {
        AssessmentSession::new(
            self.catalog.clone(),
            self.narrative.clone(),
            self.sink.clone(),
            self.app_id.clone(),
            language.unwrap_or(self.default_language),
        )
    }

    pub fn questions(&self, language: Option<Language>) -> QuestionnaireView {
        QuestionnaireView::build(&self.catalog, language.unwrap_or(self.default_language))
    }

    /// Validates a complete answer set and replays it through the wizard.
    pub fn submit(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentResultsView, AssessmentServiceError> {
        validate_answers(&submission.answers, &self.catalog)?;

        let mut session = self.session(submission.language);
        session.dispatch(WizardEvent::EditDetails(submission.details));
        if let Transition::Refused(RefusalReason::MissingEmployeeName) =
            session.dispatch(WizardEvent::Start)
        {
            return Err(AnswerValidationError::MissingEmployeeName.into());
        }

        for question in self.catalog.questions() {
            if let Some(rating) = submission.answers.get(question.id) {
                session.dispatch(WizardEvent::Answer {
                    question_id: question.id,
                    rating,
                });
            }
        }

        Ok(session.results()?)
    }

    pub fn demo(
        &self,
        request: DemoRequest,
    ) -> Result<AssessmentResultsView, AssessmentServiceError> {
        let mut session = self.session(request.language);
        session.dispatch(WizardEvent::Demo(request.profile));
        info!(profile = request.profile.key(), "demo profile evaluated");
        Ok(session.results()?)
    }

    /// Renders a report for previously computed scores and records the export.
    pub fn report(
        &self,
        request: ReportRequest,
    ) -> Result<ReportExportView, AssessmentServiceError> {
        validate_scores(&request.scores)?;
        let language = request.language.unwrap_or(self.default_language);
        let text = render_report(
            request.scope,
            &request.details,
            &request.scores,
            &self.narrative,
            language,
        )?;
        let action = export_action(request.scope, &text);
        publish_logged(
            self.sink.as_ref(),
            TelemetryEvent::interaction(&self.app_id, language, &request.details, action),
        );

        Ok(ReportExportView {
            scope: request.scope,
            language,
            length: text.chars().count(),
            text,
        })
    }

    pub fn record_feedback(
        &self,
        submission: FeedbackSubmission,
    ) -> Result<FeedbackRecord, AssessmentServiceError> {
        validate_scores(&submission.results)?;
        let record = FeedbackRecord::from_submission(submission, Utc::now())?;
        Ok(save_feedback(self.feedback.as_ref(), record)?)
    }

    pub fn record_interaction(
        &self,
        request: InteractionRequest,
    ) -> Result<(), AssessmentServiceError> {
        let platform = request.platform.trim();
        if platform.is_empty() {
            return Err(AssessmentServiceError::InvalidInteraction(
                "platform must not be empty".to_string(),
            ));
        }
        let language = request.language.unwrap_or(self.default_language);
        publish_logged(
            self.sink.as_ref(),
            TelemetryEvent::interaction(
                &self.app_id,
                language,
                &request.details,
                InteractionAction::SocialClick {
                    platform: platform.to_string(),
                },
            ),
        );
        Ok(())
    }
}

/// Boundary check for externally supplied answers: known ids, ratings in range,
/// and every catalog question answered.
pub fn validate_answers(
    answers: &AnswerSet,
    catalog: &QuestionCatalog,
) -> Result<(), AnswerValidationError> {
    for (question_id, rating) in answers.iter() {
        if !catalog.contains(question_id) {
            return Err(AnswerValidationError::UnknownQuestion { question_id });
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AnswerValidationError::OutOfRange {
                question_id,
                rating,
            });
        }
    }

    let missing: Vec<QuestionId> = catalog
        .questions()
        .iter()
        .map(|question| question.id)
        .filter(|id| answers.get(*id).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(AnswerValidationError::Incomplete { missing });
    }

    Ok(())
}

fn validate_scores(scores: &ScoreResult) -> Result<(), AnswerValidationError> {
    let bounds = f64::from(MIN_RATING)..=f64::from(MAX_RATING);
    for (category, score) in scores.entries() {
        if !bounds.contains(&score) {
            return Err(AnswerValidationError::ScoreOutOfRange { category, score });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnswerValidationError {
    #[error("employee name is required to start the assessment")]
    MissingEmployeeName,
    #[error("question {question_id} is not part of the catalog")]
    UnknownQuestion { question_id: QuestionId },
    #[error("rating {rating} for question {question_id} must be between 1 and 5")]
    OutOfRange { question_id: QuestionId, rating: u8 },
    #[error("{} question(s) unanswered: {:?}", .missing.len(), .missing)]
    Incomplete { missing: Vec<QuestionId> },
    #[error("{category} score {score} must be between 1.0 and 5.0")]
    ScoreOutOfRange { category: Category, score: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] AnswerValidationError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error(transparent)]
    Content(#[from] NarrativeError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("invalid interaction: {0}")]
    InvalidInteraction(String),
}
