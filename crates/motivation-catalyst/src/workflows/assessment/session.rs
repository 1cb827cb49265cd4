use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::catalog::QuestionCatalog;
use super::domain::{Language, Role, ScoreResult};
use super::events::{EventSink, InteractionAction, SubmissionPayload, TelemetryEvent};
use super::feedback::{
    FeedbackError, FeedbackRating, FeedbackRecord, FeedbackRepository, FeedbackSubmission,
};
use super::narrative::{NarrativeError, NarrativeTable};
use super::report::{build_results_view, render_report, AssessmentResultsView, ReportScope};
use super::wizard::{Transition, WizardEvent, WizardState};

/// Owns one respondent's wizard state and dispatches events once transitions commit.
pub struct AssessmentSession<S: ?Sized> {
    state: WizardState,
    catalog: Arc<QuestionCatalog>,
    narrative: Arc<NarrativeTable>,
    sink: Arc<S>,
    app_id: String,
}

impl<S> AssessmentSession<S>
where
    S: EventSink + ?Sized,
{
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        narrative: Arc<NarrativeTable>,
        sink: Arc<S>,
        app_id: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            state: WizardState::new(language),
            catalog,
            narrative,
            sink,
            app_id: app_id.into(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Applies an event; entering the analysis phase publishes one submission event.
    pub fn dispatch(&mut self, event: WizardEvent) -> Transition {
        let label = event.label();
        let state = std::mem::take(&mut self.state);
        let (next, transition) = state.apply(event, &self.catalog);
        self.state = next;

        match &transition {
            Transition::Completed(scores) => {
                info!(
                    autonomy = scores.autonomy,
                    competence = scores.competence,
                    relatedness = scores.relatedness,
                    "assessment completed"
                );
                self.publish_submission(scores);
            }
            Transition::Refused(reason) => debug!(event = label, ?reason, "wizard event refused"),
            Transition::Ignored => {
                debug!(event = label, phase = self.state.phase.label(), "wizard event ignored")
            }
            Transition::Moved => {}
        }

        transition
    }

    fn publish_submission(&self, scores: &ScoreResult) {
        let language = self.state.language;
        match SubmissionPayload::build(&self.state.answers, scores, &self.narrative, language) {
            Ok(payload) => self.publish(TelemetryEvent::submission(
                &self.app_id,
                language,
                &self.state.details,
                payload,
            )),
            Err(error) => warn!(%error, "skipping submission event"),
        }
    }

    fn publish(&self, event: TelemetryEvent) {
        publish_logged(self.sink.as_ref(), event);
    }

    /// Analysis screen content; only available once the assessment completed.
    pub fn results(&self) -> Result<AssessmentResultsView, SessionError> {
        let scores = self.state.scores().ok_or(SessionError::NotComplete)?;
        Ok(build_results_view(
            &self.state.details,
            scores,
            &self.narrative,
            self.state.language,
        )?)
    }

    /// Renders a text export and records it as an interaction.
    pub fn export_report(&self, scope: ReportScope) -> Result<String, SessionError> {
        let scores = self.state.scores().ok_or(SessionError::NotComplete)?;
        let text = render_report(
            scope,
            &self.state.details,
            scores,
            &self.narrative,
            self.state.language,
        )?;
        self.publish(TelemetryEvent::interaction(
            &self.app_id,
            self.state.language,
            &self.state.details,
            export_action(scope, &text),
        ));
        Ok(text)
    }

    /// Stores feedback about the current results. Never alters wizard state.
    pub fn submit_feedback<F>(
        &self,
        repository: &F,
        rating: FeedbackRating,
        comment: &str,
    ) -> Result<FeedbackRecord, FeedbackError>
    where
        F: FeedbackRepository + ?Sized,
    {
        let scores = self
            .state
            .scores()
            .ok_or(FeedbackError::ResultsUnavailable)?;
        let record = FeedbackRecord::from_submission(
            FeedbackSubmission {
                rating,
                comment: comment.to_string(),
                results: *scores,
                language: self.state.language,
            },
            Utc::now(),
        )?;
        save_feedback(repository, record)
    }
}

/// Interaction recorded for a text export.
pub(crate) fn export_action(scope: ReportScope, text: &str) -> InteractionAction {
    let length = text.chars().count();
    match scope {
        ReportScope::Full => InteractionAction::CopyReport { length },
        ReportScope::Employee => InteractionAction::ExportSection {
            role: Role::Employee,
            length,
        },
        ReportScope::Manager => InteractionAction::ExportSection {
            role: Role::Manager,
            length,
        },
    }
}

/// Publishes an event, logging and discarding any delivery error.
pub(crate) fn publish_logged<S>(sink: &S, event: TelemetryEvent)
where
    S: EventSink + ?Sized,
{
    let event_type = event.event_type;
    if let Err(error) = sink.publish(event) {
        warn!(?event_type, %error, "telemetry event dropped");
    }
}

pub(crate) fn save_feedback<F>(
    repository: &F,
    record: FeedbackRecord,
) -> Result<FeedbackRecord, FeedbackError>
where
    F: FeedbackRepository + ?Sized,
{
    repository.save(record).map_err(|error| {
        warn!(%error, "failed to store feedback");
        error
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("assessment has not been completed yet")]
    NotComplete,
    #[error(transparent)]
    Content(#[from] NarrativeError),
}
