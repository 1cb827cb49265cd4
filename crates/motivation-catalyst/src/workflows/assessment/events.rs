//! Outbound submission and interaction events.
//!
//! Delivery is fire-and-forget: the webhook sink spawns a detached task and only
//! logs the outcome. Nothing here feeds back into wizard state.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{AnswerSet, Category, Language, RespondentDetails, Role, ScoreResult};
use super::narrative::{NarrativeError, NarrativeTable};
use crate::config::WebhookConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Submission,
    Interaction,
}

/// Respondent details as they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUser {
    pub employee_name: String,
    pub employee_email: String,
    pub manager_name: String,
    pub manager_email: String,
}

impl From<&RespondentDetails> for EventUser {
    fn from(details: &RespondentDetails) -> Self {
        Self {
            employee_name: details.employee_name.clone(),
            employee_email: details.employee_email.clone(),
            manager_name: details.manager_name.clone(),
            manager_email: details.manager_email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSummary {
    pub score: f64,
    pub analysis: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub answers: AnswerSet,
    pub results: ScoreResult,
    pub insights: BTreeMap<Category, InsightSummary>,
}

impl SubmissionPayload {
    /// Captures the answers, scores, and the employee-facing insight per category.
    pub fn build(
        answers: &AnswerSet,
        scores: &ScoreResult,
        narrative: &NarrativeTable,
        language: Language,
    ) -> Result<Self, NarrativeError> {
        let mut insights = BTreeMap::new();
        for (category, score) in scores.entries() {
            let detail =
                narrative.insight(language, category, Role::Employee, scores.bucket(category))?;
            insights.insert(
                category,
                InsightSummary {
                    score,
                    analysis: detail.analysis.clone(),
                    actions: detail.actions.clone(),
                },
            );
        }

        Ok(Self {
            answers: answers.clone(),
            results: *scores,
            insights,
        })
    }
}

/// User interactions on the results screen. `length` counts characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InteractionAction {
    CopyReport { length: usize },
    SocialClick { platform: String },
    ExportSection { role: Role, length: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventPayload {
    Submission(SubmissionPayload),
    Interaction(InteractionAction),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEvent {
    pub app_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub language: Language,
    pub user: EventUser,
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl TelemetryEvent {
    pub fn submission(
        app_id: &str,
        language: Language,
        details: &RespondentDetails,
        payload: SubmissionPayload,
    ) -> Self {
        Self {
            app_id: app_id.to_string(),
            timestamp: Utc::now(),
            event_type: EventType::Submission,
            language,
            user: EventUser::from(details),
            payload: EventPayload::Submission(payload),
        }
    }

    pub fn interaction(
        app_id: &str,
        language: Language,
        details: &RespondentDetails,
        action: InteractionAction,
    ) -> Self {
        Self {
            app_id: app_id.to_string(),
            timestamp: Utc::now(),
            event_type: EventType::Interaction,
            language,
            user: EventUser::from(details),
            payload: EventPayload::Interaction(action),
        }
    }
}

/// Destination for telemetry events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: TelemetryEvent) -> Result<(), EventError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("failed to encode telemetry event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to build webhook client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("no async runtime available to deliver telemetry event")]
    NoRuntime,
    #[error("event sink unavailable: {0}")]
    Unavailable(String),
}

/// Posts events as JSON to a webhook on a detached task; no retries.
pub struct WebhookEventSink {
    client: reqwest::Client,
    endpoint: String,
}

impl WebhookEventSink {
    pub fn try_new(endpoint: &str, timeout: Duration) -> Result<Self, EventError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EventSink for WebhookEventSink {
    fn publish(&self, event: TelemetryEvent) -> Result<(), EventError> {
        let body = serde_json::to_vec(&event)?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EventError::NoRuntime)?;

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let event_type = event.event_type;
        runtime.spawn(async move {
            let response = client
                .post(&endpoint)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await;

            match response {
                Ok(response) if response.status().is_success() => {
                    debug!(?event_type, "telemetry event delivered");
                }
                Ok(response) => {
                    warn!(
                        ?event_type,
                        status = %response.status(),
                        "telemetry webhook rejected event"
                    );
                }
                Err(error) => {
                    warn!(?event_type, %error, "telemetry webhook delivery failed");
                }
            }
        });

        Ok(())
    }
}

/// Used when no webhook is configured; events are logged and dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledEventSink;

impl EventSink for DisabledEventSink {
    fn publish(&self, event: TelemetryEvent) -> Result<(), EventError> {
        debug!(event_type = ?event.event_type, "telemetry webhook not configured; dropping event");
        Ok(())
    }
}

/// Keeps every published event in memory.
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl InMemoryEventSink {
    pub fn events(&self) -> Vec<TelemetryEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for InMemoryEventSink {
    fn publish(&self, event: TelemetryEvent) -> Result<(), EventError> {
        self.events
            .lock()
            .map_err(|_| EventError::Unavailable("event log lock poisoned".to_string()))?
            .push(event);
        Ok(())
    }
}

/// Webhook sink when an endpoint is configured, otherwise the disabled sink.
pub fn configured_sink(config: &WebhookConfig) -> Arc<dyn EventSink> {
    let Some(endpoint) = config.endpoint() else {
        debug!("telemetry webhook disabled");
        return Arc::new(DisabledEventSink);
    };

    match WebhookEventSink::try_new(endpoint, config.timeout) {
        Ok(sink) => Arc::new(sink),
        Err(error) => {
            warn!(%error, "could not build telemetry webhook client; events will be dropped");
            Arc::new(DisabledEventSink)
        }
    }
}
