use metrics_exporter_prometheus::PrometheusHandle;
use motivation_catalyst::config::{AppConfig, AssessmentConfig};
use motivation_catalyst::error::AppError;
use motivation_catalyst::workflows::assessment::{
    AssessmentService, DemoProfile, EventSink, FeedbackError, FeedbackRecord, FeedbackRepository,
    Language, NarrativeTable, QuestionCatalog, ReportScope,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<QuestionCatalog>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryFeedbackRepository {
    records: Arc<Mutex<Vec<FeedbackRecord>>>,
}

impl FeedbackRepository for InMemoryFeedbackRepository {
    fn save(&self, record: FeedbackRecord) -> Result<FeedbackRecord, FeedbackError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| FeedbackError::Storage("feedback store poisoned".to_string()))?;
        guard.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| FeedbackError::Storage("feedback store poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

/// Question catalog and narrative table shared by every session.
#[derive(Clone)]
pub(crate) struct AssessmentContent {
    pub(crate) catalog: Arc<QuestionCatalog>,
    pub(crate) narrative: Arc<NarrativeTable>,
}

pub(crate) fn load_content(config: &AssessmentConfig) -> Result<AssessmentContent, AppError> {
    let catalog = match &config.catalog_path {
        Some(path) => QuestionCatalog::from_path(path)?,
        None => QuestionCatalog::standard(),
    };
    let narrative = match &config.narrative_path {
        Some(path) => NarrativeTable::from_path(path)?,
        None => NarrativeTable::standard(),
    };

    info!(
        questions = catalog.len(),
        custom_catalog = config.catalog_path.is_some(),
        custom_narrative = config.narrative_path.is_some(),
        "assessment content loaded"
    );

    Ok(AssessmentContent {
        catalog: Arc::new(catalog),
        narrative: Arc::new(narrative),
    })
}

pub(crate) fn build_service<S>(
    config: &AppConfig,
    content: &AssessmentContent,
    sink: Arc<S>,
) -> AssessmentService<S, InMemoryFeedbackRepository>
where
    S: EventSink + ?Sized + 'static,
{
    AssessmentService::new(
        content.catalog.clone(),
        content.narrative.clone(),
        config.assessment.app_id.clone(),
        config.assessment.default_language,
        sink,
        Arc::new(InMemoryFeedbackRepository::default()),
    )
}

pub(crate) fn parse_language(raw: &str) -> Result<Language, String> {
    Language::from_code(raw)
        .ok_or_else(|| format!("unsupported language '{raw}' (expected he or en)"))
}

pub(crate) fn parse_profile(raw: &str) -> Result<DemoProfile, String> {
    raw.parse()
}

pub(crate) fn parse_scope(raw: &str) -> Result<ReportScope, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "full" => Ok(ReportScope::Full),
        "employee" | "self" => Ok(ReportScope::Employee),
        "manager" => Ok(ReportScope::Manager),
        other => Err(format!(
            "unknown report scope '{other}' (expected full, employee, or manager)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motivation_catalyst::workflows::assessment::{
        FeedbackRating, FeedbackSubmission, InMemoryEventSink, ScoreResult,
    };
    use std::path::PathBuf;

    fn assessment_config() -> AssessmentConfig {
        AssessmentConfig {
            app_id: "motivation-catalyst-cli-test".to_string(),
            default_language: Language::He,
            catalog_path: None,
            narrative_path: None,
        }
    }

    #[test]
    fn builtin_content_loads_without_paths() {
        let content = load_content(&assessment_config()).expect("content loads");
        assert_eq!(content.catalog.len(), 18);
        assert!(content.narrative.labels(Language::He).is_ok());
    }

    #[test]
    fn missing_catalog_file_is_a_catalog_error() {
        let config = AssessmentConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/questions.json")),
            ..assessment_config()
        };
        assert!(matches!(load_content(&config), Err(AppError::Catalog(_))));
    }

    #[test]
    fn feedback_repository_keeps_records_in_order() {
        let content = load_content(&assessment_config()).expect("content loads");
        let config = AppConfig {
            assessment: assessment_config(),
            ..AppConfig::load().expect("config loads")
        };
        let service = build_service(&config, &content, Arc::new(InMemoryEventSink::default()));

        for rating in [FeedbackRating::ThumbsUp, FeedbackRating::ThumbsDown] {
            service
                .record_feedback(FeedbackSubmission {
                    rating,
                    comment: String::new(),
                    results: ScoreResult {
                        autonomy: 4.0,
                        competence: 3.2,
                        relatedness: 2.5,
                    },
                    language: Language::En,
                })
                .expect("feedback stored");
        }

        let records = service.feedback_repository().list().expect("list");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].rating, FeedbackRating::ThumbsDown);
        assert_eq!(service.default_language(), Language::He);
    }

    #[test]
    fn value_parsers_accept_known_codes() {
        assert_eq!(parse_language("EN"), Ok(Language::En));
        assert!(parse_language("fr").is_err());
        assert_eq!(parse_profile("mixed"), Ok(DemoProfile::Mid));
        assert_eq!(parse_scope("Manager"), Ok(ReportScope::Manager));
        assert!(parse_scope("summary").is_err());
    }
}
