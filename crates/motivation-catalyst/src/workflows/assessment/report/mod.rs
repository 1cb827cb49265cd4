pub mod export;
pub mod insights;
pub mod views;

use super::domain::{Category, Language, RespondentDetails, Role, ScoreResult};
use super::narrative::{NarrativeError, NarrativeTable};

pub use export::{full_report, render_report, section_report, ReportScope};
pub use insights::{conversation_starter, priority_topic, select_insight};
pub use views::{
    AssessmentResultsView, CategoryInsightView, ConversationStarterView, QuestionView,
    QuestionnaireView, ReportExportView,
};

/// Assembles the analysis screen: per-category insights, both conversation starters,
/// and the full text report.
pub fn build_results_view(
    details: &RespondentDetails,
    scores: &ScoreResult,
    narrative: &NarrativeTable,
    language: Language,
) -> Result<AssessmentResultsView, NarrativeError> {
    let mut categories = Vec::with_capacity(3);
    for category in Category::ordered() {
        let content = narrative.category(language, category)?;
        let score = scores.get(category);
        let bucket = scores.bucket(category);
        categories.push(CategoryInsightView {
            category,
            label: content.label.clone(),
            title: content.title.clone(),
            score,
            score_label: scores.formatted(category),
            bucket,
            employee: content.employee.get(bucket).clone(),
            manager: content.manager.get(bucket).clone(),
        });
    }

    let conversation_starters = Role::ordered()
        .into_iter()
        .map(|role| conversation_starter(narrative, role, scores, language))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AssessmentResultsView {
        language,
        employee_name: details.employee_name.trim().to_string(),
        scores: *scores,
        categories,
        conversation_title: narrative.labels(language)?.conversation_title.clone(),
        conversation_starters,
        report: full_report(details, scores, narrative, language)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::Bucket;
    use crate::workflows::assessment::narrative::TipTopic;

    #[test]
    fn results_view_covers_every_category_and_role() {
        let table = NarrativeTable::standard();
        let details = RespondentDetails {
            employee_name: " Noa ".to_string(),
            ..RespondentDetails::default()
        };
        let scores = ScoreResult {
            autonomy: 3.2,
            competence: 4.5,
            relatedness: 3.9,
        };

        let view = build_results_view(&details, &scores, &table, Language::En).expect("view");

        assert_eq!(view.employee_name, "Noa");
        assert_eq!(view.categories.len(), 3);
        let autonomy = view.category(Category::Autonomy).expect("autonomy");
        assert_eq!(autonomy.bucket, Bucket::Low);
        assert_eq!(autonomy.score_label, "3.2");
        assert_eq!(
            view.category(Category::Competence).map(|entry| entry.bucket),
            Some(Bucket::High)
        );

        let manager = view.starter(Role::Manager).expect("manager starter");
        assert_eq!(manager.topic, TipTopic::Autonomy);
        assert!(view.report.starts_with("Motivation Profile - Noa"));
        assert_eq!(view.conversation_title, "Conversation Tip");

        let hebrew = build_results_view(&details, &scores, &table, Language::He).expect("view");
        assert_eq!(hebrew.conversation_title, "טיפ לשיחה");
    }
}
