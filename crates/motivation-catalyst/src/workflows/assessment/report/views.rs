use serde::Serialize;

use super::super::catalog::QuestionCatalog;
use super::super::domain::{Bucket, Category, Language, QuestionId, Role, ScoreResult};
use super::super::narrative::{AnalysisDetail, TipTopic};
use super::export::ReportScope;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInsightView {
    pub category: Category,
    pub label: String,
    pub title: String,
    pub score: f64,
    pub score_label: String,
    pub bucket: Bucket,
    pub employee: AnalysisDetail,
    pub manager: AnalysisDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationStarterView {
    pub role: Role,
    pub topic: TipTopic,
    pub tip: String,
}

/// Everything the analysis screen shows, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResultsView {
    pub language: Language,
    pub employee_name: String,
    pub scores: ScoreResult,
    pub categories: Vec<CategoryInsightView>,
    /// Heading for the conversation starters in the results language.
    pub conversation_title: String,
    pub conversation_starters: Vec<ConversationStarterView>,
    pub report: String,
}

impl AssessmentResultsView {
    pub fn category(&self, category: Category) -> Option<&CategoryInsightView> {
        self.categories
            .iter()
            .find(|entry| entry.category == category)
    }

    pub fn starter(&self, role: Role) -> Option<&ConversationStarterView> {
        self.conversation_starters
            .iter()
            .find(|starter| starter.role == role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub position: usize,
    pub id: QuestionId,
    pub category: Category,
    pub text: String,
}

/// Ordered catalog rendered in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionnaireView {
    pub language: Language,
    pub total: usize,
    pub questions: Vec<QuestionView>,
}

impl QuestionnaireView {
    pub fn build(catalog: &QuestionCatalog, language: Language) -> Self {
        let questions = catalog
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionView {
                position: index + 1,
                id: question.id,
                category: question.category,
                text: question.text.get(language).to_string(),
            })
            .collect::<Vec<_>>();

        Self {
            language,
            total: questions.len(),
            questions,
        }
    }
}

/// A rendered text export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportExportView {
    pub scope: ReportScope,
    pub language: Language,
    pub length: usize,
    pub text: String,
}
