use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::domain::{Category, LocalizedText, Question, QuestionId, Weight};

/// Ordered, immutable question list driving the wizard and the scoring engine.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// The 18-item reference questionnaire, six items per need.
    pub fn standard() -> Self {
        use Category::{Autonomy, Competence, Relatedness};
        use Weight::{Direct, Reverse};

        let entries: [(QuestionId, Category, Weight, &str, &str); 18] = [
            (1, Autonomy, Direct, "אני מרגיש שיש לי אפשרות לבחור כיצד לבצע את עבודתי.", "I can choose how to perform my work."),
            (2, Autonomy, Reverse, "אני מרגיש לחוץ לעבוד בדרכים שלא נראות לי טבעיות.", "I feel pressured to work in unnatural ways."),
            (3, Autonomy, Direct, "יש לי תחושת חופש ובחירה בתפקיד שלי.", "I feel freedom and choice in my role."),
            (10, Autonomy, Direct, "אני מרגיש שיש לי השפעה על החלטות הנוגעות לעבודתי.", "I have influence over work decisions."),
            (11, Autonomy, Direct, "דעתי נשמעת ונלקחת בחשבון על ידי הממונים עלי.", "My opinion is heard by superiors."),
            (12, Autonomy, Reverse, "אני מרגיש כבול על ידי נהלים נוקשים.", "I feel bound by rigid procedures."),
            (4, Competence, Direct, "אני מרגיש בטוח ביכולת שלי לבצע את המשימות היטב.", "I am confident in my ability to perform well."),
            (5, Competence, Reverse, "לעיתים קרובות אני מרגיש לא כשיר לעמוד בדרישות.", "I often feel inadequate to meet demands."),
            (6, Competence, Direct, "יש לי הזדמנות להשתמש בכישורים הטובים ביותר שלי.", "I use my best skills every day."),
            (13, Competence, Direct, "אני מרגיש שאני לומד ומתפתח מקצועית.", "I am learning and developing professionally."),
            (14, Competence, Direct, "אני בטוח ביכולתי למצוא פתרון לאתגרים.", "I am confident finding solutions to challenges."),
            (15, Competence, Reverse, "לפעמים אני חושש שאין לי את הכישורים הנדרשים.", "Sometimes I worry I lack necessary skills."),
            (7, Relatedness, Direct, "אני מרגיש תחושת שייכות עם האנשים בעבודה.", "I feel a sense of belonging with colleagues."),
            (8, Relatedness, Reverse, "אני מרגיש בודד או מבודד כשאני בעבודה.", "I feel lonely or isolated at work."),
            (9, Relatedness, Direct, "אני מרגיש שלאנשים שאני עובד איתם אכפת ממני.", "People I work with care about me."),
            (16, Relatedness, Direct, "אני מרגיש בנוח לשתף את חבריי לצוות בקשיים.", "I feel comfortable sharing difficulties."),
            (17, Relatedness, Direct, "האווירה בצוות שלי היא תומכת וחברית.", "The team atmosphere is supportive."),
            (18, Relatedness, Reverse, "אני מרגיש לעיתים שאני 'מחוץ לעניינים' חברתית.", "I sometimes feel socially 'out of the loop'."),
        ];

        let questions = entries
            .into_iter()
            .map(|(id, category, weight, he, en)| Question {
                id,
                category,
                text: LocalizedText::new(he, en),
                weight,
            })
            .collect();

        Self { questions }
    }

    /// Builds a catalog from an arbitrary question list, rejecting empty lists and duplicate ids.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(CatalogError::DuplicateId { id: question.id });
            }
        }

        for category in Category::ordered() {
            if !questions.iter().any(|question| question.category == category) {
                warn!(
                    category = category.key(),
                    "catalog has no questions for category; it will score neutral"
                );
            }
        }

        Ok(Self { questions })
    }

    /// Parses a JSON document of the form `{"questions": [...]}`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_questions(document.questions)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at a wizard position.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.question(id).is_some()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn questions_for_category(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |question| question.category == category)
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("question catalog must contain at least one question")]
    Empty,
    #[error("question id {id} appears more than once")]
    DuplicateId { id: QuestionId },
    #[error("failed to read question catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid question catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}
