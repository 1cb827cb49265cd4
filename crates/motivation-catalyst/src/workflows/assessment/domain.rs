use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type QuestionId = u32;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
/// Substituted for any question without an answer.
pub const NEUTRAL_RATING: u8 = 3;

/// The three Self-Determination Theory needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Autonomy,
    Competence,
    Relatedness,
}

impl Category {
    /// Declaration order; also the tie-break order wherever categories are ranked.
    pub const fn ordered() -> [Self; 3] {
        [Self::Autonomy, Self::Competence, Self::Relatedness]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Autonomy => "autonomy",
            Self::Competence => "competence",
            Self::Relatedness => "relatedness",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    He,
    En,
}

impl Language {
    pub const fn ordered() -> [Self; 2] {
        [Self::He, Self::En]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::He => "he",
            Self::En => "en",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "he" | "heb" | "hebrew" => Some(Self::He),
            "en" | "eng" | "english" => Some(Self::En),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Audience of a narrative variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    pub const fn ordered() -> [Self; 2] {
        [Self::Employee, Self::Manager]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Low,
    High,
}

impl Bucket {
    /// Scores at or above this value select the `High` variant.
    pub const HIGH_THRESHOLD: f64 = 3.5;

    pub fn for_score(score: f64) -> Self {
        if score < Self::HIGH_THRESHOLD {
            Self::Low
        } else {
            Self::High
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// `+1` for directly scored items, `-1` for negatively phrased ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Weight {
    Direct,
    Reverse,
}

impl Weight {
    /// Contribution of a rating to its category sum.
    ///
    /// Ratings outside `1..=5` are a caller contract violation; the result is
    /// skewed but never panics.
    pub fn contribution(self, rating: u8) -> u8 {
        match self {
            Self::Direct => rating,
            Self::Reverse => (MAX_RATING + MIN_RATING).saturating_sub(rating),
        }
    }
}

impl TryFrom<i8> for Weight {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Direct),
            -1 => Ok(Self::Reverse),
            other => Err(format!("question weight must be 1 or -1 (got {other})")),
        }
    }
}

impl From<Weight> for i8 {
    fn from(weight: Weight) -> Self {
        match weight {
            Weight::Direct => 1,
            Weight::Reverse => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub he: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(he: &str, en: &str) -> Self {
        Self {
            he: he.to_string(),
            en: en.to_string(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::He => &self.he,
            Language::En => &self.en,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: Category,
    pub text: LocalizedText,
    pub weight: Weight,
}

/// Ratings keyed by question id; one entry per question at most.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<QuestionId, u8>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the rating for `question_id`.
    pub fn insert(&mut self, question_id: QuestionId, rating: u8) {
        self.0.insert(question_id, rating);
    }

    pub fn get(&self, question_id: QuestionId) -> Option<u8> {
        self.0.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, u8)> + '_ {
        self.0.iter().map(|(id, rating)| (*id, *rating))
    }
}

impl FromIterator<(QuestionId, u8)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, u8)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Per-category averages rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub autonomy: f64,
    pub competence: f64,
    pub relatedness: f64,
}

impl ScoreResult {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Autonomy => self.autonomy,
            Category::Competence => self.competence,
            Category::Relatedness => self.relatedness,
        }
    }

    /// Scores in category declaration order.
    pub fn entries(&self) -> [(Category, f64); 3] {
        Category::ordered().map(|category| (category, self.get(category)))
    }

    pub fn bucket(&self, category: Category) -> Bucket {
        Bucket::for_score(self.get(category))
    }

    /// One-decimal rendering used in reports, e.g. `4.0`.
    pub fn formatted(&self, category: Category) -> String {
        format!("{:.1}", self.get(category))
    }
}

/// Form fields collected on the welcome screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentDetails {
    pub employee_name: String,
    #[serde(default)]
    pub employee_email: String,
    #[serde(default)]
    pub manager_name: String,
    #[serde(default)]
    pub manager_email: String,
}

impl RespondentDetails {
    pub fn demo() -> Self {
        Self {
            employee_name: "Demo User".to_string(),
            employee_email: "demo@example.com".to_string(),
            ..Self::default()
        }
    }

    pub fn has_employee_name(&self) -> bool {
        !self.employee_name.trim().is_empty()
    }
}

/// Canned answer patterns used to preview the analysis without answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemoProfile {
    High,
    Mid,
    AtRisk,
}

impl DemoProfile {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Mid, Self::AtRisk]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Mid => "mid",
            Self::AtRisk => "at-risk",
        }
    }

    pub const fn rating_for(self, weight: Weight) -> u8 {
        match (self, weight) {
            (Self::High, Weight::Direct) | (Self::AtRisk, Weight::Reverse) => MAX_RATING,
            (Self::High, Weight::Reverse) | (Self::AtRisk, Weight::Direct) => MIN_RATING,
            (Self::Mid, _) => NEUTRAL_RATING,
        }
    }
}

impl FromStr for DemoProfile {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "mid" | "mixed" => Ok(Self::Mid),
            "at-risk" | "at_risk" | "risk" | "low" => Ok(Self::AtRisk),
            other => Err(format!(
                "unknown demo profile '{other}' (expected high, mid, or at-risk)"
            )),
        }
    }
}

impl fmt::Display for DemoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
