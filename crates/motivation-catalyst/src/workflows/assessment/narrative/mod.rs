//! Localized insight content keyed by closed enums.
//!
//! Every table is validated on construction so that lookups never fall back to
//! placeholder text: a missing `(language, category, role, bucket)` combination is a
//! configuration error rather than a blank section in a report.

mod standard;

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{Bucket, Category, Language, Role};

/// Analysis paragraph, recommended actions, and an optional deeper tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDetail {
    pub analysis: String,
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_tip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketVariants {
    pub low: AnalysisDetail,
    pub high: AnalysisDetail,
}

impl BucketVariants {
    pub fn get(&self, bucket: Bucket) -> &AnalysisDetail {
        match bucket {
            Bucket::Low => &self.low,
            Bucket::High => &self.high,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryContent {
    /// Short display name, e.g. `Autonomy`.
    pub label: String,
    /// Section heading, e.g. `Autonomy (choice and control)`.
    pub title: String,
    pub employee: BucketVariants,
    pub manager: BucketVariants,
}

impl CategoryContent {
    pub fn variants(&self, role: Role) -> &BucketVariants {
        match role {
            Role::Employee => &self.employee,
            Role::Manager => &self.manager,
        }
    }
}

/// Subject of a conversation-starter tip: the weakest need, or `High` when none is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipTopic {
    Autonomy,
    Competence,
    Relatedness,
    High,
}

impl TipTopic {
    pub const fn ordered() -> [Self; 4] {
        [Self::Autonomy, Self::Competence, Self::Relatedness, Self::High]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Autonomy => "autonomy",
            Self::Competence => "competence",
            Self::Relatedness => "relatedness",
            Self::High => "high",
        }
    }
}

impl From<Category> for TipTopic {
    fn from(category: Category) -> Self {
        match category {
            Category::Autonomy => Self::Autonomy,
            Category::Competence => Self::Competence,
            Category::Relatedness => Self::Relatedness,
        }
    }
}

impl fmt::Display for TipTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTips {
    pub employee: BTreeMap<TipTopic, String>,
    pub manager: BTreeMap<TipTopic, String>,
}

impl ConversationTips {
    pub fn for_role(&self, role: Role) -> &BTreeMap<TipTopic, String> {
        match role {
            Role::Employee => &self.employee,
            Role::Manager => &self.manager,
        }
    }
}

/// Fixed strings used when rendering plain-text reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLabels {
    pub profile_title: String,
    pub analysis: String,
    pub actions: String,
    pub ai_tip: String,
    pub manager_title: String,
    pub self_title: String,
    pub conversation_title: String,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageContent {
    pub labels: ReportLabels,
    pub categories: BTreeMap<Category, CategoryContent>,
    pub conversation_tips: ConversationTips,
}

/// Complete bilingual content table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NarrativeTable {
    languages: BTreeMap<Language, LanguageContent>,
}

impl NarrativeTable {
    /// Built-in English and Hebrew content.
    pub fn standard() -> Self {
        let languages = Language::ordered()
            .into_iter()
            .map(|language| (language, standard::content(language)))
            .collect();
        Self { languages }
    }

    pub fn from_languages(
        languages: BTreeMap<Language, LanguageContent>,
    ) -> Result<Self, NarrativeError> {
        let table = Self { languages };
        table.validate()?;
        Ok(table)
    }

    /// Parses a JSON object keyed by language code and validates it exhaustively.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, NarrativeError> {
        let languages: BTreeMap<Language, LanguageContent> = serde_json::from_reader(reader)?;
        Self::from_languages(languages)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, NarrativeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Checks that every language, category, role, bucket, and tip topic is present.
    pub fn validate(&self) -> Result<(), NarrativeError> {
        for language in Language::ordered() {
            let content = self.language(language)?;
            for category in Category::ordered() {
                let section = content
                    .categories
                    .get(&category)
                    .ok_or(NarrativeError::MissingCategory { language, category })?;
                for role in Role::ordered() {
                    for bucket in [Bucket::Low, Bucket::High] {
                        let detail = section.variants(role).get(bucket);
                        if detail.analysis.trim().is_empty() || detail.actions.is_empty() {
                            return Err(NarrativeError::EmptyInsight {
                                language,
                                category,
                                role,
                                bucket,
                            });
                        }
                    }
                }
            }
            for role in Role::ordered() {
                let tips = content.conversation_tips.for_role(role);
                for topic in TipTopic::ordered() {
                    if tips.get(&topic).map_or(true, |tip| tip.trim().is_empty()) {
                        return Err(NarrativeError::MissingTip {
                            language,
                            role,
                            topic,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn language(&self, language: Language) -> Result<&LanguageContent, NarrativeError> {
        self.languages
            .get(&language)
            .ok_or(NarrativeError::MissingLanguage { language })
    }

    pub fn category(
        &self,
        language: Language,
        category: Category,
    ) -> Result<&CategoryContent, NarrativeError> {
        self.language(language)?
            .categories
            .get(&category)
            .ok_or(NarrativeError::MissingCategory { language, category })
    }

    pub fn category_label(
        &self,
        language: Language,
        category: Category,
    ) -> Result<&str, NarrativeError> {
        Ok(&self.category(language, category)?.label)
    }

    pub fn insight(
        &self,
        language: Language,
        category: Category,
        role: Role,
        bucket: Bucket,
    ) -> Result<&AnalysisDetail, NarrativeError> {
        Ok(self
            .category(language, category)?
            .variants(role)
            .get(bucket))
    }

    pub fn conversation_tip(
        &self,
        language: Language,
        role: Role,
        topic: TipTopic,
    ) -> Result<&str, NarrativeError> {
        self.language(language)?
            .conversation_tips
            .for_role(role)
            .get(&topic)
            .map(String::as_str)
            .ok_or(NarrativeError::MissingTip {
                language,
                role,
                topic,
            })
    }

    pub fn labels(&self, language: Language) -> Result<&ReportLabels, NarrativeError> {
        Ok(&self.language(language)?.labels)
    }
}

impl Default for NarrativeTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("no narrative content for language '{language}'")]
    MissingLanguage { language: Language },
    #[error("no narrative content for category '{category}' in language '{language}'")]
    MissingCategory {
        language: Language,
        category: Category,
    },
    #[error("no {role} conversation tip for '{topic}' in language '{language}'")]
    MissingTip {
        language: Language,
        role: Role,
        topic: TipTopic,
    },
    #[error("empty {bucket} {role} insight for '{category}' in language '{language}'")]
    EmptyInsight {
        language: Language,
        category: Category,
        role: Role,
        bucket: Bucket,
    },
    #[error("failed to read narrative content: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid narrative content document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn standard_table_is_complete() {
        NarrativeTable::standard()
            .validate()
            .expect("built-in content covers every combination");
    }

    #[test]
    fn only_employee_variants_carry_ai_tips() {
        let table = NarrativeTable::standard();
        for language in Language::ordered() {
            for category in Category::ordered() {
                for bucket in [Bucket::Low, Bucket::High] {
                    let employee = table
                        .insight(language, category, Role::Employee, bucket)
                        .expect("employee insight");
                    let manager = table
                        .insight(language, category, Role::Manager, bucket)
                        .expect("manager insight");
                    assert!(employee.ai_tip.is_some());
                    assert!(manager.ai_tip.is_none());
                }
            }
        }
    }

    #[test]
    fn lookups_return_localized_text() {
        let table = NarrativeTable::standard();
        assert_eq!(
            table
                .category_label(Language::En, Category::Competence)
                .expect("label"),
            "Competence"
        );
        assert_eq!(
            table
                .category_label(Language::He, Category::Relatedness)
                .expect("label"),
            "שייכות"
        );
        let tip = table
            .conversation_tip(Language::En, Role::Manager, TipTopic::High)
            .expect("tip");
        assert!(tip.contains("maintain this energy"));
    }

    #[test]
    fn missing_language_fails_validation() {
        let mut languages = BTreeMap::new();
        languages.insert(Language::En, standard::content(Language::En));
        assert!(matches!(
            NarrativeTable::from_languages(languages),
            Err(NarrativeError::MissingLanguage {
                language: Language::He
            })
        ));
    }

    #[test]
    fn missing_tip_fails_validation() {
        let mut english = standard::content(Language::En);
        english.conversation_tips.manager.remove(&TipTopic::Competence);
        let mut languages = BTreeMap::new();
        languages.insert(Language::En, english);
        languages.insert(Language::He, standard::content(Language::He));

        match NarrativeTable::from_languages(languages) {
            Err(NarrativeError::MissingTip {
                language,
                role,
                topic,
            }) => {
                assert_eq!(language, Language::En);
                assert_eq!(role, Role::Manager);
                assert_eq!(topic, TipTopic::Competence);
            }
            other => panic!("expected missing tip, got {other:?}"),
        }
    }

    #[test]
    fn blank_analysis_fails_validation() {
        let mut hebrew = standard::content(Language::He);
        if let Some(section) = hebrew.categories.get_mut(&Category::Autonomy) {
            section.manager.high.analysis = "  ".to_string();
        }
        let mut languages = BTreeMap::new();
        languages.insert(Language::En, standard::content(Language::En));
        languages.insert(Language::He, hebrew);

        assert!(matches!(
            NarrativeTable::from_languages(languages),
            Err(NarrativeError::EmptyInsight {
                category: Category::Autonomy,
                role: Role::Manager,
                bucket: Bucket::High,
                ..
            })
        ));
    }

    #[test]
    fn json_round_trip_preserves_validated_table() {
        let table = NarrativeTable::standard();
        let json = serde_json::to_vec(&table).expect("serialize table");
        let loaded = NarrativeTable::from_reader(Cursor::new(json)).expect("table reloads");
        assert_eq!(loaded, table);
    }

    #[test]
    fn json_missing_category_is_rejected() {
        let mut value = serde_json::to_value(NarrativeTable::standard()).expect("serialize");
        value["en"]["categories"]
            .as_object_mut()
            .expect("categories object")
            .remove("relatedness");
        let json = serde_json::to_vec(&value).expect("serialize");

        assert!(matches!(
            NarrativeTable::from_reader(Cursor::new(json)),
            Err(NarrativeError::MissingCategory {
                language: Language::En,
                category: Category::Relatedness,
            })
        ));
    }
}
