use serde::{Deserialize, Serialize};

use super::super::domain::{Category, Language, RespondentDetails, Role, ScoreResult};
use super::super::narrative::{NarrativeError, NarrativeTable};

const TITLE_RULE: &str = "===============================";
const SECTION_RULE: &str = "-------------------------------";

/// Which part of the results a text export covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportScope {
    #[default]
    Full,
    Employee,
    Manager,
}

impl ReportScope {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Employee => "employee",
            Self::Manager => "manager",
        }
    }
}

pub fn render_report(
    scope: ReportScope,
    details: &RespondentDetails,
    scores: &ScoreResult,
    narrative: &NarrativeTable,
    language: Language,
) -> Result<String, NarrativeError> {
    match scope {
        ReportScope::Full => full_report(details, scores, narrative, language),
        ReportScope::Employee => {
            section_report(Role::Employee, details, scores, narrative, language)
        }
        ReportScope::Manager => section_report(Role::Manager, details, scores, narrative, language),
    }
}

/// Plain-text report with both audiences' insights for every category.
pub fn full_report(
    details: &RespondentDetails,
    scores: &ScoreResult,
    narrative: &NarrativeTable,
    language: Language,
) -> Result<String, NarrativeError> {
    let labels = narrative.labels(language)?;
    let mut text = header(&labels.profile_title, details);

    for category in Category::ordered() {
        let bucket = scores.bucket(category);
        let employee = narrative.insight(language, category, Role::Employee, bucket)?;
        let manager = narrative.insight(language, category, Role::Manager, bucket)?;

        text.push_str(&category_heading(narrative, language, category, scores)?);

        text.push_str(&format!("👤 {}:\n", labels.self_title));
        text.push_str(&format!("   • {}: {}\n", labels.analysis, employee.analysis));
        text.push_str(&format!(
            "   • {}: {}\n\n",
            labels.actions,
            employee.actions.join(", ")
        ));

        text.push_str(&format!("📋 {}:\n", labels.manager_title));
        text.push_str(&format!("   • {}: {}\n", labels.analysis, manager.analysis));
        text.push_str(&format!(
            "   • {}: {}\n\n",
            labels.actions,
            manager.actions.join(", ")
        ));

        if let Some(tip) = &employee.ai_tip {
            text.push_str(&format!("✨ {}:\n", labels.ai_tip));
            text.push_str(&format!("   {}\n\n", tip));
        }

        text.push('\n');
    }

    text.push_str(&format!("\n{}", labels.footer));
    Ok(text)
}

/// One audience's insights only, as copied from a single results section.
pub fn section_report(
    role: Role,
    details: &RespondentDetails,
    scores: &ScoreResult,
    narrative: &NarrativeTable,
    language: Language,
) -> Result<String, NarrativeError> {
    let labels = narrative.labels(language)?;
    let title = match role {
        Role::Employee => &labels.self_title,
        Role::Manager => &labels.manager_title,
    };
    let mut text = header(title, details);

    for category in Category::ordered() {
        let bucket = scores.bucket(category);
        let insight = narrative.insight(language, category, role, bucket)?;

        text.push_str(&category_heading(narrative, language, category, scores)?);
        text.push_str(&format!("   • {}: {}\n", labels.analysis, insight.analysis));
        text.push_str(&format!(
            "   • {}: {}\n\n",
            labels.actions,
            insight.actions.join(", ")
        ));

        if let Some(tip) = &insight.ai_tip {
            text.push_str(&format!("✨ {}:\n", labels.ai_tip));
            text.push_str(&format!("   {}\n\n", tip));
        }
    }

    text.push_str(&format!("\n{}", labels.footer));
    Ok(text)
}

fn header(title: &str, details: &RespondentDetails) -> String {
    format!(
        "{} - {}\n{}\n\n",
        title,
        details.employee_name.trim(),
        TITLE_RULE
    )
}

fn category_heading(
    narrative: &NarrativeTable,
    language: Language,
    category: Category,
    scores: &ScoreResult,
) -> Result<String, NarrativeError> {
    let label = narrative.category_label(language, category)?;
    Ok(format!(
        "💠 {} ({}/5.0)\n{}\n",
        label.to_uppercase(),
        scores.formatted(category),
        SECTION_RULE
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dana() -> RespondentDetails {
        RespondentDetails {
            employee_name: "Dana Levi".to_string(),
            ..RespondentDetails::default()
        }
    }

    fn mixed_scores() -> ScoreResult {
        ScoreResult {
            autonomy: 4.0,
            competence: 2.5,
            relatedness: 3.5,
        }
    }

    #[test]
    fn full_report_renders_every_category_in_order() {
        let table = NarrativeTable::standard();
        let text = full_report(&dana(), &mixed_scores(), &table, Language::En).expect("report");

        assert!(text.starts_with("Motivation Profile - Dana Levi\n===============================\n\n"));
        assert!(text.ends_with("\nGenerated via Motivation Catalyst"));

        let autonomy = text.find("💠 AUTONOMY (4.0/5.0)").expect("autonomy heading");
        let competence = text.find("💠 COMPETENCE (2.5/5.0)").expect("competence heading");
        let relatedness = text
            .find("💠 RELATEDNESS (3.5/5.0)")
            .expect("relatedness heading");
        assert!(autonomy < competence && competence < relatedness);
    }

    #[test]
    fn full_report_uses_bucketed_variants_for_both_roles() {
        let table = NarrativeTable::standard();
        let text = full_report(&dana(), &mixed_scores(), &table, Language::En).expect("report");

        assert!(text.contains("   • Analysis: You might feel that the current challenges"));
        assert!(text.contains("   • Analysis: Employee is experiencing frustration"));
        assert!(text.contains(
            "   • Recommended Actions: Continue initiating new projects, Serve as a role model for self-management in the team\n"
        ));
        assert_eq!(text.matches("✨ Strategic AI Tip:").count(), 3);
        assert_eq!(text.matches("📋 Manager Recommendations:").count(), 3);
    }

    #[test]
    fn hebrew_report_uses_localized_labels() {
        let table = NarrativeTable::standard();
        let text = full_report(&dana(), &mixed_scores(), &table, Language::He).expect("report");
        assert!(text.starts_with("פרופיל מוטיבציה אישי - Dana Levi"));
        assert!(text.contains("💠 אוטונומיה (4.0/5.0)"));
        assert!(text.contains("👤 תובנות אישיות:"));
    }

    #[test]
    fn manager_section_omits_employee_content() {
        let table = NarrativeTable::standard();
        let text = render_report(
            ReportScope::Manager,
            &dana(),
            &mixed_scores(),
            &table,
            Language::En,
        )
        .expect("report");

        assert!(text.starts_with("Manager Recommendations - Dana Levi"));
        assert!(text.contains("Employee is experiencing frustration"));
        assert!(!text.contains("You might feel"));
        assert!(!text.contains("Strategic AI Tip"));
    }

    #[test]
    fn employee_section_includes_ai_tips() {
        let table = NarrativeTable::standard();
        let text = render_report(
            ReportScope::Employee,
            &dana(),
            &mixed_scores(),
            &table,
            Language::En,
        )
        .expect("report");

        assert!(text.starts_with("Personal Insights - Dana Levi"));
        assert_eq!(text.matches("✨ Strategic AI Tip:").count(), 3);
        assert!(!text.contains("Employee is experiencing"));
    }
}
