use super::super::domain::{Bucket, Category, Language, Role, ScoreResult};
use super::super::narrative::{AnalysisDetail, NarrativeError, NarrativeTable, TipTopic};
use super::views::ConversationStarterView;

/// Low/high variant for a category score, looked up for one audience.
pub fn select_insight<'a>(
    narrative: &'a NarrativeTable,
    category: Category,
    role: Role,
    score: f64,
    language: Language,
) -> Result<&'a AnalysisDetail, NarrativeError> {
    narrative.insight(language, category, role, Bucket::for_score(score))
}

/// Topic of the conversation starter: the weakest need, or `High` if even it is high.
///
/// Ties resolve to the category declared first.
pub fn priority_topic(scores: &ScoreResult) -> TipTopic {
    let mut ranked = scores.entries();
    ranked.sort_by(|(_, left), (_, right)| left.total_cmp(right));
    let (weakest, lowest) = ranked[0];

    match Bucket::for_score(lowest) {
        Bucket::High => TipTopic::High,
        Bucket::Low => TipTopic::from(weakest),
    }
}

pub fn conversation_starter(
    narrative: &NarrativeTable,
    role: Role,
    scores: &ScoreResult,
    language: Language,
) -> Result<ConversationStarterView, NarrativeError> {
    let topic = priority_topic(scores);
    let tip = narrative.conversation_tip(language, role, topic)?;
    Ok(ConversationStarterView {
        role,
        topic,
        tip: tip.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(autonomy: f64, competence: f64, relatedness: f64) -> ScoreResult {
        ScoreResult {
            autonomy,
            competence,
            relatedness,
        }
    }

    #[test]
    fn bucket_boundary_selects_high_at_threshold() {
        let table = NarrativeTable::standard();
        let high = table
            .insight(Language::En, Category::Autonomy, Role::Employee, Bucket::High)
            .expect("high");
        let low = table
            .insight(Language::En, Category::Autonomy, Role::Employee, Bucket::Low)
            .expect("low");

        let at_threshold =
            select_insight(&table, Category::Autonomy, Role::Employee, 3.5, Language::En)
                .expect("insight");
        let below =
            select_insight(&table, Category::Autonomy, Role::Employee, 3.4, Language::En)
                .expect("insight");

        assert_eq!(at_threshold, high);
        assert_eq!(below, low);
    }

    #[test]
    fn selection_depends_on_role_and_language() {
        let table = NarrativeTable::standard();
        let employee =
            select_insight(&table, Category::Competence, Role::Employee, 2.0, Language::En)
                .expect("employee");
        let manager =
            select_insight(&table, Category::Competence, Role::Manager, 2.0, Language::En)
                .expect("manager");
        let hebrew =
            select_insight(&table, Category::Competence, Role::Manager, 2.0, Language::He)
                .expect("hebrew");

        assert!(employee.analysis.starts_with("You might feel"));
        assert!(manager.analysis.starts_with("Employee is experiencing"));
        assert_ne!(manager.analysis, hebrew.analysis);
    }

    #[test]
    fn priority_topic_picks_lowest_category() {
        assert_eq!(priority_topic(&scores(4.0, 2.1, 3.0)), TipTopic::Competence);
        assert_eq!(priority_topic(&scores(1.5, 2.1, 3.0)), TipTopic::Autonomy);
    }

    #[test]
    fn priority_topic_ties_follow_declaration_order() {
        assert_eq!(priority_topic(&scores(3.0, 2.0, 2.0)), TipTopic::Competence);
        assert_eq!(priority_topic(&scores(2.0, 3.0, 2.0)), TipTopic::Autonomy);
        assert_eq!(priority_topic(&scores(3.0, 3.0, 3.0)), TipTopic::Autonomy);
    }

    #[test]
    fn priority_topic_is_high_when_every_need_is_met() {
        assert_eq!(priority_topic(&scores(3.5, 4.0, 5.0)), TipTopic::High);
        assert_eq!(priority_topic(&scores(3.5, 3.4, 5.0)), TipTopic::Competence);
    }

    #[test]
    fn conversation_starter_uses_role_specific_tip() {
        let table = NarrativeTable::standard();
        let starter = conversation_starter(
            &table,
            Role::Employee,
            &scores(4.0, 4.0, 2.0),
            Language::En,
        )
        .expect("starter");
        assert_eq!(starter.topic, TipTopic::Relatedness);
        assert!(starter.tip.contains("disconnected"));
    }
}
