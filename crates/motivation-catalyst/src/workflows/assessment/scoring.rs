use super::catalog::QuestionCatalog;
use super::domain::{AnswerSet, Category, ScoreResult, NEUTRAL_RATING};

/// Per-category averages over the catalog, with reverse scoring and neutral defaults.
///
/// Every catalog question contributes exactly once; answers for ids outside the
/// catalog are ignored. A category without questions scores the neutral midpoint.
pub fn compute_scores(answers: &AnswerSet, catalog: &QuestionCatalog) -> ScoreResult {
    let score = |category: Category| {
        let (sum, count) = catalog
            .questions_for_category(category)
            .map(|question| {
                let rating = answers.get(question.id).unwrap_or(NEUTRAL_RATING);
                u32::from(question.weight.contribution(rating))
            })
            .fold((0u32, 0u32), |(sum, count), value| (sum + value, count + 1));

        if count == 0 {
            f64::from(NEUTRAL_RATING)
        } else {
            round_one_decimal(f64::from(sum) / f64::from(count))
        }
    };

    ScoreResult {
        autonomy: score(Category::Autonomy),
        competence: score(Category::Competence),
        relatedness: score(Category::Relatedness),
    }
}

/// Rounds half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::{
        DemoProfile, LocalizedText, Question, QuestionId, Weight,
    };

    fn question(id: QuestionId, category: Category, weight: Weight) -> Question {
        Question {
            id,
            category,
            text: LocalizedText::new("", ""),
            weight,
        }
    }

    fn demo_answers(profile: DemoProfile, catalog: &QuestionCatalog) -> AnswerSet {
        catalog
            .questions()
            .iter()
            .map(|q| (q.id, profile.rating_for(q.weight)))
            .collect()
    }

    #[test]
    fn empty_answers_score_neutral() {
        let scores = compute_scores(&AnswerSet::new(), &QuestionCatalog::standard());
        assert_eq!(scores.autonomy, 3.0);
        assert_eq!(scores.competence, 3.0);
        assert_eq!(scores.relatedness, 3.0);
    }

    #[test]
    fn reverse_item_contributes_inverted_rating() {
        let catalog = QuestionCatalog::from_questions(vec![question(
            1,
            Category::Autonomy,
            Weight::Reverse,
        )])
        .expect("catalog");
        for (rating, expected) in [(1, 5.0), (2, 4.0), (5, 1.0)] {
            let answers: AnswerSet = [(1, rating)].into_iter().collect();
            assert_eq!(compute_scores(&answers, &catalog).autonomy, expected);
        }
    }

    #[test]
    fn three_question_example() {
        let catalog = QuestionCatalog::from_questions(vec![
            question(1, Category::Autonomy, Weight::Direct),
            question(2, Category::Autonomy, Weight::Reverse),
            question(3, Category::Competence, Weight::Direct),
        ])
        .expect("catalog");
        let answers: AnswerSet = [(1, 5), (2, 1), (3, 4)].into_iter().collect();

        let scores = compute_scores(&answers, &catalog);
        assert_eq!(scores.autonomy, 5.0);
        assert_eq!(scores.competence, 4.0);
        assert_eq!(scores.relatedness, 3.0);
    }

    #[test]
    fn averages_round_to_one_decimal() {
        let catalog = QuestionCatalog::from_questions(vec![
            question(1, Category::Competence, Weight::Direct),
            question(2, Category::Competence, Weight::Direct),
            question(3, Category::Competence, Weight::Direct),
        ])
        .expect("catalog");
        // 13 / 3 = 4.333...
        let answers: AnswerSet = [(1, 5), (2, 4), (3, 4)].into_iter().collect();
        assert_eq!(compute_scores(&answers, &catalog).competence, 4.3);

        // 14 / 4 = 3.5 exactly stays 3.5
        let catalog = QuestionCatalog::from_questions(vec![
            question(1, Category::Relatedness, Weight::Direct),
            question(2, Category::Relatedness, Weight::Direct),
            question(3, Category::Relatedness, Weight::Direct),
            question(4, Category::Relatedness, Weight::Direct),
        ])
        .expect("catalog");
        let answers: AnswerSet = [(1, 5), (2, 5), (3, 2), (4, 2)].into_iter().collect();
        assert_eq!(compute_scores(&answers, &catalog).relatedness, 3.5);
    }

    #[test]
    fn rounding_goes_half_away_from_zero() {
        assert_eq!(round_one_decimal(3.25), 3.3);
        assert_eq!(round_one_decimal(4.75), 4.8);
        assert_eq!(round_one_decimal(2.0 + 1.0 / 6.0), 2.2);
    }

    #[test]
    fn answers_outside_catalog_are_ignored() {
        let catalog = QuestionCatalog::standard();
        let answers: AnswerSet = [(99, 1), (100, 5)].into_iter().collect();
        assert_eq!(
            compute_scores(&answers, &catalog),
            compute_scores(&AnswerSet::new(), &catalog)
        );
    }

    #[test]
    fn scores_stay_within_likert_bounds() {
        let catalog = QuestionCatalog::standard();
        for rating in 1..=5u8 {
            let answers: AnswerSet = catalog.questions().iter().map(|q| (q.id, rating)).collect();
            for (_, score) in compute_scores(&answers, &catalog).entries() {
                assert!((1.0..=5.0).contains(&score), "score {score} out of bounds");
            }
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let catalog = QuestionCatalog::standard();
        let answers: AnswerSet = catalog
            .questions()
            .iter()
            .enumerate()
            .map(|(index, q)| (q.id, (index % 5) as u8 + 1))
            .collect();
        assert_eq!(
            compute_scores(&answers, &catalog),
            compute_scores(&answers, &catalog)
        );
    }

    #[test]
    fn demo_profiles_land_in_expected_ranges() {
        let catalog = QuestionCatalog::standard();

        let high = compute_scores(&demo_answers(DemoProfile::High, &catalog), &catalog);
        let mid = compute_scores(&demo_answers(DemoProfile::Mid, &catalog), &catalog);
        let at_risk = compute_scores(&demo_answers(DemoProfile::AtRisk, &catalog), &catalog);

        for category in Category::ordered() {
            assert!(high.get(category) >= 4.0);
            assert_eq!(mid.get(category), 3.0);
            assert!(at_risk.get(category) <= 2.0);
        }
        assert_eq!(high.autonomy, 5.0);
        assert_eq!(at_risk.relatedness, 1.0);
    }
}
