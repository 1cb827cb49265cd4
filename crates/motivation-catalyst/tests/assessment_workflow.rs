//! End-to-end scenarios for the questionnaire wizard, scoring, and insight selection,
//! exercised only through the public crate surface.

use motivation_catalyst::workflows::assessment::{
    conversation_starter, priority_topic, render_report, select_insight, synthetic_answers,
    AnswerSheetImporter, Bucket, Category, DemoProfile, Language, NarrativeTable,
    QuestionCatalog, RefusalReason, ReportScope, RespondentDetails, Role, ScoreResult, TipTopic,
    Transition, WizardEvent, WizardPhase, WizardState,
};

fn details() -> RespondentDetails {
    RespondentDetails {
        employee_name: "Noa Katz".to_string(),
        manager_name: "Ron Shalev".to_string(),
        ..RespondentDetails::default()
    }
}

#[test]
fn wizard_walks_back_and_forward_before_completing() {
    let catalog = QuestionCatalog::standard();
    let state = WizardState::new(Language::En);

    let (state, transition) = state.apply(WizardEvent::Start, &catalog);
    assert_eq!(
        transition,
        Transition::Refused(RefusalReason::MissingEmployeeName)
    );

    let (state, _) = state.apply(WizardEvent::EditDetails(details()), &catalog);
    let (state, transition) = state.apply(WizardEvent::Start, &catalog);
    assert_eq!(transition, Transition::Moved);
    assert_eq!(state.progress(&catalog), Some((1, 18)));

    let (state, _) = state.apply(
        WizardEvent::Answer {
            question_id: 1,
            rating: 2,
        },
        &catalog,
    );
    let (state, _) = state.apply(WizardEvent::Back, &catalog);
    assert_eq!(state.phase, WizardPhase::Assessment { index: 0 });
    assert_eq!(state.answers.get(1), Some(2));

    let mut state = state;
    let mut completed = None;
    for question in catalog.questions() {
        let (next, transition) = state.apply(
            WizardEvent::Answer {
                question_id: question.id,
                rating: 4,
            },
            &catalog,
        );
        state = next;
        if let Transition::Completed(scores) = transition {
            completed = Some(scores);
        }
    }

    let scores = completed.expect("last answer completes the wizard");
    assert_eq!(state.scores(), Some(&scores));
    assert_eq!(state.answers.get(1), Some(4));
    assert_eq!(scores.competence, 3.3);
    assert!(state.current_question(&catalog).is_none());
}

#[test]
fn insight_selection_uses_the_high_threshold() {
    let narrative = NarrativeTable::standard();
    let low = select_insight(&narrative, Category::Relatedness, Role::Manager, 3.4, Language::En)
        .expect("low insight");
    let high = select_insight(&narrative, Category::Relatedness, Role::Manager, 3.5, Language::En)
        .expect("high insight");
    assert_ne!(low, high);
    assert_eq!(Bucket::for_score(3.5), Bucket::High);
    assert!(!high.actions.is_empty());
}

#[test]
fn conversation_starter_targets_weakest_category_with_declaration_tie_break() {
    let narrative = NarrativeTable::standard();
    let tied = ScoreResult {
        autonomy: 3.0,
        competence: 2.5,
        relatedness: 2.5,
    };
    assert_eq!(priority_topic(&tied), TipTopic::Competence);

    let thriving = ScoreResult {
        autonomy: 4.0,
        competence: 3.5,
        relatedness: 4.8,
    };
    let starter = conversation_starter(&narrative, Role::Employee, &thriving, Language::He)
        .expect("starter");
    assert_eq!(starter.topic, TipTopic::High);
    assert!(!starter.tip.is_empty());
}

#[test]
fn demo_profiles_span_the_scale() {
    let catalog = QuestionCatalog::standard();
    for (profile, expected) in [
        (DemoProfile::High, 5.0),
        (DemoProfile::Mid, 3.0),
        (DemoProfile::AtRisk, 1.0),
    ] {
        let answers = synthetic_answers(profile, &catalog);
        assert_eq!(answers.len(), catalog.len());
        let state = WizardState::default();
        let (state, transition) = state.apply(WizardEvent::Demo(profile), &catalog);
        assert!(matches!(transition, Transition::Completed(_)));
        let scores = state.scores().expect("demo scores");
        for category in Category::ordered() {
            assert_eq!(scores.get(category), expected);
        }
    }
}

#[test]
fn reports_render_in_both_languages() {
    let narrative = NarrativeTable::standard();
    let scores = ScoreResult {
        autonomy: 2.1,
        competence: 4.6,
        relatedness: 3.5,
    };

    for language in Language::ordered() {
        let full = render_report(ReportScope::Full, &details(), &scores, &narrative, language)
            .expect("full report");
        assert!(full.contains("Noa Katz"));
        assert!(full.contains("(2.1/5.0)"));

        let manager = render_report(
            ReportScope::Manager,
            &details(),
            &scores,
            &narrative,
            language,
        )
        .expect("manager section");
        assert!(manager.chars().count() < full.chars().count());
    }
}

#[test]
fn answer_sheet_fixture_scores_every_respondent() {
    let catalog = QuestionCatalog::standard();
    let data = include_bytes!("../fixtures/team_answers.csv");

    let sheet = AnswerSheetImporter::from_reader(&data[..], &catalog).expect("sheet imports");
    assert_eq!(sheet.len(), 3);

    let scored: Vec<_> = sheet.iter().map(|row| row.score(&catalog)).collect();
    assert_eq!(scored[0].respondent, "Noa Katz");
    assert_eq!(scored[0].scores.autonomy, 5.0);
    assert_eq!(scored[1].scores.relatedness, 1.0);

    let partial = &scored[2];
    assert_eq!(partial.answered, 12);
    // autonomy: 4, 4, 4, 3, 4, 4 -> 23 / 6
    assert_eq!(partial.scores.autonomy, 3.8);
    // no relatedness answers: neutral midpoint
    assert_eq!(partial.scores.relatedness, 3.0);
}
