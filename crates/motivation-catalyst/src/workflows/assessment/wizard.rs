use serde::{Deserialize, Serialize};

use super::catalog::QuestionCatalog;
use super::domain::{
    AnswerSet, DemoProfile, Language, Question, QuestionId, RespondentDetails, ScoreResult,
};
use super::scoring::compute_scores;

/// Where the respondent currently is in the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WizardPhase {
    Welcome,
    Assessment { index: usize },
    Analysis { scores: ScoreResult },
}

impl WizardPhase {
    pub fn label(&self) -> &'static str {
        match self {
            WizardPhase::Welcome => "welcome",
            WizardPhase::Assessment { .. } => "assessment",
            WizardPhase::Analysis { .. } => "analysis",
        }
    }
}

/// Inputs the wizard reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    SetLanguage(Language),
    EditDetails(RespondentDetails),
    Start,
    Answer { question_id: QuestionId, rating: u8 },
    Back,
    Reset,
    Demo(DemoProfile),
}

impl WizardEvent {
    pub fn label(&self) -> &'static str {
        match self {
            WizardEvent::SetLanguage(_) => "set_language",
            WizardEvent::EditDetails(_) => "edit_details",
            WizardEvent::Start => "start",
            WizardEvent::Answer { .. } => "answer",
            WizardEvent::Back => "back",
            WizardEvent::Reset => "reset",
            WizardEvent::Demo(_) => "demo",
        }
    }
}

/// Outcome of applying an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// State changed without reaching the analysis phase.
    Moved,
    /// The analysis phase was just entered; scoring ran exactly once.
    Completed(ScoreResult),
    /// The event was valid for the phase but its guard failed; state unchanged.
    Refused(RefusalReason),
    /// The event has no meaning in the current phase; state unchanged.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    MissingEmployeeName,
    UnknownQuestion(QuestionId),
    /// Answers must target the question currently shown.
    NotCurrentQuestion {
        expected: QuestionId,
        got: QuestionId,
    },
}

/// Immutable wizard value; every event consumes it and yields the successor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub phase: WizardPhase,
    pub details: RespondentDetails,
    pub answers: AnswerSet,
    pub language: Language,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl WizardState {
    pub fn new(language: Language) -> Self {
        Self {
            phase: WizardPhase::Welcome,
            details: RespondentDetails::default(),
            answers: AnswerSet::new(),
            language,
        }
    }

    pub fn apply(self, event: WizardEvent, catalog: &QuestionCatalog) -> (Self, Transition) {
        match (self.phase.clone(), event) {
            (_, WizardEvent::Reset) => {
                let language = self.language;
                (Self::new(language), Transition::Moved)
            }
            (_, WizardEvent::SetLanguage(language)) => {
                if language == self.language {
                    return (self, Transition::Ignored);
                }
                (Self { language, ..self }, Transition::Moved)
            }
            (WizardPhase::Welcome, WizardEvent::EditDetails(details)) => {
                (Self { details, ..self }, Transition::Moved)
            }
            (WizardPhase::Welcome, WizardEvent::Start) => {
                if !self.details.has_employee_name() {
                    return (
                        self,
                        Transition::Refused(RefusalReason::MissingEmployeeName),
                    );
                }
                (
                    Self {
                        phase: WizardPhase::Assessment { index: 0 },
                        ..self
                    },
                    Transition::Moved,
                )
            }
            (WizardPhase::Welcome, WizardEvent::Demo(profile)) => {
                let next = Self {
                    details: RespondentDetails::demo(),
                    answers: synthetic_answers(profile, catalog),
                    ..self
                };
                next.complete(catalog)
            }
            (
                WizardPhase::Assessment { index },
                WizardEvent::Answer {
                    question_id,
                    rating,
                },
            ) => {
                if !catalog.contains(question_id) {
                    return (
                        self,
                        Transition::Refused(RefusalReason::UnknownQuestion(question_id)),
                    );
                }
                if let Some(expected) = catalog.get(index).map(|question| question.id) {
                    if expected != question_id {
                        return (
                            self,
                            Transition::Refused(RefusalReason::NotCurrentQuestion {
                                expected,
                                got: question_id,
                            }),
                        );
                    }
                }
                let mut next = self;
                next.answers.insert(question_id, rating);
                if index + 1 < catalog.len() {
                    next.phase = WizardPhase::Assessment { index: index + 1 };
                    (next, Transition::Moved)
                } else {
                    next.complete(catalog)
                }
            }
            (WizardPhase::Assessment { index }, WizardEvent::Back) => {
                let phase = match index.checked_sub(1) {
                    Some(previous) => WizardPhase::Assessment { index: previous },
                    None => WizardPhase::Welcome,
                };
                (Self { phase, ..self }, Transition::Moved)
            }
            (_, _) => (self, Transition::Ignored),
        }
    }

    fn complete(self, catalog: &QuestionCatalog) -> (Self, Transition) {
        let scores = compute_scores(&self.answers, catalog);
        (
            Self {
                phase: WizardPhase::Analysis { scores },
                ..self
            },
            Transition::Completed(scores),
        )
    }

    /// The question shown in the assessment phase.
    pub fn current_question<'a>(&self, catalog: &'a QuestionCatalog) -> Option<&'a Question> {
        match self.phase {
            WizardPhase::Assessment { index } => catalog.get(index),
            _ => None,
        }
    }

    /// One-based position and total, e.g. `(3, 18)`.
    pub fn progress(&self, catalog: &QuestionCatalog) -> Option<(usize, usize)> {
        match self.phase {
            WizardPhase::Assessment { index } => Some((index + 1, catalog.len())),
            _ => None,
        }
    }

    pub fn scores(&self) -> Option<&ScoreResult> {
        match &self.phase {
            WizardPhase::Analysis { scores } => Some(scores),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, WizardPhase::Analysis { .. })
    }
}

/// Canned answers for every catalog question under a demo profile.
pub fn synthetic_answers(profile: DemoProfile, catalog: &QuestionCatalog) -> AnswerSet {
    catalog
        .questions()
        .iter()
        .map(|question| (question.id, profile.rating_for(question.weight)))
        .collect()
}
