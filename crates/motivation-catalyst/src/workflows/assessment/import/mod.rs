mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::catalog::QuestionCatalog;
use super::domain::{AnswerSet, QuestionId, ScoreResult};
use super::scoring::compute_scores;

/// One row of an answer sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentAnswers {
    pub respondent: String,
    pub answers: AnswerSet,
}

impl RespondentAnswers {
    pub fn score(&self, catalog: &QuestionCatalog) -> ScoredRespondent {
        ScoredRespondent {
            respondent: self.respondent.clone(),
            answered: self.answers.len(),
            scores: compute_scores(&self.answers, catalog),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRespondent {
    pub respondent: String,
    pub answered: usize,
    pub scores: ScoreResult,
}

#[derive(Debug)]
pub enum AnswerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingRespondentColumn,
    InvalidColumn {
        column: String,
    },
    UnknownQuestion {
        id: QuestionId,
    },
    DuplicateColumn {
        id: QuestionId,
    },
    MissingRespondent {
        line: u64,
    },
    InvalidRating {
        line: u64,
        respondent: String,
        question_id: QuestionId,
        value: String,
    },
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Io(err) => write!(f, "failed to read answer sheet: {}", err),
            AnswerImportError::Csv(err) => write!(f, "invalid answer sheet CSV data: {}", err),
            AnswerImportError::MissingRespondentColumn => {
                write!(f, "answer sheet must start with a 'respondent' column")
            }
            AnswerImportError::InvalidColumn { column } => {
                write!(f, "column '{}' is not a question id", column)
            }
            AnswerImportError::UnknownQuestion { id } => {
                write!(f, "question {} is not part of the catalog", id)
            }
            AnswerImportError::DuplicateColumn { id } => {
                write!(f, "question {} appears in more than one column", id)
            }
            AnswerImportError::MissingRespondent { line } => {
                write!(f, "line {}: respondent name is empty", line)
            }
            AnswerImportError::InvalidRating {
                line,
                respondent,
                question_id,
                value,
            } => write!(
                f,
                "line {} ({}): rating '{}' for question {} must be a whole number from 1 to 5",
                line, respondent, value, question_id
            ),
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Io(err) => Some(err),
            AnswerImportError::Csv(err) => Some(err),
            AnswerImportError::MissingRespondentColumn
            | AnswerImportError::InvalidColumn { .. }
            | AnswerImportError::UnknownQuestion { .. }
            | AnswerImportError::DuplicateColumn { .. }
            | AnswerImportError::MissingRespondent { .. }
            | AnswerImportError::InvalidRating { .. } => None,
        }
    }
}

impl From<std::io::Error> for AnswerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads CSV answer sheets: a `respondent` column followed by one column per question id.
///
/// Empty cells are unanswered and score neutral.
pub struct AnswerSheetImporter;

impl AnswerSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &QuestionCatalog,
    ) -> Result<Vec<RespondentAnswers>, AnswerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &QuestionCatalog,
    ) -> Result<Vec<RespondentAnswers>, AnswerImportError> {
        parser::parse_sheet(reader, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn import(csv: &str) -> Result<Vec<RespondentAnswers>, AnswerImportError> {
        AnswerSheetImporter::from_reader(Cursor::new(csv), &QuestionCatalog::standard())
    }

    #[test]
    fn parses_rows_and_skips_blank_cells() {
        let sheet = import("respondent,1,2,4\nDana,5,1,\nAvi, 2 ,3,4\n").expect("sheet parses");

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet[0].respondent, "Dana");
        assert_eq!(sheet[0].answers.len(), 2);
        assert_eq!(sheet[0].answers.get(4), None);
        assert_eq!(sheet[1].answers.get(1), Some(2));
        assert_eq!(sheet[1].answers.get(4), Some(4));
    }

    #[test]
    fn scoring_a_row_applies_neutral_defaults() {
        let catalog = QuestionCatalog::standard();
        let sheet = import("respondent,1,2\nDana,5,1\n").expect("sheet parses");
        let scored = sheet[0].score(&catalog);
        assert_eq!(scored.answered, 2);
        // 5 + 5 + 3 * 4 = 22 over six autonomy items
        assert_eq!(scored.scores.autonomy, 3.7);
        assert_eq!(scored.scores.competence, 3.0);
    }

    #[test]
    fn rejects_out_of_range_rating() {
        match import("respondent,1\nDana,6\n") {
            Err(AnswerImportError::InvalidRating {
                line,
                respondent,
                question_id,
                value,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(respondent, "Dana");
                assert_eq!(question_id, 1);
                assert_eq!(value, "6");
            }
            other => panic!("expected invalid rating, got {other:?}"),
        }
        assert!(matches!(
            import("respondent,1\nDana,2.5\n"),
            Err(AnswerImportError::InvalidRating { .. })
        ));
        assert!(matches!(
            import("respondent,1\nDana,0\n"),
            Err(AnswerImportError::InvalidRating { .. })
        ));
    }

    #[test]
    fn rejects_bad_headers() {
        assert!(matches!(
            import("name,1\nDana,3\n"),
            Err(AnswerImportError::MissingRespondentColumn)
        ));
        assert!(matches!(
            import("respondent,q1\nDana,3\n"),
            Err(AnswerImportError::InvalidColumn { .. })
        ));
        assert!(matches!(
            import("respondent,1,99\nDana,3,3\n"),
            Err(AnswerImportError::UnknownQuestion { id: 99 })
        ));
        assert!(matches!(
            import("respondent,1,1\nDana,3,3\n"),
            Err(AnswerImportError::DuplicateColumn { id: 1 })
        ));
    }

    #[test]
    fn rejects_blank_respondent() {
        assert!(matches!(
            import("respondent,1\n,3\n"),
            Err(AnswerImportError::MissingRespondent { line: 2 })
        ));
    }
}
