use std::collections::HashSet;
use std::io::Read;

use super::super::catalog::QuestionCatalog;
use super::super::domain::{AnswerSet, QuestionId, MAX_RATING, MIN_RATING};
use super::{AnswerImportError, RespondentAnswers};

const RESPONDENT_COLUMN: &str = "respondent";

pub(super) fn parse_sheet<R: Read>(
    reader: R,
    catalog: &QuestionCatalog,
) -> Result<Vec<RespondentAnswers>, AnswerImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = question_columns(csv_reader.headers()?, catalog)?;
    let mut sheet = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |position| position.line());
        let respondent = record.get(0).unwrap_or_default().to_string();
        if respondent.is_empty() {
            return Err(AnswerImportError::MissingRespondent { line });
        }

        let mut answers = AnswerSet::new();
        for (offset, question_id) in columns.iter().enumerate() {
            let cell = record.get(offset + 1).unwrap_or_default();
            if cell.is_empty() {
                continue;
            }
            let rating = parse_rating(cell).ok_or_else(|| AnswerImportError::InvalidRating {
                line,
                respondent: respondent.clone(),
                question_id: *question_id,
                value: cell.to_string(),
            })?;
            answers.insert(*question_id, rating);
        }

        sheet.push(RespondentAnswers {
            respondent,
            answers,
        });
    }

    Ok(sheet)
}

fn question_columns(
    headers: &csv::StringRecord,
    catalog: &QuestionCatalog,
) -> Result<Vec<QuestionId>, AnswerImportError> {
    let mut fields = headers.iter();
    match fields.next() {
        Some(first) if first.eq_ignore_ascii_case(RESPONDENT_COLUMN) => {}
        _ => return Err(AnswerImportError::MissingRespondentColumn),
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for field in fields {
        let id: QuestionId = field
            .parse()
            .map_err(|_| AnswerImportError::InvalidColumn {
                column: field.to_string(),
            })?;
        if !catalog.contains(id) {
            return Err(AnswerImportError::UnknownQuestion { id });
        }
        if !seen.insert(id) {
            return Err(AnswerImportError::DuplicateColumn { id });
        }
        columns.push(id);
    }

    Ok(columns)
}

fn parse_rating(cell: &str) -> Option<u8> {
    cell.parse::<u8>()
        .ok()
        .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
}
