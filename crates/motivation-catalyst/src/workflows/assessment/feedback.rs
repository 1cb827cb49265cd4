use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Language, ScoreResult};

/// Longest comment accepted, in characters.
pub const MAX_COMMENT_CHARS: usize = 2000;

/// Thumbs rating over the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FeedbackRating {
    ThumbsDown,
    ThumbsUp,
}

impl TryFrom<u8> for FeedbackRating {
    type Error = FeedbackError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::ThumbsDown),
            5 => Ok(Self::ThumbsUp),
            other => Err(FeedbackError::InvalidRating(other)),
        }
    }
}

impl From<FeedbackRating> for u8 {
    fn from(rating: FeedbackRating) -> Self {
        match rating {
            FeedbackRating::ThumbsDown => 1,
            FeedbackRating::ThumbsUp => 5,
        }
    }
}

/// Feedback as submitted by a respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub rating: FeedbackRating,
    #[serde(default)]
    pub comment: String,
    pub results: ScoreResult,
    #[serde(default)]
    pub language: Language,
}

/// Stored feedback entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub rating: FeedbackRating,
    pub comment: String,
    pub results: ScoreResult,
    pub language: Language,
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Trims the comment and enforces its length limit.
    pub fn from_submission(
        submission: FeedbackSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, FeedbackError> {
        let comment = submission.comment.trim().to_string();
        let length = comment.chars().count();
        if length > MAX_COMMENT_CHARS {
            return Err(FeedbackError::CommentTooLong { length });
        }

        Ok(Self {
            rating: submission.rating,
            comment,
            results: submission.results,
            language: submission.language,
            submitted_at,
        })
    }
}

/// Storage abstraction for feedback records.
pub trait FeedbackRepository: Send + Sync {
    fn save(&self, record: FeedbackRecord) -> Result<FeedbackRecord, FeedbackError>;
    fn list(&self) -> Result<Vec<FeedbackRecord>, FeedbackError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback rating must be 1 (thumbs down) or 5 (thumbs up), got {0}")]
    InvalidRating(u8),
    #[error("feedback comment is {length} characters; the limit is {MAX_COMMENT_CHARS}")]
    CommentTooLong { length: usize },
    #[error("feedback can only be given once results are available")]
    ResultsUnavailable,
    #[error("feedback storage unavailable: {0}")]
    Storage(String),
}
