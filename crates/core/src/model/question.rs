use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("correct answer cannot be empty")]
    EmptyCorrectAnswer,

    #[error("a question needs at least one distractor")]
    NoDistractors,

    #[error("distractors cannot be empty")]
    EmptyDistractor,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question owned by the external store.
///
/// The correct answer and its distractors are stored separately; a display
/// ordering is produced per presentation by the session engine. Distractor
/// text may coincide with the correct answer (grading compares by value), so
/// duplicate display text is a data-quality concern of the store, not
/// rejected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category_id: CategoryId,
    text: String,
    correct_answer: String,
    distractors: Vec<String>,
    explanation: String,
    additional_info: Option<String>,
}

impl Question {
    /// Create a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` or `QuestionError::EmptyCorrectAnswer`
    /// if the respective text is empty after trimming,
    /// `QuestionError::NoDistractors` if no distractor is provided, and
    /// `QuestionError::EmptyDistractor` if any distractor is blank.
    pub fn new(
        id: QuestionId,
        category_id: CategoryId,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        distractors: Vec<String>,
        explanation: impl Into<String>,
        additional_info: Option<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let correct_answer = correct_answer.into();
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectAnswer);
        }

        if distractors.is_empty() {
            return Err(QuestionError::NoDistractors);
        }
        if distractors.iter().any(|d| d.trim().is_empty()) {
            return Err(QuestionError::EmptyDistractor);
        }

        Ok(Self {
            id,
            category_id,
            text,
            correct_answer,
            distractors,
            explanation: explanation.into(),
            additional_info,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn distractors(&self) -> &[String] {
        &self.distractors
    }

    /// Explanation shown once the answer has been graded.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Optional supplementary reading shown alongside the explanation.
    #[must_use]
    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref()
    }

    /// Number of answer choices this question displays.
    #[must_use]
    pub fn choice_count(&self) -> usize {
        1 + self.distractors.len()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
