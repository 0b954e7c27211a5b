use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::{Category, CategoryError, CategoryId, Question, QuestionError, QuestionId};

/// Errors surfaced by question stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: u64,
    pub name: String,
}

impl CategoryRecord {
    #[must_use]
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: category.id().value(),
            name: category.name().to_owned(),
        }
    }

    /// Convert the record back into a domain `Category`.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError` if the name fails validation.
    pub fn into_category(self) -> Result<Category, CategoryError> {
        Category::new(CategoryId::new(self.id), self.name)
    }
}

/// Persisted shape for a question.
///
/// This mirrors the domain `Question` so stores can serialize/deserialize
/// without leaking storage concerns into the domain layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u64,
    pub category_id: u64,
    pub text: String,
    pub correct_answer: String,
    pub distractors: Vec<String>,
    pub explanation: String,
    pub additional_info: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id().value(),
            category_id: question.category_id().value(),
            text: question.text().to_owned(),
            correct_answer: question.correct_answer().to_owned(),
            distractors: question.distractors().to_vec(),
            explanation: question.explanation().to_owned(),
            additional_info: question.additional_info().map(str::to_owned),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if text or answers fail validation.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            QuestionId::new(self.id),
            CategoryId::new(self.category_id),
            self.text,
            self.correct_answer,
            self.distractors,
            self.explanation,
            self.additional_info,
        )
    }
}

/// Read-only source of quiz questions and their categories.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// List all categories, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the store cannot be reached.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// List the questions whose category is a member of `filter`.
    ///
    /// An empty filter means no restriction: every question is eligible.
    /// No ordering is guaranteed; callers must not rely on one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the store cannot be reached.
    async fn list_questions(
        &self,
        filter: &HashSet<CategoryId>,
    ) -> Result<Vec<Question>, StoreError>;
}

/// Simple in-memory question bank for testing and prototyping.
#[derive(Clone, Default, Debug)]
pub struct InMemoryQuestionBank {
    categories: Arc<Mutex<HashMap<CategoryId, Category>>>,
    questions: Arc<Mutex<HashMap<QuestionId, Question>>>,
}

impl InMemoryQuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Arc::new(Mutex::new(HashMap::new())),
            questions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Build a bank from raw records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if any record fails domain
    /// validation.
    pub fn from_records(
        categories: Vec<CategoryRecord>,
        questions: Vec<QuestionRecord>,
    ) -> Result<Self, StoreError> {
        let bank = Self::new();
        for record in categories {
            let category = record
                .into_category()
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            bank.upsert_category(category)?;
        }
        for record in questions {
            let question = record
                .into_question()
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            bank.upsert_question(question)?;
        }
        Ok(bank)
    }

    /// Insert or replace a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the bank lock is poisoned.
    pub fn upsert_category(&self, category: Category) -> Result<(), StoreError> {
        let mut guard = self
            .categories
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        guard.insert(category.id(), category);
        Ok(())
    }

    /// Insert or replace a question.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the bank lock is poisoned.
    pub fn upsert_question(&self, question: Question) -> Result<(), StoreError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        guard.insert(question.id(), question);
        Ok(())
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionBank {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let guard = self
            .categories
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let mut all: Vec<Category> = guard.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    async fn list_questions(
        &self,
        filter: &HashSet<CategoryId>,
    ) -> Result<Vec<Question>, StoreError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let eligible = guard
            .values()
            .filter(|q| filter.is_empty() || filter.contains(&q.category_id()))
            .cloned()
            .collect();
        Ok(eligible)
    }
}
