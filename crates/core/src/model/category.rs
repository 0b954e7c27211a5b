use thiserror::Error;

use crate::model::ids::CategoryId;

/// A subject-area tag used to partition questions.
///
/// Categories are owned by the external store; the session only holds their
/// ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
}

impl Category {
    /// Create a validated category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` if the name is empty after trimming.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Result<Self, CategoryError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        Ok(Self {
            id,
            name: trimmed.to_string(),
        })
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,
}
