use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a Category
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(u64);

impl CategoryId {
    /// Creates a new `CategoryId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Unique identifier for a Question
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(u64);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id_display() {
        let id = CategoryId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new(99);
        assert_eq!(id.to_string(), "99");
    }

    #[test]
    fn test_ids_with_same_value_are_distinct_types() {
        let category = CategoryId::new(7);
        let question = QuestionId::new(7);
        assert_eq!(category.value(), question.value());
        assert_eq!(format!("{category:?}"), "CategoryId(7)");
        assert_eq!(format!("{question:?}"), "QuestionId(7)");
    }
}
