use std::collections::HashSet;

use quiz_core::model::CategoryId;

/// The set of categories a session is restricted to.
///
/// The empty selection is the distinguished "unfiltered" value: every
/// category is eligible. The selection is owned exclusively by the session;
/// renderers only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    ids: HashSet<CategoryId>,
}

impl CategorySelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the category if absent, remove it if present.
    ///
    /// Returns true when the category is selected after the toggle.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Reset to the unfiltered state.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn is_selected(&self, id: CategoryId) -> bool {
        self.ids.contains(&id)
    }

    /// True when no categories are selected, i.e. no filter applies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn ids(&self) -> &HashSet<CategoryId> {
        &self.ids
    }

    /// Owned copy of the selection, taken when a fetch is issued.
    #[must_use]
    pub fn snapshot(&self) -> HashSet<CategoryId> {
        self.ids.clone()
    }
}
