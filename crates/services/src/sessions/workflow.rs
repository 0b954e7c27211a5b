use std::sync::Arc;

use quiz_core::model::{Category, CategoryId};
use storage::repository::{QuestionSource, StoreError};

use super::service::{FetchTicket, QuizSession};

/// Drives `QuizSession` fetch cycles against a `QuestionSource`.
///
/// Fetch failures are folded into the session state (`Empty` with a
/// `StoreUnavailable` reason) instead of being returned; the engine never
/// retries on its own, so a retry is a caller-initiated re-trigger of the
/// filter/fetch cycle.
#[derive(Clone)]
pub struct QuizLoopService {
    source: Arc<dyn QuestionSource>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// List the categories available for filtering, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the store cannot be reached.
    pub async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.source.list_categories().await
    }

    /// Run the first fetch cycle for a fresh session.
    pub async fn start(&self, session: &mut QuizSession) {
        let ticket = session.begin_load();
        self.run_fetch(session, ticket).await;
    }

    /// Toggle a category and re-run selection over the changed filter.
    pub async fn toggle_category(&self, session: &mut QuizSession, id: CategoryId) {
        let ticket = session.toggle_category(id);
        self.run_fetch(session, ticket).await;
    }

    /// Clear the filter and re-run selection, if anything was selected.
    pub async fn clear_categories(&self, session: &mut QuizSession) {
        if let Some(ticket) = session.clear_categories() {
            self.run_fetch(session, ticket).await;
        }
    }

    /// Advance to a fresh question over the current filter.
    pub async fn next_question(&self, session: &mut QuizSession) {
        let ticket = session.next_question();
        self.run_fetch(session, ticket).await;
    }

    /// Run the fetch described by `ticket` and feed the outcome back to the
    /// session.
    ///
    /// Public so an embedding event loop can issue overlapping fetches; the
    /// session's generation check keeps latest-request-wins semantics either
    /// way.
    pub async fn run_fetch(&self, session: &mut QuizSession, ticket: FetchTicket) {
        let outcome = self.source.list_questions(ticket.filter()).await;
        session.apply_fetch(ticket, outcome);
    }
}
