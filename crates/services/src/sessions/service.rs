use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use quiz_core::model::{CategoryId, Question};
use storage::repository::StoreError;

use crate::error::SessionError;
use super::filter::CategorySelection;
use super::pick::pick_question;
use super::shuffle::shuffle_choices;
use super::state::{ActiveQuestion, EmptyReason, SessionState};

//
// ─── FETCH TICKET ──────────────────────────────────────────────────────────────
//

/// Identifies one fetch issued by a session.
///
/// The ticket carries the filter snapshot the fetch was issued for and the
/// generation it belongs to. `QuizSession::apply_fetch` only applies results
/// whose generation is still current, so overlapping fetches resolve with
/// latest-request-wins semantics and stale responses are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    filter: HashSet<CategoryId>,
}

impl FetchTicket {
    /// The filter snapshot this fetch was issued for.
    #[must_use]
    pub fn filter(&self) -> &HashSet<CategoryId> {
        &self.filter
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session: the category filter, the live state, and the
/// randomness used for picking and shuffling.
///
/// The session advances only through its named operations. Renderers read
/// `state()` and `selection()` and never mutate internals; every rejected
/// operation is a no-op that leaves the state untouched.
pub struct QuizSession {
    selection: CategorySelection,
    state: SessionState,
    generation: u64,
    rng: Box<dyn RngCore + Send>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selection: CategorySelection::new(),
            state: SessionState::Idle,
            generation: 0,
            rng: Box::new(StdRng::from_os_rng()),
        }
    }

    /// Replace the randomness source, fixing picks and shuffles in tests.
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    /// Start a fetch cycle over the current filter.
    ///
    /// Any in-flight presentation is dropped and earlier fetches become
    /// stale: their eventual results will be discarded by `apply_fetch`.
    pub fn begin_load(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.state = SessionState::Loading;
        FetchTicket {
            generation: self.generation,
            filter: self.selection.snapshot(),
        }
    }

    /// Toggle a category and restart selection over the changed filter.
    pub fn toggle_category(&mut self, id: CategoryId) -> FetchTicket {
        self.selection.toggle(id);
        self.begin_load()
    }

    /// Clear the filter and restart selection.
    ///
    /// Returns `None` when the filter was already empty: nothing changed, so
    /// no refetch is triggered.
    pub fn clear_categories(&mut self) -> Option<FetchTicket> {
        if self.selection.is_empty() {
            return None;
        }
        self.selection.clear();
        Some(self.begin_load())
    }

    /// Move on to a fresh question over the current filter.
    ///
    /// Legal from any state; calling it while `Loading` abandons interest in
    /// the outstanding fetch.
    pub fn next_question(&mut self) -> FetchTicket {
        self.begin_load()
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// A non-empty pool transitions to `Presenting` with a freshly picked
    /// question and shuffled choices; an empty pool to
    /// `Empty(NoQuestions)`; a fetch error to `Empty(StoreUnavailable)`.
    ///
    /// Returns false when the ticket is stale (a newer fetch supersedes it)
    /// and the result was discarded.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Question>, StoreError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return false;
        }

        self.state = match outcome {
            Err(err) => SessionState::Empty(EmptyReason::StoreUnavailable(err)),
            Ok(pool) => match pick_question(&pool, self.rng.as_mut()) {
                None => SessionState::Empty(EmptyReason::NoQuestions),
                Some(question) => {
                    let question = question.clone();
                    let choices = shuffle_choices(
                        question.correct_answer(),
                        question.distractors(),
                        self.rng.as_mut(),
                    );
                    SessionState::Presenting(ActiveQuestion::new(question, choices))
                }
            },
        };
        true
    }

    /// Record the user's tentative choice.
    ///
    /// Re-selecting the current choice is an idempotent no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownChoice` if the choice is not among the
    /// displayed answers, `SessionError::ChoicesLocked` once the question is
    /// graded, and `SessionError::NotPresenting` in any other state. The
    /// session state is unchanged on error.
    pub fn select_choice(&mut self, choice: &str) -> Result<(), SessionError> {
        match &mut self.state {
            SessionState::Presenting(active) => {
                if !active.has_choice(choice) {
                    return Err(SessionError::UnknownChoice);
                }
                active.set_selected(choice);
                Ok(())
            }
            SessionState::Graded(_) => {
                tracing::debug!(choice, "ignoring choice selection after grading");
                Err(SessionError::ChoicesLocked)
            }
            _ => Err(SessionError::NotPresenting),
        }
    }

    /// Grade the selected choice against the correct answer.
    ///
    /// On success the session transitions to `Graded` and the verdict is
    /// returned; grading compares the selected text to the correct answer by
    /// value, not by position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSelection` if no choice has been selected and
    /// `SessionError::NotPresenting` outside `Presenting`. The session state
    /// is unchanged on error.
    pub fn submit(&mut self) -> Result<bool, SessionError> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Presenting(active) => match active.into_graded() {
                Ok(graded) => {
                    let is_correct = graded.is_correct();
                    self.state = SessionState::Graded(graded);
                    Ok(is_correct)
                }
                Err(active) => {
                    self.state = SessionState::Presenting(active);
                    Err(SessionError::NoSelection)
                }
            },
            other => {
                self.state = other;
                Err(SessionError::NotPresenting)
            }
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("selection", &self.selection)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
