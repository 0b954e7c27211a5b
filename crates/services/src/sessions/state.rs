use quiz_core::model::Question;
use storage::repository::StoreError;

/// Why a session has nothing to present.
///
/// Both cases surface as `SessionState::Empty`; the reason lets a renderer
/// distinguish "no questions for this filter" from "could not load
/// questions".
#[derive(Debug)]
pub enum EmptyReason {
    /// The fetch succeeded but no questions matched the filter.
    NoQuestions,
    /// The store could not be reached.
    StoreUnavailable(StoreError),
}

/// A question on display, with its shuffled choices and the user's tentative
/// selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestion {
    question: Question,
    choices: Vec<String>,
    selected: Option<String>,
}

impl ActiveQuestion {
    pub(crate) fn new(question: Question, choices: Vec<String>) -> Self {
        Self {
            question,
            choices,
            selected: None,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// The displayed ordering, a permutation of the correct answer and its
    /// distractors.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub(crate) fn has_choice(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }

    /// Record a tentative selection; re-selecting the same value is a no-op.
    pub(crate) fn set_selected(&mut self, choice: &str) {
        if self.selected.as_deref() == Some(choice) {
            return;
        }
        self.selected = Some(choice.to_owned());
    }

    /// Grade the tentative selection, consuming the presentation.
    ///
    /// Returns the presentation unchanged when nothing is selected.
    pub(crate) fn into_graded(self) -> Result<GradedQuestion, Self> {
        let Self {
            question,
            choices,
            selected,
        } = self;
        match selected {
            Some(selected) => {
                let is_correct = selected == question.correct_answer();
                Ok(GradedQuestion {
                    question,
                    choices,
                    selected,
                    is_correct,
                })
            }
            None => Err(Self {
                question,
                choices,
                selected: None,
            }),
        }
    }
}

/// A graded question; answers are locked until the next cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedQuestion {
    question: Question,
    choices: Vec<String>,
    selected: String,
    is_correct: bool,
}

impl GradedQuestion {
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// The choice that was graded; always a member of `choices`.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

/// The live state of a quiz session.
///
/// Exactly one state is live at a time; every transition replaces it
/// wholesale, so no partial mutation survives across transitions.
#[derive(Debug)]
pub enum SessionState {
    /// No cycle has started yet.
    Idle,
    /// A fetch for eligible questions is outstanding.
    Loading,
    /// A question is on display, awaiting a submission.
    Presenting(ActiveQuestion),
    /// The submission has been graded; answers are locked.
    Graded(GradedQuestion),
    /// Nothing to present.
    Empty(EmptyReason),
}

impl SessionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn presenting(&self) -> Option<&ActiveQuestion> {
        match self {
            Self::Presenting(active) => Some(active),
            _ => None,
        }
    }

    #[must_use]
    pub fn graded(&self) -> Option<&GradedQuestion> {
        match self {
            Self::Graded(graded) => Some(graded),
            _ => None,
        }
    }

    #[must_use]
    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            Self::Empty(reason) => Some(reason),
            _ => None,
        }
    }
}
