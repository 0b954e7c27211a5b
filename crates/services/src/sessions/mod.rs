mod filter;
mod pick;
mod shuffle;
mod state;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use filter::CategorySelection;
pub use pick::pick_question;
pub use shuffle::shuffle_choices;
pub use state::{ActiveQuestion, EmptyReason, GradedQuestion, SessionState};
pub use service::{FetchTicket, QuizSession};
pub use workflow::QuizLoopService;
