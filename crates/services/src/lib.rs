#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::SessionError;

pub use sessions::{
    ActiveQuestion, CategorySelection, EmptyReason, FetchTicket, GradedQuestion, QuizLoopService,
    QuizSession, SessionState,
};
