mod category;
mod ids;
mod question;

pub use category::{Category, CategoryError};
pub use ids::{CategoryId, QuestionId};
pub use question::{Question, QuestionError};
