//! Personality vocabulary: axes, poles, labels and the Yes/No question bank.

mod axis;
mod question;

pub use axis::{TraitAxis, TraitLabel, TraitLetter};
pub use question::{is_affirmative, Question, QuestionBank, Response};
