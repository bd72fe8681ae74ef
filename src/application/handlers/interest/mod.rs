//! Interest quiz handlers.

mod interest_quiz_handler;

pub use interest_quiz_handler::{
    AnswerInterestItemCommand, InterestPrompt, InterestQuizHandler, InterestQuizResult,
    InterestQuizStep, StartInterestQuizCommand, StartInterestQuizResult,
};
