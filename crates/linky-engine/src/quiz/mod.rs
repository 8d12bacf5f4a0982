// quiz/mod.rs
//
// Quiz engine: static question/profile tables and the scoring reducer.
// Pure functions over static data.

pub mod category;
pub mod data;
pub mod scoring;

pub use category::{Category, Weights};
pub use data::{
    gathering, profile_for, question, questions, Accent, Choice, Question, Recommendation,
    ResultProfile, GATHERINGS, QUESTIONS, QUESTION_COUNT,
};
pub use scoring::{resolve_profile, score_answers, total_weights, winner};
