pub mod controller;
pub mod score;
pub mod state;

use thiserror::Error;

pub use controller::{Navigation, SessionController};

/// Rejected session operations. None of these are fatal: by the time one is
/// returned the session is already in its fallback state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("no problem `{id}` in category `{category}`")]
    UnknownProblem { category: String, id: String },
    #[error("no problem is selected")]
    NoProblemSelected,
    #[error("problem `{0}` is not a quiz")]
    NotAQuiz(String),
    #[error("quiz `{0}` has no answerable choices")]
    Unanswerable(String),
    #[error("choice {choice} is out of range for quiz `{id}` ({len} choices)")]
    ChoiceOutOfRange { id: String, choice: usize, len: usize },
}
