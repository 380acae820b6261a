//! # course-quiz
//!
//! Turn a course PDF into a multiple-choice quiz with a chat-completion
//! model, take the quiz in the terminal and keep a history of attempts.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use course_quiz::{QuizError, Store, parse};
//! use chrono::Local;
//!
//! fn main() -> Result<(), QuizError> {
//!     let raw = "1. Quelle est la capitale ?\na) Paris\nb) Lyon\nRéponse correcte : a";
//!     let quiz = parse(raw);
//!
//!     let store = Store::open("data")?;
//!     let path = store.save_quiz(&quiz, Local::now())?;
//!     println!("saved {} questions to {}", quiz.len(), path.display());
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
mod input;
mod models;
mod quiz;
pub mod runtime;
mod services;
pub mod terminal;
mod ui;

use std::io;

pub use app::{App, AppEvent, ChatTurn, Effect, Job, Session, Status, StatusKind};
pub use config::{Config, ConfigError, QuizConfig};
pub use data::{Store, StoreError, load_json, save_json};
pub use models::{OptionSet, Page, QuizQuestion, ResultEntry, Trigger};
pub use quiz::{
    ANSWER_MARKER, DEFAULT_EXCERPT_CHARS, DEFAULT_QUESTION_COUNT, Grade, HistoryRow, Outcome,
    QuestionTally, grade, history_rows, parse, quiz_prompt, tally,
};
pub use runtime::{Services, execute, run};
pub use services::{
    CompletionConfig, CompletionError, CompletionService, ExtractError, OpenAiClient,
    PdfTextExtractor, TextExtractor,
};

/// Error type for application-level operations.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
