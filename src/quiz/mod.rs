//! Quiz generation and scoring: prompt, parser, grading.

mod grading;
mod parser;
mod prompt;

pub use grading::{Grade, HistoryRow, Outcome, QuestionTally, grade, history_rows, tally};
pub use parser::{ANSWER_MARKER, parse};
pub use prompt::{DEFAULT_EXCERPT_CHARS, DEFAULT_QUESTION_COUNT, quiz_prompt};
