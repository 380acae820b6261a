//! Collaborators the application talks to: text extraction and the model.

mod completion;
mod pdf;

pub use completion::{CompletionConfig, CompletionError, CompletionService, OpenAiClient};
pub use pdf::{ExtractError, PdfTextExtractor, TextExtractor};
