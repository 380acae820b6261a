//! Application configuration, read from an optional TOML file.
//!
//! ```toml
//! data_dir = "data"
//!
//! [completion]
//! api_base = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//! timeout_secs = 120
//!
//! [quiz]
//! question_count = 3
//! excerpt_chars = 2000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quiz::{DEFAULT_EXCERPT_CHARS, DEFAULT_QUESTION_COUNT};
use crate::services::CompletionConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the document, quiz and result files.
    pub data_dir: PathBuf,
    pub completion: CompletionConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Questions requested per generated quiz.
    pub question_count: usize,
    /// Leading characters of the course text sent with the prompt.
    pub excerpt_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            completion: CompletionConfig::default(),
            quiz: QuizConfig::default(),
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl Config {
    /// Load from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Default log file inside the data directory.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("course-quiz.log")
    }
}
