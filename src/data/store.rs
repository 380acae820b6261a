use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::models::{QuizQuestion, ResultEntry};

use super::json::{StoreError, load_json, save_json};

const DOCS_DIR: &str = "docs";
const QUIZZES_DIR: &str = "quizzes";
const RESULTS_FILE: &str = "results.json";

/// Files stamp their creation time with second precision.
const FILE_STAMP: &str = "%Y%m%d_%H%M%S";
const RESULT_STAMP: &str = "%Y-%m-%d %H:%M:%S";

/// The data directory: stored course documents, generated quizzes and the
/// results log.
///
/// ```text
/// data/
///   docs/cours_20261018_093000.pdf
///   quizzes/quiz_20261018_093012.json
///   results.json
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the store, making sure its directories exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(root);
        for dir in [store.docs_dir(), store.quizzes_dir()] {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        }
        Ok(store)
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(DOCS_DIR)
    }

    pub fn quizzes_dir(&self) -> PathBuf {
        self.root.join(QUIZZES_DIR)
    }

    pub fn results_path(&self) -> PathBuf {
        self.root.join(RESULTS_FILE)
    }

    /// Keep a copy of an uploaded course document.
    pub fn store_document(&self, bytes: &[u8], now: DateTime<Local>) -> Result<PathBuf, StoreError> {
        let dir = self.docs_dir();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

        let path = unique_path(&dir, "cours", now, "pdf");
        fs::write(&path, bytes).map_err(|e| StoreError::io(&path, e))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "stored course document");
        Ok(path)
    }

    /// Persist a parsed quiz under a fresh timestamped name.
    pub fn save_quiz(&self, quiz: &[QuizQuestion], now: DateTime<Local>) -> Result<PathBuf, StoreError> {
        let path = unique_path(&self.quizzes_dir(), "quiz", now, "json");
        save_json(&path, quiz)?;
        tracing::info!(path = %path.display(), questions = quiz.len(), "saved quiz");
        Ok(path)
    }

    pub fn load_quiz(&self, path: &Path) -> Result<Option<Vec<QuizQuestion>>, StoreError> {
        load_json(path)
    }

    /// All recorded results, oldest first. A missing log is empty.
    pub fn load_results(&self) -> Result<Vec<ResultEntry>, StoreError> {
        Ok(load_json(&self.results_path())?.unwrap_or_default())
    }

    /// Append one entry to the results log.
    pub fn append_result(&self, entry: ResultEntry) -> Result<(), StoreError> {
        let mut results = self.load_results()?;
        results.push(entry);
        save_json(&self.results_path(), &results)?;
        tracing::info!(count = results.len(), "recorded quiz result");
        Ok(())
    }
}

/// Timestamp written into [`ResultEntry::timestamp`].
pub(crate) fn result_timestamp(now: DateTime<Local>) -> String {
    now.format(RESULT_STAMP).to_string()
}

/// `<dir>/<prefix>_<stamp>.<ext>`, with `_1`, `_2`, ... appended while the
/// name is taken.
fn unique_path(dir: &Path, prefix: &str, now: DateTime<Local>, ext: &str) -> PathBuf {
    let stamp = now.format(FILE_STAMP);
    let mut path = dir.join(format!("{prefix}_{stamp}.{ext}"));
    let mut suffix = 1;
    while path.exists() {
        path = dir.join(format!("{prefix}_{stamp}_{suffix}.{ext}"));
        suffix += 1;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 18, h, m, s).unwrap()
    }

    #[test]
    fn test_open_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("data")).unwrap();
        assert!(store.docs_dir().is_dir());
        assert!(store.quizzes_dir().is_dir());
        assert!(!store.results_path().exists());
    }

    #[test]
    fn test_names_stay_unique_within_a_second() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let first = store.save_quiz(&[], at(9, 30, 0)).unwrap();
        let second = store.save_quiz(&[], at(9, 30, 0)).unwrap();

        assert!(first.ends_with("quizzes/quiz_20261018_093000.json"));
        assert!(second.ends_with("quizzes/quiz_20261018_093000_1.json"));
    }

    #[test]
    fn test_store_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let path = store.store_document(b"%PDF-1.4", at(8, 5, 9)).unwrap();
        assert!(path.ends_with("docs/cours_20261018_080509.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_result_timestamp_format() {
        assert_eq!(result_timestamp(at(7, 4, 3)), "2026-10-18 07:04:03");
    }
}
