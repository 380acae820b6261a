use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One graded quiz attempt, as appended to `results.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub doc: Option<String>,
    pub quiz: Option<String>,
    pub score: usize,
    pub total: usize,
    /// Question index to the letter given. Indexes are JSON object keys.
    #[serde(rename = "reponses", default)]
    pub responses: BTreeMap<usize, char>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let entry = ResultEntry {
            timestamp: "2026-10-18 09:30:00".to_string(),
            doc: Some("data/docs/cours_20261018_093000.pdf".to_string()),
            quiz: None,
            score: 1,
            total: 2,
            responses: BTreeMap::from([(0, 'b'), (1, 'c')]),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["reponses"]["0"], "b");
        assert_eq!(json["reponses"]["1"], "c");
        assert!(json["quiz"].is_null());

        let back: ResultEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_missing_responses_default_to_empty() {
        let json = r#"{"timestamp":"t","doc":null,"quiz":null,"score":0,"total":0}"#;
        let entry: ResultEntry = serde_json::from_str(json).unwrap();
        assert!(entry.responses.is_empty());
    }
}
