use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single multiple-choice question as produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: OptionSet,
    pub correct: Option<char>,
}

impl QuizQuestion {
    /// Text of the correct option, if the correct letter is known.
    pub fn correct_text(&self) -> Option<&str> {
        self.correct.and_then(|key| self.options.get(key))
    }

    pub fn is_correct(&self, answer: Option<char>) -> bool {
        answer.is_some() && answer == self.correct
    }
}

/// Option letters mapped to option text, kept in first-appearance order.
///
/// Serialized as a JSON object; the object's key order is the insertion
/// order and is preserved when reading it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    entries: Vec<(char, String)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an option. A replaced key keeps its position.
    pub fn insert(&mut self, key: char, text: impl Into<String>) {
        let key = key.to_ascii_lowercase();
        let text = text.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((key, text)),
        }
    }

    pub fn get(&self, key: char) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains_key(&self, key: char) -> bool {
        self.get(key).is_some()
    }

    pub fn first_key(&self) -> Option<char> {
        self.entries.first().map(|(k, _)| *k)
    }

    pub fn key_at(&self, index: usize) -> Option<char> {
        self.entries.get(index).map(|(k, _)| *k)
    }

    pub fn position(&self, key: char) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<char>, V: Into<String>> FromIterator<(K, V)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = OptionSet::new();
        for (key, text) in iter {
            set.insert(key.into(), text);
        }
        set
    }
}

impl Serialize for OptionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, text) in &self.entries {
            map.serialize_entry(&key.to_string(), text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OptionSetVisitor)
    }
}

struct OptionSetVisitor;

impl<'de> Visitor<'de> for OptionSetVisitor {
    type Value = OptionSet;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from single-letter option keys to option text")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut set = OptionSet::new();
        while let Some((key, text)) = access.next_entry::<String, String>()? {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => set.insert(letter, text),
                _ => {
                    return Err(de::Error::invalid_value(
                        de::Unexpected::Str(&key),
                        &"a single-letter option key",
                    ));
                }
            }
        }
        Ok(set)
    }
}
