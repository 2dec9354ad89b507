//! Retrieved passages and their score annotations.
//!
//! A [`Document`] is the unit every stage consumes and returns. Stages write their
//! score into [`Document::metadata`] under their own key (see [`crate::constants`]),
//! so annotations from different stages never collide.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    CATEGORY_KEY, FAST_SCORE_KEY, PARENT_ID_KEY, PRECISION_SCORE_KEY, RELEVANCE_SCORE_KEY,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// A retrieved text passage with free-form metadata.
pub struct Document {
    /// Passage text.
    pub content: String,
    /// Arbitrary metadata; scoring stages add their annotations here.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Document {
    /// Creates a document with empty metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Adds a metadata entry (builder style).
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Writes a numeric annotation, replacing any previous value under `key`.
    pub fn annotate(&mut self, key: &str, score: f64) {
        // NaN/inf cannot be represented in JSON; store null rather than panic.
        let value = serde_json::Number::from_f64(score)
            .map(Value::Number)
            .unwrap_or(Value::Null);
        self.metadata.insert(key.to_string(), value);
    }

    /// Reads a numeric annotation.
    pub fn score(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).and_then(Value::as_f64)
    }

    pub fn fast_score(&self) -> Option<f64> {
        self.score(FAST_SCORE_KEY)
    }

    pub fn precision_score(&self) -> Option<f64> {
        self.score(PRECISION_SCORE_KEY)
    }

    pub fn relevance_score(&self) -> Option<f64> {
        self.score(RELEVANCE_SCORE_KEY)
    }

    /// Returns the `category` metadata value, if it is a string.
    pub fn category(&self) -> Option<&str> {
        self.metadata.get(CATEGORY_KEY).and_then(Value::as_str)
    }

    /// Returns the parent identifier as a string (numeric ids are stringified).
    pub fn parent_id(&self) -> Option<String> {
        match self.metadata.get(PARENT_ID_KEY)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns the first `max_chars` characters of the content.
    pub fn content_prefix(&self, max_chars: usize) -> &str {
        truncate_chars(&self.content, max_chars)
    }
}

/// Truncates `text` to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
