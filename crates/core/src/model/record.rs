use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TopicKey;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordCodecError {
    #[error("progress data is not a flat map of topic keys to booleans: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Completion state keyed by `TopicKey` strings.
///
/// Absent keys read as not completed. Keys that no longer match a topic are
/// kept as-is; aggregation only looks up keys of the current topic set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord(BTreeMap<String, bool>);

impl ProgressRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_completed(&self, key: &TopicKey) -> bool {
        self.0.get(key.as_str()).copied().unwrap_or(false)
    }

    /// Returns the record with `key` set to `completed`.
    #[must_use]
    pub fn with_topic(mut self, key: &TopicKey, completed: bool) -> Self {
        self.0.insert(key.as_str().to_owned(), completed);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw entries, including keys unknown to the current topic set.
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, done)| (key.as_str(), *done))
    }

    /// Encode as the persisted/exported JSON object.
    ///
    /// # Errors
    ///
    /// Returns `RecordCodecError` if serialization fails.
    pub fn to_json(&self) -> Result<String, RecordCodecError> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Pretty variant of [`ProgressRecord::to_json`], used for exports.
    ///
    /// # Errors
    ///
    /// Returns `RecordCodecError` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, RecordCodecError> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// Decode a flat JSON object of string keys to booleans.
    ///
    /// # Errors
    ///
    /// Returns `RecordCodecError::Malformed` for anything else (arrays, nested
    /// objects, non-boolean values, invalid UTF-8 or JSON).
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, RecordCodecError> {
        Ok(Self(serde_json::from_slice(bytes)?))
    }
}

impl FromIterator<(TopicKey, bool)> for ProgressRecord {
    fn from_iter<I: IntoIterator<Item = (TopicKey, bool)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, done)| (key.as_str().to_owned(), done))
                .collect(),
        )
    }
}
