//! Static declaration of the units and topics being tracked.
//!
//! A syllabus is data, not state: it is loaded once (either the built-in
//! course or a JSON file supplied by the user) and never written back.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Topic, TopicId, TopicKey, Unit, UnitId};

const BUILTIN_SYLLABUS: &str = include_str!("../data/data_mining.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyllabusError {
    #[error("syllabus file is not valid: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("syllabus title cannot be empty")]
    EmptyTitle,

    #[error("unit {0} has an empty title")]
    EmptyUnitTitle(UnitId),

    #[error("topic {0} has an empty label")]
    EmptyLabel(TopicKey),

    #[error("duplicate unit id: {0}")]
    DuplicateUnit(UnitId),

    #[error("duplicate topic key: {0}")]
    DuplicateTopic(TopicKey),

    #[error("topic {topic} is declared under unit {unit} but belongs to another unit")]
    UnitMismatch { unit: UnitId, topic: TopicKey },
}

#[derive(Debug, Deserialize)]
struct SyllabusFile {
    title: String,
    units: Vec<UnitFile>,
}

#[derive(Debug, Deserialize)]
struct UnitFile {
    id: UnitId,
    title: String,
    #[serde(default)]
    pdf: Option<String>,
    #[serde(default)]
    topics: Vec<TopicFile>,
}

#[derive(Debug, Deserialize)]
struct TopicFile {
    id: TopicId,
    label: String,
    #[serde(default)]
    video_query: Option<String>,
}

/// Validated set of units and their topics, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllabus {
    title: String,
    units: Vec<Unit>,
}

impl Syllabus {
    /// Build a syllabus from units, checking ids and labels.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError` if a title or label is blank, a unit id repeats,
    /// two topics share a record key, or a topic sits under the wrong unit.
    pub fn new(title: impl Into<String>, units: Vec<Unit>) -> Result<Self, SyllabusError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(SyllabusError::EmptyTitle);
        }

        let mut unit_ids = HashSet::new();
        let mut keys = HashSet::new();
        for unit in &units {
            if unit.title().trim().is_empty() {
                return Err(SyllabusError::EmptyUnitTitle(unit.id().clone()));
            }
            if !unit_ids.insert(unit.id().clone()) {
                return Err(SyllabusError::DuplicateUnit(unit.id().clone()));
            }
            for topic in unit.topics() {
                let key = topic.key();
                if topic.unit_id() != unit.id() {
                    return Err(SyllabusError::UnitMismatch {
                        unit: unit.id().clone(),
                        topic: key,
                    });
                }
                if topic.label().trim().is_empty() {
                    return Err(SyllabusError::EmptyLabel(key));
                }
                // "a-b"/"c" and "a"/"b-c" render to the same key.
                if !keys.insert(key.clone()) {
                    return Err(SyllabusError::DuplicateTopic(key));
                }
            }
        }

        Ok(Self { title, units })
    }

    /// The Data Mining course bundled with the application.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError` if the bundled declaration fails validation.
    pub fn builtin() -> Result<Self, SyllabusError> {
        Self::from_json_bytes(BUILTIN_SYLLABUS.as_bytes())
    }

    /// Parse and validate a syllabus declaration.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError::Decode` for malformed JSON, or any validation
    /// error from [`Syllabus::new`].
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, SyllabusError> {
        let file: SyllabusFile = serde_json::from_slice(bytes)?;
        let units = file
            .units
            .into_iter()
            .map(|unit| {
                let topics = unit
                    .topics
                    .into_iter()
                    .map(|topic| {
                        let query = topic
                            .video_query
                            .map(|q| q.trim().to_owned())
                            .filter(|q| !q.is_empty());
                        Topic::new(unit.id.clone(), topic.id, topic.label, query)
                    })
                    .collect();
                Unit::new(unit.id, unit.title, unit.pdf, topics)
            })
            .collect();
        Self::new(file.title, units)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    #[must_use]
    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id() == id)
    }

    /// Every topic, unit by unit.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.units.iter().flat_map(|unit| unit.topics().iter())
    }

    #[must_use]
    pub fn topic_count(&self) -> usize {
        self.units.iter().map(|unit| unit.topics().len()).sum()
    }

    #[must_use]
    pub fn topic(&self, unit_id: &UnitId, topic_id: &TopicId) -> Option<&Topic> {
        self.unit(unit_id)?
            .topics()
            .iter()
            .find(|topic| topic.topic_id() == topic_id)
    }

    #[must_use]
    pub fn contains(&self, unit_id: &UnitId, topic_id: &TopicId) -> bool {
        self.topic(unit_id, topic_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, topics: &[&str]) -> Unit {
        let unit_id = UnitId::new(id).unwrap();
        let topics = topics
            .iter()
            .map(|t| Topic::new(unit_id.clone(), TopicId::new(*t).unwrap(), *t, None))
            .collect();
        Unit::new(unit_id, format!("Unit {id}"), None, topics)
    }

    #[test]
    fn builtin_syllabus_is_valid() {
        let syllabus = Syllabus::builtin().expect("bundled syllabus");
        assert_eq!(syllabus.title(), "Data Mining");
        assert_eq!(syllabus.units().len(), 5);
        assert_eq!(syllabus.topic_count(), 24);
        let unit3 = UnitId::new("unit3").unwrap();
        assert_eq!(syllabus.unit(&unit3).unwrap().notes_pdf(), Some("pdfs/unit3.pdf"));
    }

    #[test]
    fn rejects_duplicate_units() {
        let err = Syllabus::new("S", vec![unit("u1", &["a"]), unit("u1", &["b"])]).unwrap_err();
        assert!(matches!(err, SyllabusError::DuplicateUnit(_)));
    }

    #[test]
    fn rejects_colliding_keys() {
        let err = Syllabus::new("S", vec![unit("a-b", &["c"]), unit("a", &["b-c"])]).unwrap_err();
        assert!(matches!(err, SyllabusError::DuplicateTopic(key) if key.as_str() == "a-b-c"));
    }

    #[test]
    fn rejects_topic_under_wrong_unit() {
        let stray = Topic::new(
            UnitId::new("u2").unwrap(),
            TopicId::new("t1").unwrap(),
            "Stray",
            None,
        );
        let host = Unit::new(UnitId::new("u1").unwrap(), "Unit 1", None, vec![stray]);
        let err = Syllabus::new("S", vec![host]).unwrap_err();
        assert!(matches!(err, SyllabusError::UnitMismatch { .. }));
    }

    #[test]
    fn parses_minimal_json_and_drops_blank_queries() {
        let json = br#"{
            "title": "Mini",
            "units": [
                { "id": "u1", "title": "One", "topics": [
                    { "id": "t1", "label": "First", "video_query": "  " },
                    { "id": "t2", "label": "Second", "video_query": "second topic" }
                ]},
                { "id": "u2", "title": "Empty" }
            ]
        }"#;
        let syllabus = Syllabus::from_json_bytes(json).unwrap();
        assert_eq!(syllabus.topic_count(), 2);
        let u1 = UnitId::new("u1").unwrap();
        let t1 = syllabus.topic(&u1, &TopicId::new("t1").unwrap()).unwrap();
        assert!(t1.video_query().is_none());
        assert!(syllabus.unit(&UnitId::new("u2").unwrap()).unwrap().topics().is_empty());
    }

    #[test]
    fn reports_invalid_ids_as_decode_errors() {
        let json = br#"{"title": "Bad", "units": [{"id": "", "title": "x"}]}"#;
        assert!(matches!(
            Syllabus::from_json_bytes(json),
            Err(SyllabusError::Decode(_))
        ));
    }
}
