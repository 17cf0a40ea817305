use url::form_urlencoded;

use crate::model::ids::{TopicId, TopicKey, UnitId};

const VIDEO_SEARCH_BASE: &str = "https://www.youtube.com/results?search_query=";

/// Builds the video search link for a topic query.
#[must_use]
pub fn video_search_url(query: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{VIDEO_SEARCH_BASE}{encoded}")
}

/// A single trackable item of study content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    unit_id: UnitId,
    topic_id: TopicId,
    label: String,
    video_query: Option<String>,
}

impl Topic {
    #[must_use]
    pub fn new(
        unit_id: UnitId,
        topic_id: TopicId,
        label: impl Into<String>,
        video_query: Option<String>,
    ) -> Self {
        Self {
            unit_id,
            topic_id,
            label: label.into(),
            video_query,
        }
    }

    #[must_use]
    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn key(&self) -> TopicKey {
        TopicKey::new(&self.unit_id, &self.topic_id)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn video_query(&self) -> Option<&str> {
        self.video_query.as_deref()
    }

    /// Search link for the topic's video query, if it has one.
    #[must_use]
    pub fn video_url(&self) -> Option<String> {
        self.video_query.as_deref().map(video_search_url)
    }
}

/// A named group of topics. Order of `topics` is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    id: UnitId,
    title: String,
    notes_pdf: Option<String>,
    topics: Vec<Topic>,
}

impl Unit {
    #[must_use]
    pub fn new(
        id: UnitId,
        title: impl Into<String>,
        notes_pdf: Option<String>,
        topics: Vec<Topic>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            notes_pdf,
            topics,
        }
    }

    #[must_use]
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn notes_pdf(&self) -> Option<&str> {
        self.notes_pdf.as_deref()
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }
}
