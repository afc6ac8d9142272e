use crate::error::{CatedraError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub mod entities;

pub use entities::Entity;

/// The closed set of tables the site knows about.
///
/// Variant names double as the table names used in persisted snapshots and
/// by every consumer addressing the store by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    BlogPost,
    Event,
    Publication,
    PodcastEpisode,
    SiteSettings,
    AboutContent,
    SocialLink,
    Researcher,
    Course,
    ResearchProject,
    ResearchLine,
    Institution,
    GalleryImage,
    GalleryAlbum,
    Certificate,
    Comment,
    AnalyticsEvent,
    ContactMessage,
    Subscriber,
    User,
}

impl EntityKind {
    pub const ALL: [EntityKind; 20] = [
        EntityKind::BlogPost,
        EntityKind::Event,
        EntityKind::Publication,
        EntityKind::PodcastEpisode,
        EntityKind::SiteSettings,
        EntityKind::AboutContent,
        EntityKind::SocialLink,
        EntityKind::Researcher,
        EntityKind::Course,
        EntityKind::ResearchProject,
        EntityKind::ResearchLine,
        EntityKind::Institution,
        EntityKind::GalleryImage,
        EntityKind::GalleryAlbum,
        EntityKind::Certificate,
        EntityKind::Comment,
        EntityKind::AnalyticsEvent,
        EntityKind::ContactMessage,
        EntityKind::Subscriber,
        EntityKind::User,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::BlogPost => "BlogPost",
            EntityKind::Event => "Event",
            EntityKind::Publication => "Publication",
            EntityKind::PodcastEpisode => "PodcastEpisode",
            EntityKind::SiteSettings => "SiteSettings",
            EntityKind::AboutContent => "AboutContent",
            EntityKind::SocialLink => "SocialLink",
            EntityKind::Researcher => "Researcher",
            EntityKind::Course => "Course",
            EntityKind::ResearchProject => "ResearchProject",
            EntityKind::ResearchLine => "ResearchLine",
            EntityKind::Institution => "Institution",
            EntityKind::GalleryImage => "GalleryImage",
            EntityKind::GalleryAlbum => "GalleryAlbum",
            EntityKind::Certificate => "Certificate",
            EntityKind::Comment => "Comment",
            EntityKind::AnalyticsEvent => "AnalyticsEvent",
            EntityKind::ContactMessage => "ContactMessage",
            EntityKind::Subscriber => "Subscriber",
            EntityKind::User => "User",
        }
    }

    /// Prefix used for generated ids (`blogpost-...`).
    pub fn id_prefix(&self) -> String {
        self.name().to_lowercase()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = CatedraError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| CatedraError::UnknownEntityType(s.to_string()))
    }
}

/// One stored document: a flat JSON object with an `id` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CatedraError::InvalidInput(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn created_date(&self) -> Option<&str> {
        self.0.get("created_date").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Shallow, right-biased merge: every top-level field of `patch` replaces
    /// the field of the same name; nested values are replaced wholesale.
    pub fn merge(&mut self, patch: Record) {
        for (field, value) in patch.0 {
            self.0.insert(field, value);
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_every_kind_by_name() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.name().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "Widget".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, CatedraError::UnknownEntityType(name) if name == "Widget"));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("blogpost".parse::<EntityKind>().is_err());
    }

    #[test]
    fn id_prefix_is_lowercased_name() {
        assert_eq!(EntityKind::PodcastEpisode.id_prefix(), "podcastepisode");
    }

    #[test]
    fn merge_overwrites_only_patched_fields() {
        let mut record = Record::new()
            .with("id", "a")
            .with("title", "Old")
            .with("tags", json!(["x", "y"]));
        record.merge(Record::new().with("title", "New").with("tags", json!(["z"])));

        assert_eq!(record.id(), Some("a"));
        assert_eq!(record.get("title"), Some(&json!("New")));
        assert_eq!(record.get("tags"), Some(&json!(["z"])));
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(Record::from_value(json!([1, 2])).is_err());
        let record = Record::from_value(json!({"id": "x"})).unwrap();
        assert_eq!(record.id(), Some("x"));
    }

    #[test]
    fn non_string_id_is_not_an_id() {
        let record = Record::new().with("id", 7);
        assert_eq!(record.id(), None);
    }
}
