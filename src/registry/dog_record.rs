//! Dog Record - one dog entered by an owner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Height class a dog competes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DogClass {
    /// Small
    #[default]
    S,
    /// Medium
    M,
    /// Intermediate
    IM,
    /// Large
    L,
}

impl DogClass {
    /// All classes in selection order.
    pub const ALL: [Self; 4] = [Self::S, Self::M, Self::IM, Self::L];

    /// Label shown in the class selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::IM => "IM",
            Self::L => "L",
        }
    }
}

impl fmt::Display for DogClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Competition event a dog can enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Beginner course
    #[serde(rename = "ビギナー")]
    Beginner,
    /// Jumping 1.5
    #[serde(rename = "JP1.5")]
    Jp15,
    /// Jumping 2.5
    #[serde(rename = "JP2.5")]
    Jp25,
    /// Agility 1
    #[serde(rename = "AG1")]
    Ag1,
    /// Agility 2
    #[serde(rename = "AG2")]
    Ag2,
    /// Agility 3
    #[serde(rename = "AG3")]
    Ag3,
}

impl Event {
    /// All events in selection order.
    pub const ALL: [Self; 6] = [
        Self::Beginner,
        Self::Jp15,
        Self::Jp25,
        Self::Ag1,
        Self::Ag2,
        Self::Ag3,
    ];

    /// Label shown in the event multi-select.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "ビギナー",
            Self::Jp15 => "JP1.5",
            Self::Jp25 => "JP2.5",
            Self::Ag1 => "AG1",
            Self::Ag2 => "AG2",
            Self::Ag3 => "AG3",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable fields of a dog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogFields {
    /// Breed
    pub breed: String,
    /// Height class
    pub dog_class: DogClass,
    /// Entered events
    pub events: Vec<Event>,
}

/// A dog registered by an owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DogRecord {
    id: String,
    owner_id: String,
    dog_name: String,
    breed: String,
    dog_class: DogClass,
    events: Vec<Event>,
    created_at: DateTime<Utc>,
}

impl DogRecord {
    /// Create a builder; the store assigns `id` on insert.
    #[must_use]
    pub fn builder(owner_id: impl Into<String>, dog_name: impl Into<String>) -> DogRecordBuilder {
        DogRecordBuilder::new(owner_id, dog_name)
    }

    /// Store-assigned id (empty until inserted).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Owning user's id.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Dog name.
    #[must_use]
    pub fn dog_name(&self) -> &str {
        &self.dog_name
    }

    /// Breed.
    #[must_use]
    pub fn breed(&self) -> &str {
        &self.breed
    }

    /// Height class.
    #[must_use]
    pub const fn dog_class(&self) -> DogClass {
        self.dog_class
    }

    /// Entered events.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Creation timestamp; list order.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn apply(&mut self, fields: DogFields) {
        self.breed = fields.breed;
        self.dog_class = fields.dog_class;
        self.events = fields.events;
    }
}

/// Builder for `DogRecord`.
#[derive(Debug)]
pub struct DogRecordBuilder {
    owner_id: String,
    dog_name: String,
    breed: String,
    dog_class: DogClass,
    events: Vec<Event>,
    created_at: DateTime<Utc>,
}

impl DogRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(owner_id: impl Into<String>, dog_name: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            dog_name: dog_name.into(),
            breed: String::new(),
            dog_class: DogClass::default(),
            events: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the breed.
    #[must_use]
    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = breed.into();
        self
    }

    /// Set the class.
    #[must_use]
    pub const fn dog_class(mut self, dog_class: DogClass) -> Self {
        self.dog_class = dog_class;
        self
    }

    /// Set the events.
    #[must_use]
    pub fn events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    /// Set a custom creation timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build the `DogRecord`.
    #[must_use]
    pub fn build(self) -> DogRecord {
        DogRecord {
            id: String::new(),
            owner_id: self.owner_id,
            dog_name: self.dog_name,
            breed: self.breed,
            dog_class: self.dog_class,
            events: self.events,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = DogRecord::builder("user-1", "ポチ").build();
        assert_eq!(record.id(), "");
        assert_eq!(record.dog_class(), DogClass::S);
        assert!(record.events().is_empty());
    }

    #[test]
    fn test_event_serializes_as_label() {
        let json = serde_json::to_string(&vec![Event::Beginner, Event::Jp15]).unwrap();
        assert_eq!(json, r#"["ビギナー","JP1.5"]"#);
    }

    #[test]
    fn test_apply_fields_keeps_identity() {
        let mut record = DogRecord::builder("user-1", "ポチ")
            .breed("柴犬")
            .events(vec![Event::Ag1])
            .build()
            .with_id("dog-1".to_string());

        record.apply(DogFields {
            breed: "秋田犬".to_string(),
            dog_class: DogClass::L,
            events: vec![Event::Ag2, Event::Ag3],
        });

        assert_eq!(record.id(), "dog-1");
        assert_eq!(record.dog_name(), "ポチ");
        assert_eq!(record.breed(), "秋田犬");
        assert_eq!(record.dog_class(), DogClass::L);
        assert_eq!(record.events(), &[Event::Ag2, Event::Ag3]);
    }
}
