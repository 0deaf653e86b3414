// src/models/base.rs
// DOCUMENTATION: Fields shared by every stored entity and the Entity trait
// PURPOSE: Lets the storage engines handle all entity types generically

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Amenity, City, Place, State, User};

/// Identity and timestamps carried by every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    /// Unique identifier (UUID v4 string)
    pub id: String,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

impl BaseModel {
    pub fn new() -> Self {
        let now = Utc::now();
        BaseModel {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at` before an update is persisted
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Entity type tag, the `type` argument of the storage facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    State,
    City,
    Amenity,
    Place,
}

impl EntityKind {
    /// Class name used in storage keys and the `__class__` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::State => "State",
            EntityKind::City => "City",
            EntityKind::Amenity => "Amenity",
            EntityKind::Place => "Place",
        }
    }

    /// Storage key: `<Class>.<id>`
    pub fn key(&self, id: &str) -> String {
        format!("{}.{}", self.as_str(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any stored entity, tagged with its class name when serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Record {
    User(User),
    State(State),
    City(City),
    Amenity(Amenity),
    Place(Place),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::User(_) => EntityKind::User,
            Record::State(_) => EntityKind::State,
            Record::City(_) => EntityKind::City,
            Record::Amenity(_) => EntityKind::Amenity,
            Record::Place(_) => EntityKind::Place,
        }
    }

    pub fn base(&self) -> &BaseModel {
        match self {
            Record::User(user) => &user.base,
            Record::State(state) => &state.base,
            Record::City(city) => &city.base,
            Record::Amenity(amenity) => &amenity.base,
            Record::Place(place) => &place.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn key(&self) -> String {
        self.kind().key(self.id())
    }
}

/// Implemented by every concrete entity so storage can be generic over type
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    const KIND: EntityKind;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    fn into_record(self) -> Record;

    /// Borrow the entity back out of a record of the matching variant
    fn from_record(record: &Record) -> Option<&Self>;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn touch(&mut self) {
        self.base_mut().touch();
    }
}
