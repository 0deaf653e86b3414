// src/models/amenity.rs
// DOCUMENTATION: Amenity entity
// PURPOSE: Tag-like attribute linked to Places by id

use serde::{Deserialize, Serialize};

use super::{BaseModel, Entity, EntityKind, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: BaseModel,

    pub name: String,
}

impl Amenity {
    pub fn new(name: String) -> Self {
        Amenity {
            base: BaseModel::new(),
            name,
        }
    }
}

impl Entity for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn into_record(self) -> Record {
        Record::Amenity(self)
    }

    fn from_record(record: &Record) -> Option<&Self> {
        match record {
            Record::Amenity(amenity) => Some(amenity),
            _ => None,
        }
    }
}
