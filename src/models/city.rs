// src/models/city.rs
// DOCUMENTATION: City entity
// PURPOSE: Belongs to a State, owns Places

use serde::{Deserialize, Serialize};

use super::{BaseModel, Entity, EntityKind, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(flatten)]
    pub base: BaseModel,

    /// Owning State (immutable after creation)
    pub state_id: String,

    pub name: String,
}

impl City {
    pub fn new(state_id: String, name: String) -> Self {
        City {
            base: BaseModel::new(),
            state_id,
            name,
        }
    }
}

impl Entity for City {
    const KIND: EntityKind = EntityKind::City;

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn into_record(self) -> Record {
        Record::City(self)
    }

    fn from_record(record: &Record) -> Option<&Self> {
        match record {
            Record::City(city) => Some(city),
            _ => None,
        }
    }
}
