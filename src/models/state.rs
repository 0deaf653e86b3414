// src/models/state.rs
// DOCUMENTATION: State entity and the name-only request bodies
// PURPOSE: States, cities and amenities are all created/updated by name

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{BaseModel, Entity, EntityKind, Record};

/// A state; owns every City whose state_id matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(flatten)]
    pub base: BaseModel,

    pub name: String,
}

impl State {
    pub fn new(name: String) -> Self {
        State {
            base: BaseModel::new(),
            name,
        }
    }
}

impl Entity for State {
    const KIND: EntityKind = EntityKind::State;

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn into_record(self) -> Record {
        Record::State(self)
    }

    fn from_record(record: &Record) -> Option<&Self> {
        match record {
            Record::State(state) => Some(state),
            _ => None,
        }
    }
}

/// POST body for States, Cities and Amenities
/// DOCUMENTATION: `name` presence is checked before this is deserialized
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNamedRequest {
    #[validate(length(max = 128))]
    pub name: String,
}

/// PUT body for States, Cities and Amenities
/// DOCUMENTATION: Allow-list of one field; every other key is ignored
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateNamedRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,
}
