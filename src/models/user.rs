// src/models/user.rs
// DOCUMENTATION: User entity, request DTOs and response DTO
// PURPOSE: Keeps the stored password out of every API response

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{BaseModel, Entity, EntityKind, Record};

/// Stored user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseModel,

    /// Login email, unique across users, immutable after creation
    pub email: String,

    pub password: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,
}

/// Request DTO for POST /users
/// DOCUMENTATION: `email` and `password` presence is checked on the raw body first
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email, length(max = 128))]
    pub email: String,

    #[validate(length(max = 128))]
    pub password: String,

    #[validate(length(max = 128))]
    pub first_name: Option<String>,

    #[validate(length(max = 128))]
    pub last_name: Option<String>,
}

/// Request DTO for PUT /users/{id}
/// DOCUMENTATION: Mutable fields only; id, email and timestamps are dropped
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 128))]
    pub password: Option<String>,

    #[validate(length(max = 128))]
    pub first_name: Option<String>,

    #[validate(length(max = 128))]
    pub last_name: Option<String>,
}

/// Response DTO for user endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(req: CreateUserRequest) -> Self {
        User {
            base: BaseModel::new(),
            email: req.email,
            password: req.password,
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
        }
    }

    /// Apply the allow-listed fields of an update
    pub fn apply(&mut self, req: UpdateUserRequest) {
        if let Some(password) = req.password {
            self.password = password;
        }
        if let Some(first_name) = req.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = req.last_name {
            self.last_name = last_name;
        }
    }

    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.base.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: self.base.created_at,
            updated_at: self.base.updated_at,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn into_record(self) -> Record {
        Record::User(self)
    }

    fn from_record(record: &Record) -> Option<&Self> {
        match record {
            Record::User(user) => Some(user),
            _ => None,
        }
    }
}
