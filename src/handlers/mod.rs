// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Route table for /api/v1 and the body/lookup helpers every handler shares

/// Test service with the same routing and path normalization as main.rs
#[cfg(test)]
macro_rules! test_app {
    ($storage:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($storage.clone())
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(crate::handlers::api_config)
                .default_service(actix_web::web::route().to(crate::handlers::not_found)),
        )
        .await
    };
}

pub mod amenities;
pub mod cities;
pub mod index;
pub mod places;
pub mod places_amenities;
pub mod states;
pub mod users;

use crate::errors::ApiError;
use crate::models::Entity;
use crate::storage::Storage;
use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Mount every resource under /api/v1
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(index::config)
            .configure(states::config)
            .configure(cities::config)
            .configure(amenities::config)
            .configure(users::config)
            .configure(places::config)
            .configure(places_amenities::config),
    );
}

/// Default service for unmatched routes
pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

/// Resolve a record or fail with NotFound
pub async fn find<T: Entity>(storage: &Storage, id: &str) -> Result<T, ApiError> {
    storage.get::<T>(id).await?.ok_or(ApiError::NotFound)
}

/// Parse a request body that must be a JSON object
pub fn json_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::not_a_json()),
    }
}

/// Deserialize a request DTO from a parsed body; unknown keys are dropped
pub fn parse_request<T: DeserializeOwned>(data: Map<String, Value>) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(data)).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Fail with "Missing <field>" unless the body carries the key
pub fn require(data: &Map<String, Value>, field: &str) -> Result<(), ApiError> {
    if data.contains_key(field) {
        Ok(())
    } else {
        Err(ApiError::missing(field))
    }
}
