// src/handlers/cities.rs
// DOCUMENTATION: HTTP handlers for city operations
// PURPOSE: Cities are listed and created through their owning state

use crate::errors::ApiError;
use crate::handlers::{find, json_object, parse_request, require};
use crate::models::{City, CreateNamedRequest, Entity, State, UpdateNamedRequest};
use crate::services::PlaceService;
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// GET /states/{state_id}/cities
pub async fn list_cities(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let state = find::<State>(&storage, &path.into_inner()).await?;
    let cities = PlaceService::cities_in_state(&storage, &state.base.id).await?;
    Ok(HttpResponse::Ok().json(cities))
}

/// GET /cities/{city_id}
pub async fn get_city(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let city = find::<City>(&storage, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// POST /states/{state_id}/cities
pub async fn create_city(
    storage: web::Data<Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let state = find::<State>(&storage, &path.into_inner()).await?;
    let data = json_object(&body)?;
    require(&data, "name")?;
    let req: CreateNamedRequest = parse_request(data)?;
    req.validate()?;

    let city = City::new(state.base.id, req.name);
    storage.persist(city.clone()).await?;
    log::info!("Created city with id: {}", city.base.id);
    Ok(HttpResponse::Created().json(city))
}

/// PUT /cities/{city_id}
/// DOCUMENTATION: only `name` changes; state_id stays with the owning state
pub async fn update_city(
    storage: web::Data<Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let mut city = find::<City>(&storage, &path.into_inner()).await?;
    let req: UpdateNamedRequest = parse_request(json_object(&body)?)?;
    req.validate()?;

    if let Some(name) = req.name {
        city.name = name;
    }
    city.touch();
    storage.persist(city.clone()).await?;
    Ok(HttpResponse::Ok().json(city))
}

/// DELETE /cities/{city_id}
pub async fn delete_city(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let city = find::<City>(&storage, &path.into_inner()).await?;
    storage.remove(&city).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/states/{state_id}/cities", web::get().to(list_cities))
        .route("/states/{state_id}/cities", web::post().to(create_city))
        .route("/cities/{city_id}", web::get().to(get_city))
        .route("/cities/{city_id}", web::put().to(update_city))
        .route("/cities/{city_id}", web::delete().to(delete_city));
}
