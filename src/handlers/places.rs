// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for place operations
// PURPOSE: Parse requests, call storage/services, return responses

use crate::errors::ApiError;
use crate::handlers::{find, json_object, parse_request, require};
use crate::models::{
    City, CreatePlaceRequest, Entity, Place, PlaceResponse, PlaceSearchRequest,
    UpdatePlaceRequest, User,
};
use crate::services::PlaceService;
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// GET /cities/{city_id}/places
/// List places of a city
pub async fn list_places(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let city = find::<City>(&storage, &path.into_inner()).await?;
    let places = PlaceService::places_in_city(&storage, &city.base.id).await?;
    let body: Vec<PlaceResponse> = places.iter().map(Place::to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /places/{place_id}
pub async fn get_place(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let place = find::<Place>(&storage, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(place.to_response()))
}

/// POST /cities/{city_id}/places
/// Create a place in a city
///
/// DOCUMENTATION: Checks run in a fixed order: city exists, body is JSON,
/// user_id present, user exists, name present
pub async fn create_place(
    storage: web::Data<Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let city = find::<City>(&storage, &path.into_inner()).await?;
    let data = json_object(&body)?;

    require(&data, "user_id")?;
    let owner = match data.get("user_id").and_then(|id| id.as_str()) {
        Some(user_id) => storage.get::<User>(user_id).await?,
        None => None,
    };
    if owner.is_none() {
        return Err(ApiError::NotFound);
    }
    require(&data, "name")?;

    let req: CreatePlaceRequest = parse_request(data)?;
    req.validate()?;

    let place = Place::new(city.base.id, req);
    storage.persist(place.clone()).await?;
    log::info!("Created place with id: {}", place.base.id);

    Ok(HttpResponse::Created().json(place.to_response()))
}

/// PUT /places/{place_id}
/// Update the allow-listed fields of a place
pub async fn update_place(
    storage: web::Data<Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let mut place = find::<Place>(&storage, &path.into_inner()).await?;
    let req: UpdatePlaceRequest = parse_request(json_object(&body)?)?;
    req.validate()?;

    place.apply(req);
    place.touch();
    storage.persist(place.clone()).await?;

    Ok(HttpResponse::Ok().json(place.to_response()))
}

/// DELETE /places/{place_id}
pub async fn delete_place(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let place = find::<Place>(&storage, &path.into_inner()).await?;
    storage.remove(&place).await?;
    log::info!("Deleted place with id: {}", place.base.id);
    Ok(HttpResponse::Ok().json(json!({})))
}

/// POST /places_search
/// Filter places by states, cities and amenities
pub async fn search_places(
    storage: web::Data<Storage>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let req: PlaceSearchRequest = parse_request(json_object(&body)?)?;
    let places = PlaceService::search(&storage, &req).await?;
    let body: Vec<PlaceResponse> = places.iter().map(Place::to_search_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/cities/{city_id}/places", web::get().to(list_places))
        .route("/cities/{city_id}/places", web::post().to(create_place))
        .route("/places/{place_id}", web::get().to(get_place))
        .route("/places/{place_id}", web::put().to(update_place))
        .route("/places/{place_id}", web::delete().to(delete_place))
        .route("/places_search", web::post().to(search_places));
}
