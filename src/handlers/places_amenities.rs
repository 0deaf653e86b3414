// src/handlers/places_amenities.rs
// DOCUMENTATION: Link and unlink amenities on a place
// PURPOSE: The only way a place's amenity set changes

use crate::errors::ApiError;
use crate::handlers::find;
use crate::models::{Amenity, Place};
use crate::services::PlaceService;
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /places/{place_id}/amenities
pub async fn list_place_amenities(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let place = find::<Place>(&storage, &path.into_inner()).await?;
    let amenities = PlaceService::amenities_of_place(&storage, &place).await?;
    Ok(HttpResponse::Ok().json(amenities))
}

/// POST /places/{place_id}/amenities/{amenity_id}
/// 201 when newly linked, 200 when the link already existed
pub async fn link_amenity(
    storage: web::Data<Storage>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, ApiError> {
    let (place_id, amenity_id) = path.into_inner();
    let mut place = find::<Place>(&storage, &place_id).await?;
    let amenity = find::<Amenity>(&storage, &amenity_id).await?;

    if !place.link_amenity(&amenity.base.id) {
        return Ok(HttpResponse::Ok().json(amenity));
    }

    storage.persist(place).await?;
    log::info!("Linked amenity {} to place {}", amenity_id, place_id);
    Ok(HttpResponse::Created().json(amenity))
}

/// DELETE /places/{place_id}/amenities/{amenity_id}
pub async fn unlink_amenity(
    storage: web::Data<Storage>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, ApiError> {
    let (place_id, amenity_id) = path.into_inner();
    let mut place = find::<Place>(&storage, &place_id).await?;
    let amenity = find::<Amenity>(&storage, &amenity_id).await?;

    if !place.unlink_amenity(&amenity.base.id) {
        return Err(ApiError::NotFound);
    }

    storage.persist(place).await?;
    log::info!("Unlinked amenity {} from place {}", amenity_id, place_id);
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/places/{place_id}/amenities",
        web::get().to(list_place_amenities),
    )
    .route(
        "/places/{place_id}/amenities/{amenity_id}",
        web::post().to(link_amenity),
    )
    .route(
        "/places/{place_id}/amenities/{amenity_id}",
        web::delete().to(unlink_amenity),
    );
}
