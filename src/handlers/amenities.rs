// src/handlers/amenities.rs
// DOCUMENTATION: HTTP handlers for amenity operations

use crate::errors::ApiError;
use crate::handlers::{find, json_object, parse_request, require};
use crate::models::{Amenity, CreateNamedRequest, Entity, UpdateNamedRequest};
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// GET /amenities
pub async fn list_amenities(storage: web::Data<Storage>) -> Result<impl Responder, ApiError> {
    Ok(HttpResponse::Ok().json(storage.all::<Amenity>().await?))
}

/// GET /amenities/{amenity_id}
pub async fn get_amenity(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let amenity = find::<Amenity>(&storage, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(amenity))
}

/// POST /amenities
pub async fn create_amenity(
    storage: web::Data<Storage>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let data = json_object(&body)?;
    require(&data, "name")?;
    let req: CreateNamedRequest = parse_request(data)?;
    req.validate()?;

    let amenity = Amenity::new(req.name);
    storage.persist(amenity.clone()).await?;
    log::info!("Created amenity with id: {}", amenity.base.id);
    Ok(HttpResponse::Created().json(amenity))
}

/// PUT /amenities/{amenity_id}
pub async fn update_amenity(
    storage: web::Data<Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let mut amenity = find::<Amenity>(&storage, &path.into_inner()).await?;
    let req: UpdateNamedRequest = parse_request(json_object(&body)?)?;
    req.validate()?;

    if let Some(name) = req.name {
        amenity.name = name;
    }
    amenity.touch();
    storage.persist(amenity.clone()).await?;
    Ok(HttpResponse::Ok().json(amenity))
}

/// DELETE /amenities/{amenity_id}
pub async fn delete_amenity(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let amenity = find::<Amenity>(&storage, &path.into_inner()).await?;
    storage.remove(&amenity).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/amenities")
            .route("", web::get().to(list_amenities))
            .route("", web::post().to(create_amenity))
            .route("/{amenity_id}", web::get().to(get_amenity))
            .route("/{amenity_id}", web::put().to(update_amenity))
            .route("/{amenity_id}", web::delete().to(delete_amenity)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_amenity_lifecycle() {
        let storage = web::Data::new(Storage::in_memory());
        let app = test_app!(storage);

        let req = test::TestRequest::post()
            .uri("/api/v1/amenities/")
            .set_json(json!({ "name": "Sauna" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let uri = format!("/api/v1/amenities/{}", created["id"].as_str().unwrap());

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "name": "Steam room" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "Steam room");

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "name": 42 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({}));
        assert_eq!(storage.count::<Amenity>().await.unwrap(), 0);
    }
}
