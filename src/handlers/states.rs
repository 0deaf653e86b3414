// src/handlers/states.rs
// DOCUMENTATION: HTTP handlers for state operations

use crate::errors::ApiError;
use crate::handlers::{find, json_object, parse_request, require};
use crate::models::{CreateNamedRequest, Entity, State, UpdateNamedRequest};
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// GET /states
pub async fn list_states(storage: web::Data<Storage>) -> Result<impl Responder, ApiError> {
    Ok(HttpResponse::Ok().json(storage.all::<State>().await?))
}

/// GET /states/{state_id}
pub async fn get_state(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let state = find::<State>(&storage, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(state))
}

/// POST /states
pub async fn create_state(
    storage: web::Data<Storage>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let data = json_object(&body)?;
    require(&data, "name")?;
    let req: CreateNamedRequest = parse_request(data)?;
    req.validate()?;

    let state = State::new(req.name);
    storage.persist(state.clone()).await?;
    log::info!("Created state with id: {}", state.base.id);
    Ok(HttpResponse::Created().json(state))
}

/// PUT /states/{state_id}
pub async fn update_state(
    storage: web::Data<Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let mut state = find::<State>(&storage, &path.into_inner()).await?;
    let req: UpdateNamedRequest = parse_request(json_object(&body)?)?;
    req.validate()?;

    if let Some(name) = req.name {
        state.name = name;
    }
    state.touch();
    storage.persist(state.clone()).await?;
    Ok(HttpResponse::Ok().json(state))
}

/// DELETE /states/{state_id}
pub async fn delete_state(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let state = find::<State>(&storage, &path.into_inner()).await?;
    storage.remove(&state).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

/// Plain routes rather than a scope: /states/{state_id}/cities lives in cities.rs
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/states", web::get().to(list_states))
        .route("/states", web::post().to(create_state))
        .route("/states/{state_id}", web::get().to(get_state))
        .route("/states/{state_id}", web::put().to(update_state))
        .route("/states/{state_id}", web::delete().to(delete_state));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_state_lifecycle() {
        let storage = web::Data::new(Storage::in_memory());
        let app = test_app!(storage);

        let req = test::TestRequest::post()
            .uri("/api/v1/states")
            .set_json(json!({ "name": "Arizona" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();

        let uri = format!("/api/v1/states/{}", id);
        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "name": "AZ", "id": "x" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "AZ");
        assert_eq!(body["id"], json!(id));

        let req = test::TestRequest::get().uri("/api/v1/states").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_state_requires_name() {
        let storage = web::Data::new(Storage::in_memory());
        let app = test_app!(storage);

        let req = test::TestRequest::post()
            .uri("/api/v1/states")
            .set_json(json!({ "capital": "Phoenix" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing name");
    }
}
