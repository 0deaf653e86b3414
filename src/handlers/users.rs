// src/handlers/users.rs
// DOCUMENTATION: HTTP handlers for user operations
// PURPOSE: CRUD over users; passwords never leave the service

use crate::errors::ApiError;
use crate::handlers::{find, json_object, parse_request, require};
use crate::models::{CreateUserRequest, Entity, UpdateUserRequest, User, UserResponse};
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use tokio::sync::Mutex;
use validator::Validate;

/// Held from the duplicate-email check until the new user is persisted
static EMAIL_REGISTRATION: Mutex<()> = Mutex::const_new(());

/// GET /users
pub async fn list_users(storage: web::Data<Storage>) -> Result<impl Responder, ApiError> {
    let users = storage.all::<User>().await?;
    let body: Vec<UserResponse> = users.iter().map(User::to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /users/{user_id}
pub async fn get_user(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let user = find::<User>(&storage, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// POST /users
/// DOCUMENTATION: email is checked before password; emails are unique
pub async fn create_user(
    storage: web::Data<Storage>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let data = json_object(&body)?;
    require(&data, "email")?;
    require(&data, "password")?;

    let req: CreateUserRequest = parse_request(data)?;
    req.validate()?;

    let _registration = EMAIL_REGISTRATION.lock().await;
    let taken = storage
        .all::<User>()
        .await?
        .iter()
        .any(|user| user.email == req.email);
    if taken {
        return Err(ApiError::BadRequest("Email already exists".to_string()));
    }

    let user = User::new(req);
    storage.persist(user.clone()).await?;
    log::info!("Created user with id: {}", user.base.id);

    Ok(HttpResponse::Created().json(user.to_response()))
}

/// PUT /users/{user_id}
/// DOCUMENTATION: id, email and timestamps are never changed
pub async fn update_user(
    storage: web::Data<Storage>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, ApiError> {
    let mut user = find::<User>(&storage, &path.into_inner()).await?;
    let req: UpdateUserRequest = parse_request(json_object(&body)?)?;
    req.validate()?;

    user.apply(req);
    user.touch();
    storage.persist(user.clone()).await?;

    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    storage: web::Data<Storage>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let user = find::<User>(&storage, &path.into_inner()).await?;
    storage.remove(&user).await?;
    log::info!("Deleted user with id: {}", user.base.id);
    Ok(HttpResponse::Ok().json(json!({})))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{user_id}", web::get().to(get_user))
            .route("/{user_id}", web::put().to(update_user))
            .route("/{user_id}", web::delete().to(delete_user)),
    );
}
