// src/handlers/index.rs
// DOCUMENTATION: Status and statistics handlers
// PURPOSE: Liveness check and per-type record counts

use crate::errors::ApiError;
use crate::models::{Amenity, City, Place, State, User};
use crate::storage::Storage;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /status
pub async fn status() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}

/// GET /stats
/// Number of stored records per type
pub async fn stats(storage: web::Data<Storage>) -> Result<impl Responder, ApiError> {
    Ok(HttpResponse::Ok().json(json!({
        "amenities": storage.count::<Amenity>().await?,
        "cities": storage.count::<City>().await?,
        "places": storage.count::<Place>().await?,
        "states": storage.count::<State>().await?,
        "users": storage.count::<User>().await?,
    })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/status", web::get().to(status))
        .route("/stats", web::get().to(stats));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_status() {
        let storage = web::Data::new(Storage::in_memory());
        let app = test_app!(storage);

        for uri in ["/api/v1/status", "/api/v1/status/"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "status": "OK" }));
        }
    }

    #[actix_web::test]
    async fn test_stats_counts_each_type() {
        let storage = web::Data::new(Storage::in_memory());
        let state = seed_state(&storage, "Hawaii").await;
        let city = seed_city(&storage, &state, "Honolulu").await;
        let user = seed_user(&storage, "kai@hbnb.io").await;
        seed_place(&storage, &city, &user, "Hale", &[]).await;
        seed_place(&storage, &city, &user, "Lanai", &[]).await;

        let app = test_app!(storage);
        let req = test::TestRequest::get().uri("/api/v1/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({ "amenities": 0, "cities": 1, "places": 2, "states": 1, "users": 1 })
        );
    }
}
