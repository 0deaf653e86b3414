// src/test_support.rs
// DOCUMENTATION: Fixtures shared by unit tests
// PURPOSE: Seed the in-memory storage with strictly ordered records

use crate::models::{Amenity, BaseModel, City, CreateUserRequest, Entity, Place, State, User};
use crate::storage::Storage;
use chrono::Duration;
use std::sync::atomic::{AtomicI64, Ordering};

static SEQUENCE: AtomicI64 = AtomicI64::new(0);

/// Push created_at forward so records sort in creation order
fn order(base: &mut BaseModel) {
    let step = SEQUENCE.fetch_add(1, Ordering::SeqCst);
    base.created_at = base.created_at + Duration::microseconds(step);
    base.updated_at = base.created_at;
}

async fn store<T: Entity>(storage: &Storage, mut obj: T) -> T {
    order(obj.base_mut());
    storage.persist(obj.clone()).await.unwrap();
    obj
}

pub async fn seed_state(storage: &Storage, name: &str) -> State {
    store(storage, State::new(name.to_string())).await
}

pub async fn seed_city(storage: &Storage, state: &State, name: &str) -> City {
    store(storage, City::new(state.base.id.clone(), name.to_string())).await
}

pub async fn seed_amenity(storage: &Storage, name: &str) -> Amenity {
    store(storage, Amenity::new(name.to_string())).await
}

pub async fn seed_user(storage: &Storage, email: &str) -> User {
    let user = User::new(CreateUserRequest {
        email: email.to_string(),
        password: "secret".to_string(),
        first_name: None,
        last_name: None,
    });
    store(storage, user).await
}

pub async fn seed_place(
    storage: &Storage,
    city: &City,
    user: &User,
    name: &str,
    amenities: &[&Amenity],
) -> Place {
    let mut place = Place {
        base: BaseModel::new(),
        city_id: city.base.id.clone(),
        user_id: user.base.id.clone(),
        name: name.to_string(),
        description: String::new(),
        number_rooms: 1,
        number_bathrooms: 1,
        max_guest: 2,
        price_by_night: 100,
        latitude: 0.0,
        longitude: 0.0,
        amenities: Vec::new(),
    };
    for amenity in amenities {
        place.link_amenity(&amenity.base.id);
    }
    store(storage, place).await
}
