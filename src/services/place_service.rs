// src/services/place_service.rs
// DOCUMENTATION: Business logic for places
// PURPOSE: Ownership lookups (state -> cities -> places) and the places search filter

use crate::errors::ApiError;
use crate::models::{Amenity, City, Place, PlaceSearchRequest, State};
use crate::storage::Storage;
use std::collections::HashSet;

pub struct PlaceService;

impl PlaceService {
    /// Cities owned by a state, in storage order
    pub async fn cities_in_state(storage: &Storage, state_id: &str) -> Result<Vec<City>, ApiError> {
        let cities = storage.all::<City>().await?;
        Ok(cities
            .into_iter()
            .filter(|city| city.state_id == state_id)
            .collect())
    }

    /// Places owned by a city, in storage order
    pub async fn places_in_city(storage: &Storage, city_id: &str) -> Result<Vec<Place>, ApiError> {
        let places = storage.all::<Place>().await?;
        Ok(places
            .into_iter()
            .filter(|place| place.city_id == city_id)
            .collect())
    }

    /// Amenities linked to a place; links to deleted amenities are skipped
    pub async fn amenities_of_place(
        storage: &Storage,
        place: &Place,
    ) -> Result<Vec<Amenity>, ApiError> {
        let mut amenities = Vec::with_capacity(place.amenities.len());
        for amenity_id in &place.amenities {
            if let Some(amenity) = storage.get::<Amenity>(amenity_id).await? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    /// Search places by states, cities and amenities
    /// DOCUMENTATION: states and cities widen the candidate list (deduplicated,
    /// first-seen order); amenities narrow it. Unknown ids never fail the search
    pub async fn search(storage: &Storage, req: &PlaceSearchRequest) -> Result<Vec<Place>, ApiError> {
        let all_places = storage.all::<Place>().await?;
        if req.is_unfiltered() {
            return Ok(all_places);
        }

        let mut candidates = Candidates::default();

        if !req.states().is_empty() {
            let all_cities = storage.all::<City>().await?;
            for state_id in req.states() {
                if storage.get::<State>(state_id).await?.is_none() {
                    log::debug!("places_search: skipping unknown state {}", state_id);
                    continue;
                }
                for city in all_cities.iter().filter(|city| &city.state_id == state_id) {
                    candidates.extend_from_city(&all_places, &city.base.id);
                }
            }
        }

        for city_id in req.cities() {
            if storage.get::<City>(city_id).await?.is_none() {
                log::debug!("places_search: skipping unknown city {}", city_id);
                continue;
            }
            candidates.extend_from_city(&all_places, city_id);
        }

        let mut places = candidates.places;

        if !req.amenities().is_empty() {
            if places.is_empty() {
                places = all_places;
            }

            let mut required = Vec::with_capacity(req.amenities().len());
            for amenity_id in req.amenities() {
                match storage.get::<Amenity>(amenity_id).await? {
                    Some(amenity) => required.push(amenity.base.id),
                    None => log::debug!("places_search: ignoring unknown amenity {}", amenity_id),
                }
            }

            places.retain(|place| required.iter().all(|id| place.has_amenity(id)));
        }

        log::debug!("places_search matched {} places", places.len());
        Ok(places)
    }
}

/// Ordered, deduplicated place list
#[derive(Default)]
struct Candidates {
    places: Vec<Place>,
    seen: HashSet<String>,
}

impl Candidates {
    fn extend_from_city(&mut self, all_places: &[Place], city_id: &str) {
        for place in all_places.iter().filter(|place| place.city_id == city_id) {
            if self.seen.insert(place.base.id.clone()) {
                self.places.push(place.clone());
            }
        }
    }
}
