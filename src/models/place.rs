// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Stored record, request DTOs and response DTOs for place endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use super::{BaseModel, Entity, EntityKind, Record};

/// Represents a complete place record
/// DOCUMENTATION: Owned by a City and a User; linked to Amenities by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(flatten)]
    pub base: BaseModel,

    /// Owning City (immutable after creation)
    pub city_id: String,

    /// Owning User (immutable after creation)
    pub user_id: String,

    /// Place name - required field for all places
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub number_rooms: i64,

    #[serde(default)]
    pub number_bathrooms: i64,

    #[serde(default)]
    pub max_guest: i64,

    #[serde(default)]
    pub price_by_night: i64,

    #[serde(default)]
    pub latitude: f64,

    #[serde(default)]
    pub longitude: f64,

    /// Linked Amenity ids, in link order
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Request DTO for POST /cities/{city_id}/places
/// DOCUMENTATION: `user_id` and `name` presence is checked on the raw body first,
/// so a missing field reports its own name before any type error
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_create_coordinates"))]
pub struct CreatePlaceRequest {
    pub user_id: String,

    #[validate(length(max = 128))]
    pub name: String,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub number_rooms: Option<i64>,

    #[validate(range(min = 0))]
    pub number_bathrooms: Option<i64>,

    #[validate(range(min = 0))]
    pub max_guest: Option<i64>,

    #[validate(range(min = 0))]
    pub price_by_night: Option<i64>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

/// Request DTO for PUT /places/{id}
/// DOCUMENTATION: All fields are optional - only provided fields are updated.
/// id, user_id, city_id and timestamps are not part of the allow-list
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_coordinates"))]
pub struct UpdatePlaceRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub number_rooms: Option<i64>,

    #[validate(range(min = 0))]
    pub number_bathrooms: Option<i64>,

    #[validate(range(min = 0))]
    pub max_guest: Option<i64>,

    #[validate(range(min = 0))]
    pub price_by_night: Option<i64>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

/// Body of POST /places_search
/// DOCUMENTATION: Each list is optional; null and empty lists mean "no filter"
#[derive(Debug, Default, Deserialize)]
pub struct PlaceSearchRequest {
    #[serde(default, deserialize_with = "id_list")]
    pub states: Option<Vec<String>>,

    #[serde(default, deserialize_with = "id_list")]
    pub cities: Option<Vec<String>>,

    #[serde(default, deserialize_with = "id_list")]
    pub amenities: Option<Vec<String>>,
}

/// Id list that tolerates non-string entries; they keep their JSON text and
/// so never name a stored record
fn id_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(|values| {
        values
            .into_iter()
            .map(|value| match value {
                Value::String(id) => id,
                other => other.to_string(),
            })
            .collect()
    }))
}

impl PlaceSearchRequest {
    pub fn states(&self) -> &[String] {
        self.states.as_deref().unwrap_or_default()
    }

    pub fn cities(&self) -> &[String] {
        self.cities.as_deref().unwrap_or_default()
    }

    pub fn amenities(&self) -> &[String] {
        self.amenities.as_deref().unwrap_or_default()
    }

    /// True when no dimension has content
    pub fn is_unfiltered(&self) -> bool {
        self.states().is_empty() && self.cities().is_empty() && self.amenities().is_empty()
    }
}

/// Latitude within -90..=90, longitude within -180..=180
fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), ValidationError> {
    if latitude.is_some_and(|lat| !(-90.0..=90.0).contains(&lat)) {
        return Err(ValidationError::new("latitude_out_of_range"));
    }
    if longitude.is_some_and(|lon| !(-180.0..=180.0).contains(&lon)) {
        return Err(ValidationError::new("longitude_out_of_range"));
    }
    Ok(())
}

fn validate_create_coordinates(req: &CreatePlaceRequest) -> Result<(), ValidationError> {
    check_coordinates(req.latitude, req.longitude)
}

fn validate_update_coordinates(req: &UpdatePlaceRequest) -> Result<(), ValidationError> {
    check_coordinates(req.latitude, req.longitude)
}

/// Response DTO for place endpoints
/// DOCUMENTATION: `amenities` is left out entirely for search results
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub id: String,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub number_rooms: i64,
    pub number_bathrooms: i64,
    pub max_guest: i64,
    pub price_by_night: i64,
    pub latitude: f64,
    pub longitude: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    pub fn new(city_id: String, req: CreatePlaceRequest) -> Self {
        Place {
            base: BaseModel::new(),
            city_id,
            user_id: req.user_id,
            name: req.name,
            description: req.description.unwrap_or_default(),
            number_rooms: req.number_rooms.unwrap_or_default(),
            number_bathrooms: req.number_bathrooms.unwrap_or_default(),
            max_guest: req.max_guest.unwrap_or_default(),
            price_by_night: req.price_by_night.unwrap_or_default(),
            latitude: req.latitude.unwrap_or_default(),
            longitude: req.longitude.unwrap_or_default(),
            amenities: Vec::new(),
        }
    }

    /// Apply the allow-listed fields of an update
    pub fn apply(&mut self, req: UpdatePlaceRequest) {
        if let Some(name) = req.name {
            self.name = name;
        }
        if let Some(description) = req.description {
            self.description = description;
        }
        if let Some(number_rooms) = req.number_rooms {
            self.number_rooms = number_rooms;
        }
        if let Some(number_bathrooms) = req.number_bathrooms {
            self.number_bathrooms = number_bathrooms;
        }
        if let Some(max_guest) = req.max_guest {
            self.max_guest = max_guest;
        }
        if let Some(price_by_night) = req.price_by_night {
            self.price_by_night = price_by_night;
        }
        if let Some(latitude) = req.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = req.longitude {
            self.longitude = longitude;
        }
    }

    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenities.iter().any(|id| id == amenity_id)
    }

    /// Link an amenity; returns false when it was already linked
    pub fn link_amenity(&mut self, amenity_id: &str) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenities.push(amenity_id.to_string());
        true
    }

    /// Unlink an amenity; returns false when it was not linked
    pub fn unlink_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenities.len();
        self.amenities.retain(|id| id != amenity_id);
        self.amenities.len() != before
    }

    /// Convert Place to PlaceResponse for API
    pub fn to_response(&self) -> PlaceResponse {
        PlaceResponse {
            id: self.base.id.clone(),
            city_id: self.city_id.clone(),
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            number_rooms: self.number_rooms,
            number_bathrooms: self.number_bathrooms,
            max_guest: self.max_guest,
            price_by_night: self.price_by_night,
            latitude: self.latitude,
            longitude: self.longitude,
            amenities: Some(self.amenities.clone()),
            created_at: self.base.created_at,
            updated_at: self.base.updated_at,
        }
    }

    /// Same as `to_response` without the `amenities` key
    pub fn to_search_response(&self) -> PlaceResponse {
        PlaceResponse {
            amenities: None,
            ..self.to_response()
        }
    }
}

impl Entity for Place {
    const KIND: EntityKind = EntityKind::Place;

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn into_record(self) -> Record {
        Record::Place(self)
    }

    fn from_record(record: &Record) -> Option<&Self> {
        match record {
            Record::Place(place) => Some(place),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Place {
        Place::new(
            "city-1".to_string(),
            CreatePlaceRequest {
                user_id: "user-1".to_string(),
                name: "Loft".to_string(),
                description: None,
                number_rooms: Some(2),
                number_bathrooms: None,
                max_guest: Some(4),
                price_by_night: Some(120),
                latitude: Some(37.77),
                longitude: Some(-122.41),
            },
        )
    }

    #[test]
    fn test_apply_leaves_owners_alone() {
        let mut place = sample();
        let id = place.base.id.clone();
        place.apply(UpdatePlaceRequest {
            name: Some("Big Loft".to_string()),
            price_by_night: Some(150),
            ..Default::default()
        });

        assert_eq!(place.base.id, id);
        assert_eq!(place.city_id, "city-1");
        assert_eq!(place.user_id, "user-1");
        assert_eq!(place.name, "Big Loft");
        assert_eq!(place.price_by_night, 150);
        assert_eq!(place.number_rooms, 2);
    }

    #[test]
    fn test_amenity_links_are_a_set() {
        let mut place = sample();
        assert!(place.link_amenity("wifi"));
        assert!(!place.link_amenity("wifi"));
        assert_eq!(place.amenities, vec!["wifi".to_string()]);
        assert!(place.unlink_amenity("wifi"));
        assert!(!place.unlink_amenity("wifi"));
    }

    #[test]
    fn test_search_response_drops_amenities_key() {
        let mut place = sample();
        place.link_amenity("wifi");

        let full = serde_json::to_value(place.to_response()).unwrap();
        assert_eq!(full["amenities"], serde_json::json!(["wifi"]));

        let stripped = serde_json::to_value(place.to_search_response()).unwrap();
        assert!(stripped.get("amenities").is_none());
    }

    #[test]
    fn test_search_request_keeps_non_string_ids_as_unknown() {
        let req: PlaceSearchRequest =
            serde_json::from_value(serde_json::json!({ "states": [1, "abc", null], "cities": null }))
                .unwrap();
        assert_eq!(req.states(), ["1", "abc", "null"]);
        assert!(req.cities().is_empty());
        assert!(!req.is_unfiltered());
    }

    #[test]
    fn test_update_request_validation() {
        let req = UpdatePlaceRequest {
            latitude: Some(120.0),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdatePlaceRequest {
            max_guest: Some(-1),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
