use crate::entities::restaurant_entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Trattoria Roma")]
    pub title: String,
    #[schema(example = "+15551234567")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub restaurant_id: String,
    /// Opaque capability credential; presented as X-Foody-Key on every
    /// merchant call. Shown exactly once.
    pub api_key: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MerchantProfileResponse {
    pub id: String,
    pub title: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl From<restaurant_entity::Model> for MerchantProfileResponse {
    fn from(m: restaurant_entity::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            phone: m.phone,
            address: m.address,
            lat: m.lat,
            lng: m.lng,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub restaurant_id: String,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Query half of the merchant ownership pair; the other half is the
/// X-Foody-Key header.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantQuery {
    pub restaurant_id: String,
}
