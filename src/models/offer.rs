use crate::domain::catalog::StatusFilter;
use crate::entities::offer_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Distinguishes an absent PATCH field from one explicitly sent as null:
/// absent -> None, null -> Some(None), value -> Some(Some(v)). Only
/// nullable columns use this; for everything else null means "leave as is".
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOfferRequest {
    pub restaurant_id: String,
    #[schema(example = "Pasta box")]
    pub title: String,
    pub description: Option<String>,
    /// Sale price in cents; integer strings are coerced.
    #[schema(value_type = i64, example = 500)]
    pub price_cents: Option<Value>,
    #[schema(value_type = Option<i64>, example = 900)]
    pub original_price_cents: Option<Value>,
    #[schema(value_type = Option<i32>, example = 3)]
    pub qty_total: Option<Value>,
    #[schema(value_type = Option<i32>)]
    pub qty_left: Option<Value>,
    #[schema(example = "2025-08-01T18:00:00Z")]
    pub expires_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOfferRequest {
    /// Used only for the ownership check; the stored owner never changes.
    pub restaurant_id: String,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[schema(value_type = Option<i64>)]
    pub price_cents: Option<Value>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub original_price_cents: Option<Option<Value>>,
    #[schema(value_type = Option<i32>)]
    pub qty_total: Option<Value>,
    #[schema(value_type = Option<i32>)]
    pub qty_left: Option<Value>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OfferResponse {
    pub id: String,
    pub restaurant_id: String,
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub original_price_cents: Option<i64>,
    pub qty_total: i32,
    pub qty_left: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<offer_entity::Model> for OfferResponse {
    fn from(m: offer_entity::Model) -> Self {
        Self {
            id: m.id,
            restaurant_id: m.restaurant_id,
            title: m.title,
            description: m.description,
            price_cents: m.price_cents,
            original_price_cents: m.original_price_cents,
            qty_total: m.qty_total,
            qty_left: m.qty_left,
            expires_at: m.expires_at,
            archived_at: m.archived_at,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicOffersQuery {
    pub restaurant_id: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MerchantOffersQuery {
    pub restaurant_id: String,
    pub status: Option<StatusFilter>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportQuery {
    pub restaurant_id: String,
    pub status: Option<StatusFilter>,
    #[serde(rename = "from")]
    pub date_from: Option<String>,
    #[serde(rename = "to")]
    pub date_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_distinguishes_absent_from_null() {
        let patch: UpdateOfferRequest =
            serde_json::from_str(r#"{"restaurant_id": "RID_1"}"#).unwrap();
        assert!(patch.description.is_none());
        assert!(patch.original_price_cents.is_none());

        let patch: UpdateOfferRequest = serde_json::from_str(
            r#"{"restaurant_id": "RID_1", "description": null, "original_price_cents": null}"#,
        )
        .unwrap();
        assert_eq!(patch.description, Some(None));
        assert!(matches!(patch.original_price_cents, Some(None)));

        let patch: UpdateOfferRequest = serde_json::from_str(
            r#"{"restaurant_id": "RID_1", "description": "fresh", "original_price_cents": 900}"#,
        )
        .unwrap();
        assert_eq!(patch.description, Some(Some("fresh".to_string())));
        assert!(matches!(patch.original_price_cents, Some(Some(_))));
    }

    #[test]
    fn test_null_on_non_nullable_field_means_absent() {
        let patch: UpdateOfferRequest =
            serde_json::from_str(r#"{"restaurant_id": "RID_1", "price_cents": null}"#).unwrap();
        assert!(patch.price_cents.is_none());
    }
}
