use crate::domain::lifecycle;
use crate::domain::parse::ParsePolicy;
use crate::entities::offer_entity as offers;
use crate::error::{AppError, AppResult};
use crate::models::{CreateOfferRequest, OfferResponse, UpdateOfferRequest};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

#[derive(Clone)]
pub struct OfferService {
    pool: DatabaseConnection,
    policy: ParsePolicy,
}

impl OfferService {
    pub fn new(pool: DatabaseConnection, policy: ParsePolicy) -> Self {
        Self { pool, policy }
    }

    pub async fn create_offer(&self, request: CreateOfferRequest) -> AppResult<OfferResponse> {
        let offer = lifecycle::validate_create(&request, self.policy, Utc::now())?;
        let inserted = to_active(offer).insert(&self.pool).await?;
        log::info!(
            "Created offer {} for restaurant {}",
            inserted.id,
            inserted.restaurant_id
        );
        Ok(inserted.into())
    }

    pub async fn get_offer(&self, restaurant_id: &str, offer_id: &str) -> AppResult<OfferResponse> {
        let offer = self.find_owned(restaurant_id, offer_id).await?;
        Ok(offer.into())
    }

    pub async fn update_offer(
        &self,
        restaurant_id: &str,
        offer_id: &str,
        patch: UpdateOfferRequest,
    ) -> AppResult<OfferResponse> {
        let existing = self.find_owned(restaurant_id, offer_id).await?;
        let updated = lifecycle::apply_update(&existing, &patch, self.policy)?;
        let saved = to_active(updated).update(&self.pool).await?;
        Ok(saved.into())
    }

    pub async fn archive_offer(
        &self,
        restaurant_id: &str,
        offer_id: &str,
    ) -> AppResult<OfferResponse> {
        let existing = self.find_owned(restaurant_id, offer_id).await?;
        let saved = to_active(lifecycle::archive(&existing, Utc::now()))
            .update(&self.pool)
            .await?;
        log::info!("Archived offer {offer_id}");
        Ok(saved.into())
    }

    pub async fn restore_offer(
        &self,
        restaurant_id: &str,
        offer_id: &str,
    ) -> AppResult<OfferResponse> {
        let existing = self.find_owned(restaurant_id, offer_id).await?;
        let saved = to_active(lifecycle::restore(&existing))
            .update(&self.pool)
            .await?;
        log::info!("Restored offer {offer_id}");
        Ok(saved.into())
    }

    /// Wrong owner collapses into NotFound so probing cannot reveal which
    /// offer ids exist.
    async fn find_owned(&self, restaurant_id: &str, offer_id: &str) -> AppResult<offers::Model> {
        let offer = offers::Entity::find_by_id(offer_id.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))?;
        if !lifecycle::is_owned_by(&offer, restaurant_id) {
            return Err(AppError::NotFound("Offer not found".to_string()));
        }
        Ok(offer)
    }
}

/// Every column Set: the engine computed the full new row from the old
/// one, and it is persisted as one whole-row statement (last-writer-wins
/// per offer, no partial-field interleaving).
fn to_active(m: offers::Model) -> offers::ActiveModel {
    offers::ActiveModel {
        id: Set(m.id),
        restaurant_id: Set(m.restaurant_id),
        title: Set(m.title),
        description: Set(m.description),
        price_cents: Set(m.price_cents),
        original_price_cents: Set(m.original_price_cents),
        qty_total: Set(m.qty_total),
        qty_left: Set(m.qty_left),
        expires_at: Set(m.expires_at),
        archived_at: Set(m.archived_at),
        created_at: Set(m.created_at),
    }
}
