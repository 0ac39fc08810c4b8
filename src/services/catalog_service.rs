use crate::domain::catalog::{self, StatusFilter};
use crate::entities::offer_entity as offers;
use crate::error::AppResult;
use crate::models::{OfferResponse, PublicOffersQuery};
use chrono::Utc;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// The buyer feed. Predicate hints are pushed down so the store can use
    /// its indexes, then the availability predicate is re-applied
    /// in-process: the engine, not the store, decides what is visible.
    pub async fn public_feed(&self, query: &PublicOffersQuery) -> AppResult<Vec<OfferResponse>> {
        let now = Utc::now();
        let mut find = offers::Entity::find()
            .filter(offers::Column::ArchivedAt.is_null())
            .filter(offers::Column::QtyLeft.gt(0))
            .filter(
                Condition::any()
                    .add(offers::Column::ExpiresAt.is_null())
                    .add(offers::Column::ExpiresAt.gt(now)),
            );
        if let Some(restaurant_id) = &query.restaurant_id {
            find = find.filter(offers::Column::RestaurantId.eq(restaurant_id.clone()));
        }
        let candidates = find
            .order_by_asc(offers::Column::ExpiresAt)
            .limit(catalog::clamp_limit(query.limit))
            .all(&self.pool)
            .await?;

        let rows = catalog::public_view(candidates, now, query.limit, query.restaurant_id.as_deref());
        Ok(rows.into_iter().map(OfferResponse::from).collect())
    }

    pub async fn merchant_feed(
        &self,
        restaurant_id: &str,
        status: StatusFilter,
    ) -> AppResult<Vec<OfferResponse>> {
        let rows = self.merchant_rows(restaurant_id, status).await?;
        Ok(rows.into_iter().map(OfferResponse::from).collect())
    }

    /// Raw rows in feed order, for collaborators that format them (CSV
    /// export). Same pushdown-then-reapply discipline as the public feed.
    pub async fn merchant_rows(
        &self,
        restaurant_id: &str,
        status: StatusFilter,
    ) -> AppResult<Vec<offers::Model>> {
        let now = Utc::now();
        let mut find =
            offers::Entity::find().filter(offers::Column::RestaurantId.eq(restaurant_id));
        match status {
            StatusFilter::Active => {
                find = find.filter(offers::Column::ArchivedAt.is_null());
            }
            StatusFilter::Archived => {
                find = find.filter(offers::Column::ArchivedAt.is_not_null());
            }
            StatusFilter::All => {}
        }
        let candidates = find.all(&self.pool).await?;
        Ok(catalog::merchant_view(candidates, status, now))
    }
}
