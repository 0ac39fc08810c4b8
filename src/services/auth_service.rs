use crate::entities::{api_key_entity as api_keys, restaurant_entity as restaurants};
use crate::error::{AppError, AppResult};
use crate::models::{RegisterRequest, RegisterResponse};
use crate::utils::{generate_api_key, generate_restaurant_id};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Open registration: creates the merchant row and mints its capability
    /// key in a single transaction. The key is returned exactly once.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("title", "title is required"));
        }
        let phone = request
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from);

        let restaurant_id = generate_restaurant_id();
        let api_key = generate_api_key();

        let txn = self.pool.begin().await?;
        restaurants::ActiveModel {
            id: Set(restaurant_id.clone()),
            title: Set(title.to_string()),
            phone: Set(phone),
            address: Set(None),
            lat: Set(None),
            lng: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;
        api_keys::ActiveModel {
            restaurant_id: Set(restaurant_id.clone()),
            api_key: Set(api_key.clone()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        log::info!("Registered restaurant {restaurant_id}");
        Ok(RegisterResponse {
            restaurant_id,
            api_key,
        })
    }

    /// Ownership gate: every merchant-scoped operation runs this before any
    /// offer logic. The key row is looked up by restaurant id, so a key
    /// only ever grants access to its own account.
    pub async fn authenticate(
        &self,
        restaurant_id: &str,
        presented_key: Option<&str>,
    ) -> AppResult<()> {
        if restaurant_id.is_empty() {
            return Err(AppError::validation(
                "restaurant_id",
                "restaurant_id is required",
            ));
        }
        let presented = presented_key
            .ok_or_else(|| AppError::AuthError("Missing X-Foody-Key".to_string()))?;

        let row = api_keys::Entity::find_by_id(restaurant_id.to_string())
            .one(&self.pool)
            .await?;
        match row {
            Some(key) if key.api_key == presented => Ok(()),
            _ => Err(AppError::AuthError("Invalid X-Foody-Key".to_string())),
        }
    }
}
