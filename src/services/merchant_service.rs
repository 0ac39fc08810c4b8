use crate::entities::restaurant_entity as restaurants;
use crate::error::{AppError, AppResult};
use crate::models::{MerchantProfileResponse, UpdateProfileRequest};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

#[derive(Clone)]
pub struct MerchantService {
    pool: DatabaseConnection,
}

impl MerchantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, restaurant_id: &str) -> AppResult<MerchantProfileResponse> {
        let restaurant = restaurants::Entity::find_by_id(restaurant_id.to_string())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Restaurant not found".to_string()))?;
        Ok(restaurant.into())
    }

    /// Title changes only when a non-empty value is sent; the optional
    /// contact fields are written whenever present, with an empty string
    /// clearing them.
    pub async fn update_profile(
        &self,
        request: UpdateProfileRequest,
    ) -> AppResult<MerchantProfileResponse> {
        let mut model = restaurants::Entity::find_by_id(request.restaurant_id.clone())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Restaurant not found".to_string()))?
            .into_active_model();

        if let Some(title) = &request.title {
            let title = title.trim();
            if !title.is_empty() {
                model.title = Set(title.to_string());
            }
        }
        if let Some(phone) = request.phone {
            model.phone = Set(non_empty(phone));
        }
        if let Some(address) = request.address {
            model.address = Set(non_empty(address));
        }
        if let Some(lat) = request.lat {
            model.lat = Set(non_empty(lat));
        }
        if let Some(lng) = request.lng {
            model.lng = Set(non_empty(lng));
        }

        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("".to_string()), None);
        assert_eq!(
            non_empty(" +1555 ".to_string()),
            Some("+1555".to_string())
        );
    }
}
