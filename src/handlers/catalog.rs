use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::CatalogService;

#[utoipa::path(
    get,
    path = "/offers",
    tag = "catalog",
    params(
        ("restaurant_id" = Option<String>, Query, description = "Only offers from this restaurant"),
        ("limit" = Option<u32>, Query, description = "Max results, clamped to 1..=500 (default 100)")
    ),
    responses(
        (status = 200, description = "Currently purchasable offers, soonest-expiring first", body = [OfferResponse])
    )
)]
pub async fn public_offers(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<PublicOffersQuery>,
) -> Result<HttpResponse> {
    match catalog_service.public_feed(&query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": items
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/offers", web::get().to(public_offers));
}
