use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::MerchantKey;
use crate::models::*;
use crate::services::{AuthService, CatalogService, OfferService};

fn get_api_key(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<MerchantKey>().map(|k| k.0.clone())
}

#[utoipa::path(
    get,
    path = "/merchant/offers",
    tag = "offer",
    params(
        ("restaurant_id" = String, Query, description = "Restaurant id"),
        ("status" = Option<StatusFilter>, Query, description = "active (default), archived or all")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "The restaurant's offers under the status filter", body = [OfferResponse]),
        (status = 401, description = "Missing or invalid key")
    )
)]
pub async fn list_offers(
    auth_service: web::Data<AuthService>,
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    query: web::Query<MerchantOffersQuery>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    if let Err(e) = auth_service
        .authenticate(&query.restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    let status = query.status.unwrap_or_default();
    match catalog_service
        .merchant_feed(&query.restaurant_id, status)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": items
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/merchant/offers",
    tag = "offer",
    request_body = CreateOfferRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Created offer", body = OfferResponse),
        (status = 400, description = "Invalid title or price"),
        (status = 401, description = "Missing or invalid key")
    )
)]
pub async fn create_offer(
    auth_service: web::Data<AuthService>,
    offer_service: web::Data<OfferService>,
    req: HttpRequest,
    request: web::Json<CreateOfferRequest>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    let request = request.into_inner();
    if let Err(e) = auth_service
        .authenticate(&request.restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    match offer_service.create_offer(request).await {
        Ok(offer) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": offer
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/merchant/offers/{offer_id}",
    tag = "offer",
    params(
        ("offer_id" = String, Path, description = "Offer id"),
        ("restaurant_id" = String, Query, description = "Restaurant id")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "The offer", body = OfferResponse),
        (status = 404, description = "Unknown offer or not owned by the caller")
    )
)]
pub async fn get_offer(
    auth_service: web::Data<AuthService>,
    offer_service: web::Data<OfferService>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<RestaurantQuery>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    if let Err(e) = auth_service
        .authenticate(&query.restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    match offer_service
        .get_offer(&query.restaurant_id, &path.into_inner())
        .await
    {
        Ok(offer) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": offer
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/merchant/offers/{offer_id}",
    tag = "offer",
    params(
        ("offer_id" = String, Path, description = "Offer id")
    ),
    request_body = UpdateOfferRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Updated offer", body = OfferResponse),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Unknown offer or not owned by the caller")
    )
)]
pub async fn update_offer(
    auth_service: web::Data<AuthService>,
    offer_service: web::Data<OfferService>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<UpdateOfferRequest>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    let request = request.into_inner();
    let restaurant_id = request.restaurant_id.clone();
    if let Err(e) = auth_service
        .authenticate(&restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    match offer_service
        .update_offer(&restaurant_id, &path.into_inner(), request)
        .await
    {
        Ok(offer) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": offer
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/merchant/offers/{offer_id}",
    tag = "offer",
    params(
        ("offer_id" = String, Path, description = "Offer id"),
        ("restaurant_id" = String, Query, description = "Restaurant id")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Offer archived (idempotent)"),
        (status = 404, description = "Unknown offer or not owned by the caller")
    )
)]
pub async fn archive_offer(
    auth_service: web::Data<AuthService>,
    offer_service: web::Data<OfferService>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<RestaurantQuery>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    if let Err(e) = auth_service
        .authenticate(&query.restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    match offer_service
        .archive_offer(&query.restaurant_id, &path.into_inner())
        .await
    {
        Ok(offer) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": { "archived_id": offer.id }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/merchant/offers/{offer_id}/restore",
    tag = "offer",
    params(
        ("offer_id" = String, Path, description = "Offer id"),
        ("restaurant_id" = String, Query, description = "Restaurant id")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Offer restored; may still be expired or sold out"),
        (status = 404, description = "Unknown offer or not owned by the caller")
    )
)]
pub async fn restore_offer(
    auth_service: web::Data<AuthService>,
    offer_service: web::Data<OfferService>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<RestaurantQuery>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    if let Err(e) = auth_service
        .authenticate(&query.restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    match offer_service
        .restore_offer(&query.restaurant_id, &path.into_inner())
        .await
    {
        Ok(offer) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": { "restored_id": offer.id }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn offer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/merchant/offers")
            .route(web::get().to(list_offers))
            .route(web::post().to(create_offer)),
    )
    .service(
        web::resource("/merchant/offers/{offer_id}")
            .route(web::get().to(get_offer))
            .route(web::patch().to(update_offer))
            .route(web::delete().to(archive_offer)),
    )
    .route(
        "/merchant/offers/{offer_id}/restore",
        web::post().to(restore_offer),
    );
}
