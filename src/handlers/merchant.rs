use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::MerchantKey;
use crate::models::*;
use crate::services::{AuthService, MerchantService};

fn get_api_key(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<MerchantKey>().map(|k| k.0.clone())
}

#[utoipa::path(
    post,
    path = "/merchant/register_public",
    tag = "merchant",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Restaurant registered; the api_key is shown only here", body = RegisterResponse),
        (status = 400, description = "Missing title")
    )
)]
pub async fn register_public(
    auth_service: web::Data<AuthService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    match auth_service.register(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/merchant/profile",
    tag = "merchant",
    params(
        ("restaurant_id" = String, Query, description = "Restaurant id")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Merchant profile", body = MerchantProfileResponse),
        (status = 401, description = "Missing or invalid key"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn get_profile(
    auth_service: web::Data<AuthService>,
    merchant_service: web::Data<MerchantService>,
    req: HttpRequest,
    query: web::Query<RestaurantQuery>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    if let Err(e) = auth_service
        .authenticate(&query.restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    match merchant_service.get_profile(&query.restaurant_id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": profile
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/merchant/profile",
    tag = "merchant",
    request_body = UpdateProfileRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Updated profile", body = MerchantProfileResponse),
        (status = 401, description = "Missing or invalid key")
    )
)]
pub async fn update_profile(
    auth_service: web::Data<AuthService>,
    merchant_service: web::Data<MerchantService>,
    req: HttpRequest,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    let request = request.into_inner();
    if let Err(e) = auth_service
        .authenticate(&request.restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    match merchant_service.update_profile(request).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": profile
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn merchant_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/merchant/register_public",
        web::post().to(register_public),
    )
    .service(
        web::resource("/merchant/profile")
            .route(web::get().to(get_profile))
            .route(web::post().to(update_profile)),
    );
}
