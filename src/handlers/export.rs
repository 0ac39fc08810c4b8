use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::middlewares::MerchantKey;
use crate::models::*;
use crate::services::{AuthService, ExportService};

fn get_api_key(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<MerchantKey>().map(|k| k.0.clone())
}

#[utoipa::path(
    get,
    path = "/merchant/export.csv",
    tag = "export",
    params(
        ("restaurant_id" = String, Query, description = "Restaurant id"),
        ("status" = Option<StatusFilter>, Query, description = "Narrow to active/archived (default all)"),
        ("from" = Option<String>, Query, description = "Only offers created at or after this date"),
        ("to" = Option<String>, Query, description = "Only offers created at or before this date")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "CSV of the restaurant's offers", body = String, content_type = "text/csv"),
        (status = 400, description = "Bad date bound"),
        (status = 401, description = "Missing or invalid key")
    )
)]
pub async fn export_offers_csv(
    auth_service: web::Data<AuthService>,
    export_service: web::Data<ExportService>,
    req: HttpRequest,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse> {
    let key = get_api_key(&req);
    if let Err(e) = auth_service
        .authenticate(&query.restaurant_id, key.as_deref())
        .await
    {
        return Ok(e.error_response());
    }

    match export_service.export_offers_csv(&query).await {
        Ok(csv) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=offers.csv",
            ))
            .body(csv)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn export_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/merchant/export.csv", web::get().to(export_offers_csv));
}
