use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Foody-Key"))),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::catalog::public_offers,
        handlers::merchant::register_public,
        handlers::merchant::get_profile,
        handlers::merchant::update_profile,
        handlers::offer::list_offers,
        handlers::offer::create_offer,
        handlers::offer::get_offer,
        handlers::offer::update_offer,
        handlers::offer::archive_offer,
        handlers::offer::restore_offer,
        handlers::export::export_offers_csv,
    ),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            MerchantProfileResponse,
            UpdateProfileRequest,
            CreateOfferRequest,
            UpdateOfferRequest,
            OfferResponse,
            PublicOffersQuery,
            MerchantOffersQuery,
            ExportQuery,
            StatusFilter,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "catalog", description = "Public buyer feed"),
        (name = "merchant", description = "Registration and profile API"),
        (name = "offer", description = "Merchant offer management API"),
        (name = "export", description = "CSV export API"),
        (name = "health", description = "Liveness probe"),
    ),
    info(
        title = "Foody Backend API",
        version = "1.0.0",
        description = "Surplus-food marketplace REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
