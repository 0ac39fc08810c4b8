use crate::config::CorsConfig;
use actix_cors::Cors;

pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        // the web client sends X-Foody-Key as a custom header; keep the
        // preflight permissive
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allowed_origin_fn(|_, _req_head| true);
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}
