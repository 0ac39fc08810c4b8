use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use foody_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    domain::parse::ParsePolicy,
    handlers,
    middlewares::{ApiKeyMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .expect("Failed to run database migrations");
    }

    let policy = ParsePolicy::from_strict_flag(config.parsing.strict);

    let auth_service = AuthService::new(pool.clone());
    let merchant_service = MerchantService::new(pool.clone());
    let offer_service = OfferService::new(pool.clone(), policy);
    let catalog_service = CatalogService::new(pool.clone());
    let export_service = ExportService::new(catalog_service.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&cors_config))
            .wrap(ApiKeyMiddleware::new())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(merchant_service.clone()))
            .app_data(web::Data::new(offer_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(export_service.clone()))
            .configure(swagger_config)
            .configure(handlers::health_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::catalog_config)
                    .configure(handlers::offer_config)
                    .configure(handlers::export_config)
                    .configure(handlers::merchant_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
