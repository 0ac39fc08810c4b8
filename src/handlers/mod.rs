pub mod catalog;
pub mod export;
pub mod health;
pub mod merchant;
pub mod offer;

pub use catalog::catalog_config;
pub use export::export_config;
pub use health::health_config;
pub use merchant::merchant_config;
pub use offer::offer_config;
