pub mod auth_service;
pub mod catalog_service;
pub mod export_service;
pub mod merchant_service;
pub mod offer_service;

pub use auth_service::*;
pub use catalog_service::*;
pub use export_service::*;
pub use merchant_service::*;
pub use offer_service::*;
