pub mod ids;
pub mod time;

pub use ids::{generate_api_key, generate_offer_id, generate_restaurant_id};
pub use time::parse_client_datetime;
