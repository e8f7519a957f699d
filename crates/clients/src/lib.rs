//! HTTP/event clients for the three backing services.
//!
//! Reads go over HTTP with a uniform transport-to-domain error mapping;
//! creates and deletes publish change events keyed by the product id
//! instead of calling the services directly.

mod http;
pub mod product_client;
pub mod recommendation_client;
pub mod review_client;

pub use product_client::{PRODUCTS_TOPIC, ProductClient};
pub use recommendation_client::{RECOMMENDATIONS_TOPIC, RecommendationClient};
pub use review_client::{REVIEWS_TOPIC, ReviewClient};
