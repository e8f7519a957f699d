use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainResult;

/// A review row, unique per `(product_id, review_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub product_id: i64,
    pub review_id: i64,
    pub author: String,
    pub subject: String,
    pub content: String,
    #[serde(default)]
    pub service_address: Option<String>,
}

/// Backing review service contract. Same degraded-read policy as
/// recommendations.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Never fails: any transport error degrades to an empty list.
    async fn get_reviews(&self, product_id: i64) -> Vec<Review>;

    async fn create_review(&self, review: Review) -> DomainResult<()>;

    /// Removes every review row for the product. Idempotent.
    async fn delete_reviews(&self, product_id: i64) -> DomainResult<()>;
}
