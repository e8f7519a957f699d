use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainResult;

/// A recommendation row, unique per `(product_id, recommendation_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product_id: i64,
    pub recommendation_id: i64,
    pub author: String,
    pub rate: i32,
    pub content: String,
    #[serde(default)]
    pub service_address: Option<String>,
}

/// Backing recommendation service contract.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Never fails: any transport error degrades to an empty list. The
    /// caller cannot tell "no recommendations" from "service down".
    async fn get_recommendations(&self, product_id: i64) -> Vec<Recommendation>;

    async fn create_recommendation(&self, recommendation: Recommendation) -> DomainResult<()>;

    /// Removes every recommendation row for the product. Idempotent.
    async fn delete_recommendations(&self, product_id: i64) -> DomainResult<()>;
}
