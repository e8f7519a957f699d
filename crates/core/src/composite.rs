//! Composite read model merged from the three backing services.

use serde::{Deserialize, Serialize};

/// The merged read view anchored on the product root.
///
/// `recommendations`/`reviews` distinguish "absent" (`None`, the
/// downstream call never produced rows) from "present but empty"
/// (`Some(vec![])`); both occur on the wire and are not interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAggregate {
    pub product_id: i64,
    pub name: String,
    pub weight: i32,
    #[serde(default)]
    pub recommendations: Option<Vec<RecommendationSummary>>,
    #[serde(default)]
    pub reviews: Option<Vec<ReviewSummary>>,
    #[serde(default)]
    pub service_addresses: Option<ServiceAddresses>,
}

/// Recommendation projection inside the aggregate; the redundant
/// `product_id` and instance address are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub recommendation_id: i64,
    pub author: String,
    pub rate: i32,
    pub content: String,
}

/// Review projection inside the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub review_id: i64,
    pub author: String,
    pub subject: String,
    pub content: String,
}

/// Best-effort snapshot of which instances served a composite read.
///
/// The review/recommendation entries come from the first element of the
/// respective list (empty string when the list is empty), so this is a
/// diagnostic aid, not a load-balancer-accurate picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddresses {
    pub composite: String,
    pub product: String,
    pub review: String,
    pub recommendation: String,
}
