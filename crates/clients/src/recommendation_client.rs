use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::{DomainResult, Recommendation, RecommendationService};
use storefront_events::{ChangeEvent, EventPublisher, MessageBus};

use crate::http;

/// Topic carrying recommendation change events.
pub const RECOMMENDATIONS_TOPIC: &str = "recommendations";

/// Client for the backing recommendation service.
pub struct RecommendationClient {
    http: reqwest::Client,
    base_url: String,
    publisher: EventPublisher<Arc<dyn MessageBus>>,
}

impl RecommendationClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        publisher: EventPublisher<Arc<dyn MessageBus>>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            publisher,
        }
    }
}

#[async_trait]
impl RecommendationService for RecommendationClient {
    async fn get_recommendations(&self, product_id: i64) -> Vec<Recommendation> {
        let url = format!("{}/recommendation?productId={}", self.base_url, product_id);
        tracing::debug!("getRecommendations: calling {url}");

        match http::get_json::<Vec<Recommendation>>(&self.http, &url).await {
            Ok(recommendations) => recommendations,
            Err(err) => {
                // Deliberate degraded read: "service down" and "no rows"
                // are indistinguishable to the caller.
                tracing::warn!(
                    "getRecommendations failed for productId {product_id}, \
                     returning zero recommendations: {err}"
                );
                Vec::new()
            }
        }
    }

    async fn create_recommendation(&self, recommendation: Recommendation) -> DomainResult<()> {
        // Keyed by the aggregate-root id, not the recommendation id.
        let event = ChangeEvent::create(recommendation.product_id, recommendation);
        self.publisher.publish(RECOMMENDATIONS_TOPIC, &event)?;
        Ok(())
    }

    async fn delete_recommendations(&self, product_id: i64) -> DomainResult<()> {
        let event: ChangeEvent<i64, Recommendation> = ChangeEvent::delete(product_id);
        self.publisher.publish(RECOMMENDATIONS_TOPIC, &event)?;
        Ok(())
    }
}
