use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::{DomainResult, Review, ReviewService};
use storefront_events::{ChangeEvent, EventPublisher, MessageBus};

use crate::http;

/// Topic carrying review change events.
pub const REVIEWS_TOPIC: &str = "reviews";

/// Client for the backing review service.
pub struct ReviewClient {
    http: reqwest::Client,
    base_url: String,
    publisher: EventPublisher<Arc<dyn MessageBus>>,
}

impl ReviewClient {
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
impl ReviewService for ReviewClient {
    async fn get_reviews(&self, product_id: i64) -> Vec<Review> {
        let url = format!("{}/review?productId={}", self.base_url, product_id);
        tracing::debug!("getReviews: calling {url}");

        match http::get_json::<Vec<Review>>(&self.http, &url).await {
            Ok(reviews) => reviews,
            Err(err) => {
                tracing::warn!(
                    "getReviews failed for productId {product_id}, returning zero reviews: {err}"
                );
                Vec::new()
            }
        }
    }

    async fn create_review(&self, review: Review) -> DomainResult<()> {
        let event = ChangeEvent::create(review.product_id, review);
        self.publisher.publish(REVIEWS_TOPIC, &event)?;
        Ok(())
    }

    async fn delete_reviews(&self, product_id: i64) -> DomainResult<()> {
        let event: ChangeEvent<i64, Review> = ChangeEvent::delete(product_id);
        self.publisher.publish(REVIEWS_TOPIC, &event)?;
        Ok(())
    }
}
