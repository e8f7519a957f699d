use std::sync::Arc;

use async_trait::async_trait;

use storefront_core::{DomainResult, Product, ProductService};
use storefront_events::{ChangeEvent, EventPublisher, MessageBus};

use crate::http;

/// Topic carrying product change events.
pub const PRODUCTS_TOPIC: &str = "products";

/// Client for the backing product service.
pub struct ProductClient {
    http: reqwest::Client,
    base_url: String,
    publisher: EventPublisher<Arc<dyn MessageBus>>,
}

impl ProductClient {
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
impl ProductService for ProductClient {
    async fn get_product(&self, product_id: i64) -> DomainResult<Product> {
        let url = format!("{}/product/{}", self.base_url, product_id);
        tracing::debug!("getProduct: calling {url}");

        http::get_json(&self.http, &url).await
    }

    async fn create_product(&self, product: Product) -> DomainResult<()> {
        let event = ChangeEvent::create(product.product_id, product);
        self.publisher.publish(PRODUCTS_TOPIC, &event)?;
        Ok(())
    }

    async fn delete_product(&self, product_id: i64) -> DomainResult<()> {
        let event: ChangeEvent<i64, Product> = ChangeEvent::delete(product_id);
        self.publisher.publish(PRODUCTS_TOPIC, &event)?;
        Ok(())
    }
}
