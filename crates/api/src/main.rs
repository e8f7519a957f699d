use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use storefront_clients::{ProductClient, RecommendationClient, ReviewClient};
use storefront_composite::CompositeEngine;
use storefront_events::{EventPublisher, InMemoryMessageBus, MessageBus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let product_url = env_or("PRODUCT_SERVICE_URL", "http://localhost:7001");
    let recommendation_url = env_or("RECOMMENDATION_SERVICE_URL", "http://localhost:7002");
    let review_url = env_or("REVIEW_SERVICE_URL", "http://localhost:7003");
    let bind_addr = env_or("BIND_ADDR", "0.0.0.0:8080");

    let timeout_secs: u64 = env_or("HTTP_CLIENT_TIMEOUT_SECS", "10")
        .parse()
        .context("HTTP_CLIENT_TIMEOUT_SECS must be an integer")?;

    // One connection pool shared by all three clients for the process
    // lifetime.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")?;

    // One bus shared by all publishers; swap in a partitioned broker
    // adapter here for real deployments.
    let bus: Arc<dyn MessageBus> = Arc::new(InMemoryMessageBus::new());
    let publisher = EventPublisher::new(bus);

    let engine = Arc::new(CompositeEngine::new(
        Arc::new(ProductClient::new(
            http.clone(),
            product_url,
            publisher.clone(),
        )),
        Arc::new(RecommendationClient::new(
            http.clone(),
            recommendation_url,
            publisher.clone(),
        )),
        Arc::new(ReviewClient::new(http, review_url, publisher)),
        service_address(&bind_addr),
    ));

    let app = storefront_api::app::build_app(engine);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        tracing::warn!("{key} not set; using {default}");
        default.to_string()
    })
}

/// Address reported in `serviceAddresses.composite`.
fn service_address(bind_addr: &str) -> String {
    let host = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
    let port = bind_addr.rsplit(':').next().unwrap_or("8080");
    format!("{host}:{port}")
}
