//! Behaviour tests for the backing-service clients against a stub
//! backing server bound to an ephemeral port.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use storefront_clients::{
    PRODUCTS_TOPIC, ProductClient, RECOMMENDATIONS_TOPIC, RecommendationClient, ReviewClient,
};
use storefront_core::{
    DomainError, Product, ProductService, Recommendation, RecommendationService, ReviewService,
};
use storefront_events::{
    ChangeEvent, EventPublisher, InMemoryMessageBus, MessageBus, OutboundRecord, PublishError,
    Subscription,
};

#[derive(Deserialize)]
struct ProductIdQuery {
    #[serde(rename = "productId")]
    product_id: i64,
}

async fn stub_product(Path(id): Path<i64>) -> axum::response::Response {
    match id {
        1 => Json(json!({
            "productId": 1,
            "name": "name",
            "weight": 1,
            "serviceAddress": "product-host/1"
        }))
        .into_response(),
        2 => (
            StatusCode::NOT_FOUND,
            Json(json!({"status": 404, "path": "/product/2", "message": "NOT FOUND: 2"})),
        )
            .into_response(),
        3 => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"status": 422, "path": "/product/3", "message": "INVALID: 3"})),
        )
            .into_response(),
        // Unstructured error body: clients must fall back to the raw text.
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "product service exploded").into_response(),
    }
}

async fn stub_recommendations(Query(query): Query<ProductIdQuery>) -> axum::response::Response {
    match query.product_id {
        1 => Json(json!([{
            "productId": 1,
            "recommendationId": 1,
            "author": "author",
            "rate": 1,
            "content": "content",
            "serviceAddress": "recommendation-host/1"
        }]))
        .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "recommendation service exploded").into_response(),
    }
}

async fn stub_reviews(Query(query): Query<ProductIdQuery>) -> axum::response::Response {
    match query.product_id {
        1 => Json(json!([{
            "productId": 1,
            "reviewId": 1,
            "author": "author",
            "subject": "subject",
            "content": "content",
            "serviceAddress": "review-host/1"
        }]))
        .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "review service exploded").into_response(),
    }
}

/// Bus whose transport always refuses the record.
struct FailingBus;

impl MessageBus for FailingBus {
    fn publish(&self, topic: &str, _record: OutboundRecord) -> Result<(), PublishError> {
        Err(PublishError::Transport {
            topic: topic.to_string(),
            reason: "broker unavailable".to_string(),
        })
    }

    fn subscribe(&self, _topic: &str) -> Subscription<OutboundRecord> {
        let (_tx, rx) = std::sync::mpsc::channel();
        Subscription::new(rx)
    }
}

async fn spawn_backing_stub() -> String {
    let app = Router::new()
        .route("/product/:id", get(stub_product))
        .route("/recommendation", get(stub_recommendations))
        .route("/review", get(stub_reviews));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn publisher(bus: &Arc<InMemoryMessageBus>) -> EventPublisher<Arc<dyn MessageBus>> {
    let bus: Arc<dyn MessageBus> = bus.clone();
    EventPublisher::new(bus)
}

#[tokio::test]
async fn get_product_maps_all_fields() {
    let base_url = spawn_backing_stub().await;
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = ProductClient::new(reqwest::Client::new(), base_url, publisher(&bus));

    let product = client.get_product(1).await.unwrap();

    assert_eq!(product.product_id, 1);
    assert_eq!(product.name, "name");
    assert_eq!(product.weight, 1);
    assert_eq!(product.service_address.as_deref(), Some("product-host/1"));
}

#[tokio::test]
async fn http_404_maps_to_not_found_with_downstream_message() {
    let base_url = spawn_backing_stub().await;
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = ProductClient::new(reqwest::Client::new(), base_url, publisher(&bus));

    let err = client.get_product(2).await.unwrap_err();

    assert_eq!(err, DomainError::not_found("NOT FOUND: 2"));
}

#[tokio::test]
async fn http_422_maps_to_invalid_input_with_downstream_message() {
    let base_url = spawn_backing_stub().await;
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = ProductClient::new(reqwest::Client::new(), base_url, publisher(&bus));

    let err = client.get_product(3).await.unwrap_err();

    assert_eq!(err, DomainError::invalid_input("INVALID: 3"));
}

#[tokio::test]
async fn other_statuses_map_to_transport_error_with_raw_body() {
    let base_url = spawn_backing_stub().await;
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = ProductClient::new(reqwest::Client::new(), base_url, publisher(&bus));

    let err = client.get_product(500).await.unwrap_err();

    match err {
        DomainError::UnexpectedTransport(msg) => assert!(msg.contains("product service exploded")),
        other => panic!("expected UnexpectedTransport, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_failure_maps_to_transport_error() {
    let bus = Arc::new(InMemoryMessageBus::new());
    // Nothing listens here.
    let client = ProductClient::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1",
        publisher(&bus),
    );

    let err = client.get_product(1).await.unwrap_err();

    assert!(matches!(err, DomainError::UnexpectedTransport(_)));
}

#[tokio::test]
async fn recommendations_are_fetched_and_mapped() {
    let base_url = spawn_backing_stub().await;
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = RecommendationClient::new(reqwest::Client::new(), base_url, publisher(&bus));

    let recommendations = client.get_recommendations(1).await;

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].recommendation_id, 1);
    assert_eq!(
        recommendations[0].service_address.as_deref(),
        Some("recommendation-host/1")
    );
}

#[tokio::test]
async fn recommendation_read_degrades_to_empty_on_server_error() {
    let base_url = spawn_backing_stub().await;
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = RecommendationClient::new(reqwest::Client::new(), base_url, publisher(&bus));

    let recommendations = client.get_recommendations(99).await;

    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn recommendation_read_degrades_to_empty_when_unreachable() {
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = RecommendationClient::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1",
        publisher(&bus),
    );

    let recommendations = client.get_recommendations(1).await;

    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn create_product_publishes_a_create_event_keyed_by_product_id() {
    let bus = Arc::new(InMemoryMessageBus::new());
    let sub = bus.subscribe(PRODUCTS_TOPIC);
    let client = ProductClient::new(reqwest::Client::new(), "http://unused", publisher(&bus));

    let product = Product {
        product_id: 1,
        name: "name".to_string(),
        weight: 1,
        service_address: None,
    };
    client.create_product(product.clone()).await.unwrap();

    let record = sub.try_recv().unwrap();
    assert_eq!(record.partition_key, "1");

    let event: ChangeEvent<i64, Product> = serde_json::from_str(&record.payload).unwrap();
    let expected = ChangeEvent::create(1, product);
    assert!(event.same_except_created_at(&expected));
}

#[tokio::test]
async fn delete_recommendations_publishes_a_delete_event() {
    let bus = Arc::new(InMemoryMessageBus::new());
    let sub = bus.subscribe(RECOMMENDATIONS_TOPIC);
    let client =
        RecommendationClient::new(reqwest::Client::new(), "http://unused", publisher(&bus));

    client.delete_recommendations(1).await.unwrap();

    let record = sub.try_recv().unwrap();
    assert_eq!(record.partition_key, "1");

    let event: ChangeEvent<i64, Recommendation> = serde_json::from_str(&record.payload).unwrap();
    let expected: ChangeEvent<i64, Recommendation> = ChangeEvent::delete(1);
    assert!(event.same_except_created_at(&expected));
}

#[tokio::test]
async fn review_read_degrades_to_empty_on_server_error() {
    let base_url = spawn_backing_stub().await;
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = ReviewClient::new(reqwest::Client::new(), base_url, publisher(&bus));

    let reviews = client.get_reviews(99).await;

    assert!(reviews.is_empty());
}

#[tokio::test]
async fn publish_failure_surfaces_as_a_transport_error() {
    let bus: Arc<dyn MessageBus> = Arc::new(FailingBus);
    let publisher = EventPublisher::new(bus);

    let products = ProductClient::new(reqwest::Client::new(), "http://unused", publisher.clone());
    let product = Product {
        product_id: 1,
        name: "name".to_string(),
        weight: 1,
        service_address: None,
    };
    let err = products.create_product(product).await.unwrap_err();
    assert!(matches!(err, DomainError::UnexpectedTransport(_)));

    let reviews = ReviewClient::new(reqwest::Client::new(), "http://unused", publisher);
    let err = reviews.delete_reviews(1).await.unwrap_err();
    assert!(matches!(err, DomainError::UnexpectedTransport(_)));
}

#[tokio::test]
async fn review_reads_and_deletes_share_the_same_policies() {
    let base_url = spawn_backing_stub().await;
    let bus = Arc::new(InMemoryMessageBus::new());
    let client = ReviewClient::new(reqwest::Client::new(), base_url, publisher(&bus));

    let reviews = client.get_reviews(1).await;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].subject, "subject");

    client.delete_reviews(1).await.unwrap();
}
