//! Router and handlers for the composite API.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
};

use storefront_composite::CompositeEngine;
use storefront_core::{DomainError, HttpErrorInfo, ProductAggregate};

pub fn build_app(engine: Arc<CompositeEngine>) -> Router {
    Router::new()
        .route("/product-composite", post(create_composite))
        .route(
            "/product-composite/:product_id",
            get(get_composite).delete(delete_composite),
        )
        .route("/health", get(health))
        .layer(Extension(engine))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn get_composite(
    Extension(engine): Extension<Arc<CompositeEngine>>,
    Path(product_id): Path<i64>,
    uri: Uri,
) -> axum::response::Response {
    match engine.get_composite(product_id).await {
        Ok(aggregate) => (StatusCode::OK, Json(aggregate)).into_response(),
        Err(err) => error_response(uri.path(), err),
    }
}

async fn create_composite(
    Extension(engine): Extension<Arc<CompositeEngine>>,
    uri: Uri,
    Json(body): Json<ProductAggregate>,
) -> axum::response::Response {
    match engine.create_composite(body).await {
        // Accepted for eventual propagation, not yet persisted downstream.
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(err) => error_response(uri.path(), err),
    }
}

async fn delete_composite(
    Extension(engine): Extension<Arc<CompositeEngine>>,
    Path(product_id): Path<i64>,
    uri: Uri,
) -> axum::response::Response {
    match engine.delete_composite(product_id).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(err) => error_response(uri.path(), err),
    }
}

fn error_response(path: &str, err: DomainError) -> axum::response::Response {
    let (status, label) = match &err {
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
        DomainError::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity"),
        DomainError::UnexpectedTransport(_) | DomainError::EventProcessing(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    };

    tracing::debug!("returning HTTP status {status} for path {path}: {err}");

    let body = HttpErrorInfo::new(status.as_u16(), label, path, err.to_string());
    (status, Json(body)).into_response()
}
