//! Shared transport-to-domain error mapping.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use storefront_core::{DomainError, DomainResult, HttpErrorInfo};

/// Issue a GET and decode the body, applying the uniform error mapping.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> DomainResult<T> {
    let response = client.get(url).send().await.map_err(transport_error)?;

    if !response.status().is_success() {
        return Err(map_error_response(response).await);
    }

    response.json::<T>().await.map_err(transport_error)
}

/// Map a non-2xx backing-service response to a domain error.
///
/// 404 and 422 become `NotFound`/`InvalidInput` carrying the downstream
/// message; every other status is an `UnexpectedTransport` error, logged
/// with the full body.
async fn map_error_response(response: Response) -> DomainError {
    let status = response.status();
    let message = error_message(response).await;

    match status {
        StatusCode::NOT_FOUND => DomainError::not_found(message),
        StatusCode::UNPROCESSABLE_ENTITY => DomainError::invalid_input(message),
        _ => {
            tracing::warn!("unexpected HTTP status {status} from backing service: {message}");
            DomainError::transport(message)
        }
    }
}

/// Extract the downstream's own message from its structured error body,
/// falling back to the raw body text when it does not parse.
async fn error_message(response: Response) -> String {
    match response.text().await {
        Ok(body) => match serde_json::from_str::<HttpErrorInfo>(&body) {
            Ok(info) => info.message,
            Err(_) => body,
        },
        Err(e) => e.to_string(),
    }
}

/// Connection failures, timeouts and body decode failures all collapse
/// to transport errors.
pub(crate) fn transport_error(err: reqwest::Error) -> DomainError {
    DomainError::transport(err.to_string())
}
