//! Shared HTTP error body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured error body used on every non-2xx response.
///
/// The composite API produces the full shape; backing services are only
/// guaranteed to send `status`, `path` and `message`, so the remaining
/// fields default when parsing a downstream body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpErrorInfo {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub path: String,
    pub message: String,
    pub status: u16,
    #[serde(default)]
    pub error: String,
}

impl HttpErrorInfo {
    pub fn new(
        status: u16,
        error: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            path: path.into(),
            message: message.into(),
            status,
            error: error.into(),
        }
    }
}
