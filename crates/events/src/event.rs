use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change a [`ChangeEvent`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Create,
    Delete,
}

/// Unit of durable propagation to a backing service's own store.
///
/// `key` is always the aggregate-root id (the product id), even for
/// recommendation/review events, so a partitioned transport keeps all of
/// a product's events in submission order. `data` is present for CREATE
/// and absent for DELETE.
///
/// `event_created_at` is stamped with the wall clock at construction and
/// is excluded from the equality used in tests
/// ([`ChangeEvent::same_except_created_at`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent<K, T> {
    pub event_type: EventType,
    pub key: K,
    pub data: Option<T>,
    pub event_created_at: DateTime<Utc>,
}

impl<K, T> ChangeEvent<K, T> {
    pub fn create(key: K, data: T) -> Self {
        Self {
            event_type: EventType::Create,
            key,
            data: Some(data),
            event_created_at: Utc::now(),
        }
    }

    pub fn delete(key: K) -> Self {
        Self {
            event_type: EventType::Delete,
            key,
            data: None,
            event_created_at: Utc::now(),
        }
    }
}

impl<K: PartialEq, T: PartialEq> ChangeEvent<K, T> {
    /// Field-wise equality ignoring the creation timestamp.
    pub fn same_except_created_at(&self, other: &Self) -> bool {
        self.event_type == other.event_type && self.key == other.key && self.data == other.data
    }
}
