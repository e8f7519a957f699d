//! Consuming side: decode raw transport payloads and dispatch them.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use storefront_core::{DomainError, DomainResult};

/// Wire shape with the event type left as a string, so unknown types can
/// be reported as processing errors instead of opaque decode failures.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "K: DeserializeOwned, T: DeserializeOwned"))]
struct RawChangeEvent<K, T> {
    event_type: String,
    key: K,
    #[serde(default)]
    data: Option<T>,
}

/// Handler for decoded change events.
pub trait EventHandler<K, T> {
    fn on_create(&self, key: K, data: T) -> DomainResult<()>;

    fn on_delete(&self, key: K) -> DomainResult<()>;
}

/// Decode one raw payload and dispatch it to the handler.
///
/// An event type outside CREATE/DELETE, or a malformed body, is fatal to
/// that single event only: it is logged and returned as
/// [`DomainError::EventProcessing`], never retried here.
pub fn process_message<K, T, H>(payload: &str, handler: &H) -> DomainResult<()>
where
    K: DeserializeOwned,
    T: DeserializeOwned,
    H: EventHandler<K, T>,
{
    let raw: RawChangeEvent<K, T> = serde_json::from_str(payload)
        .map_err(|e| DomainError::event_processing(format!("malformed event payload: {e}")))?;

    match raw.event_type.as_str() {
        "CREATE" => {
            let data = raw
                .data
                .ok_or_else(|| DomainError::event_processing("CREATE event without data"))?;
            handler.on_create(raw.key, data)
        }
        "DELETE" => handler.on_delete(raw.key),
        other => {
            let message =
                format!("incorrect event type: {other}, expected a CREATE or DELETE event");
            tracing::warn!("{message}");
            Err(DomainError::event_processing(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        created: Mutex<Vec<(i64, serde_json::Value)>>,
        deleted: Mutex<Vec<i64>>,
    }

    impl EventHandler<i64, serde_json::Value> for RecordingHandler {
        fn on_create(&self, key: i64, data: serde_json::Value) -> DomainResult<()> {
            self.created.lock().unwrap().push((key, data));
            Ok(())
        }

        fn on_delete(&self, key: i64) -> DomainResult<()> {
            self.deleted.lock().unwrap().push(key);
            Ok(())
        }
    }

    #[test]
    fn dispatches_create_with_payload() {
        let handler = RecordingHandler::default();
        let payload = r#"{"eventType":"CREATE","key":1,"data":{"productId":1},"eventCreatedAt":"2024-01-01T00:00:00Z"}"#;

        process_message(payload, &handler).unwrap();

        let created = handler.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, 1);
        assert_eq!(created[0].1["productId"], 1);
    }

    #[test]
    fn dispatches_delete_by_key() {
        let handler = RecordingHandler::default();
        let payload = r#"{"eventType":"DELETE","key":7,"eventCreatedAt":"2024-01-01T00:00:00Z"}"#;

        process_message(payload, &handler).unwrap();

        assert_eq!(*handler.deleted.lock().unwrap(), vec![7]);
    }

    #[test]
    fn unknown_event_type_is_a_processing_error() {
        let handler = RecordingHandler::default();
        let payload = r#"{"eventType":"UPDATE","key":1,"eventCreatedAt":"2024-01-01T00:00:00Z"}"#;

        let err = process_message(payload, &handler).unwrap_err();
        match err {
            DomainError::EventProcessing(msg) => assert!(msg.contains("UPDATE")),
            other => panic!("expected EventProcessing, got {other:?}"),
        }
    }

    #[test]
    fn create_without_data_is_a_processing_error() {
        let handler = RecordingHandler::default();
        let payload = r#"{"eventType":"CREATE","key":1,"eventCreatedAt":"2024-01-01T00:00:00Z"}"#;

        let err = process_message(payload, &handler).unwrap_err();
        assert!(matches!(err, DomainError::EventProcessing(_)));
    }

    #[test]
    fn malformed_body_is_a_processing_error() {
        let handler = RecordingHandler::default();

        let err = process_message("not json", &handler).unwrap_err();
        assert!(matches!(err, DomainError::EventProcessing(_)));
    }
}
