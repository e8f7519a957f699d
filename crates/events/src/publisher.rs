//! Typed event publishing over a [`MessageBus`].

use std::fmt::Display;

use serde::Serialize;

use crate::bus::{MessageBus, OutboundRecord, PublishError};
use crate::event::ChangeEvent;

/// Serializes [`ChangeEvent`]s and submits them keyed by the aggregate
/// id, so all events for one product land on the same partition.
#[derive(Debug, Clone)]
pub struct EventPublisher<B> {
    bus: B,
}

impl<B: MessageBus> EventPublisher<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Hand one event to the transport. Returns once the transport has
    /// accepted the record; never waits for delivery.
    pub fn publish<K, T>(&self, topic: &str, event: &ChangeEvent<K, T>) -> Result<(), PublishError>
    where
        K: Serialize + Display,
        T: Serialize,
    {
        let payload =
            serde_json::to_string(event).map_err(|e| PublishError::Serialize(e.to_string()))?;
        let record = OutboundRecord::new(event.key.to_string(), payload);

        tracing::debug!(
            "publishing {:?} event to '{}' with key {}",
            event.event_type,
            topic,
            event.key
        );
        self.bus.publish(topic, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory_bus::InMemoryMessageBus;
    use std::sync::Arc;

    #[test]
    fn partition_key_is_the_event_key() {
        let bus: Arc<dyn MessageBus> = Arc::new(InMemoryMessageBus::new());
        let sub = bus.subscribe("products");
        let publisher = EventPublisher::new(bus);

        let event = ChangeEvent::create(42i64, serde_json::json!({"productId": 42}));
        publisher.publish("products", &event).unwrap();

        let record = sub.try_recv().unwrap();
        assert_eq!(record.partition_key, "42");

        let wire: serde_json::Value = serde_json::from_str(&record.payload).unwrap();
        assert_eq!(wire["eventType"], "CREATE");
        assert_eq!(wire["key"], 42);
        assert_eq!(wire["data"]["productId"], 42);
    }

    #[test]
    fn delete_events_serialize_without_data() {
        let bus: Arc<dyn MessageBus> = Arc::new(InMemoryMessageBus::new());
        let sub = bus.subscribe("products");
        let publisher = EventPublisher::new(bus);

        let event: ChangeEvent<i64, serde_json::Value> = ChangeEvent::delete(7);
        publisher.publish("products", &event).unwrap();

        let record = sub.try_recv().unwrap();
        let wire: serde_json::Value = serde_json::from_str(&record.payload).unwrap();
        assert_eq!(wire["eventType"], "DELETE");
        assert!(wire["data"].is_null());
    }
}
