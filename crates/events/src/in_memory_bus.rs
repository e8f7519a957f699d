//! In-memory message bus for tests/dev.

use std::collections::HashMap;
use std::sync::{Mutex, mpsc};

use crate::bus::{MessageBus, OutboundRecord, PublishError, Subscription};

/// In-memory per-topic pub/sub bus.
///
/// - No IO / no async
/// - One ordered channel per subscriber, so per-key ordering holds
///   trivially (all keys of a topic share one stream)
/// - At-least-once acceptable (subscribers must be idempotent)
#[derive(Debug, Default)]
pub struct InMemoryMessageBus {
    subscribers: Mutex<HashMap<String, Vec<mpsc::Sender<OutboundRecord>>>>,
}

impl InMemoryMessageBus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageBus for InMemoryMessageBus {
    fn publish(&self, topic: &str, record: OutboundRecord) -> Result<(), PublishError> {
        let mut subscribers = self.subscribers.lock().map_err(|_| PublishError::Transport {
            topic: topic.to_string(),
            reason: "subscriber registry poisoned".to_string(),
        })?;

        // Drop any dead subscribers while publishing.
        if let Some(senders) = subscribers.get_mut(topic) {
            senders.retain(|tx| tx.send(record.clone()).is_ok());
        }

        Ok(())
    }

    fn subscribe(&self, topic: &str) -> Subscription<OutboundRecord> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription; it
        // just won't receive records until the process restarts.
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.entry(topic.to_string()).or_default().push(tx);
        }

        Subscription::new(rx)
    }
}
