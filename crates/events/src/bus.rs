//! Messaging transport seam (mechanics only).
//!
//! The bus moves opaque, partition-keyed records; it knows nothing about
//! event types or payload schemas. Delivery is at-least-once and ordered
//! only among records sharing a partition key.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use storefront_core::DomainError;

/// Errors surfaced by [`MessageBus::publish`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The event could not be serialized for the wire.
    #[error("serialize failed: {0}")]
    Serialize(String),

    /// The transport refused or dropped the record.
    #[error("transport failed for topic '{topic}': {reason}")]
    Transport { topic: String, reason: String },
}

impl From<PublishError> for DomainError {
    fn from(err: PublishError) -> Self {
        DomainError::transport(err.to_string())
    }
}

/// A serialized event plus its routing metadata, as handed to the
/// transport.
///
/// `partition_key` pins every record sharing a key to one ordered
/// stream; publishers set it to the aggregate-root id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundRecord {
    pub record_id: Uuid,
    pub partition_key: String,
    pub payload: String,
}

impl OutboundRecord {
    pub fn new(partition_key: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            record_id: Uuid::now_v7(),
            partition_key: partition_key.into(),
            payload: payload.into(),
        }
    }
}

/// A subscription to one topic's record stream.
///
/// Designed for single-threaded consumption; records arrive in the order
/// the bus accepted them for this topic.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next record is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a record without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a record.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything currently queued.
    pub fn drain(&self) -> Vec<M> {
        let mut records = Vec::new();
        while let Ok(record) = self.try_recv() {
            records.push(record);
        }
        records
    }
}

/// Transport-agnostic message bus.
///
/// `publish` must hand the record to the transport before returning; a
/// returned `Ok` means the record was accepted, never silently dropped.
pub trait MessageBus: Send + Sync {
    fn publish(&self, topic: &str, record: OutboundRecord) -> Result<(), PublishError>;

    fn subscribe(&self, topic: &str) -> Subscription<OutboundRecord>;
}

impl<B> MessageBus for Arc<B>
where
    B: MessageBus + ?Sized,
{
    fn publish(&self, topic: &str, record: OutboundRecord) -> Result<(), PublishError> {
        (**self).publish(topic, record)
    }

    fn subscribe(&self, topic: &str) -> Subscription<OutboundRecord> {
        (**self).subscribe(topic)
    }
}
