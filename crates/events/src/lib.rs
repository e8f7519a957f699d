//! Change events and the messaging transport seam.
//!
//! The publishing side serializes [`ChangeEvent`]s and hands them to a
//! [`MessageBus`] keyed by the aggregate-root id; the consuming side
//! decodes raw payloads and dispatches them to an [`EventHandler`].

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod processor;
pub mod publisher;

pub use bus::{MessageBus, OutboundRecord, PublishError, Subscription};
pub use event::{ChangeEvent, EventType};
pub use in_memory_bus::InMemoryMessageBus;
pub use processor::{EventHandler, process_message};
pub use publisher::EventPublisher;
