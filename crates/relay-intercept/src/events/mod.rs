//! Event system: topics, payloads, subscriber registry, and dispatcher.

pub mod definitions;
pub mod dispatcher;
pub mod registry;
pub mod subscriber;

pub use definitions::{Event, EventPayload, Topic};
pub use dispatcher::{EventDispatcher, PublishReport};
pub use registry::{SubscriberRegistry, SubscriptionId};
pub use subscriber::{ClosureSubscriber, Subscriber};
