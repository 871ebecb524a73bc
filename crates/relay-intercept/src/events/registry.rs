//! Subscriber registry: subscribers organized by topic in registration order.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::definitions::Topic;
use super::subscriber::Subscriber;

/// Identifies one registration returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entry in the subscriber registry.
#[derive(Debug)]
struct SubscriberEntry {
    /// Registration ID.
    id: SubscriptionId,
    /// The subscriber.
    subscriber: Arc<dyn Subscriber>,
}

/// Registry of subscribers organized by topic.
///
/// The same subscriber may be registered several times under one topic;
/// every registration is a separate entry.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    /// Topic → subscribers in registration order.
    topics: DashMap<Topic, Vec<SubscriberEntry>>,
}

impl SubscriberRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subscriber to a topic.
    pub fn register(&self, topic: Topic, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId::new();
        let name = subscriber.name().to_string();

        self.topics
            .entry(topic)
            .or_default()
            .push(SubscriberEntry { id, subscriber });

        debug!(topic = %topic, subscriber = %name, subscription_id = %id, "Subscriber registered");
        id
    }

    /// Removes the first registration of `subscriber` under `topic`.
    ///
    /// Subscribers are matched by identity. Returns `false` if none matched.
    pub fn unregister(&self, topic: Topic, subscriber: &Arc<dyn Subscriber>) -> bool {
        self.remove_first(topic, |entry| Arc::ptr_eq(&entry.subscriber, subscriber))
    }

    /// Removes the registration with the given ID.
    pub fn unregister_id(&self, topic: Topic, id: SubscriptionId) -> bool {
        self.remove_first(topic, |entry| entry.id == id)
    }

    fn remove_first(&self, topic: Topic, matches: impl Fn(&SubscriberEntry) -> bool) -> bool {
        let removed = match self.topics.get_mut(&topic) {
            Some(mut entries) => match entries.iter().position(|e| matches(e)) {
                Some(pos) => {
                    let entry = entries.remove(pos);
                    debug!(
                        topic = %topic,
                        subscriber = %entry.subscriber.name(),
                        subscription_id = %entry.id,
                        "Subscriber unregistered"
                    );
                    true
                }
                None => false,
            },
            None => false,
        };

        if removed {
            self.topics.remove_if(&topic, |_, entries| entries.is_empty());
        }
        removed
    }

    /// Returns a snapshot of the subscribers for a topic, in registration order.
    pub fn get_subscribers(&self, topic: Topic) -> Vec<Arc<dyn Subscriber>> {
        self.topics
            .get(&topic)
            .map(|entries| entries.iter().map(|e| e.subscriber.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns the number of registrations for a topic.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.topics.get(&topic).map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns all topics with at least one subscriber.
    pub fn registered_topics(&self) -> Vec<Topic> {
        self.topics.iter().map(|entry| *entry.key()).collect()
    }

    /// Removes every registration.
    pub fn clear(&self) {
        self.topics.clear();
    }
}
