//! Event dispatcher: delivers published events synchronously to subscribers.
//!
//! - Subscribers are called in registration order on the publishing thread.
//! - A subscriber that errors or panics is logged and skipped; the others
//!   still run and the publisher never sees the failure.
//! - There is no queuing, retry, or deduplication.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error, trace};

use super::definitions::{Event, EventPayload, Topic};
use super::registry::{SubscriberRegistry, SubscriptionId};
use super::subscriber::Subscriber;

/// Outcome of one `publish` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers that handled the event.
    pub delivered: usize,
    /// Subscribers that returned an error or panicked.
    pub failed: usize,
}

/// Named-topic publish/subscribe hub shared by all interceptors.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    /// Subscriber registry.
    registry: SubscriberRegistry,
}

impl EventDispatcher {
    /// Creates a dispatcher with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a topic. Duplicate registrations are allowed and each
    /// is invoked once per event.
    pub fn subscribe(&self, topic: Topic, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
        self.registry.register(topic, subscriber)
    }

    /// Subscribes one subscriber to every topic.
    pub fn subscribe_all(&self, subscriber: Arc<dyn Subscriber>) -> Vec<SubscriptionId> {
        Topic::ALL
            .into_iter()
            .map(|topic| self.registry.register(topic, subscriber.clone()))
            .collect()
    }

    /// Removes one registration of `subscriber`. No-op if it is not
    /// registered under `topic`.
    pub fn unsubscribe(&self, topic: Topic, subscriber: &Arc<dyn Subscriber>) -> bool {
        self.registry.unregister(topic, subscriber)
    }

    /// Removes the registration with the given ID.
    pub fn unsubscribe_id(&self, topic: Topic, id: SubscriptionId) -> bool {
        self.registry.unregister_id(topic, id)
    }

    /// Publishes a payload to every subscriber of `topic`.
    ///
    /// The subscriber list is snapshotted first, so subscribers may
    /// (un)subscribe while handling the event; the change applies to the
    /// next publish.
    pub fn publish(&self, topic: Topic, payload: EventPayload) -> PublishReport {
        let subscribers = self.registry.get_subscribers(topic);
        let mut report = PublishReport::default();

        if subscribers.is_empty() {
            trace!(topic = %topic, "No subscribers, event dropped");
            return report;
        }

        let event = Event::new(topic, payload);

        debug!(
            topic = %topic,
            event_id = %event.id,
            subscriber_count = subscribers.len(),
            "Publishing event"
        );

        for subscriber in &subscribers {
            match panic::catch_unwind(AssertUnwindSafe(|| subscriber.on_event(&event))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    error!(
                        topic = %topic,
                        subscriber = %subscriber.name(),
                        error = %e,
                        "Subscriber failed to handle event"
                    );
                    report.failed += 1;
                }
                Err(panic) => {
                    error!(
                        topic = %topic,
                        subscriber = %subscriber.name(),
                        panic = %panic_message(panic.as_ref()),
                        "Subscriber panicked while handling event"
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Returns the number of registrations for a topic.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry.subscriber_count(topic)
    }

    /// Returns whether anything is subscribed to a topic.
    pub fn has_subscribers(&self, topic: Topic) -> bool {
        self.subscriber_count(topic) > 0
    }

    /// Removes every subscriber from every topic.
    pub fn clear(&self) {
        self.registry.clear();
    }

    /// Returns the underlying registry.
    pub fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::subscriber::ClosureSubscriber;
    use parking_lot::Mutex;
    use relay_core::AppError;

    #[test]
    fn test_publish_without_subscribers() {
        let dispatcher = EventDispatcher::new();
        let report = dispatcher.publish(Topic::Speak, EventPayload::new());
        assert_eq!(report, PublishReport::default());
    }

    #[test]
    fn test_failing_subscriber_does_not_stop_others() {
        let dispatcher = EventDispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = seen.clone();
        dispatcher.subscribe(
            Topic::PauseSpeech,
            ClosureSubscriber::shared("first", move |_| {
                log.lock().push("first");
                Err(AppError::subscriber("transport closed"))
            }),
        );
        dispatcher.subscribe(
            Topic::PauseSpeech,
            ClosureSubscriber::shared("second", |_| panic!("subscriber bug")),
        );
        let log = seen.clone();
        dispatcher.subscribe(
            Topic::PauseSpeech,
            ClosureSubscriber::shared("third", move |_| {
                log.lock().push("third");
                Ok(())
            }),
        );

        let report = dispatcher.publish(
            Topic::PauseSpeech,
            EventPayload::new().with_bool("switch", true),
        );

        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(*seen.lock(), vec!["first", "third"]);
    }

    #[test]
    fn test_subscriber_may_unsubscribe_itself_during_publish() {
        let dispatcher = Arc::new(EventDispatcher::new());
        let slot: Arc<Mutex<Option<Arc<dyn Subscriber>>>> = Arc::new(Mutex::new(None));

        let inner_dispatcher = dispatcher.clone();
        let inner_slot = slot.clone();
        let once = ClosureSubscriber::shared("once", move |event| {
            if let Some(me) = inner_slot.lock().take() {
                inner_dispatcher.unsubscribe(event.topic, &me);
            }
            Ok(())
        });
        *slot.lock() = Some(once.clone());
        dispatcher.subscribe(Topic::Speak, once);

        let first = dispatcher.publish(Topic::Speak, EventPayload::new());
        let second = dispatcher.publish(Topic::Speak, EventPayload::new());

        assert_eq!(first.delivered, 1);
        assert_eq!(second.delivered, 0);
        assert!(!dispatcher.has_subscribers(Topic::Speak));
    }

    #[test]
    fn test_subscribe_all_covers_every_topic() {
        let dispatcher = EventDispatcher::new();
        let ids = dispatcher.subscribe_all(ClosureSubscriber::shared("relay", |_| Ok(())));
        assert_eq!(ids.len(), Topic::ALL.len());
        for topic in Topic::ALL {
            assert_eq!(dispatcher.subscriber_count(topic), 1);
        }

        dispatcher.clear();
        assert!(!dispatcher.has_subscribers(Topic::BrailleInput));
    }
}
