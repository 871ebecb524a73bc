//! Integration tests for topic dispatch.

mod helpers;

use std::sync::Arc;

use parking_lot::Mutex;

use relay_core::AppError;
use relay_intercept::events::{ClosureSubscriber, EventDispatcher, EventPayload, Subscriber, Topic};
use relay_intercept::testing::EventRecorder;

fn ordered_subscriber(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Subscriber> {
    let log = log.clone();
    ClosureSubscriber::shared(name, move |event| {
        log.lock().push(format!(
            "{name}:{}",
            event.payload.get_string("display").unwrap_or_default()
        ));
        Ok(())
    })
}

#[test]
fn test_every_subscriber_invoked_once_in_order() {
    let dispatcher = EventDispatcher::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    dispatcher.subscribe(Topic::SetDisplay, ordered_subscriber("first", &log));
    dispatcher.subscribe(Topic::SetDisplay, ordered_subscriber("second", &log));
    dispatcher.subscribe(Topic::SetDisplay, ordered_subscriber("third", &log));

    let report = dispatcher.publish(
        Topic::SetDisplay,
        EventPayload::new().with_string("display", "focus"),
    );

    assert_eq!(report.delivered, 3);
    assert_eq!(
        *log.lock(),
        vec!["first:focus", "second:focus", "third:focus"]
    );
}

#[test]
fn test_subscriber_sees_exact_payload() {
    let dispatcher = EventDispatcher::new();
    let recorder = EventRecorder::new();
    dispatcher.subscribe(Topic::BrailleInput, recorder.clone());

    let payload = EventPayload::new()
        .with_int("dots", 5)
        .with_bool("space", false)
        .with_strings("identifiers", &["bk:dot1+dot3".to_string()]);
    dispatcher.publish(Topic::BrailleInput, payload.clone());

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].topic, Topic::BrailleInput);
    assert_eq!(events[0].payload, payload);
}

#[test]
fn test_topics_are_isolated() {
    let dispatcher = EventDispatcher::new();
    let recorder = EventRecorder::new();
    dispatcher.subscribe(Topic::Speak, recorder.clone());

    let report = dispatcher.publish(Topic::PauseSpeech, EventPayload::new().with_bool("switch", true));

    assert_eq!(report.delivered, 0);
    assert!(recorder.is_empty());
}

#[test]
fn test_failing_and_panicking_subscribers_are_isolated() {
    let dispatcher = EventDispatcher::new();
    let recorder = EventRecorder::new();

    dispatcher.subscribe(
        Topic::Speak,
        ClosureSubscriber::shared("failing", |_| Err(AppError::subscriber("transport closed"))),
    );
    dispatcher.subscribe(
        Topic::Speak,
        ClosureSubscriber::shared("panicking", |_| panic!("subscriber bug")),
    );
    dispatcher.subscribe(Topic::Speak, recorder.clone());

    let report = dispatcher.publish(Topic::Speak, EventPayload::new().with_int("priority", 0));

    assert_eq!(report.failed, 2);
    assert_eq!(report.delivered, 1);
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_duplicate_subscription_invoked_per_registration() {
    let dispatcher = EventDispatcher::new();
    let recorder = EventRecorder::new();
    let subscriber: Arc<dyn Subscriber> = recorder.clone();

    dispatcher.subscribe(Topic::Speak, subscriber.clone());
    dispatcher.subscribe(Topic::Speak, subscriber.clone());
    dispatcher.publish(Topic::Speak, EventPayload::new());
    assert_eq!(recorder.len(), 2);

    assert!(dispatcher.unsubscribe(Topic::Speak, &subscriber));
    dispatcher.publish(Topic::Speak, EventPayload::new());
    assert_eq!(recorder.len(), 3);
}

#[test]
fn test_unsubscribe_unknown_is_noop() {
    let dispatcher = EventDispatcher::new();
    let subscriber: Arc<dyn Subscriber> = EventRecorder::new();

    assert!(!dispatcher.unsubscribe(Topic::SetDisplay, &subscriber));
    assert!(!dispatcher.has_subscribers(Topic::SetDisplay));
}

#[test]
fn test_unsubscribe_by_id() {
    let dispatcher = EventDispatcher::new();
    let recorder = EventRecorder::new();
    let id = dispatcher.subscribe(Topic::PauseSpeech, recorder.clone());

    assert!(dispatcher.unsubscribe_id(Topic::PauseSpeech, id));
    assert!(!dispatcher.unsubscribe_id(Topic::PauseSpeech, id));
    dispatcher.publish(Topic::PauseSpeech, EventPayload::new().with_bool("switch", false));
    assert!(recorder.is_empty());
}
