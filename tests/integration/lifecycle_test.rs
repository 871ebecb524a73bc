//! Integration tests for installing and removing interceptors.

mod helpers;

use std::sync::Arc;

use relay_core::AppResult;
use relay_intercept::events::Topic;
use relay_intercept::host::{
    BrailleInputGesture, Gesture, SpeakFn, SpeechPriority, SpeechSequence,
};
use relay_intercept::input::InputInterceptor;
use relay_intercept::lifecycle::Interceptor;
use relay_intercept::manager::InterceptStatus;

use helpers::{TestRelay, capture_all};

fn braille_gesture() -> Gesture {
    Gesture::from(BrailleInputGesture::new(1, false, &["bk:dot1"]))
}

#[test]
fn test_unregister_removes_braille_input_hook() {
    let relay = TestRelay::new();
    let input = InputInterceptor::new(relay.host.clone(), relay.dispatcher.clone());

    input.register_braille_input();
    assert!(!relay.host.input.execute_gesture(&braille_gesture()));

    input.unregister().unwrap();

    assert_eq!(relay.host.input.decide_execute_gesture.handler_count(), 0);
    assert!(relay.host.input.execute_gesture(&braille_gesture()));
    assert_eq!(relay.recorder.events_for(Topic::BrailleInput).len(), 1);
}

#[test]
fn test_register_and_unregister_are_idempotent() {
    let relay = TestRelay::new();
    let manager = relay.manager(capture_all());

    manager.register_all().unwrap();
    manager.register_all().unwrap();
    assert_eq!(relay.host.braille.display_changed.handler_count(), 1);
    assert_eq!(relay.host.braille.display_size_changed.handler_count(), 1);
    assert_eq!(relay.host.input.decide_execute_gesture.handler_count(), 1);

    manager.unregister_all();
    manager.unregister_all();
    assert_eq!(manager.status(), InterceptStatus::default());
    assert!(relay.speech_restored());
    assert_eq!(relay.host.braille.display_changed.handler_count(), 0);
}

#[test]
fn test_reregister_after_unregister() {
    let relay = TestRelay::new();
    let manager = relay.manager(capture_all());

    manager.register_all().unwrap();
    manager.unregister_all();
    manager.register_all().unwrap();

    relay
        .host
        .speech
        .speak(&SpeechSequence::from_text("again"), SpeechPriority::Normal)
        .unwrap();
    assert_eq!(relay.recorder.events_for(Topic::Speak).len(), 1);
    assert_eq!(relay.speech.calls().len(), 1);
}

#[test]
fn test_dropping_manager_restores_host() {
    let relay = TestRelay::new();
    {
        let manager = relay.manager(capture_all());
        manager.register_all().unwrap();
        assert!(!relay.speech_restored());
    }

    assert!(relay.speech_restored());
    assert_eq!(relay.host.braille.display_changed.handler_count(), 0);
    assert_eq!(relay.host.braille.display_size_changed.handler_count(), 0);
    assert_eq!(relay.host.input.decide_execute_gesture.handler_count(), 0);
}

#[test]
fn test_unregister_restores_original_over_foreign_patch() {
    let relay = TestRelay::new();
    let manager = relay.manager(capture_all());
    manager.register_all().unwrap();

    let foreign: SpeakFn =
        Arc::new(|_: &SpeechSequence, _: SpeechPriority| -> AppResult<()> { Ok(()) });
    relay.host.speech.emit.install(foreign);

    manager.unregister_all();
    assert!(relay.speech_restored());
}
