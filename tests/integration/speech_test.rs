//! Integration tests for the speech output path.

mod helpers;

use std::sync::Arc;

use serde_json::json;

use relay_core::ErrorKind;
use relay_intercept::events::Topic;
use relay_intercept::host::{SpeechCommand, SpeechPriority, SpeechSequence};
use relay_intercept::output::OutputInterceptor;

use helpers::TestRelay;

fn output(relay: &TestRelay) -> OutputInterceptor {
    OutputInterceptor::new(relay.host.clone(), relay.dispatcher.clone())
}

#[test]
fn test_speak_event_carries_sequence_and_priority() {
    let relay = TestRelay::new();
    let output = output(&relay);
    output.patch_speech();

    let sequence = SpeechSequence::from_text("Start button")
        .with_command(SpeechCommand::Break { time_ms: 100 })
        .with_text("collapsed");
    relay.host.speech.speak(&sequence, SpeechPriority::Next).unwrap();

    let events = relay.recorder.events_for(Topic::Speak);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].payload.get_i64("priority"), Some(1));
    assert_eq!(
        events[0].payload.get("speechSequence"),
        Some(&json!(["Start button", {"type": "break", "time_ms": 100}, "collapsed"]))
    );

    let calls = relay.speech.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].sequence, sequence);
    assert_eq!(calls[0].priority, SpeechPriority::Next);
}

#[test]
fn test_speak_event_precedes_real_emission() {
    let relay = TestRelay::new();
    let output = output(&relay);
    output.patch_speech();

    relay
        .host
        .speech
        .speak(&SpeechSequence::from_text("one"), SpeechPriority::Normal)
        .unwrap();
    relay.host.speech.pause_speech(true).unwrap();

    assert_eq!(
        relay.timeline.entries(),
        vec!["event:speak", "speak:one", "event:pause_speech", "pause:true"]
    );
}

#[test]
fn test_patch_speech_twice_keeps_original_and_single_wrap() {
    let relay = TestRelay::new();
    let output = output(&relay);

    output.patch_speech();
    let patched = relay.host.speech.emit.current();
    output.patch_speech();
    assert!(relay.host.speech.emit.holds(&patched));

    relay
        .host
        .speech
        .speak(&SpeechSequence::from_text("twice"), SpeechPriority::Normal)
        .unwrap();
    assert_eq!(relay.recorder.events_for(Topic::Speak).len(), 1);

    output.unpatch_speech();
    assert!(relay.speech_restored());
}

#[test]
fn test_unpatch_without_patch_leaves_host_untouched() {
    let relay = TestRelay::new();
    output(&relay).unpatch_speech();

    assert!(relay.speech_restored());
    relay.host.speech.pause_speech(false).unwrap();
    assert!(relay.recorder.is_empty());
}

#[test]
fn test_unpatch_reinstalls_identical_original() {
    let relay = TestRelay::new();
    let output = output(&relay);

    output.patch_speech();
    assert!(!relay.speech_restored());
    output.unpatch_speech();

    assert!(Arc::ptr_eq(
        &relay.host.speech.emit.current(),
        &relay.original_speak
    ));
    assert!(Arc::ptr_eq(
        &relay.host.speech.pause.current(),
        &relay.original_pause
    ));
}

#[test]
fn test_original_error_propagates_after_publish() {
    let relay = TestRelay::new();
    let output = output(&relay);
    output.patch_speech();
    relay.speech.fail_with("synthesizer unavailable");

    let err = relay
        .host
        .speech
        .speak(&SpeechSequence::from_text("lost"), SpeechPriority::Now)
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Host);
    assert_eq!(relay.recorder.events_for(Topic::Speak).len(), 1);
    assert_eq!(relay.speech.calls().len(), 1);
}

#[test]
fn test_dropped_interceptor_leaves_original_bound() {
    let relay = TestRelay::new();
    {
        let output = output(&relay);
        output.patch_speech();
    }

    assert!(relay.speech_restored());
    relay
        .host
        .speech
        .speak(&SpeechSequence::from_text("unrelayed"), SpeechPriority::Normal)
        .unwrap();
    assert!(relay.recorder.events_for(Topic::Speak).is_empty());

    let fresh = output(&relay);
    fresh.patch_speech();
    fresh.unpatch_speech();
    assert!(relay.speech_restored());
}
