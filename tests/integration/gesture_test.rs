//! Integration tests for braille gesture capture.

mod helpers;

use std::sync::Arc;

use relay_intercept::events::{EventPayload, Topic};
use relay_intercept::host::{
    BrailleDisplayGesture, BrailleInputGesture, DisplayInfo, Gesture, GestureMaps,
    InMemoryGestureMap, OtherGesture, ScriptRef,
};

use helpers::{TestRelay, capture_all, map_with};

fn captured(relay: &TestRelay) -> Vec<EventPayload> {
    relay
        .recorder
        .events_for(Topic::BrailleInput)
        .into_iter()
        .map(|event| event.payload)
        .collect()
}

#[test]
fn test_keyboard_script_path_is_global_commands() {
    let relay = TestRelay::new();
    let manager = relay.manager(capture_all());
    manager.register_all().unwrap();

    let gesture = Gesture::from(
        BrailleDisplayGesture::new("handyTech", &["br(handyTech):b4"])
            .with_script(ScriptRef::new("kb:escape", "appModules.notepad.AppModule")),
    );
    assert!(!relay.host.input.execute_gesture(&gesture));

    let payloads = captured(&relay);
    assert_eq!(payloads.len(), 1);
    let path = payloads[0].get_strings("scriptPath").unwrap();
    assert_eq!(path[..2], ["globalCommands", "GlobalCommands"]);
    assert_eq!(path[2], "kb:escape");
}

#[test]
fn test_locale_map_on_second_identifier_beats_display_on_first() {
    let maps = GestureMaps::new(
        Arc::new(InMemoryGestureMap::new()),
        map_with("bk:dot4+dot5", "globalCommands", "GlobalCommands", "braille_nextLine"),
    )
    .with_display(map_with("bk:dot4+dot5+space", "display", "Driver", "from_display"));
    let relay = TestRelay::with_maps(maps);
    let manager = relay.manager(capture_all());
    manager.register_all().unwrap();

    let gesture = Gesture::from(BrailleInputGesture::new(
        0b11000,
        false,
        &["bk:dot4+dot5+space", "bk:dot4+dot5"],
    ));
    assert!(!relay.host.input.execute_gesture(&gesture));

    let payloads = captured(&relay);
    assert_eq!(
        payloads[0].get_strings("scriptPath"),
        Some(vec!["globalCommands", "GlobalCommands", "braille_nextLine"])
    );
    assert_eq!(payloads[0].get_i64("dots"), Some(0b11000));
    assert_eq!(payloads[0].get_bool("space"), Some(false));
}

#[test]
fn test_display_map_consulted_last() {
    let maps = GestureMaps::new(
        map_with("br(alva):t1", "user", "UserCommands", "from_user"),
        Arc::new(InMemoryGestureMap::new()),
    )
    .with_display(map_with("br(alva):t1", "display", "Driver", "from_display"));
    let relay = TestRelay::with_maps(maps);
    let manager = relay.manager(capture_all());
    manager.register_all().unwrap();

    let gesture = Gesture::from(BrailleDisplayGesture::new("alva", &["br(alva):t1"]).with_id("t1"));
    relay.host.input.execute_gesture(&gesture);

    assert_eq!(
        captured(&relay)[0].get_strings("scriptPath"),
        Some(vec!["user", "UserCommands", "from_user"])
    );
}

#[test]
fn test_id_suppresses_identifiers() {
    let relay = TestRelay::new();
    let manager = relay.manager(capture_all());
    manager.register_all().unwrap();

    let gesture = Gesture::from(
        BrailleDisplayGesture::new("freedomScientific", &["br(freedomScientific):routing"])
            .with_model("focus40")
            .with_id("routing")
            .with_routing_index(3),
    );
    relay.host.input.execute_gesture(&gesture);

    let payload = &captured(&relay)[0];
    assert_eq!(payload.get_string("id"), Some("routing"));
    assert!(!payload.contains("identifiers"));
    assert!(!payload.contains("scriptPath"));
    assert_eq!(payload.get_string("source"), Some("freedomScientific"));
    assert_eq!(payload.get_string("model"), Some("focus40"));
    assert_eq!(payload.get_i64("routingIndex"), Some(3));
}

#[test]
fn test_non_braille_gesture_executes() {
    let relay = TestRelay::new();
    let manager = relay.manager(capture_all());
    manager.register_all().unwrap();

    let gesture = Gesture::from(OtherGesture {
        kind: "keyboard".to_string(),
        identifiers: vec!["kb:alt+tab".to_string()],
    });

    assert!(relay.host.input.execute_gesture(&gesture));
    assert!(captured(&relay).is_empty());
}

#[test]
fn test_gestures_execute_when_capture_disabled() {
    let relay = TestRelay::new();
    let manager = relay.manager(Default::default());
    manager.register_all().unwrap();

    let gesture = Gesture::from(BrailleInputGesture::new(1, false, &["bk:dot1"]));
    assert!(relay.host.input.execute_gesture(&gesture));
    assert!(captured(&relay).is_empty());
}

#[test]
fn test_display_changes_publish_set_display() {
    let relay = TestRelay::new();
    let manager = relay.manager(Default::default());
    manager.register_all().unwrap();

    relay
        .host
        .braille
        .display_changed
        .notify(&DisplayInfo::new("baum", "Baum VarioUltra", 32));
    relay.host.braille.display_size_changed.notify(&32);

    let events = relay.recorder.events_for(Topic::SetDisplay);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].payload.keys().collect::<Vec<_>>(), vec!["display"]);
    assert_eq!(events[0].payload.get_string("display"), Some("baum"));
    assert_eq!(events[1].payload.keys().collect::<Vec<_>>(), vec!["displaySize"]);
    assert_eq!(events[1].payload.get_i64("displaySize"), Some(32));
}
