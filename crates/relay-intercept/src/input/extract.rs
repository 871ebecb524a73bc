//! Builds `braille_input` payloads from braille gestures.

use serde_json::Value;

use crate::events::EventPayload;
use crate::host::{Gesture, GestureMapProvider, GestureMaps, ScriptRef};

/// Module that owns global commands.
pub const GLOBAL_COMMANDS_MODULE: &str = "globalCommands";

/// Class that owns global commands.
pub const GLOBAL_COMMANDS_OWNER: &str = "GlobalCommands";

/// Scripts whose name starts with this emulate a keyboard key and always
/// resolve to the global commands owner.
pub const KEYBOARD_SCRIPT_PREFIX: &str = "kb";

/// Path of a script already bound to the gesture.
///
/// `location` is split at its last dot into module and owner. A location
/// without a dot becomes a two-segment path.
pub fn bound_script_path(script: &ScriptRef) -> Vec<String> {
    if script.name.starts_with(KEYBOARD_SCRIPT_PREFIX) {
        return vec![
            GLOBAL_COMMANDS_MODULE.to_string(),
            GLOBAL_COMMANDS_OWNER.to_string(),
            script.name.clone(),
        ];
    }

    match script.location.rsplit_once('.') {
        Some((module, owner)) => vec![module.to_string(), owner.to_string(), script.name.clone()],
        None => vec![script.location.clone(), script.name.clone()],
    }
}

/// Searches the user map, then the locale map, then the display map.
///
/// Within a map every identifier is tried in order. The first binding found
/// anywhere in that order wins.
pub fn lookup_script_path(identifiers: &[String], maps: &GestureMaps) -> Option<Vec<String>> {
    maps.in_priority_order().find_map(|map| {
        identifiers
            .iter()
            .find_map(|identifier| map.first_script(identifier))
            .map(|binding| binding.script_path())
    })
}

/// Resolves the script path for a gesture, consulting the gesture maps only
/// when no script is bound.
pub fn resolve_script_path(
    script: Option<&ScriptRef>,
    identifiers: &[String],
    maps: &dyn GestureMapProvider,
) -> Option<Vec<String>> {
    match script {
        Some(script) => Some(bound_script_path(script)),
        None => lookup_script_path(identifiers, &maps.gesture_maps()),
    }
}

/// Builds the `braille_input` payload for a gesture.
///
/// Returns `None` for gestures that are not braille gestures.
pub fn build_gesture_payload(gesture: &Gesture, maps: &dyn GestureMapProvider) -> Option<EventPayload> {
    let fields = gesture.braille_fields()?;
    let mut payload = EventPayload::new();

    for (key, value) in fields.attributes {
        if let Some(scalar) = value.as_scalar() {
            payload.insert(key, scalar);
        }
    }

    if let Some(path) = resolve_script_path(fields.script, fields.identifiers, maps) {
        payload.insert("scriptPath", Value::from(path));
    }

    if let Some(source) = fields.source {
        payload.insert_if_absent("source", Value::from(source));
    }
    if let Some(model) = fields.model {
        payload.insert_if_absent("model", Value::from(model));
    }
    match fields.id {
        Some(id) => {
            payload.insert_if_absent("id", Value::from(id));
        }
        None if !payload.contains("id") => {
            payload.insert_if_absent("identifiers", Value::from(fields.identifiers.to_vec()));
        }
        None => {}
    }
    if let Some(dots) = fields.dots {
        payload.insert_if_absent("dots", Value::from(dots));
    }
    if let Some(space) = fields.space {
        payload.insert_if_absent("space", Value::from(space));
    }
    if let Some(index) = fields.routing_index {
        payload.insert_if_absent("routingIndex", Value::from(index));
    }

    Some(payload)
}
