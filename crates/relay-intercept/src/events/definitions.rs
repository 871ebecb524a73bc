//! Topic and payload definitions for relayed host events.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use relay_core::AppError;

/// The closed set of event categories the relay publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// The braille display or its size changed.
    SetDisplay,
    /// The host is about to speak a sequence.
    Speak,
    /// Speech was paused or resumed.
    PauseSpeech,
    /// A braille gesture was captured instead of executed.
    BrailleInput,
}

impl Topic {
    /// Every topic, in declaration order.
    pub const ALL: [Topic; 4] = [
        Topic::SetDisplay,
        Topic::Speak,
        Topic::PauseSpeech,
        Topic::BrailleInput,
    ];

    /// Returns the wire name of this topic.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetDisplay => "set_display",
            Self::Speak => "speak",
            Self::PauseSpeech => "pause_speech",
            Self::BrailleInput => "braille_input",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Topic {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown topic '{s}'")))
    }
}

/// Payload handed to subscribers: an insertion-ordered field map.
///
/// Field names follow the host's own naming (`speechSequence`,
/// `routingIndex`, `scriptPath`, ...) so a transport can forward them
/// without renaming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventPayload {
    fields: Map<String, Value>,
}

impl EventPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value.
    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a string value.
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with_value(key, Value::from(value))
    }

    /// Inserts an integer value.
    pub fn with_int(self, key: &str, value: i64) -> Self {
        self.with_value(key, Value::from(value))
    }

    /// Inserts a boolean value.
    pub fn with_bool(self, key: &str, value: bool) -> Self {
        self.with_value(key, Value::from(value))
    }

    /// Inserts a list of strings.
    pub fn with_strings(self, key: &str, values: &[String]) -> Self {
        self.with_value(key, Value::from(values.to_vec()))
    }

    /// Inserts or overwrites a field, keeping its original position when it
    /// already existed.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    /// Inserts a field only when it is not present yet. Returns whether the
    /// value was inserted.
    pub fn insert_if_absent(&mut self, key: &str, value: Value) -> bool {
        if self.fields.contains_key(key) {
            return false;
        }
        self.fields.insert(key.to_string(), value);
        true
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Gets a string value.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }

    /// Gets an i64 value.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(|v| v.as_i64())
    }

    /// Gets a bool value.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(|v| v.as_bool())
    }

    /// Gets a list of strings. Returns `None` if the field is missing or is
    /// not an array made only of strings.
    pub fn get_strings(&self, key: &str) -> Option<Vec<&str>> {
        self.fields
            .get(key)?
            .as_array()?
            .iter()
            .map(|v| v.as_str())
            .collect()
    }

    /// Returns whether the field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the payload as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// A published event as seen by subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event ID.
    pub id: Uuid,
    /// The topic the event was published on.
    pub topic: Topic,
    /// The event fields.
    pub payload: EventPayload,
    /// When the event was published.
    pub emitted_at: DateTime<Utc>,
}

impl Event {
    /// Wraps a payload for delivery.
    pub fn new(topic: Topic, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic,
            payload,
            emitted_at: Utc::now(),
        }
    }
}
