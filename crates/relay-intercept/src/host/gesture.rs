//! Input gestures as the host hands them to the execution decision point.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of a gesture instance attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string.
    Str(String),
    /// An integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// Anything else (lists, objects, driver handles).
    Other(Value),
}

impl AttributeValue {
    /// Returns the value as JSON when it is a string, integer, or boolean.
    pub fn as_scalar(&self) -> Option<Value> {
        match self {
            Self::Str(s) => Some(Value::from(s.as_str())),
            Self::Int(i) => Some(Value::from(*i)),
            Self::Bool(b) => Some(Value::from(*b)),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A script (command) already bound to a gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRef {
    /// Short script name, e.g. `braille_scrollForward` or `kb:upArrow`.
    pub name: String,
    /// Dotted location of the owner, e.g. `appModules.explorer.AppModule`.
    pub location: String,
}

impl ScriptRef {
    /// Creates a script reference.
    pub fn new(name: &str, location: &str) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
        }
    }
}

/// A gesture from the keys or routing buttons of a braille display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrailleDisplayGesture {
    /// Instance attributes in definition order.
    pub attributes: Vec<(String, AttributeValue)>,
    /// The bound script, if the host already resolved one.
    pub script: Option<ScriptRef>,
    /// Candidate identifiers, most specific first.
    pub identifiers: Vec<String>,
    /// Driver name that produced the gesture.
    pub source: Option<String>,
    /// Display model.
    pub model: Option<String>,
    /// Single key id, e.g. `routing` or `leftWizWheelUp+dot1`.
    pub id: Option<String>,
    /// Routing cell index for routing-key gestures.
    pub routing_index: Option<i64>,
    /// Dot bit mask, for displays with a braille keyboard.
    pub dots: Option<i64>,
    /// Whether the space bar was part of the chord.
    pub space: Option<bool>,
}

impl BrailleDisplayGesture {
    /// Creates a gesture from a driver with its candidate identifiers.
    pub fn new(source: &str, identifiers: &[&str]) -> Self {
        Self {
            source: Some(source.to_string()),
            identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Adds an instance attribute.
    pub fn with_attribute(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    /// Binds a script.
    pub fn with_script(mut self, script: ScriptRef) -> Self {
        self.script = Some(script);
        self
    }

    /// Sets the display model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Sets the key id.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Sets the routing index.
    pub fn with_routing_index(mut self, index: i64) -> Self {
        self.routing_index = Some(index);
        self
    }

    /// Sets the dot pattern of a chord typed on the display's keyboard.
    pub fn with_dots(mut self, dots: i64) -> Self {
        self.dots = Some(dots);
        self
    }

    /// Sets the space bar state of a chord.
    pub fn with_space(mut self, space: bool) -> Self {
        self.space = Some(space);
        self
    }
}

/// A gesture typed on a braille keyboard (dot patterns and space).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrailleInputGesture {
    /// Instance attributes in definition order.
    pub attributes: Vec<(String, AttributeValue)>,
    /// The bound script, if the host already resolved one.
    pub script: Option<ScriptRef>,
    /// Candidate identifiers, most specific first.
    pub identifiers: Vec<String>,
    /// Input source.
    pub source: Option<String>,
    /// Dot bit mask (dot 1 = bit 0).
    pub dots: Option<i64>,
    /// Whether the space bar was part of the chord.
    pub space: Option<bool>,
    /// Display model, when the keyboard belongs to a display.
    pub model: Option<String>,
    /// Single key id.
    pub id: Option<String>,
    /// Routing cell index.
    pub routing_index: Option<i64>,
}

impl BrailleInputGesture {
    /// Creates a chord gesture.
    pub fn new(dots: i64, space: bool, identifiers: &[&str]) -> Self {
        Self {
            dots: Some(dots),
            space: Some(space),
            identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Adds an instance attribute.
    pub fn with_attribute(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    /// Binds a script.
    pub fn with_script(mut self, script: ScriptRef) -> Self {
        self.script = Some(script);
        self
    }

    /// Sets the input source.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Sets the display model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Sets the key id.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Sets the routing index.
    pub fn with_routing_index(mut self, index: i64) -> Self {
        self.routing_index = Some(index);
        self
    }
}

/// Any other gesture (keyboard, mouse, touch). Never captured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OtherGesture {
    /// Gesture family, e.g. `keyboard`.
    pub kind: String,
    /// Candidate identifiers.
    pub identifiers: Vec<String>,
}

/// A gesture the host is about to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// From a braille display's keys.
    Display(BrailleDisplayGesture),
    /// From a braille keyboard chord.
    Input(BrailleInputGesture),
    /// From anything else.
    Other(OtherGesture),
}

/// Borrowed view over the fields shared by the braille gesture variants.
#[derive(Debug, Clone, Copy)]
pub struct BrailleFields<'a> {
    /// Instance attributes.
    pub attributes: &'a [(String, AttributeValue)],
    /// Bound script.
    pub script: Option<&'a ScriptRef>,
    /// Candidate identifiers.
    pub identifiers: &'a [String],
    /// Source driver.
    pub source: Option<&'a str>,
    /// Display model.
    pub model: Option<&'a str>,
    /// Key id.
    pub id: Option<&'a str>,
    /// Dot pattern.
    pub dots: Option<i64>,
    /// Space bar state.
    pub space: Option<bool>,
    /// Routing cell index.
    pub routing_index: Option<i64>,
}

impl Gesture {
    /// Short family name for diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Self::Display(_) => "braille_display",
            Self::Input(_) => "braille_input",
            Self::Other(other) => &other.kind,
        }
    }

    /// Candidate identifiers, most specific first.
    pub fn identifiers(&self) -> &[String] {
        match self {
            Self::Display(g) => &g.identifiers,
            Self::Input(g) => &g.identifiers,
            Self::Other(g) => &g.identifiers,
        }
    }

    /// Returns the braille fields, or `None` for gestures the relay does not
    /// capture.
    pub fn braille_fields(&self) -> Option<BrailleFields<'_>> {
        match self {
            Self::Display(g) => Some(BrailleFields {
                attributes: &g.attributes,
                script: g.script.as_ref(),
                identifiers: &g.identifiers,
                source: g.source.as_deref(),
                model: g.model.as_deref(),
                id: g.id.as_deref(),
                dots: g.dots,
                space: g.space,
                routing_index: g.routing_index,
            }),
            Self::Input(g) => Some(BrailleFields {
                attributes: &g.attributes,
                script: g.script.as_ref(),
                identifiers: &g.identifiers,
                source: g.source.as_deref(),
                model: g.model.as_deref(),
                id: g.id.as_deref(),
                dots: g.dots,
                space: g.space,
                routing_index: g.routing_index,
            }),
            Self::Other(_) => None,
        }
    }
}

impl From<BrailleDisplayGesture> for Gesture {
    fn from(gesture: BrailleDisplayGesture) -> Self {
        Self::Display(gesture)
    }
}

impl From<BrailleInputGesture> for Gesture {
    fn from(gesture: BrailleInputGesture) -> Self {
        Self::Input(gesture)
    }
}

impl From<OtherGesture> for Gesture {
    fn from(gesture: OtherGesture) -> Self {
        Self::Other(gesture)
    }
}
