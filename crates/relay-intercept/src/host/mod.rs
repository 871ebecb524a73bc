//! Host capability model: entry points, notification sources and
//! lookup tables the interceptors hook into.
//!
//! The host owns every slot here and calls through them; interceptors only
//! install and remove their own callables.

pub mod braille;
pub mod entry_point;
pub mod extension;
pub mod gesture;
pub mod gesture_map;
pub mod speech;

use std::fmt;
use std::sync::Arc;

pub use braille::{BrailleNotifications, DisplayInfo};
pub use entry_point::{EntryPoint, SharedFn};
pub use extension::{DecideHandler, Decider, Extension, Handler};
pub use gesture::{
    AttributeValue, BrailleDisplayGesture, BrailleFields, BrailleInputGesture, Gesture,
    OtherGesture, ScriptRef,
};
pub use gesture_map::{
    GestureMap, GestureMapProvider, GestureMaps, InMemoryGestureMap, ScriptBinding,
};
pub use speech::{
    PauseSpeechFn, SpeakFn, SpeechCommand, SpeechEntryPoints, SpeechItem, SpeechPriority,
    SpeechSequence,
};

/// The host's input pipeline.
pub struct InputManager {
    /// Consulted before any gesture executes.
    pub decide_execute_gesture: Decider<Gesture>,
    /// User, locale and display gesture maps.
    pub gesture_maps: Arc<dyn GestureMapProvider>,
}

impl InputManager {
    /// Creates the input pipeline over the given maps.
    pub fn new(gesture_maps: Arc<dyn GestureMapProvider>) -> Self {
        Self {
            decide_execute_gesture: Decider::new("decide_execute_gesture"),
            gesture_maps,
        }
    }

    /// Returns whether the host should execute `gesture`.
    pub fn execute_gesture(&self, gesture: &Gesture) -> bool {
        self.decide_execute_gesture.decide(gesture)
    }
}

impl fmt::Debug for InputManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputManager")
            .field("decide_execute_gesture", &self.decide_execute_gesture)
            .finish_non_exhaustive()
    }
}

/// Everything the interceptors need from the host.
#[derive(Debug)]
pub struct Host {
    /// Speech entry points.
    pub speech: SpeechEntryPoints,
    /// Braille display notifications.
    pub braille: BrailleNotifications,
    /// Input pipeline.
    pub input: InputManager,
}

impl Host {
    /// Assembles a host from its speech entry points and gesture maps.
    pub fn new(speech: SpeechEntryPoints, gesture_maps: Arc<dyn GestureMapProvider>) -> Self {
        Self {
            speech,
            braille: BrailleNotifications::new(),
            input: InputManager::new(gesture_maps),
        }
    }
}
