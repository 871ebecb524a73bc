//! Braille gesture capture.

use std::sync::Arc;

use tracing::{debug, info};

use relay_core::AppResult;

use crate::display::DisplayHooks;
use crate::events::{EventDispatcher, Topic};
use crate::host::{DecideHandler, Gesture, GestureMapProvider, Host};
use crate::lifecycle::{HandleSlot, Interceptor};

use super::extract::build_gesture_payload;

/// Relays braille display state and, when enabled, captures braille
/// gestures instead of letting the host execute them.
#[derive(Debug)]
pub struct InputInterceptor {
    host: Arc<Host>,
    dispatcher: Arc<EventDispatcher>,
    display: DisplayHooks,
    braille_input: HandleSlot<DecideHandler<Gesture>>,
}

impl InputInterceptor {
    /// Creates the interceptor without installing anything.
    pub fn new(host: Arc<Host>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            display: DisplayHooks::new(host.clone(), dispatcher.clone()),
            host,
            dispatcher,
            braille_input: HandleSlot::new("decide_execute_gesture"),
        }
    }

    /// Starts capturing braille gestures. No-op if already capturing.
    pub fn register_braille_input(&self) {
        let decider = &self.host.input.decide_execute_gesture;
        let installed = self.braille_input.fill_with(|| {
            let maps = self.host.input.gesture_maps.clone();
            let dispatcher = self.dispatcher.clone();
            let handler: DecideHandler<Gesture> =
                Arc::new(move |gesture: &Gesture| capture_gesture(gesture, maps.as_ref(), &dispatcher));
            decider.register(handler.clone());
            handler
        });

        if installed {
            info!("Braille input capture registered");
        }
    }

    /// Stops capturing braille gestures. No-op if not capturing.
    pub fn unregister_braille_input(&self) {
        if let Some(handler) = self.braille_input.take() {
            self.host.input.decide_execute_gesture.unregister(&handler);
            info!("Braille input capture unregistered");
        }
    }

    /// Returns whether braille gestures are being captured.
    pub fn is_capturing_braille_input(&self) -> bool {
        self.braille_input.is_filled()
    }

    /// Decides whether the host may execute `gesture`.
    ///
    /// Braille gestures are published as `braille_input` and suppressed;
    /// anything else proceeds.
    pub fn decide_execute_gesture(&self, gesture: &Gesture) -> bool {
        capture_gesture(gesture, self.host.input.gesture_maps.as_ref(), &self.dispatcher)
    }

    /// Returns the display state hooks.
    pub fn display(&self) -> &DisplayHooks {
        &self.display
    }
}

fn capture_gesture(
    gesture: &Gesture,
    maps: &dyn GestureMapProvider,
    dispatcher: &EventDispatcher,
) -> bool {
    let Some(payload) = build_gesture_payload(gesture, maps) else {
        return true;
    };

    debug!(
        kind = gesture.kind(),
        script_path = ?payload.get_strings("scriptPath"),
        "Captured braille gesture"
    );

    dispatcher.publish(Topic::BrailleInput, payload);
    false
}

impl Interceptor for InputInterceptor {
    fn name(&self) -> &str {
        "input"
    }

    fn register(&self) -> AppResult<()> {
        self.display.register()
    }

    fn unregister(&self) -> AppResult<()> {
        self.unregister_braille_input();
        self.display.unregister()
    }

    fn is_registered(&self) -> bool {
        self.display.is_registered() || self.is_capturing_braille_input()
    }
}

impl Drop for InputInterceptor {
    fn drop(&mut self) {
        self.unregister_braille_input();
    }
}
