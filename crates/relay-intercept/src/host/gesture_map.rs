//! Gesture maps: lookup from gesture identifiers to bound scripts.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A script a gesture map binds to an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptBinding {
    /// Module defining the owner, e.g. `globalCommands`.
    pub module: String,
    /// Owning class, e.g. `GlobalCommands`.
    pub owner: String,
    /// Script name without the `script_` prefix.
    pub command: String,
}

impl ScriptBinding {
    /// Creates a binding.
    pub fn new(module: &str, owner: &str, command: &str) -> Self {
        Self {
            module: module.to_string(),
            owner: owner.to_string(),
            command: command.to_string(),
        }
    }

    /// Returns `[module, owner, command]`.
    pub fn script_path(&self) -> Vec<String> {
        vec![
            self.module.clone(),
            self.owner.clone(),
            self.command.clone(),
        ]
    }
}

/// A source of identifier → script bindings.
pub trait GestureMap: Send + Sync + fmt::Debug {
    /// Returns every script bound to `identifier`, in map order.
    fn scripts_for_gesture(&self, identifier: &str) -> Vec<ScriptBinding>;

    /// Returns the first script bound to `identifier`.
    fn first_script(&self, identifier: &str) -> Option<ScriptBinding> {
        self.scripts_for_gesture(identifier).into_iter().next()
    }
}

/// Gesture map held in memory.
///
/// Identifiers are matched case-insensitively, ignoring surrounding
/// whitespace.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGestureMap {
    /// Normalized identifier → binding, in insertion order.
    bindings: Vec<(String, ScriptBinding)>,
}

impl InMemoryGestureMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an identifier to a script.
    pub fn add(&mut self, identifier: &str, binding: ScriptBinding) {
        self.bindings.push((normalize(identifier), binding));
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_binding(mut self, identifier: &str, binding: ScriptBinding) -> Self {
        self.add(identifier, binding);
        self
    }

    /// Removes every binding for an identifier. Returns how many were removed.
    pub fn remove(&mut self, identifier: &str) -> usize {
        let key = normalize(identifier);
        let before = self.bindings.len();
        self.bindings.retain(|(id, _)| *id != key);
        before - self.bindings.len()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the map has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl GestureMap for InMemoryGestureMap {
    fn scripts_for_gesture(&self, identifier: &str) -> Vec<ScriptBinding> {
        let key = normalize(identifier);
        self.bindings
            .iter()
            .filter(|(id, _)| *id == key)
            .map(|(_, binding)| binding.clone())
            .collect()
    }
}

fn normalize(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// The gesture maps consulted for unbound gestures.
#[derive(Debug, Clone)]
pub struct GestureMaps {
    /// The user's own customizations.
    pub user: Arc<dyn GestureMap>,
    /// Defaults for the system locale.
    pub locale: Arc<dyn GestureMap>,
    /// The active braille display driver's map, if it has one.
    pub display: Option<Arc<dyn GestureMap>>,
}

impl GestureMaps {
    /// Creates the map set without a display map.
    pub fn new(user: Arc<dyn GestureMap>, locale: Arc<dyn GestureMap>) -> Self {
        Self {
            user,
            locale,
            display: None,
        }
    }

    /// Sets the display driver's map.
    pub fn with_display(mut self, display: Arc<dyn GestureMap>) -> Self {
        self.display = Some(display);
        self
    }

    /// Maps in lookup priority order: user, locale, display.
    pub fn in_priority_order(&self) -> impl Iterator<Item = &Arc<dyn GestureMap>> {
        [Some(&self.user), Some(&self.locale), self.display.as_ref()]
            .into_iter()
            .flatten()
    }
}

/// Supplies the gesture maps in effect at the time of a lookup.
///
/// The display map changes with the active driver, so interceptors ask
/// for the maps per gesture instead of caching them.
pub trait GestureMapProvider: Send + Sync {
    /// Returns the current maps.
    fn gesture_maps(&self) -> GestureMaps;
}

impl GestureMapProvider for GestureMaps {
    fn gesture_maps(&self) -> GestureMaps {
        self.clone()
    }
}
