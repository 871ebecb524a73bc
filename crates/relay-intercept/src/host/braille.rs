//! Braille display state notifications.

use serde::{Deserialize, Serialize};

use super::extension::Extension;

/// Identity of the active braille display driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    /// Driver name, e.g. `freedomScientific`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Number of braille cells.
    pub num_cells: usize,
}

impl DisplayInfo {
    /// Creates a display description.
    pub fn new(name: &str, description: &str, num_cells: usize) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            num_cells,
        }
    }
}

/// Notification sources for braille display changes.
#[derive(Debug)]
pub struct BrailleNotifications {
    /// Fired when a different display driver becomes active.
    pub display_changed: Extension<DisplayInfo>,
    /// Fired with the new cell count when the display size changes.
    pub display_size_changed: Extension<usize>,
}

impl BrailleNotifications {
    /// Creates notification sources with no handlers.
    pub fn new() -> Self {
        Self {
            display_changed: Extension::new("display_changed"),
            display_size_changed: Extension::new("display_size_changed"),
        }
    }
}

impl Default for BrailleNotifications {
    fn default() -> Self {
        Self::new()
    }
}
