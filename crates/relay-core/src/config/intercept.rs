//! Interception configuration.

use serde::{Deserialize, Serialize};

/// Selects which host entry points the interceptor manager hooks when it
/// registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptConfig {
    /// Wrap the speech emission and pause entry points.
    #[serde(default = "default_true")]
    pub patch_speech: bool,
    /// Publish braille display and display-size changes.
    #[serde(default = "default_true")]
    pub track_display: bool,
    /// Consume braille gestures instead of letting the host execute them.
    /// Opt-in: a registered gesture hook suppresses local command execution.
    #[serde(default)]
    pub capture_braille_input: bool,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            patch_speech: true,
            track_display: true,
            capture_braille_input: false,
        }
    }
}

fn default_true() -> bool {
    true
}
