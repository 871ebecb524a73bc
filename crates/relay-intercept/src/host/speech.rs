//! Speech types and the speech entry points the host calls through.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use relay_core::AppResult;

use super::entry_point::EntryPoint;

/// Host speech emission: `speak(sequence, priority)`.
pub type SpeakFn = Arc<dyn Fn(&SpeechSequence, SpeechPriority) -> AppResult<()> + Send + Sync>;

/// Host speech pausing: `pause_speech(switch)`; `true` pauses, `false` resumes.
pub type PauseSpeechFn = Arc<dyn Fn(bool) -> AppResult<()> + Send + Sync>;

/// Urgency of a speech sequence relative to what is already queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechPriority {
    /// Queued after everything else.
    #[default]
    Normal,
    /// Spoken after the current utterance.
    Next,
    /// Interrupts current speech.
    Now,
}

impl SpeechPriority {
    /// Numeric value used on the wire.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Normal => 0,
            Self::Next => 1,
            Self::Now => 2,
        }
    }

    /// Parses a wire value.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Next),
            2 => Some(Self::Now),
            _ => None,
        }
    }
}

/// Non-text instruction embedded in a speech sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpeechCommand {
    /// Marks a position so the host can track reading progress.
    Index {
        /// Index value reported back by the synthesizer.
        index: i64,
    },
    /// A pause of the given length.
    Break {
        /// Pause length in milliseconds.
        time_ms: u32,
    },
    /// Relative pitch change.
    Pitch {
        /// Offset from the configured pitch.
        offset: i32,
    },
    /// Relative rate change.
    Rate {
        /// Offset from the configured rate.
        offset: i32,
    },
    /// Relative volume change.
    Volume {
        /// Offset from the configured volume.
        offset: i32,
    },
    /// Switches the synthesizer language; `None` returns to the default.
    LangChange {
        /// BCP 47 language tag.
        lang: Option<String>,
    },
    /// Spell the following text character by character.
    CharacterMode {
        /// Whether character mode is on.
        state: bool,
    },
    /// A tone instead of speech.
    Beep {
        /// Frequency in hertz.
        hz: f64,
        /// Duration in milliseconds.
        length_ms: u32,
    },
    /// Ends the current utterance.
    EndUtterance,
}

/// One element of a speech sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeechItem {
    /// Text to speak.
    Text(String),
    /// An embedded command.
    Command(SpeechCommand),
}

/// An ordered sequence of text and commands handed to the synthesizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeechSequence(pub Vec<SpeechItem>);

impl SpeechSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence holding a single text item.
    pub fn from_text(text: &str) -> Self {
        Self(vec![SpeechItem::Text(text.to_string())])
    }

    /// Appends text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.0.push(SpeechItem::Text(text.to_string()));
        self
    }

    /// Appends a command.
    pub fn with_command(mut self, command: SpeechCommand) -> Self {
        self.0.push(SpeechItem::Command(command));
        self
    }

    /// Returns the items.
    pub fn items(&self) -> &[SpeechItem] {
        &self.0
    }

    /// Concatenates the text items, separated by spaces.
    pub fn text(&self) -> String {
        self.0
            .iter()
            .filter_map(|item| match item {
                SpeechItem::Text(text) => Some(text.as_str()),
                SpeechItem::Command(_) => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence has no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The host's speech entry points.
pub struct SpeechEntryPoints {
    /// `speech manager.speak`.
    pub emit: EntryPoint<SpeakFn>,
    /// `pause_speech`.
    pub pause: EntryPoint<PauseSpeechFn>,
}

impl SpeechEntryPoints {
    /// Binds the entry points to the host's real implementations.
    pub fn new(speak: SpeakFn, pause_speech: PauseSpeechFn) -> Self {
        Self {
            emit: EntryPoint::new("speak", speak),
            pause: EntryPoint::new("pause_speech", pause_speech),
        }
    }

    /// Speaks through whatever implementation is installed.
    pub fn speak(&self, sequence: &SpeechSequence, priority: SpeechPriority) -> AppResult<()> {
        let speak = self.emit.current();
        speak(sequence, priority)
    }

    /// Pauses or resumes through whatever implementation is installed.
    pub fn pause_speech(&self, switch: bool) -> AppResult<()> {
        let pause = self.pause.current();
        pause(switch)
    }
}

impl fmt::Debug for SpeechEntryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechEntryPoints")
            .field("emit", &self.emit)
            .field("pause", &self.pause)
            .finish()
    }
}
