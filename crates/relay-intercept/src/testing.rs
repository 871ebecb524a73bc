//! Recording host stubs for tests.
//!
//! Enabled for this crate's unit tests and, through the `test-utils`
//! feature, for downstream integration tests.

use std::sync::Arc;

use parking_lot::Mutex;

use relay_core::{AppError, AppResult};

use crate::events::{Event, Subscriber, Topic};
use crate::host::{
    GestureMaps, Host, InMemoryGestureMap, PauseSpeechFn, SpeakFn, SpeechEntryPoints,
    SpeechPriority, SpeechSequence,
};

/// Shared log of what happened, in order, across stubs.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Mutex<Vec<String>>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Appends an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// Returns every entry so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

/// One call to the stub speech engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechCall {
    pub sequence: SpeechSequence,
    pub priority: SpeechPriority,
}

/// Speech engine stub that records what it is asked to do.
///
/// Timeline entries are `speak:<text>` and `pause:<switch>`.
#[derive(Debug, Default)]
pub struct RecordingSpeech {
    calls: Mutex<Vec<SpeechCall>>,
    pauses: Mutex<Vec<bool>>,
    failure: Mutex<Option<String>>,
    timeline: Option<Arc<Timeline>>,
}

impl RecordingSpeech {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_timeline(timeline: Arc<Timeline>) -> Arc<Self> {
        Arc::new(Self {
            timeline: Some(timeline),
            ..Self::default()
        })
    }

    /// Makes every later `speak` call fail with a host error.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }

    /// A fresh speak implementation backed by this stub.
    pub fn speak_fn(self: &Arc<Self>) -> SpeakFn {
        let this = self.clone();
        Arc::new(move |sequence: &SpeechSequence, priority: SpeechPriority| {
            this.record_speak(sequence, priority)
        })
    }

    /// A fresh pause implementation backed by this stub.
    pub fn pause_fn(self: &Arc<Self>) -> PauseSpeechFn {
        let this = self.clone();
        Arc::new(move |switch: bool| -> AppResult<()> {
            this.record_pause(switch);
            Ok(())
        })
    }

    /// Speech entry points bound to this stub.
    pub fn entry_points(self: &Arc<Self>) -> SpeechEntryPoints {
        SpeechEntryPoints::new(self.speak_fn(), self.pause_fn())
    }

    pub fn calls(&self) -> Vec<SpeechCall> {
        self.calls.lock().clone()
    }

    pub fn pauses(&self) -> Vec<bool> {
        self.pauses.lock().clone()
    }

    fn record_speak(&self, sequence: &SpeechSequence, priority: SpeechPriority) -> AppResult<()> {
        if let Some(timeline) = &self.timeline {
            timeline.push(format!("speak:{}", sequence.text()));
        }
        self.calls.lock().push(SpeechCall {
            sequence: sequence.clone(),
            priority,
        });

        match self.failure.lock().as_ref() {
            Some(message) => Err(AppError::host(message.clone())),
            None => Ok(()),
        }
    }

    fn record_pause(&self, switch: bool) {
        if let Some(timeline) = &self.timeline {
            timeline.push(format!("pause:{switch}"));
        }
        self.pauses.lock().push(switch);
    }
}

/// Subscriber that keeps every event it receives.
///
/// Timeline entries are `event:<topic>`.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<Event>>,
    timeline: Option<Arc<Timeline>>,
}

impl EventRecorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_timeline(timeline: Arc<Timeline>) -> Arc<Self> {
        Arc::new(Self {
            events: Mutex::new(Vec::new()),
            timeline: Some(timeline),
        })
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Events received for one topic.
    pub fn events_for(&self, topic: Topic) -> Vec<Event> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.topic == topic)
            .cloned()
            .collect()
    }

    pub fn topics(&self) -> Vec<Topic> {
        self.events.lock().iter().map(|event| event.topic).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl Subscriber for EventRecorder {
    fn name(&self) -> &str {
        "event_recorder"
    }

    fn on_event(&self, event: &Event) -> AppResult<()> {
        if let Some(timeline) = &self.timeline {
            timeline.push(format!("event:{}", event.topic));
        }
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// Empty user and locale maps.
pub fn empty_gesture_maps() -> GestureMaps {
    GestureMaps::new(
        Arc::new(InMemoryGestureMap::new()),
        Arc::new(InMemoryGestureMap::new()),
    )
}

/// Host whose speech goes to `speech` and whose gesture maps are empty.
pub fn host_with(speech: &Arc<RecordingSpeech>) -> Arc<Host> {
    host_with_maps(speech, empty_gesture_maps())
}

/// Host whose speech goes to `speech`, with the given gesture maps.
pub fn host_with_maps(speech: &Arc<RecordingSpeech>, maps: GestureMaps) -> Arc<Host> {
    Arc::new(Host::new(speech.entry_points(), Arc::new(maps)))
}
