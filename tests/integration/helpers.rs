//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use relay_core::config::InterceptConfig;
use relay_intercept::events::EventDispatcher;
use relay_intercept::host::{
    GestureMap, GestureMaps, Host, InMemoryGestureMap, PauseSpeechFn, ScriptBinding, SpeakFn,
};
use relay_intercept::manager::InterceptorManager;
use relay_intercept::testing::{EventRecorder, RecordingSpeech, Timeline, host_with_maps};

/// Test relay context
pub struct TestRelay {
    /// The host under interception
    pub host: Arc<Host>,
    /// Speech engine stub behind the host
    pub speech: Arc<RecordingSpeech>,
    /// Order of speech calls and delivered events
    pub timeline: Arc<Timeline>,
    /// Dispatcher shared with the manager
    pub dispatcher: Arc<EventDispatcher>,
    /// Subscribed to every topic
    pub recorder: Arc<EventRecorder>,
    /// Original speak implementation, before any patch
    pub original_speak: SpeakFn,
    /// Original pause implementation, before any patch
    pub original_pause: PauseSpeechFn,
}

impl TestRelay {
    /// Create a relay over a host with empty gesture maps
    pub fn new() -> Self {
        Self::with_maps(empty_maps())
    }

    /// Create a relay over a host with the given gesture maps
    pub fn with_maps(maps: GestureMaps) -> Self {
        let timeline = Timeline::new();
        let speech = RecordingSpeech::with_timeline(timeline.clone());
        let host = host_with_maps(&speech, maps);
        let dispatcher = Arc::new(EventDispatcher::new());
        let recorder = EventRecorder::with_timeline(timeline.clone());
        dispatcher.subscribe_all(recorder.clone());

        Self {
            original_speak: host.speech.emit.current(),
            original_pause: host.speech.pause.current(),
            host,
            speech,
            timeline,
            dispatcher,
            recorder,
        }
    }

    /// Manager publishing to this relay's dispatcher
    pub fn manager(&self, config: InterceptConfig) -> InterceptorManager {
        InterceptorManager::with_dispatcher(self.host.clone(), self.dispatcher.clone(), config)
    }

    /// Whether both speech entry points hold their original implementations
    pub fn speech_restored(&self) -> bool {
        self.host.speech.emit.holds(&self.original_speak)
            && self.host.speech.pause.holds(&self.original_pause)
    }
}

/// Configuration enabling every interceptor
pub fn capture_all() -> InterceptConfig {
    InterceptConfig {
        patch_speech: true,
        track_display: true,
        capture_braille_input: true,
    }
}

/// Empty user and locale maps
pub fn empty_maps() -> GestureMaps {
    GestureMaps::new(
        Arc::new(InMemoryGestureMap::new()),
        Arc::new(InMemoryGestureMap::new()),
    )
}

/// Map with a single binding
pub fn map_with(identifier: &str, module: &str, owner: &str, command: &str) -> Arc<dyn GestureMap> {
    Arc::new(
        InMemoryGestureMap::new()
            .with_binding(identifier, ScriptBinding::new(module, owner, command)),
    )
}
