//! Speech output relay.
//!
//! Wraps the host's speech entry points so every utterance and every
//! pause/resume is published before the host acts on it.

use std::sync::Arc;

use tracing::{error, info};

use relay_core::AppResult;

use crate::events::{EventDispatcher, EventPayload, Topic};
use crate::host::{Host, PauseSpeechFn, SpeakFn, SpeechPriority, SpeechSequence};
use crate::lifecycle::{HandleSlot, Interceptor, PatchSlot};

/// Relays speech output to the dispatcher.
#[derive(Debug)]
pub struct OutputInterceptor {
    host: Arc<Host>,
    dispatcher: Arc<EventDispatcher>,
    speak: PatchSlot<SpeakFn>,
    pause: PatchSlot<PauseSpeechFn>,
}

impl OutputInterceptor {
    /// Creates the interceptor without patching anything.
    pub fn new(host: Arc<Host>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            host,
            dispatcher,
            speak: HandleSlot::new("speak"),
            pause: HandleSlot::new("pause_speech"),
        }
    }

    /// Wraps both speech entry points. No-op if already patched.
    pub fn patch_speech(&self) {
        if self.speak.is_filled() {
            return;
        }

        let speech = &self.host.speech;

        let dispatcher = self.dispatcher.clone();
        self.speak.patch(&speech.emit, move |original: SpeakFn| -> SpeakFn {
            Arc::new(
                move |sequence: &SpeechSequence, priority: SpeechPriority| -> AppResult<()> {
                    publish_speak(&dispatcher, sequence, priority);
                    original(sequence, priority)
                },
            )
        });

        let dispatcher = self.dispatcher.clone();
        self.pause.patch(&speech.pause, move |original: PauseSpeechFn| -> PauseSpeechFn {
            Arc::new(move |switch: bool| -> AppResult<()> {
                dispatcher.publish(
                    Topic::PauseSpeech,
                    EventPayload::new().with_bool("switch", switch),
                );
                original(switch)
            })
        });

        info!("Speech entry points patched");
    }

    /// Restores both original speech entry points. No-op if not patched.
    pub fn unpatch_speech(&self) {
        let speech = &self.host.speech;
        let restored_speak = self.speak.unpatch(&speech.emit);
        let restored_pause = self.pause.unpatch(&speech.pause);

        if restored_speak || restored_pause {
            info!("Speech entry points restored");
        }
    }

    /// Returns whether the speech entry points are currently wrapped.
    pub fn is_patched(&self) -> bool {
        self.speak.is_filled()
    }
}

fn publish_speak(dispatcher: &EventDispatcher, sequence: &SpeechSequence, priority: SpeechPriority) {
    match speak_payload(sequence, priority) {
        Ok(payload) => {
            dispatcher.publish(Topic::Speak, payload);
        }
        Err(e) => error!(error = %e, "Failed to serialize speech sequence, speak not relayed"),
    }
}

fn speak_payload(sequence: &SpeechSequence, priority: SpeechPriority) -> AppResult<EventPayload> {
    Ok(EventPayload::new()
        .with_value("speechSequence", serde_json::to_value(sequence)?)
        .with_int("priority", priority.as_i64()))
}

impl Interceptor for OutputInterceptor {
    fn name(&self) -> &str {
        "output"
    }

    fn register(&self) -> AppResult<()> {
        self.patch_speech();
        Ok(())
    }

    fn unregister(&self) -> AppResult<()> {
        self.unpatch_speech();
        Ok(())
    }

    fn is_registered(&self) -> bool {
        self.is_patched()
    }
}

impl Drop for OutputInterceptor {
    fn drop(&mut self) {
        self.unpatch_speech();
    }
}
