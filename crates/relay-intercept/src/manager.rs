//! Interceptor manager: lifecycle of every interceptor against one host.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use relay_core::AppResult;
use relay_core::config::InterceptConfig;

use crate::events::EventDispatcher;
use crate::host::Host;
use crate::input::InputInterceptor;
use crate::lifecycle::Interceptor;
use crate::output::OutputInterceptor;

/// Which hooks are currently installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InterceptStatus {
    /// Speech entry points are wrapped.
    pub speech_patched: bool,
    /// Display state hooks are installed.
    pub display_tracked: bool,
    /// Braille gestures are captured.
    pub braille_input_captured: bool,
}

/// Owns the output and input interceptors for one host and installs them
/// according to [`InterceptConfig`].
///
/// Dropping the manager unregisters everything.
#[derive(Debug)]
pub struct InterceptorManager {
    /// Which interceptors `register_all` installs.
    config: InterceptConfig,
    /// Dispatcher every interceptor publishes to.
    dispatcher: Arc<EventDispatcher>,
    /// Speech path.
    output: OutputInterceptor,
    /// Gesture and display path.
    input: InputInterceptor,
}

impl InterceptorManager {
    /// Creates a manager with its own dispatcher.
    pub fn new(host: Arc<Host>, config: InterceptConfig) -> Self {
        Self::with_dispatcher(host, Arc::new(EventDispatcher::new()), config)
    }

    /// Creates a manager publishing to an existing dispatcher.
    pub fn with_dispatcher(
        host: Arc<Host>,
        dispatcher: Arc<EventDispatcher>,
        config: InterceptConfig,
    ) -> Self {
        Self {
            output: OutputInterceptor::new(host.clone(), dispatcher.clone()),
            input: InputInterceptor::new(host, dispatcher.clone()),
            config,
            dispatcher,
        }
    }

    /// Installs the interceptors enabled in the configuration.
    pub fn register_all(&self) -> AppResult<()> {
        if self.config.patch_speech {
            self.output.register()?;
        }
        if self.config.track_display {
            self.input.register()?;
        }
        if self.config.capture_braille_input {
            self.input.register_braille_input();
        }

        info!(
            patch_speech = self.config.patch_speech,
            track_display = self.config.track_display,
            capture_braille_input = self.config.capture_braille_input,
            "Interceptors registered"
        );
        Ok(())
    }

    /// Removes every installed hook, restoring the host.
    ///
    /// A failing interceptor is logged and the remaining ones are still
    /// unregistered.
    pub fn unregister_all(&self) {
        let interceptors: [&dyn Interceptor; 2] = [&self.output, &self.input];

        for interceptor in interceptors {
            if let Err(e) = interceptor.unregister() {
                error!(
                    interceptor = interceptor.name(),
                    error = %e,
                    "Error unregistering interceptor"
                );
            }
        }

        info!("All interceptors unregistered");
    }

    /// Returns which hooks are installed.
    pub fn status(&self) -> InterceptStatus {
        InterceptStatus {
            speech_patched: self.output.is_patched(),
            display_tracked: self.input.display().is_registered(),
            braille_input_captured: self.input.is_capturing_braille_input(),
        }
    }

    /// Returns the dispatcher for subscribing.
    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    /// Returns the speech interceptor.
    pub fn output(&self) -> &OutputInterceptor {
        &self.output
    }

    /// Returns the gesture and display interceptor.
    pub fn input(&self) -> &InputInterceptor {
        &self.input
    }

    /// Returns the configuration in effect.
    pub fn config(&self) -> &InterceptConfig {
        &self.config
    }
}

impl Drop for InterceptorManager {
    fn drop(&mut self) {
        let status = self.status();
        if status != InterceptStatus::default() {
            self.unregister_all();
        }
    }
}
