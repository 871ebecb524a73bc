//! Subscriber traits for receiving relayed events.

use std::sync::Arc;

use relay_core::AppResult;

use super::definitions::Event;

/// Receives events published on the topics it is subscribed to.
///
/// A returned error is logged by the dispatcher and never reaches the
/// publisher; the remaining subscribers still run.
pub trait Subscriber: Send + Sync + std::fmt::Debug {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Handles one event.
    fn on_event(&self, event: &Event) -> AppResult<()>;
}

/// A closure-based subscriber for quick registration.
pub struct ClosureSubscriber {
    /// Subscriber name.
    name: String,
    /// Handler function.
    handler: Box<dyn Fn(&Event) -> AppResult<()> + Send + Sync>,
}

impl std::fmt::Debug for ClosureSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureSubscriber")
            .field("name", &self.name)
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureSubscriber {
    /// Creates a new closure-based subscriber.
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&Event) -> AppResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            handler: Box::new(handler),
        }
    }

    /// Creates a closure-based subscriber ready for registration.
    pub fn shared<F>(name: &str, handler: F) -> Arc<dyn Subscriber>
    where
        F: Fn(&Event) -> AppResult<()> + Send + Sync + 'static,
    {
        Arc::new(Self::new(name, handler))
    }
}

impl Subscriber for ClosureSubscriber {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, event: &Event) -> AppResult<()> {
        (self.handler)(event)
    }
}
