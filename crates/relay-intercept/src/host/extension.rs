//! Host extension points: notification sources and decision hooks.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Handler registered on an [`Extension`].
pub type Handler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Handler registered on a [`Decider`]. Returning `false` vetoes the action.
pub type DecideHandler<A> = Arc<dyn Fn(&A) -> bool + Send + Sync>;

/// A notification source the host fires when something changes.
///
/// Handlers are identified by allocation: registering the same handler
/// twice keeps one entry.
pub struct Extension<A> {
    /// Extension point name used in diagnostics.
    name: &'static str,
    /// Registered handlers in registration order.
    handlers: RwLock<Vec<Handler<A>>>,
}

impl<A> Extension<A> {
    /// Creates an extension point with no handlers.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Returns the extension point name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registers a handler. Returns `false` if it was already registered.
    pub fn register(&self, handler: Handler<A>) -> bool {
        let mut handlers = self.handlers.write();
        if handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return false;
        }
        handlers.push(handler);
        true
    }

    /// Unregisters a handler. Returns `false` if it was not registered.
    pub fn unregister(&self, handler: &Handler<A>) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| !Arc::ptr_eq(h, handler));
        handlers.len() < before
    }

    /// Returns whether the handler is registered.
    pub fn is_registered(&self, handler: &Handler<A>) -> bool {
        self.handlers.read().iter().any(|h| Arc::ptr_eq(h, handler))
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Calls every handler with `value`.
    pub fn notify(&self, value: &A) {
        let handlers = self.handlers.read().clone();
        for handler in &handlers {
            handler(value);
        }
    }
}

impl<A> fmt::Debug for Extension<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name)
            .field("handlers", &self.handler_count())
            .finish()
    }
}

/// A decision point the host consults before acting.
///
/// The action proceeds only if every handler agrees; the first `false`
/// short-circuits the remaining handlers.
pub struct Decider<A> {
    /// Decision point name used in diagnostics.
    name: &'static str,
    /// Registered handlers in registration order.
    handlers: RwLock<Vec<DecideHandler<A>>>,
}

impl<A> Decider<A> {
    /// Creates a decision point with no handlers.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Returns the decision point name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registers a handler. Returns `false` if it was already registered.
    pub fn register(&self, handler: DecideHandler<A>) -> bool {
        let mut handlers = self.handlers.write();
        if handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return false;
        }
        handlers.push(handler);
        true
    }

    /// Unregisters a handler. Returns `false` if it was not registered.
    pub fn unregister(&self, handler: &DecideHandler<A>) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| !Arc::ptr_eq(h, handler));
        handlers.len() < before
    }

    /// Returns whether the handler is registered.
    pub fn is_registered(&self, handler: &DecideHandler<A>) -> bool {
        self.handlers.read().iter().any(|h| Arc::ptr_eq(h, handler))
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Asks every handler in order; returns `false` at the first veto.
    pub fn decide(&self, value: &A) -> bool {
        let handlers = self.handlers.read().clone();
        handlers.iter().all(|handler| handler(value))
    }
}

impl<A> fmt::Debug for Decider<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decider")
            .field("name", &self.name)
            .field("handlers", &self.handler_count())
            .finish()
    }
}
