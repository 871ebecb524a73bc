//! Interception lifecycle: idempotent install/remove of host hooks.
//!
//! Every hook an interceptor owns lives in a [`HandleSlot`]. An empty slot
//! means "not installed": installing into a filled slot and removing from
//! an empty slot are both no-ops.

use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, warn};

use relay_core::AppResult;

use crate::host::entry_point::{EntryPoint, SharedFn};

/// A component that hooks into the host.
pub trait Interceptor: Send + Sync + fmt::Debug {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Installs every hook this component installs by default. Idempotent.
    fn register(&self) -> AppResult<()>;

    /// Removes every hook this component owns, restoring the host. Idempotent.
    fn unregister(&self) -> AppResult<()>;

    /// Returns whether any hook owned by this component is installed.
    fn is_registered(&self) -> bool;
}

/// One active patch of a host entry point.
///
/// Owns the callable that was installed before the patch, and remembers
/// which replacement the patch installed.
pub struct InterceptionHandle<F> {
    original: F,
    replacement: F,
}

impl<F: SharedFn> InterceptionHandle<F> {
    /// Records a patch.
    pub fn new(original: F, replacement: F) -> Self {
        Self {
            original,
            replacement,
        }
    }

    /// The callable that was installed before the patch.
    pub fn original(&self) -> &F {
        &self.original
    }

    /// The callable the patch installed.
    pub fn replacement(&self) -> &F {
        &self.replacement
    }

    /// Releases the original for re-installation.
    pub fn into_original(self) -> F {
        self.original
    }
}

impl<F> fmt::Debug for InterceptionHandle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptionHandle").finish_non_exhaustive()
    }
}

/// Holds at most one installed hook.
pub struct HandleSlot<T> {
    /// Slot name used in diagnostics.
    label: &'static str,
    /// The installed hook, if any.
    inner: Mutex<Option<T>>,
}

/// Slot for a patched entry point.
pub type PatchSlot<F> = HandleSlot<InterceptionHandle<F>>;

impl<T> HandleSlot<T> {
    /// Creates an empty slot.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            inner: Mutex::new(None),
        }
    }

    /// Returns the slot name.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns whether a hook is installed.
    pub fn is_filled(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Runs `install` and stores its result, unless the slot is already
    /// filled. Returns whether `install` ran.
    pub fn fill_with(&self, install: impl FnOnce() -> T) -> bool {
        let mut inner = self.inner.lock();
        if inner.is_some() {
            debug!(slot = self.label, "Hook already installed, skipping");
            return false;
        }
        *inner = Some(install());
        true
    }

    /// Empties the slot, returning the installed hook.
    pub fn take(&self) -> Option<T> {
        self.inner.lock().take()
    }
}

impl<F: SharedFn> HandleSlot<InterceptionHandle<F>> {
    /// Wraps the entry point's current implementation with `wrap` and
    /// installs the result. No-op if this slot already holds a patch.
    pub fn patch(&self, entry: &EntryPoint<F>, wrap: impl FnOnce(F) -> F) -> bool {
        self.fill_with(|| {
            let original = entry.current();
            let replacement = wrap(original.clone());
            entry.install(replacement.clone());
            debug!(slot = self.label, entry_point = entry.name(), "Entry point patched");
            InterceptionHandle::new(original, replacement)
        })
    }

    /// Re-installs the captured original. No-op if nothing is patched.
    pub fn unpatch(&self, entry: &EntryPoint<F>) -> bool {
        let Some(handle) = self.take() else {
            return false;
        };

        if !entry.holds(handle.replacement()) {
            warn!(
                slot = self.label,
                entry_point = entry.name(),
                "Entry point was re-patched by someone else; restoring original anyway"
            );
        }

        entry.install(handle.into_original());
        debug!(slot = self.label, entry_point = entry.name(), "Entry point restored");
        true
    }
}

impl<T> fmt::Debug for HandleSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleSlot")
            .field("label", &self.label)
            .field("filled", &self.is_filled())
            .finish()
    }
}
