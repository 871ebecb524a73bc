//! Rebindable host entry points.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// A shareable function value whose identity can be compared.
///
/// Identity matters for restoring: unpatching must re-install the very
/// same callable that was captured, not an equivalent copy.
pub trait SharedFn: Clone + Send + Sync {
    /// Returns whether both values are the same allocation.
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized + Send + Sync> SharedFn for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

/// A host-owned function slot the host calls through, such as the speech
/// manager's `speak`.
///
/// The host always invokes whatever is currently installed, so installing a
/// wrapper intercepts every subsequent call.
pub struct EntryPoint<F> {
    /// Entry point name used in diagnostics.
    name: &'static str,
    /// Currently installed implementation.
    current: RwLock<F>,
}

impl<F: SharedFn> EntryPoint<F> {
    /// Creates an entry point bound to its initial implementation.
    pub fn new(name: &'static str, implementation: F) -> Self {
        Self {
            name,
            current: RwLock::new(implementation),
        }
    }

    /// Returns the entry point name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the installed implementation.
    ///
    /// Callers invoke the returned value after the lock is released, so an
    /// implementation may itself read or rebind entry points.
    pub fn current(&self) -> F {
        self.current.read().clone()
    }

    /// Installs a new implementation and returns the previous one.
    pub fn install(&self, implementation: F) -> F {
        std::mem::replace(&mut *self.current.write(), implementation)
    }

    /// Returns whether `implementation` is the one currently installed.
    pub fn holds(&self, implementation: &F) -> bool {
        self.current.read().same(implementation)
    }
}

impl<F> fmt::Debug for EntryPoint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
