//! Rendering context
//!
//! A [`Context`] owns the binding layer and is threaded explicitly through
//! every constructor. Wrappers keep a clone so teardown can reach the arena
//! without any global state. The context is an `Rc`, so neither it nor any
//! wrapper holding it can leave the thread that created it.

use std::cell::RefCell;
use std::rc::Rc;

use super::{NativeLibrary, ResourceStats};
use crate::config::{MediaConfig, StaleEntryPolicy};
use crate::error::ResourceKind;

/// Handle to the binding layer and its rendering context
#[derive(Clone)]
pub struct Context {
    library: Rc<RefCell<NativeLibrary>>,
}

impl Context {
    /// Create a context with the default configuration
    pub fn new() -> Self {
        Self::with_config(MediaConfig::default())
    }

    /// Create a context with an explicit configuration
    pub fn with_config(config: MediaConfig) -> Self {
        Self {
            library: Rc::new(RefCell::new(NativeLibrary::new(config))),
        }
    }

    /// Copy of the configuration this context was created with
    pub fn config(&self) -> MediaConfig {
        self.library.borrow().config().clone()
    }

    pub(crate) fn stale_entry_policy(&self) -> StaleEntryPolicy {
        self.library.borrow().config().cache.stale_entries
    }

    /// Whether an activation scope is currently open
    pub fn is_active(&self) -> bool {
        self.library.borrow().is_active()
    }

    /// Creation/destruction counters for `kind`
    pub fn stats(&self, kind: ResourceKind) -> ResourceStats {
        self.library.borrow().stats(kind)
    }

    /// Whether two handles refer to the same context
    pub fn same_context(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.library, &other.library)
    }

    /// Run `f` against the binding layer without activating the context
    pub(crate) fn with_library<T>(&self, f: impl FnOnce(&mut NativeLibrary) -> T) -> T {
        f(&mut self.library.borrow_mut())
    }

    /// Run `f` inside an activation scope
    ///
    /// The scope is pushed before `f` runs and popped when it returns or
    /// unwinds, so the context is never left active behind the caller.
    pub(crate) fn with_active<T>(&self, f: impl FnOnce(&mut NativeLibrary) -> T) -> T {
        let mut library = self.library.borrow_mut();
        let mut scope = ActiveScope::enter(&mut library);
        f(scope.library())
    }

    /// Like [`with_library`](Self::with_library)/[`with_active`](Self::with_active),
    /// but yields `None` instead of panicking when the context is already borrowed.
    ///
    /// Used from `Drop`, which may run while unwinding out of a context call.
    pub(crate) fn try_with<T>(&self, activate: bool, f: impl FnOnce(&mut NativeLibrary) -> T) -> Option<T> {
        let mut library = self.library.try_borrow_mut().ok()?;
        if activate {
            let mut scope = ActiveScope::enter(&mut library);
            Some(f(scope.library()))
        } else {
            Some(f(&mut library))
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("handles", &Rc::strong_count(&self.library))
            .finish_non_exhaustive()
    }
}

struct ActiveScope<'a> {
    library: &'a mut NativeLibrary,
}

impl<'a> ActiveScope<'a> {
    fn enter(library: &'a mut NativeLibrary) -> Self {
        library.push_active();
        Self { library }
    }

    fn library(&mut self) -> &mut NativeLibrary {
        &mut *self.library
    }
}

impl Drop for ActiveScope<'_> {
    fn drop(&mut self) {
        self.library.pop_active();
    }
}
