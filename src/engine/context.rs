//! Style Context - The counter/host pair every consumer works against.
//!
//! A [`StyleContext`] is built once per document and handed to consumers.
//! Clones share the same counter and host, so every consumer of one context
//! coalesces against the same counts.
//!
//! For the ambient `use_style` API a context can be provided per thread,
//! the same way the component registry keeps its state in thread-locals.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::StyleError;
use crate::host::StyleSheetHost;

use super::registry::ReferenceCounter;

/// Shared reference counter plus the host that performs injection/removal.
#[derive(Clone)]
pub struct StyleContext {
    counter: ReferenceCounter,
    host: Rc<dyn StyleSheetHost>,
}

impl StyleContext {
    /// Create a context with a fresh counter.
    pub fn new(host: Rc<dyn StyleSheetHost>) -> Self {
        Self::with_counter(host, ReferenceCounter::new())
    }

    /// Create a context around an existing counter.
    pub fn with_counter(host: Rc<dyn StyleSheetHost>, counter: ReferenceCounter) -> Self {
        Self { counter, host }
    }

    pub fn counter(&self) -> &ReferenceCounter {
        &self.counter
    }

    pub fn host(&self) -> &dyn StyleSheetHost {
        self.host.as_ref()
    }
}

impl fmt::Debug for StyleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleContext")
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Ambient Context
// =============================================================================

thread_local! {
    /// Context used by `use_style` and `style`.
    static CURRENT_CONTEXT: RefCell<Option<StyleContext>> = const { RefCell::new(None) };
}

/// Install `context` as this thread's ambient context, replacing any previous one.
pub fn provide_style_context(context: StyleContext) {
    CURRENT_CONTEXT.with(|current| {
        *current.borrow_mut() = Some(context);
    })
}

/// The ambient context, if one was provided.
pub fn style_context() -> Option<StyleContext> {
    CURRENT_CONTEXT.with(|current| current.borrow().clone())
}

/// The ambient context, or [`StyleError::MissingContext`].
pub fn use_style_context() -> Result<StyleContext, StyleError> {
    style_context().ok_or(StyleError::MissingContext)
}

/// Remove the ambient context (for testing).
pub fn reset_style_context() {
    CURRENT_CONTEXT.with(|current| {
        *current.borrow_mut() = None;
    })
}
