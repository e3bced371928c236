//! Style Primitive - Stylesheets bound to a consumer's lifetime.
//!
//! [`use_style`] runs the consumer's options inside an effect. Each run feeds
//! a [`StyleHook`], so a signal change only re-activates the sheet when the
//! options fingerprint actually changed.
//!
//! [`style`] is the component form: it activates the sheet, renders a single
//! child unchanged, and tears both down in reverse order.
//!
//! # Example
//!
//! ```ignore
//! use spark_signals::signal;
//! use spark_style::{use_style, StyleOptions, StyleOptionsProp, StyleSheet};
//!
//! let dark = signal(false);
//! let dark_for_style = dark.clone();
//!
//! let cleanup = use_style(StyleOptionsProp::getter(move || {
//!     let css = if dark_for_style.get() {
//!         "body { background: black }"
//!     } else {
//!         "body { background: white }"
//!     };
//!     StyleOptions::new(StyleSheet::global(css))
//! }))?;
//!
//! dark.set(true); // white sheet removed, black sheet injected
//!
//! cleanup(); // black sheet removed (if no one else uses it)
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, trace};
use spark_signals::{effect, untrack};

use crate::engine::{use_style_context, StyleContext};
use crate::error::StyleError;
use crate::lifecycle::StyleHook;

use super::types::{Cleanup, StyleOptionsProp, StyleProps};

// =============================================================================
// use_style
// =============================================================================

/// Bind a stylesheet to the calling consumer, using the thread's ambient context.
///
/// The first evaluation happens before this returns and its error, if any, is
/// returned. Failures on later re-runs and on cleanup are logged.
pub fn use_style(options: impl Into<StyleOptionsProp>) -> Result<Cleanup, StyleError> {
    let context = use_style_context()?;
    use_style_in(&context, options)
}

/// [`use_style`] with an explicit context.
///
/// Safe to call from inside another effect or a `batch`: the first
/// activation does not wait for the scheduler, and reading the options does
/// not subscribe the enclosing effect.
pub fn use_style_in(
    context: &StyleContext,
    options: impl Into<StyleOptionsProp>,
) -> Result<Cleanup, StyleError> {
    let options = options.into();
    let hook = Rc::new(RefCell::new(StyleHook::new(context.clone())));

    // Activate now, outside any enclosing effect's tracking
    untrack(|| {
        let current = options.get();
        hook.borrow_mut().evaluate(&current)
    })?;

    // The effect's first run sees the same fingerprint and only subscribes
    let hook_for_effect = hook.clone();
    let stop = effect(move || {
        let current = options.get();
        let result = hook_for_effect.borrow_mut().evaluate(&current);

        match result {
            Ok(transition) => {
                trace!(
                    target: "spark_style::primitives",
                    "{}: {transition:?}",
                    current.sheet.id()
                );
            }
            Err(err) => {
                error!(
                    target: "spark_style::primitives",
                    "failed to update sheet {}: {err}",
                    current.sheet.id()
                );
            }
        }
    });

    Ok(Box::new(move || {
        stop();
        let result = hook.borrow_mut().unmount();
        if let Err(err) = result {
            error!(target: "spark_style::primitives", "failed to remove sheet on unmount: {err}");
        }
    }))
}

// =============================================================================
// style
// =============================================================================

/// Passthrough component: activates a stylesheet, renders `child` unchanged.
///
/// The returned cleanup runs the child's cleanup first, then releases the sheet.
pub fn style(props: StyleProps) -> Result<Cleanup, StyleError> {
    let context = use_style_context()?;
    style_in(&context, props)
}

/// [`style`] with an explicit context.
pub fn style_in(context: &StyleContext, props: StyleProps) -> Result<Cleanup, StyleError> {
    let StyleProps { options, child } = props;

    let style_cleanup = use_style_in(context, options)?;
    let child_cleanup = child.map(|render| render());

    Ok(Box::new(move || {
        if let Some(cleanup) = child_cleanup {
            cleanup();
        }
        style_cleanup();
    }))
}

// =============================================================================
// Tests
// =============================================================================
