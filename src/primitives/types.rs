//! Primitive types - Props and cleanup.
//!
//! Style options can be given as a static value or as a getter. A getter is
//! called inside a reactive effect, so every signal it reads becomes a
//! dependency of the consumer.

use std::rc::Rc;

use crate::sheet::{StyleOptions, StyleSheet};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by primitives.
///
/// Call this to unmount the consumer and release its stylesheet.
pub type Cleanup = Box<dyn FnOnce()>;

/// Renders a child and returns its cleanup.
pub type ChildRenderer = Box<dyn FnOnce() -> Cleanup>;

// =============================================================================
// Options Prop
// =============================================================================

/// Style options, either fixed or read through a getter.
#[derive(Clone)]
pub enum StyleOptionsProp {
    /// Fixed options (never re-evaluated).
    Static(StyleOptions),
    /// Getter called on every effect run (reads create dependencies).
    Getter(Rc<dyn Fn() -> StyleOptions>),
}

impl StyleOptionsProp {
    pub fn getter(f: impl Fn() -> StyleOptions + 'static) -> Self {
        Self::Getter(Rc::new(f))
    }

    /// Current options.
    pub fn get(&self) -> StyleOptions {
        match self {
            Self::Static(options) => options.clone(),
            Self::Getter(f) => f(),
        }
    }
}

impl From<StyleOptions> for StyleOptionsProp {
    fn from(options: StyleOptions) -> Self {
        Self::Static(options)
    }
}

impl From<StyleSheet> for StyleOptionsProp {
    fn from(sheet: StyleSheet) -> Self {
        Self::Static(StyleOptions::new(sheet))
    }
}

impl From<Rc<dyn Fn() -> StyleOptions>> for StyleOptionsProp {
    fn from(getter: Rc<dyn Fn() -> StyleOptions>) -> Self {
        Self::Getter(getter)
    }
}

// =============================================================================
// Style Props
// =============================================================================

/// Properties for the [`style`](super::style) component.
///
/// # Example
///
/// ```ignore
/// let cleanup = style(
///     StyleProps::new(StyleSheet::local(".card", "padding: 1em"))
///         .child(|| render_card()),
/// )?;
/// ```
pub struct StyleProps {
    pub options: StyleOptionsProp,
    /// Rendered unchanged after the stylesheet is active.
    pub child: Option<ChildRenderer>,
}

impl StyleProps {
    pub fn new(options: impl Into<StyleOptionsProp>) -> Self {
        Self {
            options: options.into(),
            child: None,
        }
    }

    pub fn child(mut self, render: impl FnOnce() -> Cleanup + 'static) -> Self {
        self.child = Some(Box::new(render));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_static_prop() {
        let sheet = StyleSheet::global("a {}");
        let prop: StyleOptionsProp = sheet.clone().into();
        assert_eq!(prop.get().sheet, sheet);
    }

    #[test]
    fn test_getter_prop_is_called_each_time() {
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let prop = StyleOptionsProp::getter(move || {
            calls_clone.set(calls_clone.get() + 1);
            StyleOptions::new(StyleSheet::global("a {}"))
        });

        prop.get();
        prop.get();
        assert_eq!(calls.get(), 2);
    }
}
