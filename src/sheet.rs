//! Stylesheet model - the two sheet variants and their options.
//!
//! Sheets are immutable and cheap to clone (the CSS text is shared). The
//! variant is decided when a sheet is built, so the lifecycle engine picks
//! the inject/remove operation with a plain `match`.
//!
//! # Example
//!
//! ```ignore
//! use spark_style::{StyleSheet, StyleOptions, InjectOptions, Attributes};
//!
//! let reset = StyleSheet::global("body { margin: 0 }");
//! let button = StyleSheet::local(".button", "padding: 4px 8px");
//!
//! let options = StyleOptions::new(button).inject_options(
//!     InjectOptions::new().with_attributes(Attributes::new().with("media", "screen")),
//! );
//! ```

use std::rc::Rc;

use crate::types::{Attributes, ElementRef, StyleSheetId, VariantKind};

// =============================================================================
// Sheets
// =============================================================================

/// A stylesheet applied document-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalStyleSheet {
    id: StyleSheetId,
    css: Rc<str>,
}

impl GlobalStyleSheet {
    /// Build a global sheet whose id is derived from its CSS text.
    pub fn new(css: impl Into<Rc<str>>) -> Self {
        let css = css.into();
        let id = StyleSheetId::from_content(VariantKind::Global, None, &css);
        Self { id, css }
    }

    /// Build a global sheet with an explicit id.
    pub fn with_id(id: StyleSheetId, css: impl Into<Rc<str>>) -> Self {
        Self { id, css: css.into() }
    }

    pub fn id(&self) -> StyleSheetId {
        self.id
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

/// A stylesheet scoped to a selector.
///
/// The CSS text is stored as given; scoping it under the selector is the
/// host's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStyleSheet {
    id: StyleSheetId,
    selector: Rc<str>,
    css: Rc<str>,
}

impl LocalStyleSheet {
    /// Build a local sheet whose id is derived from selector and CSS text.
    pub fn new(selector: impl Into<Rc<str>>, css: impl Into<Rc<str>>) -> Self {
        let selector = selector.into();
        let css = css.into();
        let id = StyleSheetId::from_content(VariantKind::Local, Some(&*selector), &css);
        Self { id, selector, css }
    }

    /// Build a local sheet with an explicit id.
    pub fn with_id(
        id: StyleSheetId,
        selector: impl Into<Rc<str>>,
        css: impl Into<Rc<str>>,
    ) -> Self {
        Self {
            id,
            selector: selector.into(),
            css: css.into(),
        }
    }

    pub fn id(&self) -> StyleSheetId {
        self.id
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

/// Either variant of stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSheet {
    Global(GlobalStyleSheet),
    Local(LocalStyleSheet),
}

impl StyleSheet {
    /// Shorthand for `StyleSheet::Global(GlobalStyleSheet::new(css))`.
    pub fn global(css: impl Into<Rc<str>>) -> Self {
        Self::Global(GlobalStyleSheet::new(css))
    }

    /// Shorthand for `StyleSheet::Local(LocalStyleSheet::new(selector, css))`.
    pub fn local(selector: impl Into<Rc<str>>, css: impl Into<Rc<str>>) -> Self {
        Self::Local(LocalStyleSheet::new(selector, css))
    }

    pub fn id(&self) -> StyleSheetId {
        match self {
            Self::Global(sheet) => sheet.id(),
            Self::Local(sheet) => sheet.id(),
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            Self::Global(_) => VariantKind::Global,
            Self::Local(_) => VariantKind::Local,
        }
    }

    pub fn css(&self) -> &str {
        match self {
            Self::Global(sheet) => sheet.css(),
            Self::Local(sheet) => sheet.css(),
        }
    }
}

impl From<GlobalStyleSheet> for StyleSheet {
    fn from(sheet: GlobalStyleSheet) -> Self {
        Self::Global(sheet)
    }
}

impl From<LocalStyleSheet> for StyleSheet {
    fn from(sheet: LocalStyleSheet) -> Self {
        Self::Local(sheet)
    }
}

// =============================================================================
// Options
// =============================================================================

/// Options passed to the host when a sheet is injected.
#[derive(Debug, Clone, Default)]
pub struct InjectOptions {
    /// Attributes set on the injected style element.
    pub attributes: Option<Attributes>,
    /// Replace an already-present element with the same sheet id.
    pub replace: Option<bool>,
    /// Element to inject into. Hosts fall back to their default (head).
    pub parent_element: Option<ElementRef>,
}

impl InjectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = Some(replace);
        self
    }

    pub fn with_parent_element(mut self, parent: ElementRef) -> Self {
        self.parent_element = Some(parent);
        self
    }
}

/// Options passed to the host when a sheet is removed.
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    /// Element to remove from. Hosts fall back to their default (head).
    pub parent_element: Option<ElementRef>,
}

impl RemoveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent_element(mut self, parent: ElementRef) -> Self {
        self.parent_element = Some(parent);
        self
    }
}

/// Everything one consumer supplies: the sheet plus optional inject/remove options.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub sheet: StyleSheet,
    pub inject_options: InjectOptions,
    pub remove_options: RemoveOptions,
}

impl StyleOptions {
    pub fn new(sheet: impl Into<StyleSheet>) -> Self {
        Self {
            sheet: sheet.into(),
            inject_options: InjectOptions::default(),
            remove_options: RemoveOptions::default(),
        }
    }

    pub fn inject_options(mut self, options: InjectOptions) -> Self {
        self.inject_options = options;
        self
    }

    pub fn remove_options(mut self, options: RemoveOptions) -> Self {
        self.remove_options = options;
        self
    }
}

impl From<StyleSheet> for StyleOptions {
    fn from(sheet: StyleSheet) -> Self {
        Self::new(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_discrimination() {
        let global = StyleSheet::global("body { margin: 0 }");
        let local = StyleSheet::local(".card", "padding: 1em");

        assert!(global.is_global());
        assert!(!local.is_global());
        assert_eq!(local.kind(), VariantKind::Local);
    }

    #[test]
    fn test_same_content_same_id() {
        let a = StyleSheet::local(".card", "padding: 1em");
        let b = StyleSheet::local(".card", "padding: 1em");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_explicit_id_is_kept() {
        let id = StyleSheetId::new(42);
        let sheet: StyleSheet = GlobalStyleSheet::with_id(id, "a {}").into();
        assert_eq!(sheet.id(), id);
        assert_eq!(sheet.css(), "a {}");
    }

    #[test]
    fn test_options_builders() {
        let parent = ElementRef::new("div");
        let options = StyleOptions::new(StyleSheet::global("a {}"))
            .inject_options(
                InjectOptions::new()
                    .with_replace(true)
                    .with_parent_element(parent.clone()),
            )
            .remove_options(RemoveOptions::new().with_parent_element(parent.clone()));

        assert_eq!(options.inject_options.replace, Some(true));
        assert_eq!(options.inject_options.parent_element, Some(parent.clone()));
        assert_eq!(options.remove_options.parent_element, Some(parent));
        assert!(options.inject_options.attributes.is_none());
    }
}
