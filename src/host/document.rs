//! In-memory document host.
//!
//! Keeps style elements per parent element and journals every call it
//! receives. Useful wherever there is no real document: tests, headless
//! rendering, server-side collection of the active CSS.
//!
//! CSS text is stored verbatim. No parsing, no scoping.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::HostError;
use crate::sheet::{GlobalStyleSheet, InjectOptions, LocalStyleSheet, RemoveOptions};
use crate::types::{Attributes, ElementRef, StyleSheetId, VariantKind};

use super::StyleSheetHost;

// =============================================================================
// Types
// =============================================================================

/// A style element living under some parent element.
#[derive(Debug, Clone)]
pub struct StyleElement {
    pub sheet_id: StyleSheetId,
    pub variant: VariantKind,
    /// Selector for local sheets.
    pub selector: Option<Rc<str>>,
    pub css: Rc<str>,
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Inject,
    Remove,
}

/// One journaled host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOperation {
    pub action: HostAction,
    pub variant: VariantKind,
    pub sheet_id: StyleSheetId,
    /// Key of the parent element the call targeted.
    pub parent_key: u64,
}

// =============================================================================
// Document
// =============================================================================

/// In-memory [`StyleSheetHost`].
///
/// Injection into a parent that already holds the sheet is a no-op unless
/// `replace` is set. Removing a sheet that is not there is an error.
#[derive(Debug)]
pub struct Document {
    head: ElementRef,
    styles: RefCell<Vec<(ElementRef, Vec<StyleElement>)>>,
    operations: RefCell<Vec<HostOperation>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            head: ElementRef::new("head"),
            styles: RefCell::new(Vec::new()),
            operations: RefCell::new(Vec::new()),
        }
    }

    /// Default parent for injection and removal.
    pub fn head(&self) -> ElementRef {
        self.head.clone()
    }

    /// Create an element that can be used as `parent_element`.
    pub fn create_element(&self, tag: &str) -> ElementRef {
        ElementRef::new(tag)
    }

    /// Style elements currently under `parent`, in insertion order.
    pub fn style_elements(&self, parent: &ElementRef) -> Vec<StyleElement> {
        self.styles
            .borrow()
            .iter()
            .find(|(element, _)| element == parent)
            .map(|(_, entries)| entries.clone())
            .unwrap_or_default()
    }

    /// Whether `id` is present under any parent.
    pub fn contains(&self, id: StyleSheetId) -> bool {
        self.styles
            .borrow()
            .iter()
            .any(|(_, entries)| entries.iter().any(|entry| entry.sheet_id == id))
    }

    /// Every call received so far.
    pub fn operations(&self) -> Vec<HostOperation> {
        self.operations.borrow().clone()
    }

    pub fn inject_count(&self, id: StyleSheetId) -> usize {
        self.count_action(HostAction::Inject, id)
    }

    pub fn remove_count(&self, id: StyleSheetId) -> usize {
        self.count_action(HostAction::Remove, id)
    }

    /// Forget the journal. Style elements stay.
    pub fn clear_operations(&self) {
        self.operations.borrow_mut().clear();
    }

    fn count_action(&self, action: HostAction, id: StyleSheetId) -> usize {
        self.operations
            .borrow()
            .iter()
            .filter(|op| op.action == action && op.sheet_id == id)
            .count()
    }

    fn parent_or_head(&self, parent: Option<&ElementRef>) -> ElementRef {
        parent.cloned().unwrap_or_else(|| self.head.clone())
    }

    fn record(
        &self,
        action: HostAction,
        variant: VariantKind,
        sheet_id: StyleSheetId,
        parent: &ElementRef,
    ) {
        self.operations.borrow_mut().push(HostOperation {
            action,
            variant,
            sheet_id,
            parent_key: parent.key(),
        });
    }

    fn insert(&self, options: &InjectOptions, element: StyleElement) {
        let parent = self.parent_or_head(options.parent_element.as_ref());
        self.record(HostAction::Inject, element.variant, element.sheet_id, &parent);

        let mut styles = self.styles.borrow_mut();
        let existing = styles.iter().position(|(el, _)| *el == parent);
        let index = match existing {
            Some(index) => index,
            None => {
                styles.push((parent, Vec::new()));
                styles.len() - 1
            }
        };
        let entries = &mut styles[index].1;

        match entries.iter_mut().find(|entry| entry.sheet_id == element.sheet_id) {
            Some(existing) if options.replace == Some(true) => *existing = element,
            Some(_) => {}
            None => entries.push(element),
        }
    }

    fn delete(
        &self,
        options: &RemoveOptions,
        variant: VariantKind,
        id: StyleSheetId,
    ) -> Result<(), HostError> {
        let parent = self.parent_or_head(options.parent_element.as_ref());
        self.record(HostAction::Remove, variant, id, &parent);

        let mut styles = self.styles.borrow_mut();
        let Some(index) = styles.iter().position(|(el, _)| *el == parent) else {
            return Err(HostError::MissingStyleElement { id });
        };
        let entries = &mut styles[index].1;
        let Some(position) = entries.iter().position(|entry| entry.sheet_id == id) else {
            return Err(HostError::MissingStyleElement { id });
        };
        entries.remove(position);

        if entries.is_empty() {
            styles.remove(index);
        }
        Ok(())
    }
}

impl StyleSheetHost for Document {
    fn inject_global(
        &self,
        options: &InjectOptions,
        sheet: &GlobalStyleSheet,
    ) -> Result<(), HostError> {
        self.insert(
            options,
            StyleElement {
                sheet_id: sheet.id(),
                variant: VariantKind::Global,
                selector: None,
                css: Rc::from(sheet.css()),
                attributes: options.attributes.clone().unwrap_or_default(),
            },
        );
        Ok(())
    }

    fn inject_local(
        &self,
        options: &InjectOptions,
        sheet: &LocalStyleSheet,
    ) -> Result<(), HostError> {
        self.insert(
            options,
            StyleElement {
                sheet_id: sheet.id(),
                variant: VariantKind::Local,
                selector: Some(Rc::from(sheet.selector())),
                css: Rc::from(sheet.css()),
                attributes: options.attributes.clone().unwrap_or_default(),
            },
        );
        Ok(())
    }

    fn remove_global(
        &self,
        options: &RemoveOptions,
        sheet: &GlobalStyleSheet,
    ) -> Result<(), HostError> {
        self.delete(options, VariantKind::Global, sheet.id())
    }

    fn remove_local(
        &self,
        options: &RemoveOptions,
        sheet: &LocalStyleSheet,
    ) -> Result<(), HostError> {
        self.delete(options, VariantKind::Local, sheet.id())
    }
}

// =============================================================================
// Tests
// =============================================================================
