//! Dependency fingerprints - when does a consumer need to re-activate?
//!
//! Only a fixed set of option fields matters:
//!
//! | Field                    | Compared by            |
//! |--------------------------|------------------------|
//! | sheet id                 | value                  |
//! | inject `attributes`      | identity, after memo   |
//! | inject `replace`         | value                  |
//! | inject `parent_element`  | identity               |
//! | remove `parent_element`  | identity               |
//!
//! Callers typically build a fresh `Attributes` on every render. The
//! [`AttributesMemo`] hands back the previously retained record whenever the
//! new one is shallow-equal, so the identity comparison stays stable.

use bitflags::bitflags;

use crate::sheet::StyleOptions;
use crate::types::{Attributes, ElementRef, StyleSheetId};

// =============================================================================
// Attributes Memo
// =============================================================================

/// Retains the last `attributes` record across evaluations.
#[derive(Debug, Default)]
pub struct AttributesMemo {
    current: Option<Attributes>,
}

impl AttributesMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the retained record if `next` is shallow-equal to it,
    /// otherwise retain and return `next`.
    pub fn retain(&mut self, next: Option<&Attributes>) -> Option<Attributes> {
        let keep = match (&self.current, next) {
            (Some(current), Some(next)) => current.shallow_eq(next),
            _ => false,
        };
        if !keep {
            self.current = next.cloned();
        }
        self.current.clone()
    }

    pub fn current(&self) -> Option<&Attributes> {
        self.current.as_ref()
    }
}

// =============================================================================
// Fingerprint
// =============================================================================

bitflags! {
    /// Fingerprint fields that differ between two evaluations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FingerprintChanges: u8 {
        const SHEET = 1 << 0;
        const ATTRIBUTES = 1 << 1;
        const REPLACE = 1 << 2;
        const INJECT_PARENT = 1 << 3;
        const REMOVE_PARENT = 1 << 4;
    }
}

/// The subset of [`StyleOptions`] that decides whether a consumer re-activates.
#[derive(Debug, Clone)]
pub struct OptionsFingerprint {
    sheet: StyleSheetId,
    attributes: Option<Attributes>,
    replace: Option<bool>,
    inject_parent: Option<ElementRef>,
    remove_parent: Option<ElementRef>,
}

impl OptionsFingerprint {
    /// Derive the fingerprint of `options`, routing `attributes` through `memo`.
    pub fn derive(options: &StyleOptions, memo: &mut AttributesMemo) -> Self {
        let inject = &options.inject_options;
        Self {
            sheet: options.sheet.id(),
            attributes: memo.retain(inject.attributes.as_ref()),
            replace: inject.replace,
            inject_parent: inject.parent_element.clone(),
            remove_parent: options.remove_options.parent_element.clone(),
        }
    }

    pub fn sheet(&self) -> StyleSheetId {
        self.sheet
    }

    /// Which fields differ from `other`. Empty means equal.
    pub fn changes(&self, other: &Self) -> FingerprintChanges {
        let mut changes = FingerprintChanges::empty();
        changes.set(FingerprintChanges::SHEET, self.sheet != other.sheet);
        changes.set(
            FingerprintChanges::ATTRIBUTES,
            !same_attributes(self.attributes.as_ref(), other.attributes.as_ref()),
        );
        changes.set(FingerprintChanges::REPLACE, self.replace != other.replace);
        changes.set(FingerprintChanges::INJECT_PARENT, self.inject_parent != other.inject_parent);
        changes.set(FingerprintChanges::REMOVE_PARENT, self.remove_parent != other.remove_parent);
        changes
    }
}

impl PartialEq for OptionsFingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.changes(other).is_empty()
    }
}

fn same_attributes(a: Option<&Attributes>, b: Option<&Attributes>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.ptr_eq(b),
        _ => false,
    }
}
