//! Core types for spark-style.
//!
//! These are the value types shared between the stylesheet model, the
//! host seam and the lifecycle engine. Everything here is cheap to clone.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

// =============================================================================
// StyleSheet Identity
// =============================================================================

/// Opaque identity of a stylesheet resource.
///
/// Two sheets with the same id are treated as one consumable resource: the
/// first consumer injects it, the last one removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleSheetId(u64);

impl StyleSheetId {
    /// Wrap an explicit identity value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Derive an identity from the sheet content.
    ///
    /// Variant and selector participate, so a global sheet and a local sheet
    /// with the same CSS text never collide.
    pub fn from_content(variant: VariantKind, selector: Option<&str>, css: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        variant.hash(&mut hasher);
        selector.hash(&mut hasher);
        css.hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl fmt::Display for StyleSheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{:016x}", self.0)
    }
}

/// Which of the two stylesheet variants a sheet is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// Applies document-wide.
    Global,
    /// Scoped to a selector.
    Local,
}

// =============================================================================
// Element Handles
// =============================================================================

thread_local! {
    static NEXT_ELEMENT_KEY: Cell<u64> = const { Cell::new(0) };
}

#[derive(Debug)]
struct ElementInner {
    key: u64,
    tag: String,
}

/// Shared handle to a host element that stylesheets can be injected into.
///
/// Equality is identity: two handles are equal only if they point at the
/// same element, regardless of tag.
#[derive(Debug, Clone)]
pub struct ElementRef(Rc<ElementInner>);

impl ElementRef {
    /// Create a new element handle with a fresh identity.
    pub fn new(tag: impl Into<String>) -> Self {
        let key = NEXT_ELEMENT_KEY.with(|next| {
            let key = next.get();
            next.set(key + 1);
            key
        });
        Self(Rc::new(ElementInner { key, tag: tag.into() }))
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    /// Stable numeric key, unique per thread.
    pub fn key(&self) -> u64 {
        self.0.key
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ElementRef {}

// =============================================================================
// Attributes
// =============================================================================

/// Key/value attributes applied to an injected style element.
///
/// Shared and immutable once built; clones point at the same record. Two
/// records can be compared by identity ([`Attributes::ptr_eq`]) or one level
/// deep ([`Attributes::shallow_eq`]).
#[derive(Debug, Clone, Default)]
pub struct Attributes(Rc<BTreeMap<String, String>>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Copies the record if it is shared.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Rc::make_mut(&mut self.0).insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Same record (not merely equal contents).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Same record, or identical key sets with equal values.
    pub fn shallow_eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.0.len() != other.0.len() {
            return false;
        }
        self.0
            .iter()
            .all(|(key, value)| other.0.get(key) == Some(value))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Rc::new(
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================
