//! # spark-style
//!
//! Reference-counted stylesheet lifecycle for reactive UI components.
//!
//! Built on [spark-signals](https://crates.io/crates/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Components do not own stylesheets. Each mounted consumer holds one
//! reference to a stylesheet id; the first reference injects the sheet into
//! the document and the last one removes it:
//!
//! ```text
//! use_style / style → StyleHook → activate/deactivate → ReferenceCounter
//!                                        │
//!                                        └──► StyleSheetHost (inject/remove)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Identity and value types (StyleSheetId, ElementRef, Attributes)
//! - [`sheet`] - Global/local stylesheets and their options
//! - [`host`] - Host trait and the in-memory Document host
//! - [`engine`] - Reference counter and style context
//! - [`lifecycle`] - Activation rules, guards, fingerprints, per-consumer hook
//! - [`primitives`] - `use_style` and the `style` component

pub mod engine;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod primitives;
pub mod sheet;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{HostError, StyleError};

pub use sheet::{
    GlobalStyleSheet, InjectOptions, LocalStyleSheet, RemoveOptions, StyleOptions, StyleSheet,
};

pub use host::{Document, HostAction, HostOperation, StyleElement, StyleSheetHost};

pub use engine::{
    provide_style_context, reset_style_context, style_context, use_style_context,
    ReferenceCounter, StyleContext,
};

pub use lifecycle::{
    acquire, activate, deactivate, AttributesMemo, FingerprintChanges, OptionsFingerprint,
    StyleGuard, StyleHook, Transition,
};

pub use primitives::{
    style, style_in, use_style, use_style_in, ChildRenderer, Cleanup, StyleOptionsProp,
    StyleProps,
};
