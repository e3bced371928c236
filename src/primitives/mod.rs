//! Style Primitives - The consumer-facing API.
//!
//! - [`use_style`] - bind a stylesheet to the calling consumer
//! - [`style`] - passthrough component that does the same around one child
//!
//! # Reactivity
//!
//! Options can be static or a getter. A getter runs inside an effect, so
//! reading a signal in it makes the binding follow that signal:
//!
//! ```ignore
//! // Follows `theme` - swaps sheets when the signal changes
//! use_style(StyleOptionsProp::getter(move || StyleOptions::new(theme.get().sheet())));
//!
//! // Fixed for the lifetime of the consumer
//! use_style(StyleSheet::global("body { margin: 0 }"));
//! ```

mod style;
mod types;

pub use style::*;
pub use types::*;
