//! Style Engine - Reference counts and the context that owns them.
//!
//! - Registry: `StyleSheetId → active consumer count`
//! - Context: counter + host pair, optionally provided per thread
//!
//! # Architecture
//!
//! Consumers never own a stylesheet. They hold a reference in the counter:
//!
//! ```text
//! card.rs   ──┐
//! list.rs   ──┼──► s1f3a… : 3   (injected once, removed when it drops to 0)
//! dialog.rs ──┘
//! ```

mod context;
mod registry;

pub use context::*;
pub use registry::*;
