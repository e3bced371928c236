//! Lifecycle - Mount/unmount of stylesheets, driven by consumers.
//!
//! - [`activate`] / [`deactivate`] - the reference-counted inject/remove rule
//! - [`acquire`] / [`StyleGuard`] - one activation paired with its deactivation
//! - [`StyleHook`] - per-consumer state machine over repeated evaluations
//! - [`OptionsFingerprint`] - decides whether an evaluation must re-activate
//!
//! # Lifecycle
//!
//! ```text
//!            evaluate (new)              evaluate (changed)
//! Inactive ─────────────────► Active ─────────────────────► Active
//!    ▲                          │   deactivate old, then activate new
//!    └──────── unmount ─────────┘
//! ```

mod fingerprint;
mod hook;

pub use fingerprint::*;
pub use hook::*;
