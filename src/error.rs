//! Error types.
//!
//! Host failures are surfaced unchanged; this crate adds only the
//! missing-context case for the ambient API.

use thiserror::Error;

use crate::types::StyleSheetId;

/// Failure reported by a [`StyleSheetHost`](crate::host::StyleSheetHost).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Removal was requested for a sheet that is not present in the target parent.
    #[error("no style element for sheet {id} in the target parent")]
    MissingStyleElement { id: StyleSheetId },

    /// Catch-all for custom hosts.
    #[error("host rejected the operation: {0}")]
    Rejected(String),
}

/// Errors returned by the lifecycle API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error(transparent)]
    Host(#[from] HostError),

    /// `use_style` was called on a thread without a provided context.
    #[error("no style context provided on this thread")]
    MissingContext,
}
