//! Host seam - where stylesheets physically enter and leave the document.
//!
//! The lifecycle engine never touches a document directly. It calls one of
//! the four operations below, picked by the sheet variant, and propagates
//! whatever error comes back.
//!
//! - [`StyleSheetHost`] - the capability trait
//! - [`Document`] - in-memory host with a call journal

mod document;

pub use document::*;

use crate::error::HostError;
use crate::sheet::{GlobalStyleSheet, InjectOptions, LocalStyleSheet, RemoveOptions};

/// Inject/remove operations for both stylesheet variants.
pub trait StyleSheetHost {
    fn inject_global(
        &self,
        options: &InjectOptions,
        sheet: &GlobalStyleSheet,
    ) -> Result<(), HostError>;

    fn inject_local(
        &self,
        options: &InjectOptions,
        sheet: &LocalStyleSheet,
    ) -> Result<(), HostError>;

    fn remove_global(
        &self,
        options: &RemoveOptions,
        sheet: &GlobalStyleSheet,
    ) -> Result<(), HostError>;

    fn remove_local(
        &self,
        options: &RemoveOptions,
        sheet: &LocalStyleSheet,
    ) -> Result<(), HostError>;
}
