//! Style Hook - Reference-counted activation and deactivation.
//!
//! The first consumer of a sheet injects it, the last one removes it:
//!
//! ```text
//! activate:    count == 0 ? inject : -   then  count += 1
//! deactivate:  count -= 1               then  count == 0 ? remove : -
//! ```
//!
//! [`StyleGuard`] ties one activation to one deactivation. [`StyleHook`]
//! drives a guard from repeated evaluations of a consumer's options.

use log::{debug, error};

use crate::engine::StyleContext;
use crate::error::StyleError;
use crate::sheet::{InjectOptions, RemoveOptions, StyleOptions, StyleSheet};

use super::fingerprint::{AttributesMemo, FingerprintChanges, OptionsFingerprint};

// =============================================================================
// Activation / Deactivation
// =============================================================================

/// Register one consumer of `sheet`, injecting it if it had none.
///
/// Host errors are returned before the count is touched.
pub fn activate(
    context: &StyleContext,
    sheet: &StyleSheet,
    options: &InjectOptions,
) -> Result<(), StyleError> {
    let id = sheet.id();
    let counter = context.counter();

    if counter.count(id) == 0 {
        debug!(target: "spark_style::lifecycle", "injecting {:?} sheet {id}", sheet.kind());
        match sheet {
            StyleSheet::Global(global) => context.host().inject_global(options, global)?,
            StyleSheet::Local(local) => context.host().inject_local(options, local)?,
        }
    }

    counter.add_reference(id);
    Ok(())
}

/// Release one consumer of `sheet`, removing it if that was the last one.
///
/// The count is decremented even if the host then fails to remove.
pub fn deactivate(
    context: &StyleContext,
    sheet: &StyleSheet,
    options: &RemoveOptions,
) -> Result<(), StyleError> {
    let id = sheet.id();

    if context.counter().remove_reference(id) == 0 {
        debug!(target: "spark_style::lifecycle", "removing {:?} sheet {id}", sheet.kind());
        match sheet {
            StyleSheet::Global(global) => context.host().remove_global(options, global)?,
            StyleSheet::Local(local) => context.host().remove_local(options, local)?,
        }
    }
    Ok(())
}

// =============================================================================
// Style Guard
// =============================================================================

/// Activate `options.sheet` and return a guard that deactivates it.
pub fn acquire(context: &StyleContext, options: &StyleOptions) -> Result<StyleGuard, StyleError> {
    activate(context, &options.sheet, &options.inject_options)?;
    Ok(StyleGuard {
        context: context.clone(),
        sheet: options.sheet.clone(),
        remove_options: options.remove_options.clone(),
        released: false,
    })
}

/// One active reference to a stylesheet.
///
/// Holds the sheet and removal options captured at activation time.
/// [`release`](StyleGuard::release) reports removal errors; dropping the
/// guard releases it too and logs the error instead.
#[derive(Debug)]
#[must_use = "dropping the guard deactivates the stylesheet immediately"]
pub struct StyleGuard {
    context: StyleContext,
    sheet: StyleSheet,
    remove_options: RemoveOptions,
    released: bool,
}

impl StyleGuard {
    pub fn sheet(&self) -> &StyleSheet {
        &self.sheet
    }

    /// Deactivate now.
    pub fn release(mut self) -> Result<(), StyleError> {
        self.released = true;
        deactivate(&self.context, &self.sheet, &self.remove_options)
    }
}

impl Drop for StyleGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(err) = deactivate(&self.context, &self.sheet, &self.remove_options) {
            error!(
                target: "spark_style::lifecycle",
                "failed to remove sheet {}: {err}",
                self.sheet.id()
            );
        }
    }
}

// =============================================================================
// Style Hook
// =============================================================================

/// What an evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Inactive → Active.
    Activated,
    /// Fingerprint unchanged, nothing ran.
    Retained,
    /// Deactivated the old options, then activated the new ones.
    Reactivated(FingerprintChanges),
}

struct Active {
    fingerprint: OptionsFingerprint,
    guard: StyleGuard,
}

/// Per-consumer activation state.
///
/// Call [`evaluate`](StyleHook::evaluate) on every render with the current
/// options and [`unmount`](StyleHook::unmount) when the consumer goes away.
/// Dropping an active hook deactivates it.
pub struct StyleHook {
    context: StyleContext,
    attributes: AttributesMemo,
    active: Option<Active>,
}

impl StyleHook {
    pub fn new(context: StyleContext) -> Self {
        Self {
            context,
            attributes: AttributesMemo::new(),
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Fingerprint of the current activation.
    pub fn fingerprint(&self) -> Option<&OptionsFingerprint> {
        self.active.as_ref().map(|active| &active.fingerprint)
    }

    /// Bring the activation in line with `options`.
    ///
    /// On error the hook is left inactive.
    pub fn evaluate(&mut self, options: &StyleOptions) -> Result<Transition, StyleError> {
        let fingerprint = OptionsFingerprint::derive(options, &mut self.attributes);

        let transition = match self.active.take() {
            Some(active) => {
                let changes = active.fingerprint.changes(&fingerprint);
                if changes.is_empty() {
                    self.active = Some(active);
                    return Ok(Transition::Retained);
                }
                debug!(
                    target: "spark_style::lifecycle",
                    "re-activating {}: {changes:?}",
                    fingerprint.sheet()
                );
                active.guard.release()?;
                Transition::Reactivated(changes)
            }
            None => Transition::Activated,
        };

        let guard = acquire(&self.context, options)?;
        self.active = Some(Active { fingerprint, guard });
        Ok(transition)
    }

    /// Deactivate if active.
    pub fn unmount(&mut self) -> Result<(), StyleError> {
        match self.active.take() {
            Some(active) => active.guard.release(),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::error::HostError;
    use crate::host::{Document, HostAction, StyleSheetHost};
    use crate::sheet::{GlobalStyleSheet, LocalStyleSheet};
    use crate::types::{Attributes, ElementRef};

    fn setup() -> (Rc<Document>, StyleContext) {
        let document = Rc::new(Document::new());
        let context = StyleContext::new(document.clone());
        (document, context)
    }

    #[test]
    fn test_first_activation_injects() {
        let (document, context) = setup();
        let sheet = StyleSheet::global("body { margin: 0 }");

        activate(&context, &sheet, &InjectOptions::new()).unwrap();
        activate(&context, &sheet, &InjectOptions::new()).unwrap();

        assert_eq!(document.inject_count(sheet.id()), 1);
        assert_eq!(context.counter().count(sheet.id()), 2);
    }

    #[test]
    fn test_last_deactivation_removes() {
        let (document, context) = setup();
        let sheet = StyleSheet::local(".card", "padding: 1em");

        activate(&context, &sheet, &InjectOptions::new()).unwrap();
        activate(&context, &sheet, &InjectOptions::new()).unwrap();

        deactivate(&context, &sheet, &RemoveOptions::new()).unwrap();
        assert_eq!(document.remove_count(sheet.id()), 0);
        assert!(document.contains(sheet.id()));

        deactivate(&context, &sheet, &RemoveOptions::new()).unwrap();
        assert_eq!(document.remove_count(sheet.id()), 1);
        assert!(!document.contains(sheet.id()));
        assert!(context.counter().is_empty());
    }

    #[test]
    fn test_distinct_sheets_with_same_id_share_count() {
        let (document, context) = setup();
        let id = crate::types::StyleSheetId::new(9);
        let first: StyleSheet = GlobalStyleSheet::with_id(id, "a { color: red }").into();
        let second: StyleSheet = GlobalStyleSheet::with_id(id, "a { color: red }").into();

        activate(&context, &first, &InjectOptions::new()).unwrap();
        activate(&context, &second, &InjectOptions::new()).unwrap();

        assert_eq!(document.inject_count(id), 1);
        assert_eq!(context.counter().count(id), 2);
    }

    #[test]
    fn test_guard_release_and_drop() {
        let (document, context) = setup();
        let options = StyleOptions::new(StyleSheet::global("a {}"));
        let id = options.sheet.id();

        let first = acquire(&context, &options).unwrap();
        let second = acquire(&context, &options).unwrap();
        assert_eq!(context.counter().count(id), 2);

        first.release().unwrap();
        assert_eq!(context.counter().count(id), 1);

        drop(second);
        assert_eq!(context.counter().count(id), 0);
        assert_eq!(document.remove_count(id), 1);
    }

    #[test]
    fn test_guard_uses_captured_remove_options() {
        let (document, context) = setup();
        let parent = document.create_element("div");
        let options = StyleOptions::new(StyleSheet::global("a {}"))
            .inject_options(InjectOptions::new().with_parent_element(parent.clone()))
            .remove_options(RemoveOptions::new().with_parent_element(parent.clone()));

        let guard = acquire(&context, &options).unwrap();
        assert_eq!(document.style_elements(&parent).len(), 1);

        guard.release().unwrap();
        assert!(document.style_elements(&parent).is_empty());
    }

    #[test]
    fn test_hook_retains_on_equal_fingerprint() {
        let (document, context) = setup();
        let sheet = StyleSheet::global("a {}");
        let mut hook = StyleHook::new(context.clone());

        let render = || {
            StyleOptions::new(sheet.clone()).inject_options(
                InjectOptions::new().with_attributes(Attributes::new().with("media", "screen")),
            )
        };

        assert_eq!(hook.evaluate(&render()).unwrap(), Transition::Activated);
        assert_eq!(hook.evaluate(&render()).unwrap(), Transition::Retained);
        assert_eq!(hook.evaluate(&render()).unwrap(), Transition::Retained);

        assert_eq!(document.inject_count(sheet.id()), 1);
        assert_eq!(context.counter().count(sheet.id()), 1);
    }

    #[test]
    fn test_hook_reactivates_on_parent_change() {
        let (document, context) = setup();
        let sheet = StyleSheet::local(".card", "padding: 1em");
        let first = document.create_element("div");
        let second = document.create_element("div");
        let attributes = Attributes::new().with("media", "screen");
        let mut hook = StyleHook::new(context.clone());

        let options_for = |parent: &ElementRef| {
            StyleOptions::new(sheet.clone())
                .inject_options(
                    InjectOptions::new()
                        .with_attributes(attributes.clone())
                        .with_parent_element(parent.clone()),
                )
                .remove_options(RemoveOptions::new().with_parent_element(parent.clone()))
        };

        hook.evaluate(&options_for(&first)).unwrap();
        let transition = hook.evaluate(&options_for(&second)).unwrap();

        assert_eq!(
            transition,
            Transition::Reactivated(
                FingerprintChanges::INJECT_PARENT | FingerprintChanges::REMOVE_PARENT
            )
        );
        assert!(document.style_elements(&first).is_empty());
        assert_eq!(document.style_elements(&second).len(), 1);
        assert_eq!(document.inject_count(sheet.id()), 2);
        assert_eq!(document.remove_count(sheet.id()), 1);
        assert_eq!(context.counter().count(sheet.id()), 1);
    }

    #[test]
    fn test_hook_sheet_change_swaps_sheets() {
        let (document, context) = setup();
        let light = StyleSheet::global("body { background: white }");
        let dark = StyleSheet::global("body { background: black }");
        let mut hook = StyleHook::new(context.clone());

        hook.evaluate(&StyleOptions::new(light.clone())).unwrap();
        hook.evaluate(&StyleOptions::new(dark.clone())).unwrap();

        assert!(!document.contains(light.id()));
        assert!(document.contains(dark.id()));
        assert_eq!(context.counter().active_ids(), vec![dark.id()]);
    }

    #[test]
    fn test_hook_reactivation_deactivates_first() {
        let (document, context) = setup();
        let sheet = StyleSheet::global("a {}");
        let mut hook = StyleHook::new(context);

        hook.evaluate(&StyleOptions::new(sheet.clone())).unwrap();
        let replacing = StyleOptions::new(sheet.clone())
            .inject_options(InjectOptions::new().with_replace(true));
        hook.evaluate(&replacing).unwrap();

        let actions: Vec<_> = document.operations().iter().map(|op| op.action).collect();
        assert_eq!(actions, vec![HostAction::Inject, HostAction::Remove, HostAction::Inject]);
    }

    #[test]
    fn test_hook_unmount_and_remount() {
        let (document, context) = setup();
        let options = StyleOptions::new(StyleSheet::global("a {}"));
        let id = options.sheet.id();
        let mut hook = StyleHook::new(context.clone());

        hook.evaluate(&options).unwrap();
        hook.unmount().unwrap();
        assert!(!hook.is_active());
        assert!(hook.fingerprint().is_none());
        hook.unmount().unwrap();

        assert_eq!(hook.evaluate(&options).unwrap(), Transition::Activated);
        assert_eq!(document.inject_count(id), 2);
        assert_eq!(context.counter().count(id), 1);
    }

    #[test]
    fn test_hook_drop_deactivates() {
        let (document, context) = setup();
        let options = StyleOptions::new(StyleSheet::global("a {}"));
        let id = options.sheet.id();

        {
            let mut hook = StyleHook::new(context.clone());
            hook.evaluate(&options).unwrap();
            assert!(document.contains(id));
        }

        assert!(!document.contains(id));
        assert_eq!(context.counter().count(id), 0);
    }

    // -------------------------------------------------------------------------
    // Host failures
    // -------------------------------------------------------------------------

    struct FailingHost;

    impl StyleSheetHost for FailingHost {
        fn inject_global(&self, _: &InjectOptions, _: &GlobalStyleSheet) -> Result<(), HostError> {
            Err(HostError::Rejected("inject".into()))
        }

        fn inject_local(&self, _: &InjectOptions, _: &LocalStyleSheet) -> Result<(), HostError> {
            Err(HostError::Rejected("inject".into()))
        }

        fn remove_global(&self, _: &RemoveOptions, _: &GlobalStyleSheet) -> Result<(), HostError> {
            Err(HostError::Rejected("remove".into()))
        }

        fn remove_local(&self, _: &RemoveOptions, _: &LocalStyleSheet) -> Result<(), HostError> {
            Err(HostError::Rejected("remove".into()))
        }
    }

    #[test]
    fn test_failed_injection_leaves_count() {
        let context = StyleContext::new(Rc::new(FailingHost));
        let sheet = StyleSheet::global("a {}");

        let err = activate(&context, &sheet, &InjectOptions::new()).unwrap_err();

        assert_eq!(err, StyleError::Host(HostError::Rejected("inject".into())));
        assert_eq!(context.counter().count(sheet.id()), 0);
    }

    #[test]
    fn test_failed_removal_still_decrements() {
        let context = StyleContext::new(Rc::new(FailingHost));
        let sheet = StyleSheet::global("a {}");
        context.counter().add_reference(sheet.id());

        let result = deactivate(&context, &sheet, &RemoveOptions::new());

        assert_eq!(result, Err(StyleError::Host(HostError::Rejected("remove".into()))));
        assert_eq!(context.counter().count(sheet.id()), 0);
    }

    #[test]
    fn test_hook_evaluate_propagates_and_stays_inactive() {
        let context = StyleContext::new(Rc::new(FailingHost));
        let mut hook = StyleHook::new(context);

        assert!(hook.evaluate(&StyleOptions::new(StyleSheet::global("a {}"))).is_err());
        assert!(!hook.is_active());
    }
}
