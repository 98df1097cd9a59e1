//! Registry of scene focus hooks

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::error::{CallbackError, ConfigurationError};
use crate::screen::{FocusCallback, SceneComponent, Screen, ScreenId};

/// A focus callback registered for a scene
#[derive(Clone)]
pub struct HookEntry {
    pub screen_id: ScreenId,
    pub callback: FocusCallback,
    /// Component the hook belongs to, when it can tell it is gone
    pub owner: Option<Weak<dyn Any>>,
}

impl HookEntry {
    /// False once the owning component has been dropped
    pub fn is_live(&self) -> bool {
        self.owner
            .as_ref()
            .map_or(true, |owner| owner.strong_count() > 0)
    }
}

impl fmt::Debug for HookEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookEntry")
            .field("screen_id", &self.screen_id)
            .field("live", &self.is_live())
            .finish_non_exhaustive()
    }
}

/// Ordered list of scene focus hooks
///
/// Entries keep their registration order and the same scene may appear any
/// number of times. Cloning the registry yields another handle to the same
/// entries, so components can hold one and (un)register from inside their
/// own focus handlers.
///
/// Hooks of components that were dropped without unregistering never fire
/// again, and are pruned on the next [`register`](Self::register) or
/// [`prune`](Self::prune).
#[derive(Clone, Default)]
pub struct HookRegistry {
    entries: Rc<RefCell<Vec<HookEntry>>>,
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("entries", &*self.entries.borrow())
            .finish()
    }
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the component's focus hook
    ///
    /// Fails without touching the registry if the component does not
    /// provide a focus handler.
    pub fn register<C>(&self, component: &C) -> Result<(), ConfigurationError>
    where
        C: SceneComponent + ?Sized,
    {
        let screen_id = component.screen_id();
        let Some(callback) = component.focus_hook() else {
            warn!(screen = %screen_id, "Rejected focus hook without handler");
            return Err(ConfigurationError::MissingFocusHandler { screen_id });
        };

        let mut entries = self.entries.borrow_mut();
        Self::retain_live(&mut entries);
        entries.push(HookEntry {
            screen_id: screen_id.clone(),
            callback,
            owner: component.owner(),
        });
        debug!(screen = %screen_id, hooks = entries.len(), "Registered focus hook");
        Ok(())
    }

    /// Remove every hook registered for the component's scene
    ///
    /// This drops hooks added by *other* components on the same scene too.
    /// Returns how many hooks were removed; removing nothing is not an error.
    pub fn unregister<C>(&self, component: &C) -> usize
    where
        C: Screen + ?Sized,
    {
        self.remove_screen(&component.screen_id())
    }

    /// Remove every hook registered for a scene
    pub fn remove_screen(&self, screen_id: &ScreenId) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| &entry.screen_id != screen_id);
        let removed = before - entries.len();
        debug!(screen = %screen_id, removed, hooks = entries.len(), "Unregistered focus hooks");
        removed
    }

    /// Drop hooks whose component no longer exists
    ///
    /// Returns how many hooks were removed.
    pub fn prune(&self) -> usize {
        Self::retain_live(&mut self.entries.borrow_mut())
    }

    fn retain_live(entries: &mut Vec<HookEntry>) -> usize {
        let before = entries.len();
        entries.retain(HookEntry::is_live);
        let pruned = before - entries.len();
        if pruned > 0 {
            debug!(pruned, hooks = entries.len(), "Pruned hooks of dropped components");
        }
        pruned
    }

    /// Copy of the current entries, in registration order
    pub fn snapshot(&self) -> Vec<HookEntry> {
        self.entries.borrow().clone()
    }

    /// Invoke, in registration order, every hook registered for `screen_id`
    ///
    /// Hooks are taken from a snapshot made before the first one runs, so
    /// hooks may (un)register freely without affecting this call. The first
    /// failing hook aborts the rest and its error is returned unchanged.
    ///
    /// Returns the number of hooks invoked.
    pub fn fire(&self, screen_id: &ScreenId) -> Result<usize, CallbackError> {
        let matching: Vec<HookEntry> = self
            .snapshot()
            .into_iter()
            .filter(|entry| &entry.screen_id == screen_id)
            .collect();

        if matching.is_empty() {
            trace!(screen = %screen_id, "No focus hooks for scene");
            return Ok(0);
        }

        for (index, entry) in matching.iter().enumerate() {
            debug!(screen = %screen_id, index, "Firing focus hook");
            (entry.callback)()?;
        }
        Ok(matching.len())
    }

    /// Number of registered hooks
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Number of hooks registered for a scene
    pub fn count_for(&self, screen_id: &ScreenId) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| &entry.screen_id == screen_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_fired;
    use crate::testing::{CallLog, RecordingScreen};
    use std::cell::Cell;

    struct Hook {
        id: &'static str,
        hits: Rc<Cell<u32>>,
    }

    impl Screen for Hook {
        fn screen_id(&self) -> ScreenId {
            self.id.into()
        }
    }

    impl SceneComponent for Hook {
        fn focus_hook(&self) -> Option<FocusCallback> {
            let hits = self.hits.clone();
            Some(Rc::new(move || {
                hits.set(hits.get() + 1);
                Ok(())
            }))
        }
    }

    struct NoHandler;

    impl Screen for NoHandler {
        fn screen_id(&self) -> ScreenId {
            "a".into()
        }
    }

    impl SceneComponent for NoHandler {}

    fn hook(id: &'static str) -> (Hook, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        (
            Hook {
                id,
                hits: hits.clone(),
            },
            hits,
        )
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = HookRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_register_appends() {
        let registry = HookRegistry::new();
        let (a, _) = hook("a");
        let (b, _) = hook("b");

        registry.register(&a).unwrap();
        registry.register(&b).unwrap();
        registry.register(&a).unwrap();

        let ids: Vec<_> = registry
            .snapshot()
            .into_iter()
            .map(|entry| entry.screen_id)
            .collect();
        assert_eq!(ids, vec!["a".into(), ScreenId::from("b"), "a".into()]);
        assert_eq!(registry.count_for(&"a".into()), 2);
    }

    #[test]
    fn test_register_without_handler_fails() {
        let registry = HookRegistry::new();
        let (a, _) = hook("a");
        registry.register(&a).unwrap();

        let err = registry.register(&NoHandler).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingFocusHandler {
                screen_id: "a".into()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_removes_all_for_screen() {
        let registry = HookRegistry::new();
        let (a1, _) = hook("a");
        let (a2, _) = hook("a");
        let (b, _) = hook("b");
        registry.register(&a1).unwrap();
        registry.register(&b).unwrap();
        registry.register(&a2).unwrap();

        assert_eq!(registry.unregister(&a1), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.count_for(&"b".into()), 1);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let registry = HookRegistry::new();
        let (a, _) = hook("a");
        registry.register(&a).unwrap();

        assert_eq!(registry.unregister(&NoHandler), 1);
        assert_eq!(registry.unregister(&NoHandler), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_fire_only_matching() {
        let registry = HookRegistry::new();
        let (a, a_hits) = hook("a");
        let (b, b_hits) = hook("b");
        registry.register(&a).unwrap();
        registry.register(&b).unwrap();
        registry.register(&a).unwrap();

        assert_eq!(registry.fire(&"a".into()).unwrap(), 2);
        assert_eq!(a_hits.get(), 2);
        assert_eq!(b_hits.get(), 0);

        assert_eq!(registry.fire(&"missing".into()).unwrap(), 0);
    }

    #[test]
    fn test_clones_share_entries() {
        let registry = HookRegistry::new();
        let other = registry.clone();
        let (a, _) = hook("a");

        other.register(&a).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dropped_components_are_pruned() {
        let registry = HookRegistry::new();
        let log = CallLog::new();
        let kept = RecordingScreen::shared("a", "kept", &log);
        let gone = RecordingScreen::shared("a", "gone", &log);
        registry.register(&kept).unwrap();
        registry.register(&gone).unwrap();

        drop(gone);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.fire(&"a".into()).unwrap(), 2);
        assert_fired!(log, ["kept"]);

        let later = RecordingScreen::shared("b", "later", &log);
        registry.register(&later).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.count_for(&"a".into()), 1);
    }

    #[test]
    fn test_prune_keeps_hooks_without_owner() {
        let registry = HookRegistry::new();
        let (a, _) = hook("a");
        let log = CallLog::new();
        let gone = RecordingScreen::shared("b", "gone", &log);
        registry.register(&a).unwrap();
        registry.register(&gone).unwrap();
        drop(gone);

        assert_eq!(registry.prune(), 1);
        assert_eq!(registry.prune(), 0);
        assert_eq!(registry.count_for(&"a".into()), 1);
    }
}
