//! Screen identity and focus handler traits for components

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::{CallbackError, HandlerBusy};

/// Identifies a navigable scene in the router
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(String);

impl ScreenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScreenId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ScreenId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for ScreenId {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl std::borrow::Borrow<str> for ScreenId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ScreenId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ScreenId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Zero-argument callback fired when a scene is focused again
///
/// The callback carries whatever context it needs to act on its
/// component; the registry never looks inside it.
pub type FocusCallback = Rc<dyn Fn() -> Result<(), CallbackError>>;

/// Anything that lives on a router scene
///
/// Use `#[derive(Screen)]` from `scene-focus-macros` to auto-implement this trait.
pub trait Screen {
    /// Key of the scene this component is rendered in
    fn screen_id(&self) -> ScreenId;
}

/// A component that wants to know when its scene is focused again
///
/// The router renders a scene once and keeps it mounted; going back to it
/// only emits a focus action. `handle_scene_focus` is where a component
/// refreshes whatever it would otherwise have refreshed on mount.
///
/// # Example
///
/// ```
/// use scene_focus_core::{
///     CallbackError, FocusHandler, NavigationStateHandler, Screen, ScreenId, SharedScreen,
/// };
///
/// struct Inbox {
///     refreshes: u32,
/// }
///
/// impl Screen for Inbox {
///     fn screen_id(&self) -> ScreenId {
///         "inbox".into()
///     }
/// }
///
/// impl FocusHandler for Inbox {
///     fn handle_scene_focus(&mut self) -> Result<(), CallbackError> {
///         self.refreshes += 1;
///         Ok(())
///     }
/// }
///
/// let handler = NavigationStateHandler::new();
/// let inbox = SharedScreen::new(Inbox { refreshes: 0 });
/// handler.register_focus_hook(&inbox).unwrap();
/// assert_eq!(inbox.borrow().refreshes, 0);
/// ```
pub trait FocusHandler: Screen {
    /// Called synchronously when the router re-focuses this component's scene
    fn handle_scene_focus(&mut self) -> Result<(), CallbackError>;
}

/// The shape accepted by [`HookRegistry::register`](crate::HookRegistry::register)
///
/// A component registers by handing out a focus callback bound to itself.
/// The default implementation hands out nothing, which registration rejects
/// with a [`ConfigurationError`](crate::ConfigurationError).
///
/// [`SharedScreen<C>`] implements this for any `C: FocusHandler`.
pub trait SceneComponent: Screen {
    /// Produce a callback bound to this component, if it handles focus
    fn focus_hook(&self) -> Option<FocusCallback> {
        None
    }

    /// Handle whose last strong reference going away retires this
    /// component's hooks
    ///
    /// `None` means the hooks stay until they are unregistered.
    fn owner(&self) -> Option<Weak<dyn Any>> {
        None
    }
}

/// Shared handle to a focus handling component
///
/// The scene key is read once, when the handle is created. The handle can
/// therefore be registered and unregistered while the component is
/// borrowed, including from inside its own `handle_scene_focus`.
///
/// Derefs to the component's `RefCell`.
pub struct SharedScreen<C> {
    screen_id: ScreenId,
    inner: Rc<RefCell<C>>,
}

impl<C: Screen> SharedScreen<C> {
    pub fn new(component: C) -> Self {
        Self {
            screen_id: component.screen_id(),
            inner: Rc::new(RefCell::new(component)),
        }
    }
}

impl<C> SharedScreen<C> {
    /// Non-owning handle, e.g. for the component to keep a reference to itself
    pub fn downgrade(&self) -> WeakScreen<C> {
        WeakScreen {
            screen_id: self.screen_id.clone(),
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<C> Clone for SharedScreen<C> {
    fn clone(&self) -> Self {
        Self {
            screen_id: self.screen_id.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<C> Deref for SharedScreen<C> {
    type Target = RefCell<C>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<C> fmt::Debug for SharedScreen<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedScreen")
            .field("screen_id", &self.screen_id)
            .finish_non_exhaustive()
    }
}

impl<C> Screen for SharedScreen<C> {
    fn screen_id(&self) -> ScreenId {
        self.screen_id.clone()
    }
}

impl<C: FocusHandler + 'static> SceneComponent for SharedScreen<C> {
    fn focus_hook(&self) -> Option<FocusCallback> {
        let screen_id = self.screen_id.clone();
        let component: Weak<RefCell<C>> = Rc::downgrade(&self.inner);

        Some(Rc::new(move || {
            // dropped components keep no scene alive
            let Some(component) = component.upgrade() else {
                return Ok(());
            };
            let mut component = component.try_borrow_mut().map_err(|_| HandlerBusy {
                screen_id: screen_id.clone(),
            })?;
            component.handle_scene_focus()
        }))
    }

    fn owner(&self) -> Option<Weak<dyn Any>> {
        let owner: Weak<dyn Any> = Rc::downgrade(&self.inner) as Weak<RefCell<C>>;
        Some(owner)
    }
}

/// Weak counterpart of [`SharedScreen`]
pub struct WeakScreen<C> {
    screen_id: ScreenId,
    inner: Weak<RefCell<C>>,
}

impl<C> WeakScreen<C> {
    pub fn upgrade(&self) -> Option<SharedScreen<C>> {
        self.inner.upgrade().map(|inner| SharedScreen {
            screen_id: self.screen_id.clone(),
            inner,
        })
    }
}

impl<C> Clone for WeakScreen<C> {
    fn clone(&self) -> Self {
        Self {
            screen_id: self.screen_id.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<C> fmt::Debug for WeakScreen<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakScreen")
            .field("screen_id", &self.screen_id)
            .finish_non_exhaustive()
    }
}

impl<C> Screen for WeakScreen<C> {
    fn screen_id(&self) -> ScreenId {
        self.screen_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        id: &'static str,
        hits: u32,
    }

    impl Screen for Counter {
        fn screen_id(&self) -> ScreenId {
            self.id.into()
        }
    }

    impl FocusHandler for Counter {
        fn handle_scene_focus(&mut self) -> Result<(), CallbackError> {
            self.hits += 1;
            Ok(())
        }
    }

    struct Plain;

    impl Screen for Plain {
        fn screen_id(&self) -> ScreenId {
            "plain".into()
        }
    }

    impl SceneComponent for Plain {}

    #[test]
    fn test_screen_id_conversions() {
        let id = ScreenId::from("home");
        assert_eq!(id, ScreenId::new(String::from("home")));
        assert_eq!(id, "home");
        assert_eq!(id.as_str(), "home");
        assert_eq!(id.to_string(), "home");
    }

    #[test]
    fn test_screen_id_serializes_as_string() {
        let json = serde_json::to_string(&ScreenId::from("home")).unwrap();
        assert_eq!(json, "\"home\"");
    }

    #[test]
    fn test_default_focus_hook_is_none() {
        assert!(Plain.focus_hook().is_none());
    }

    #[test]
    fn test_shared_component_hook_acts_on_component() {
        let counter = SharedScreen::new(Counter { id: "a", hits: 0 });
        assert_eq!(counter.screen_id(), "a");

        let hook = counter.focus_hook().unwrap();
        hook().unwrap();
        hook().unwrap();
        assert_eq!(counter.borrow().hits, 2);
    }

    #[test]
    fn test_hook_on_dropped_component_is_noop() {
        let counter = SharedScreen::new(Counter { id: "a", hits: 0 });
        let hook = counter.focus_hook().unwrap();
        let owner = counter.owner().unwrap();
        assert_eq!(owner.strong_count(), 1);
        drop(counter);

        assert!(hook().is_ok());
        assert_eq!(owner.strong_count(), 0);
    }

    #[test]
    fn test_hook_reports_busy_component() {
        let counter = SharedScreen::new(Counter { id: "a", hits: 0 });
        let hook = counter.focus_hook().unwrap();

        let _guard = counter.borrow_mut();
        let err = hook().unwrap_err();
        let busy = err.downcast_ref::<HandlerBusy>().unwrap();
        assert_eq!(busy.screen_id, "a");
    }

    #[test]
    fn test_screen_id_available_while_component_borrowed() {
        let counter = SharedScreen::new(Counter { id: "a", hits: 0 });
        let weak = counter.downgrade();

        let _guard = counter.borrow_mut();
        assert_eq!(counter.screen_id(), "a");
        assert_eq!(weak.screen_id(), "a");
        assert_eq!(weak.upgrade().unwrap().screen_id(), "a");
    }

    #[test]
    fn test_weak_screen_does_not_keep_component() {
        let counter = SharedScreen::new(Counter { id: "a", hits: 0 });
        let weak = counter.downgrade();
        let clone = counter.clone();

        drop(counter);
        assert!(weak.upgrade().is_some());
        drop(clone);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_plain_component_has_no_owner() {
        assert!(Plain.owner().is_none());
    }
}
