//! Reducer interception for scene focus actions
//!
//! The router renders a scene once. When the user navigates back to it the
//! scene is not remounted and its props do not change; the only signal is a
//! focus action on the action stream. [`FocusReducer`] wraps the router's
//! reducer, watches for that action and runs the hooks registered for the
//! focused scene before handing the action on.
//!
//! # Example
//!
//! ```
//! use scene_focus_core::prelude::*;
//!
//! struct Home {
//!     visits: u32,
//! }
//!
//! impl Screen for Home {
//!     fn screen_id(&self) -> ScreenId {
//!         "home".into()
//!     }
//! }
//!
//! impl FocusHandler for Home {
//!     fn handle_scene_focus(&mut self) -> Result<(), CallbackError> {
//!         self.visits += 1;
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Default)]
//! struct RouterState {
//!     current: Option<ScreenId>,
//! }
//!
//! fn router_reducer(_config: ()) -> impl FnMut(&mut RouterState, NavAction) -> bool {
//!     |state, action| {
//!         state.current = action.scene_key().cloned();
//!         true
//!     }
//! }
//!
//! let handler = NavigationStateHandler::new();
//! let home = SharedScreen::new(Home { visits: 0 });
//! handler.register_focus_hook(&home).unwrap();
//!
//! let mut store = Store::new(RouterState::default(), handler.get_reducer(router_reducer, ()));
//! store.dispatch(NavAction::focus("home")).unwrap();
//!
//! assert_eq!(home.borrow().visits, 1);
//! assert_eq!(store.state().current, Some("home".into()));
//! ```

use std::marker::PhantomData;

use crate::action::RouterAction;
use crate::error::{CallbackError, ConfigurationError};
use crate::registry::HookRegistry;
use crate::screen::{SceneComponent, Screen};
use crate::store::Reduce;

/// Reducer that fires scene focus hooks before delegating to a base reducer
///
/// The base reducer always sees the original state and action, and its
/// output is returned untouched. If a hook fails, the remaining hooks and
/// the base reducer are skipped and the hook's error is returned.
pub struct FocusReducer<S, A, R> {
    registry: HookRegistry,
    base: R,
    _marker: PhantomData<fn(&mut S, A)>,
}

impl<S, A, R> FocusReducer<S, A, R>
where
    A: RouterAction,
    R: Reduce<S, A>,
{
    /// Wrap `base`, firing hooks from `registry`
    pub fn new(registry: HookRegistry, base: R) -> Self {
        Self {
            registry,
            base,
            _marker: PhantomData,
        }
    }

    /// Registry this reducer fires hooks from
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Get a reference to the wrapped reducer
    pub fn base(&self) -> &R {
        &self.base
    }
}

impl<S, A, R> Reduce<S, A> for FocusReducer<S, A, R>
where
    A: RouterAction,
    R: Reduce<S, A>,
{
    type Output = Result<R::Output, CallbackError>;

    fn reduce(&mut self, state: &mut S, action: A) -> Self::Output {
        if let Some(screen_id) = action.focus_target() {
            self.registry.fire(screen_id)?;
        }
        Ok(self.base.reduce(state, action))
    }
}

/// Entry point for components and for the store setup
///
/// Owns a [`HookRegistry`] and builds reducers that fire hooks from it.
/// Clones share the registry, so a clone can be handed to components.
#[derive(Debug, Clone, Default)]
pub struct NavigationStateHandler {
    registry: HookRegistry,
}

impl NavigationStateHandler {
    /// Create a handler with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler around an existing registry
    pub fn with_registry(registry: HookRegistry) -> Self {
        Self { registry }
    }

    /// Register a component's focus hook for its scene
    pub fn register_focus_hook<C>(&self, component: &C) -> Result<(), ConfigurationError>
    where
        C: SceneComponent + ?Sized,
    {
        self.registry.register(component)
    }

    /// Remove all focus hooks for the component's scene
    ///
    /// Hooks registered by other components on the same scene are removed
    /// as well.
    pub fn unregister_focus_hook<C>(&self, component: &C) -> usize
    where
        C: Screen + ?Sized,
    {
        self.registry.unregister(component)
    }

    /// Build the router's reducer from `factory` and wrap it
    ///
    /// `factory` is called once, right here, with `config`. Install the
    /// returned reducer in the store in place of the router's own.
    pub fn get_reducer<S, A, C, F, R>(&self, factory: F, config: C) -> FocusReducer<S, A, R>
    where
        A: RouterAction,
        F: FnOnce(C) -> R,
        R: Reduce<S, A>,
    {
        FocusReducer::new(self.registry.clone(), factory(config))
    }

    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }
}
