//! Core traits and types for scene-focus
//!
//! A router that keeps scenes mounted only tells the rest of the app that a
//! scene became visible again through a focus action. This crate lets
//! components hook onto that action.
//!
//! # Core Concepts
//!
//! - **Screen**: A component living on a router scene, identified by [`ScreenId`]
//! - **FocusHandler**: A screen that wants to run code when its scene is re-focused
//! - **HookRegistry**: Ordered scene -> callback associations
//! - **FocusReducer**: Wraps the router's reducer and fires matching hooks
//!   before every focus action reaches it
//! - **Store**: Centralized state container with reducer pattern
//!
//! # Basic Example
//!
//! ```ignore
//! use scene_focus_core::prelude::*;
//!
//! let handler = NavigationStateHandler::new();
//!
//! // In the component's mount
//! handler.register_focus_hook(&inbox)?;
//!
//! // Once, when setting up the store
//! let reducer = handler.get_reducer(router::reducer, router_params);
//! let mut store = Store::new(RouterState::default(), reducer);
//!
//! // Navigating back to the inbox now runs `Inbox::handle_scene_focus`
//! store.dispatch(NavAction::focus("inbox"))?;
//!
//! // In the component's unmount
//! handler.unregister_focus_hook(&inbox);
//! ```
//!
//! # Threading
//!
//! Everything here is single-threaded: hooks run synchronously on the thread
//! that dispatches, and the registry is shared through `Rc`.

pub mod action;
pub mod error;
pub mod focus;
pub mod logging;
pub mod registry;
pub mod screen;
pub mod store;
pub mod testing;

pub use action::{
    Action, ActionType, NavAction, RouterAction, SceneDescriptor, UnknownActionType, FOCUS,
};
pub use error::{CallbackError, ConfigurationError, HandlerBusy};
pub use focus::{FocusReducer, NavigationStateHandler};
pub use logging::{ActionLoggerConfig, LoggingMiddleware};
pub use registry::{HookEntry, HookRegistry};
pub use screen::{
    FocusCallback, FocusHandler, SceneComponent, Screen, ScreenId, SharedScreen, WeakScreen,
};
pub use store::{Middleware, NoopMiddleware, Reduce, Reducer, Store, StoreWithMiddleware};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionType, NavAction, RouterAction, SceneDescriptor};
    pub use crate::error::{CallbackError, ConfigurationError};
    pub use crate::focus::{FocusReducer, NavigationStateHandler};
    pub use crate::logging::{ActionLoggerConfig, LoggingMiddleware};
    pub use crate::registry::HookRegistry;
    pub use crate::screen::{
        FocusHandler, SceneComponent, Screen, ScreenId, SharedScreen, WeakScreen,
    };
    pub use crate::store::{
        Middleware, NoopMiddleware, Reduce, Reducer, Store, StoreWithMiddleware,
    };
}
