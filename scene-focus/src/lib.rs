//! scene-focus: re-run "became visible again" callbacks for router scenes
//!
//! Stack routers render a scene once and keep it mounted. Navigating back to
//! it changes neither its props nor its lifecycle; the router only emits a
//! focus action. Register a component's focus handler with a
//! [`NavigationStateHandler`] and install the reducer it builds in place of
//! the router's, and the handler runs on every focus of its scene.
//!
//! # Example
//! ```ignore
//! use scene_focus::prelude::*;
//!
//! #[derive(Screen)]
//! #[screen(id = "inbox")]
//! struct Inbox {
//!     unread: usize,
//! }
//!
//! impl FocusHandler for Inbox {
//!     fn handle_scene_focus(&mut self) -> Result<(), CallbackError> {
//!         self.unread = mailbox::count_unread()?;
//!         Ok(())
//!     }
//! }
//!
//! let handler = NavigationStateHandler::new();
//! let inbox = SharedScreen::new(Inbox { unread: 0 });
//! handler.register_focus_hook(&inbox)?;
//! let mut store = Store::new(RouterState::default(), handler.get_reducer(router::reducer, params));
//! ```

// Re-export everything from core
pub use scene_focus_core::*;

// Re-export derive macros
pub use scene_focus_macros::{Action, Screen};

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use scene_focus_core::{Action, FocusHandler, Reduce, RouterAction, SceneComponent, Screen};

    // Router protocol
    pub use scene_focus_core::{ActionType, NavAction, SceneDescriptor, ScreenId, FOCUS};

    // Hooks
    pub use scene_focus_core::{
        CallbackError, ConfigurationError, FocusReducer, HookRegistry, NavigationStateHandler,
        SharedScreen, WeakScreen,
    };

    // Store
    pub use scene_focus_core::{
        ActionLoggerConfig, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
        StoreWithMiddleware,
    };

    // Derive macros
    pub use scene_focus_macros::{Action, Screen};
}
