//! Test utilities for scene-focus integrations
//!
//! - [`CallLog`]: shared, ordered record of which hooks ran
//! - [`RecordingScreen`]: focus handler that writes its label into a [`CallLog`]
//! - [`BareScreen`]: scene component without a focus handler
//! - [`focus`] / [`nav`]: action builders
//! - [`assert_fired!`](crate::assert_fired): compare a [`CallLog`] to expected labels
//!
//! # Example
//!
//! ```
//! use scene_focus_core::testing::{focus, CallLog, RecordingScreen};
//! use scene_focus_core::{assert_fired, NavAction, NavigationStateHandler, Reduce};
//!
//! let handler = NavigationStateHandler::new();
//! let log = CallLog::new();
//! let home = RecordingScreen::shared("home", "home-1", &log);
//! handler.register_focus_hook(&home).unwrap();
//!
//! let mut reducer = handler.get_reducer(|()| |_: &mut (), _: NavAction| true, ());
//! reducer.reduce(&mut (), focus("home")).unwrap();
//!
//! assert_fired!(log, ["home-1"]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::action::NavAction;
use crate::error::CallbackError;
use crate::screen::{FocusHandler, SceneComponent, Screen, ScreenId, SharedScreen};

/// Build a focus action for a scene
pub fn focus(screen_id: &str) -> NavAction {
    NavAction::focus(screen_id)
}

/// Build an action of the given type with no scene
pub fn nav(action_type: &str) -> NavAction {
    NavAction::new(action_type)
}

/// Ordered record of hook invocations, shared between clones
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<String>>>,
}

impl fmt::Debug for CallLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.calls.borrow().iter()).finish()
    }
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, label: impl Into<String>) {
        self.calls.borrow_mut().push(label.into());
    }

    /// All recorded labels, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// How many times `label` was recorded
    pub fn count(&self, label: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == label).count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// Focus handler that records its label on every focus
pub struct RecordingScreen {
    pub screen_id: ScreenId,
    pub label: String,
    /// Number of times this handler ran
    pub focused: u32,
    /// When set, the handler records itself and then fails
    pub fail: bool,
    log: CallLog,
}

impl RecordingScreen {
    pub fn new(screen_id: &str, label: &str, log: &CallLog) -> Self {
        Self {
            screen_id: screen_id.into(),
            label: label.to_string(),
            focused: 0,
            fail: false,
            log: log.clone(),
        }
    }

    /// Shared handle, ready to be registered
    pub fn shared(screen_id: &str, label: &str, log: &CallLog) -> SharedScreen<Self> {
        SharedScreen::new(Self::new(screen_id, label, log))
    }

    /// Shared handle whose handler fails with `"<label> failed"`
    pub fn failing(screen_id: &str, label: &str, log: &CallLog) -> SharedScreen<Self> {
        let screen = Self::shared(screen_id, label, log);
        screen.borrow_mut().fail = true;
        screen
    }
}

impl Screen for RecordingScreen {
    fn screen_id(&self) -> ScreenId {
        self.screen_id.clone()
    }
}

impl FocusHandler for RecordingScreen {
    fn handle_scene_focus(&mut self) -> Result<(), CallbackError> {
        self.focused += 1;
        self.log.push(self.label.clone());
        if self.fail {
            return Err(format!("{} failed", self.label).into());
        }
        Ok(())
    }
}

/// Scene component that never provides a focus hook
#[derive(Debug, Clone)]
pub struct BareScreen {
    pub screen_id: ScreenId,
}

impl BareScreen {
    pub fn new(screen_id: &str) -> Self {
        Self {
            screen_id: screen_id.into(),
        }
    }
}

impl Screen for BareScreen {
    fn screen_id(&self) -> ScreenId {
        self.screen_id.clone()
    }
}

impl SceneComponent for BareScreen {}

/// Assert the exact sequence of labels recorded in a [`CallLog`].
///
/// # Example
///
/// ```ignore
/// assert_fired!(log, ["first", "second"]);
/// assert_fired!(log, []);
/// ```
#[macro_export]
macro_rules! assert_fired {
    ($log:expr, [$($label:expr),* $(,)?]) => {{
        let expected: ::std::vec::Vec<::std::string::String> =
            ::std::vec![$(::std::string::String::from($label)),*];
        assert_eq!(
            $log.calls(),
            expected,
            "Unexpected focus hook invocations"
        );
    }};
}
