//! Action traits and the router's action protocol

use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::screen::ScreenId;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: So they can be produced on another thread and queued
///
/// Use `#[derive(Action)]` from `scene-focus-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Wire value of the router's focus action
pub const FOCUS: &str = "REACT_NATIVE_ROUTER_FLUX_FOCUS";

/// Action types emitted by the router
///
/// Each variant maps to the literal type string the router puts on the wire.
/// Only [`ActionType::Focus`] is interpreted by this crate; the rest exist so
/// hosts can build and name router actions without repeating the strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Jump,
    Push,
    Replace,
    Back,
    BackAction,
    PopTo,
    Refresh,
    Reset,
    Focus,
}

impl ActionType {
    /// All router action types
    pub const ALL: [ActionType; 9] = [
        ActionType::Jump,
        ActionType::Push,
        ActionType::Replace,
        ActionType::Back,
        ActionType::BackAction,
        ActionType::PopTo,
        ActionType::Refresh,
        ActionType::Reset,
        ActionType::Focus,
    ];

    /// The literal type string used by the router
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionType::Jump => "REACT_NATIVE_ROUTER_FLUX_JUMP",
            ActionType::Push => "REACT_NATIVE_ROUTER_FLUX_PUSH",
            ActionType::Replace => "REACT_NATIVE_ROUTER_FLUX_REPLACE",
            ActionType::Back => "REACT_NATIVE_ROUTER_FLUX_BACK",
            ActionType::BackAction => "REACT_NATIVE_ROUTER_FLUX_BACK_ACTION",
            ActionType::PopTo => "REACT_NATIVE_ROUTER_FLUX_POP_TO",
            ActionType::Refresh => "REACT_NATIVE_ROUTER_FLUX_REFRESH",
            ActionType::Reset => "REACT_NATIVE_ROUTER_FLUX_RESET",
            ActionType::Focus => FOCUS,
        }
    }

    /// Short name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            ActionType::Jump => "Jump",
            ActionType::Push => "Push",
            ActionType::Replace => "Replace",
            ActionType::Back => "Back",
            ActionType::BackAction => "BackAction",
            ActionType::PopTo => "PopTo",
            ActionType::Refresh => "Refresh",
            ActionType::Reset => "Reset",
            ActionType::Focus => "Focus",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the router's action types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown router action type `{0}`")]
pub struct UnknownActionType(pub String);

impl FromStr for ActionType {
    type Err = UnknownActionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownActionType(s.to_string()))
    }
}

/// An action as seen on the router's action stream
///
/// Implement this for your own action type (usually by delegating to a
/// wrapped [`NavAction`]) so a [`FocusReducer`](crate::FocusReducer) can
/// recognise focus events in it.
pub trait RouterAction: Action {
    /// Raw type string of the action
    fn action_type(&self) -> &str;

    /// Key of the scene this action targets, if it carries one
    fn scene_key(&self) -> Option<&ScreenId>;

    /// The scene being re-focused, if this is a focus action with a scene
    fn focus_target(&self) -> Option<&ScreenId> {
        if self.action_type() == FOCUS {
            self.scene_key()
        } else {
            None
        }
    }
}

/// Scene descriptor carried by router actions
///
/// Fields other than the scene key are kept verbatim in `params`. A scene
/// without a key is accepted; it matches no focus hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    #[serde(
        rename = "sceneKey",
        alias = "screenId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub screen_id: Option<ScreenId>,
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl SceneDescriptor {
    pub fn new(screen_id: impl Into<ScreenId>) -> Self {
        Self {
            screen_id: Some(screen_id.into()),
            params: serde_json::Map::new(),
        }
    }

    /// Attach an extra scene field
    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }
}

/// A router action: `{"type": "...", "scene": {"sceneKey": "...", ...}}`
///
/// # Example
///
/// ```
/// use scene_focus_core::{NavAction, RouterAction};
///
/// let action: NavAction = serde_json::from_str(
///     r#"{"type":"REACT_NATIVE_ROUTER_FLUX_FOCUS","scene":{"sceneKey":"home"}}"#,
/// ).unwrap();
/// assert_eq!(action.focus_target().map(|s| s.as_str()), Some("home"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavAction {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneDescriptor>,
}

impl NavAction {
    /// Create an action of the given type with no scene
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            scene: None,
        }
    }

    /// Create a focus action for a scene
    pub fn focus(screen_id: impl Into<ScreenId>) -> Self {
        Self::new(FOCUS).with_scene(SceneDescriptor::new(screen_id))
    }

    pub fn with_scene(mut self, scene: SceneDescriptor) -> Self {
        self.scene = Some(scene);
        self
    }

    /// The known router type of this action, if any
    pub fn known_type(&self) -> Option<ActionType> {
        self.action_type.parse().ok()
    }
}

impl From<ActionType> for NavAction {
    fn from(action_type: ActionType) -> Self {
        Self::new(action_type.as_str())
    }
}

impl Action for NavAction {
    fn name(&self) -> &'static str {
        self.known_type().map_or("Custom", ActionType::name)
    }
}

impl RouterAction for NavAction {
    fn action_type(&self) -> &str {
        &self.action_type
    }

    fn scene_key(&self) -> Option<&ScreenId> {
        self.scene
            .as_ref()
            .and_then(|scene| scene.screen_id.as_ref())
    }
}
