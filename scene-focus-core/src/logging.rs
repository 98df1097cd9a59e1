//! Dispatch logging with pattern-based action filtering
//!
//! ```
//! use scene_focus_core::logging::{ActionLoggerConfig, LoggingMiddleware};
//!
//! // Only log focus and back navigation
//! let config = ActionLoggerConfig::new(Some("Focus,Back*"), None);
//! let middleware = LoggingMiddleware::new().with_filter(config);
//! ```

use serde::Deserialize;

use crate::error::CallbackError;
use crate::store::Middleware;
use crate::Action;

/// Which actions get logged, by [`Action::name`]
///
/// Patterns are globs: `*` matches any run of characters, `?` exactly one.
/// Can be deserialized from `{"include": [...], "exclude": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActionLoggerConfig {
    /// If non-empty, only actions matching one of these are logged
    #[serde(rename = "include")]
    pub include_patterns: Vec<String>,
    /// Actions matching any of these are never logged
    #[serde(rename = "exclude")]
    pub exclude_patterns: Vec<String>,
}

impl Default for ActionLoggerConfig {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            exclude_patterns: vec!["Refresh".to_string()],
        }
    }
}

impl ActionLoggerConfig {
    /// Build from comma-separated pattern lists
    ///
    /// `None` for `exclude` keeps the default exclusions.
    ///
    /// ```
    /// use scene_focus_core::logging::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("Focus, Pop*"), Some("PopTo"));
    /// assert!(config.should_log("Focus"));
    /// assert!(!config.should_log("PopTo"));
    /// assert!(!config.should_log("Push"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            include_patterns: include
                .map(split_patterns)
                .unwrap_or(defaults.include_patterns),
            exclude_patterns: exclude
                .map(split_patterns)
                .unwrap_or(defaults.exclude_patterns),
        }
    }

    /// Log every action
    pub fn all() -> Self {
        Self {
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    pub fn should_log(&self, action_name: &str) -> bool {
        let included = self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name));

        included
            && !self
                .exclude_patterns
                .iter()
                .any(|p| glob_match(p, action_name))
    }
}

fn split_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// Match `text` against a glob with `*` and `?` wildcards
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // position of the last `*` and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, t));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Middleware that logs dispatched actions via `tracing`
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
    pub filter: ActionLoggerConfig,
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingMiddleware {
    /// Log after dispatch only, with the default filter
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
            filter: ActionLoggerConfig::default(),
        }
    }

    /// Log both before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            ..Self::new()
        }
    }

    pub fn with_filter(mut self, filter: ActionLoggerConfig) -> Self {
        self.filter = filter;
        self
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before && self.filter.should_log(action.name()) {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after && self.filter.should_log(action.name()) {
            tracing::debug!(action = %action.name(), state_changed, "Action processed");
        }
    }

    fn failed(&mut self, action: &A, error: &CallbackError) {
        // failures are logged regardless of the filter
        tracing::warn!(action = %action.name(), %error, "Focus hook failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match_exact() {
        assert!(glob_match("Focus", "Focus"));
        assert!(!glob_match("Focus", "Push"));
        assert!(!glob_match("Back", "BackAction"));
    }

    #[test]
    fn test_glob_match_star() {
        assert!(glob_match("Back*", "BackAction"));
        assert!(glob_match("Back*", "Back"));
        assert!(!glob_match("Back*", "PopBack"));
        assert!(glob_match("*Action", "BackAction"));
        assert!(glob_match("*o*", "PopTo"));
        assert!(glob_match("*", ""));
    }

    #[test]
    fn test_glob_match_backtracks() {
        assert!(glob_match("*aab", "aaab"));
        assert!(glob_match("P*T*", "PopTo"));
        assert!(!glob_match("P*x*", "PopTo"));
    }

    #[test]
    fn test_glob_match_question() {
        assert!(glob_match("Pus?", "Push"));
        assert!(!glob_match("Pus?", "Pus"));
        assert!(!glob_match("Pus?", "Pushed"));
    }

    #[test]
    fn test_config_include_and_exclude() {
        let config = ActionLoggerConfig::new(Some("Back*,Focus"), Some("BackAction"));
        assert!(config.should_log("Back"));
        assert!(config.should_log("Focus"));
        assert!(!config.should_log("BackAction"));
        assert!(!config.should_log("Push"));
    }

    #[test]
    fn test_config_default_excludes_refresh() {
        let config = ActionLoggerConfig::default();
        assert!(!config.should_log("Refresh"));
        assert!(config.should_log("Focus"));
        assert!(ActionLoggerConfig::all().should_log("Refresh"));
    }

    #[test]
    fn test_config_deserialize() {
        let config: ActionLoggerConfig =
            serde_json::from_str(r#"{"include": ["Focus"]}"#).unwrap();
        assert_eq!(config.include_patterns, vec!["Focus"]);
        assert_eq!(config.exclude_patterns, vec!["Refresh"]);
    }

    #[test]
    fn test_verbose_middleware() {
        let middleware = LoggingMiddleware::verbose();
        assert!(middleware.log_before);
        assert!(middleware.log_after);
    }
}
