//! Centralized state store with reducer pattern

use std::marker::PhantomData;

use crate::error::CallbackError;
use crate::Action;

/// A plain reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Anything that can reduce an action into state
///
/// Implemented for every `FnMut(&mut S, A) -> O`, so plain functions and
/// closures can be used directly, and by [`FocusReducer`](crate::FocusReducer).
pub trait Reduce<S, A> {
    type Output;

    fn reduce(&mut self, state: &mut S, action: A) -> Self::Output;
}

impl<S, A, O, F> Reduce<S, A> for F
where
    F: FnMut(&mut S, A) -> O,
{
    type Output = O;

    fn reduce(&mut self, state: &mut S, action: A) -> O {
        self(state, action)
    }
}

/// Centralized state store with Redux-like reducer pattern
///
/// # Example
/// ```
/// use scene_focus_core::{Action, Store};
///
/// #[derive(Default)]
/// struct AppState {
///     counter: i32,
/// }
///
/// #[derive(Clone, Debug)]
/// enum MyAction {
///     Increment,
/// }
///
/// impl Action for MyAction {
///     fn name(&self) -> &'static str {
///         "Increment"
///     }
/// }
///
/// fn reducer(state: &mut AppState, action: MyAction) -> bool {
///     match action {
///         MyAction::Increment => {
///             state.counter += 1;
///             true
///         }
///     }
/// }
///
/// let mut store = Store::new(AppState::default(), reducer);
/// store.dispatch(MyAction::Increment);
/// assert_eq!(store.state().counter, 1);
/// ```
pub struct Store<S, A, R> {
    state: S,
    reducer: R,
    _marker: PhantomData<fn(A)>,
}

impl<S, A, R> Store<S, A, R>
where
    A: Action,
    R: Reduce<S, A>,
{
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: R) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// Returns whatever the reducer returns.
    pub fn dispatch(&mut self, action: A) -> R::Output {
        self.reducer.reduce(&mut self.state, action)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state
    ///
    /// Use this sparingly - prefer dispatching actions for state changes.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Get a reference to the reducer
    pub fn reducer(&self) -> &R {
        &self.reducer
    }
}

/// Store with middleware support
///
/// Works with reducers that can fail, such as a
/// [`FocusReducer`](crate::FocusReducer) wrapping a `bool` reducer.
pub struct StoreWithMiddleware<S, A, R, M> {
    store: Store<S, A, R>,
    middleware: M,
}

impl<S, A, R, M> StoreWithMiddleware<S, A, R, M>
where
    A: Action,
    R: Reduce<S, A, Output = Result<bool, CallbackError>>,
    M: Middleware<A>,
{
    /// Create a new store with middleware
    pub fn new(state: S, reducer: R, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> Result<bool, CallbackError> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        match &result {
            Ok(changed) => self.middleware.after(&action, *changed),
            Err(error) => self.middleware.failed(&action, error),
        }
        result
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}

/// Middleware trait for intercepting actions
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);

    /// Called instead of `after` when a focus hook failed the dispatch
    #[allow(unused_variables)]
    fn failed(&mut self, action: &A, error: &CallbackError) {}
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::NavAction;
    use crate::testing::{CallLog, RecordingScreen};
    use crate::NavigationStateHandler;

    #[derive(Default)]
    struct TestState {
        counter: i32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        NoOp,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "Increment",
                TestAction::NoOp => "NoOp",
            }
        }
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> bool {
        match action {
            TestAction::Increment => {
                state.counter += 1;
                true
            }
            TestAction::NoOp => false,
        }
    }

    fn nav_reducer(state: &mut TestState, _action: NavAction) -> bool {
        state.counter += 1;
        true
    }

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(TestState::default(), test_reducer as Reducer<_, _>);

        assert!(store.dispatch(TestAction::Increment));
        assert!(!store.dispatch(TestAction::NoOp));
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn test_store_accepts_closure() {
        let mut step = 0;
        let mut store = Store::new(TestState::default(), |state: &mut TestState, _: TestAction| {
            step += 2;
            state.counter = step;
        });

        store.dispatch(TestAction::NoOp);
        store.dispatch(TestAction::NoOp);
        assert_eq!(store.state().counter, 4);
    }

    #[test]
    fn test_store_state_mut() {
        let mut store = Store::new(TestState::default(), test_reducer);

        store.state_mut().counter = 100;
        assert_eq!(store.state().counter, 100);
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        after_count: usize,
        failed_count: usize,
    }

    impl<A: Action> Middleware<A> for CountingMiddleware {
        fn before(&mut self, _action: &A) {
            self.before_count += 1;
        }

        fn after(&mut self, _action: &A, _state_changed: bool) {
            self.after_count += 1;
        }

        fn failed(&mut self, _action: &A, _error: &CallbackError) {
            self.failed_count += 1;
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let handler = NavigationStateHandler::new();
        let log = CallLog::new();
        let failing = RecordingScreen::failing("broken", "broken", &log);
        handler.register_focus_hook(&failing).unwrap();

        let mut store = StoreWithMiddleware::new(
            TestState::default(),
            handler.get_reducer(|()| nav_reducer, ()),
            CountingMiddleware::default(),
        );

        store.dispatch(NavAction::focus("home")).unwrap();
        store.dispatch(NavAction::focus("home")).unwrap();
        assert!(store.dispatch(NavAction::focus("broken")).is_err());

        assert_eq!(store.middleware().before_count, 3);
        assert_eq!(store.middleware().after_count, 2);
        assert_eq!(store.middleware().failed_count, 1);
        assert_eq!(store.state().counter, 2);
    }
}
