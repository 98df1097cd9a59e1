//! Focus replay - feed a recorded router action log through focus hooks
//!
//! Reads newline-delimited JSON router actions, registers a counting screen
//! for every `--screen`, dispatches each action through a `FocusReducer`
//! and prints how often each screen was focused.
//!
//! ```text
//! focus-replay --screen Home --screen Settings --input actions.jsonl
//! RUST_LOG=scene_focus_core=debug focus-replay < actions.jsonl
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use scene_focus::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "focus-replay")]
#[command(about = "Replay router actions through scene focus hooks")]
struct Args {
    /// Newline-delimited JSON actions (defaults to stdin)
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Scene to count focus events for (repeatable)
    #[arg(long = "screen", short, default_value = "Home")]
    screens: Vec<String>,

    /// Comma-separated action name globs to log (e.g. "Focus,Back*")
    #[arg(long)]
    log_actions: Option<String>,
}

// ============================================================================
// Screens - What gets told about focus
// ============================================================================

struct CountingScreen {
    id: ScreenId,
    focused: u32,
}

impl Screen for CountingScreen {
    fn screen_id(&self) -> ScreenId {
        self.id.clone()
    }
}

impl FocusHandler for CountingScreen {
    fn handle_scene_focus(&mut self) -> Result<(), CallbackError> {
        self.focused += 1;
        tracing::info!(screen = %self.id, focused = self.focused, "Screen focused");
        Ok(())
    }
}

// ============================================================================
// Router - Stand-in for the router's own reducer
// ============================================================================

#[derive(Debug, Default)]
struct RouterState {
    stack: Vec<ScreenId>,
}

struct RouterParams {
    initial: Option<ScreenId>,
}

fn router_reducer(params: RouterParams) -> impl FnMut(&mut RouterState, NavAction) -> bool {
    let mut initial = params.initial;
    move |state, action| {
        if let Some(scene) = initial.take() {
            state.stack.push(scene);
        }
        match (action.known_type(), action.scene_key()) {
            (Some(ActionType::Push), Some(scene)) => {
                state.stack.push(scene.clone());
                true
            }
            (Some(ActionType::Back | ActionType::BackAction), _) => state.stack.pop().is_some(),
            (Some(ActionType::Reset), Some(scene)) => {
                state.stack = vec![scene.clone()];
                true
            }
            _ => false,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let handler = NavigationStateHandler::new();
    let screens: Vec<_> = args
        .screens
        .iter()
        .map(|id| {
            SharedScreen::new(CountingScreen {
                id: id.into(),
                focused: 0,
            })
        })
        .collect();
    for screen in &screens {
        handler.register_focus_hook(screen)?;
    }

    let params = RouterParams {
        initial: screens.first().map(Screen::screen_id),
    };
    let filter = ActionLoggerConfig::new(args.log_actions.as_deref(), None);
    let mut store = StoreWithMiddleware::new(
        RouterState::default(),
        handler.get_reducer(router_reducer, params),
        LoggingMiddleware::verbose().with_filter(filter),
    );

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("reading action log")?;
        if line.trim().is_empty() {
            continue;
        }
        let action: NavAction = serde_json::from_str(&line)
            .with_context(|| format!("line {}: invalid action", index + 1))?;
        store
            .dispatch(action)
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("line {}: focus hook failed", index + 1))?;
    }

    for screen in &screens {
        let screen = screen.borrow();
        println!("{}: {}", screen.id, screen.focused);
    }
    let stack: Vec<&str> = store.state().stack.iter().map(ScreenId::as_str).collect();
    println!("stack: {}", stack.join(" > "));

    Ok(())
}
