//! WordWheel Application
//!
//! Headless shell around the game engine: reads configuration, replays
//! pointer scripts, reports notifications and renders frames.

mod app;
mod script;

pub use app::{App, AppConfig, AppError, AppResult};
pub use script::{Action, ScriptError, ScriptStep, parse_line, parse_script};
