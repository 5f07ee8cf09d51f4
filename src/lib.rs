//! mcintent - compiles recognized natural-language intents into game commands.
//!
//! The language pipeline hands over a matched intent whose terms are bound to
//! semantic entities; this crate resolves players, positions, quantities and
//! registry names out of those entities and renders one command line.

pub mod commands;
pub mod config;
mod error;
pub mod intent;
pub mod resolve;

pub use commands::{format_fill, GameCommand, TimeOfDay, WeatherState};
pub use config::CompilerConfig;
pub use error::{CompileError, ErrorClass};
pub use intent::{Intent, IntentCompiler, IntentMatch};
