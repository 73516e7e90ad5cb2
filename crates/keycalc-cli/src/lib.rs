//! Keycalc CLI library
//!
//! Replays key scripts against the keycalc engine and prints what the
//! display would show.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod runner;

pub use commands::{AngleArg, Cli, ColorArg, Commands, ModeArg, RunArgs};
pub use config::{
    load_calculator_config, parse_calculator_config, CliConfig, ColorChoice, Verbosity,
};
pub use error::{CliError, CliResult};
pub use output::Printer;
pub use runner::{repl, script_events, word_events, Session, Step};
