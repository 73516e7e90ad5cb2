//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use keycalc::config::Mode;
use keycalc::core::AngleUnit;
use std::path::PathBuf;

/// Keycalc: keypad calculator driven by key scripts
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Keypad mode (overrides the config file)
    #[arg(short, long, global = true)]
    pub mode: Option<ModeArg>,

    /// Angle unit for sin, cos and tan (overrides the config file)
    #[arg(short, long, global = true)]
    pub angle: Option<AngleArg>,

    /// YAML calculator configuration
    #[arg(short, long, global = true, env = "KEYCALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print render models as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a key script and print the display
    Run(RunArgs),

    /// Read key scripts from stdin, one line at a time
    Repl,

    /// Print the keypad layout
    Keypad,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Keys to press, e.g. `2 + 3 * 4 =` or `sin 90 ) =`
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Print the display after every key
    #[arg(long)]
    pub steps: bool,
}

/// Keypad mode argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Four-function keypad
    Basic,
    /// Scientific keypad
    Scientific,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Basic => Self::Basic,
            ModeArg::Scientific => Self::Scientific,
        }
    }
}

/// Angle unit argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleArg {
    /// Radians
    #[value(alias = "rad")]
    Radians,
    /// Degrees
    #[value(alias = "deg")]
    Degrees,
}

impl From<AngleArg> for AngleUnit {
    fn from(arg: AngleArg) -> Self {
        match arg {
            AngleArg::Radians => Self::Radians,
            AngleArg::Degrees => Self::Degrees,
        }
    }
}

/// Color output argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
