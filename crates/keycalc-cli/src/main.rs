//! Keycalc CLI: drive the keypad calculator from the terminal
//!
//! ## Usage
//!
//! ```bash
//! keycalc run 2 + 3 '*' 4 =          # prints 14
//! keycalc --angle deg run sin 90 =   # prints 1
//! keycalc --mode basic keypad        # prints the basic layout
//! echo "1 / 3 =" | keycalc repl      # one display line per input line
//! ```

use clap::Parser;
use keycalc::config::CalculatorConfig;
use keycalc::keypad::Keypad;
use keycalc_cli::{
    load_calculator_config, logging, repl, Cli, CliConfig, CliResult, ColorChoice, Commands,
    Printer, RunArgs, Session, Verbosity,
};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    logging::init_tracing(config.verbosity);
    tracing::info!(
        mode = config.calculator.mode.name(),
        angle = config.calculator.angle_unit.label(),
        "starting"
    );

    let printer = Printer::new(config.color.should_color(), config.json);
    match cli.command {
        Commands::Run(args) => run_keys(&config, &printer, &args),
        Commands::Repl => run_repl(&config, &printer),
        Commands::Keypad => {
            let keypad = Keypad::for_mode(config.calculator.mode);
            if config.json {
                println!("{}", serde_json::to_string(keypad.buttons())?);
            } else {
                print!("{}", printer.keypad(&keypad));
            }
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut calculator = match &cli.config {
        Some(path) => load_calculator_config(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(mode) = cli.mode {
        calculator.mode = mode.into();
    }
    if let Some(angle) = cli.angle {
        calculator.angle_unit = angle.into();
    }

    Ok(CliConfig::new()
        .with_verbosity(Verbosity::from_count(cli.verbose))
        .with_color(ColorChoice::from(cli.color))
        .with_json(cli.json)
        .with_calculator(calculator))
}

fn run_keys(config: &CliConfig, printer: &Printer, args: &RunArgs) -> CliResult<()> {
    let mut session = Session::new(config.calculator.clone());
    let steps = session.press(args.keys.iter().map(String::as_str))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for step in &steps {
        if let keycalc::calculator::Outcome::Rejected(err) = &step.outcome {
            printer.notice(&err.to_string());
        }
        if args.steps && !config.json {
            writeln!(out, "{:<12} {}", format!("{:?}", step.event), step.display)?;
        }
    }

    let model = session.calculator().render();
    writeln!(out, "{}", printer.render(&model)?)?;
    if config.verbosity.is_verbose() && !config.json {
        eprintln!("{}", printer.status(&model));
    }
    Ok(())
}

fn run_repl(config: &CliConfig, printer: &Printer) -> CliResult<()> {
    let mut session = Session::new(config.calculator.clone());
    let stdin = std::io::stdin();
    repl(&mut session, printer, stdin.lock(), std::io::stdout().lock())
}
