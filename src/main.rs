//! keypadgen - ESPHome fragment generator for keypad buttons
//!
//! Reads a keypad editor button list and writes the ESPHome sensors, lights
//! and Home Assistant bindings each button expands into.

use clap::{Parser, Subcommand};
use keypadgen::cli::{
    CliResult, ConfigArgs, GenerateArgs, InspectArgs, MapArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// keypadgen - ESPHome fragment generator for keypad buttons
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate ESPHome YAML for a button list
    Generate(GenerateArgs),
    /// Validate a button list
    Validate(ValidateArgs),
    /// Show the fragments for one button
    Inspect(InspectArgs),
    /// Draw the button list on the physical keypad
    Map(MapArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Command::Generate(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Inspect(args) => args.execute(),
        Command::Map(args) => args.execute(),
        Command::Config(args) => args.execute(),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code().code());
    }
}
