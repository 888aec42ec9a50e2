// src/main.rs
//
// Starts the logging stack the way a server would and reports what it built

use std::path::PathBuf;
use clap::Parser;
use anyhow::{Context, Result};
use tracing::{debug, info};

use logkit::config::Settings;
use logkit::{startup, transport};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Configure a structured logger from a settings file and emit a startup record")]
struct Args {
    /// Settings file
    #[arg(long, value_name = "FILE", help = "Settings file (.json or .toml)")]
    config: Option<PathBuf>,

    /// Output destinations, replacing those from the settings file
    #[arg(long = "output", value_name = "DEST", help = "Log output: stdout, stderr or a file path (repeatable)")]
    outputs: Vec<String>,

    /// Enable debug logging
    #[arg(long, help = "Enable debug level logging and transport tracing")]
    debug: bool,

    /// Print the resolved logger settings as JSON
    #[arg(long, help = "Print the resolved logger settings as JSON after setup")]
    print_settings: bool,

    /// Print an example settings file and exit
    #[arg(long, help = "Print an example TOML settings file and exit")]
    example_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.example_config {
        print!("{}", Settings::example_toml());
        return Ok(());
    }

    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };
    settings.apply_env_vars()?;

    if !args.outputs.is_empty() {
        settings.log.outputs = args.outputs.clone();
    }
    if args.debug {
        settings.log.debug = true;
    }
    settings.validate()?;

    let logger = startup::init(&settings).context("failed to setup logging")?;
    logger.set_global_default()?;

    info!(version = env!("CARGO_PKG_VERSION"), "logkit started");
    debug!(rpc_tracing = transport::tracing_enabled(), "debug logging enabled");

    if args.print_settings {
        println!("{}", serde_json::to_string_pretty(logger.settings())?);
    }

    Ok(())
}
