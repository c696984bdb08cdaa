// SPDX-License-Identifier: MIT OR Apache-2.0

//! Baag-Chal CLI - headless script runner
//!
//! Replays a command script against a fresh game and prints the outcome of
//! every command as one JSON object per line. Used for integration tests
//! and for checking rule edge cases without a user interface.

use anyhow::{Context, Result};
use baagchal_cli::{run_script, script::parse_script};
use baagchal_core::{GameOutcome, RulesConfig, Session};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "baagchal-cli",
    about = "Replay Baag-Chal command scripts",
    version
)]
struct Args {
    /// Script to run; reads stdin when omitted
    script: Option<PathBuf>,

    /// TOML file with rule parameters (max_goats, captures_to_win)
    #[clap(short, long)]
    rules: Option<PathBuf>,

    /// Stop at the first rejected command and exit with an error
    #[clap(long)]
    strict: bool,

    /// Print the final session state after the script
    #[clap(long)]
    snapshot: bool,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            Ok(source)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = match &args.rules {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        None => RulesConfig::default(),
    };

    let source = read_script(args.script.as_ref())?;
    let lines = parse_script(&source).context("Failed to parse script")?;

    let mut session = Session::with_config(config)?.with_listener(|outcome: &GameOutcome| {
        tracing::info!("{}", outcome);
    });

    let entries = run_script(&mut session, &lines, args.strict)?;
    for entry in &entries {
        println!("{}", serde_json::to_string(entry)?);
    }

    if args.snapshot {
        println!("{}", serde_json::to_string(&session.snapshot())?);
    }

    let rejected = entries.iter().filter(|entry| entry.is_rejected()).count();
    tracing::info!(
        commands = entries.len(),
        rejected,
        game_over = session.is_game_over(),
        "Script finished"
    );

    Ok(())
}
