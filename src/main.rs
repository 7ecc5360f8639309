use std::env;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use drawing_shell::shell::messages;
use drawing_shell::{load_config, Shell};

/// Draw on a text canvas from a script or an interactive prompt
#[derive(Debug, Parser)]
#[command(name = "drawing-shell", version, about)]
struct Cli {
    /// File with one command per line; stdin is used when omitted
    script: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log informational messages to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Log debug messages to stderr
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!(
        "Starting drawing-shell version {}",
        env!("CARGO_PKG_VERSION")
    );

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut shell = Shell::new(config);
    let mut stdout = io::stdout().lock();

    match cli.script {
        Some(path) => {
            let path = if let Ok(dir) = env::current_dir() {
                dir.join(path)
            } else {
                path
            };
            if !path.exists() {
                let shown = path.display().to_string();
                writeln!(stdout, "{}", messages::file_not_found(&shown))?;
                return Ok(());
            }
            let file = File::open(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            shell.run_script(BufReader::new(file), &mut stdout)?;
        }
        None if io::stdin().is_terminal() => {
            drop(stdout);
            shell.run_interactive()?;
        }
        None => {
            shell.run_script(io::stdin().lock(), &mut stdout)?;
        }
    }

    tracing::debug!("shell finished");
    Ok(())
}
