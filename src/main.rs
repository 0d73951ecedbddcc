use anyhow::{Context, Result};
use clap::Parser;
use std::io;

use mogd::backends::SystemRunner;
use mogd::core::{ConfigArgs, IoStreams};
use mogd::handles::{Dispatcher, TerminalPrompter};

/// Interactive backup and restore for MongoDB via mongodump/mongorestore
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.config.into_config();
    let cwd = std::env::current_dir().context("cannot determine the working directory")?;

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let mut streams = IoStreams {
        stdout: &mut stdout,
        stderr: &mut stderr,
    };

    let status = Dispatcher::new(&config, &cwd).run(
        &mut TerminalPrompter,
        &mut SystemRunner,
        &mut streams,
    )?;

    let code = status.exit_code(config.legacy_exit);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
