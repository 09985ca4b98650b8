use std::io::BufRead;

use anyhow::Context; // For `context()`
use clap::Parser;

use git_versioner::{cli, describe, logging};

fn read_stdin() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read describe output from stdin")?;
    Ok(line)
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let options = logging::LoggingOptions::from_env(env!("APP_VERSION"))
        .context("Failed to read logging configuration")?;
    let log_guard = logging::init(options).context("Failed to setup logging")?;

    let raw = match &args.describe {
        Some(describe) => describe.clone(),
        None => read_stdin()?,
    };
    let input = raw.trim();

    let version = match describe::parse(input) {
        Ok(version) => version,
        Err(err) => {
            slog_scope::error!("Rejected describe output"; "input" => input, "error" => %err);
            drop(log_guard);
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to parse {:?}", input)));
        }
    };
    slog_scope::debug!("Parsed describe output"; "input" => input, "version" => %version);

    println!("{}", args.render(&version));

    drop(log_guard);
    Ok(())
}
