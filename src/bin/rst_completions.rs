//! Prints the auto-complete-rst completion tables to stdout.
//!
//! Takes no arguments; behavior is configured through `RSTCOMPLETE_*`
//! environment variables. The whole file is rendered before anything is
//! written, so a failed run leaves stdout empty.

use anyhow::{Context, Result};
use rstcomplete::{Config, generate};
use std::env;
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage: rst-completions [-h|--help]

Generate auto-complete-rst directive, option and role tables (Emacs Lisp).

Environment:
  RSTCOMPLETE_REGISTRY                 registry snapshot replacing the embedded docutils one
  RSTCOMPLETE_EXTENSIONS               extension bundle files, comma or space separated
  RSTCOMPLETE_LANGUAGE                 locale for role aliases (default: en)
  RSTCOMPLETE_SKIP_BUILTIN_EXTENSIONS  set to skip the embedded sphinx bundle
  RUST_LOG                             log filter (default: rstcomplete=warn)";

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    parse_args();

    let config = Config::from_env();
    tracing::debug!(?config, "configuration loaded");
    let output = generate(&config)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("writing generated source to stdout")?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rstcomplete=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn parse_args() {
    let mut args = env::args().skip(1);
    let Some(first) = args.next() else {
        return;
    };
    if matches!(first.as_str(), "-h" | "--help") && args.next().is_none() {
        println!("{USAGE}");
        std::process::exit(0);
    }
    usage_and_exit();
}

fn usage_and_exit() -> ! {
    eprintln!("{USAGE}");
    std::process::exit(1);
}
