//! stubgen command-line tool
//!
//! Emits, builds and checks delegating wrappers from JSON type descriptors.

mod app;
mod commands;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};
use crate::output::{resolve_color_choice, StyledOutput};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Warnings on stderr; --verbose enables debug; RUST_LOG overrides
    let level = if cli.global.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_module("stubgen_engine", level)
        .filter_module("stubgen", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let mut out = StyledOutput::new(resolve_color_choice(cli.global.color));
    let ok = match &cli.command {
        Command::Emit { descriptor, output } => {
            commands::emit::run(descriptor, output.as_ref(), &cli.global, &mut out)?
        }
        Command::Build {
            descriptor,
            related,
        } => commands::build::run(descriptor, related, &cli.global, &mut out)?,
        Command::Check {
            source,
            target,
            related,
        } => commands::check::run(source, target, related, &mut out)?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
