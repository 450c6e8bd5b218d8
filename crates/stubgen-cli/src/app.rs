use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// stubgen - generate and compile delegating wrappers from type descriptions
#[derive(Debug, Parser)]
#[command(name = "stubgen", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Generator options file (defaults to ./stubgen.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to use colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorWhen::Auto)]
    pub color: ColorWhen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the generated wrapper source for a type.
    Emit {
        /// JSON type descriptor.
        #[arg(value_name = "DESCRIPTOR")]
        descriptor: PathBuf,

        /// Write the source to a file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate and compile a wrapper, then list what the artifact contains.
    Build {
        /// JSON type descriptor.
        #[arg(value_name = "DESCRIPTOR")]
        descriptor: PathBuf,

        /// Descriptors of types the wrapped type mentions.
        #[arg(long, value_name = "DESCRIPTOR")]
        related: Vec<PathBuf>,
    },

    /// Compile a hand-written stub source against a type.
    Check {
        /// Stub source file.
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// JSON descriptor of the wrapped type.
        #[arg(long, value_name = "DESCRIPTOR")]
        target: PathBuf,

        /// Descriptors of types the wrapped type mentions.
        #[arg(long, value_name = "DESCRIPTOR")]
        related: Vec<PathBuf>,
    },
}
