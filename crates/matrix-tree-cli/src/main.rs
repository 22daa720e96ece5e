//! `matrix-tree` command-line driver
//!
//! Runs the built-in demo or loads JSON tree descriptions and applies
//! collapse, multiply or scale to them.

mod commands;
mod demo;
mod logging;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use matrix_tree::{TreeContext, DEFAULT_MAX_DEPTH};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "matrix-tree", version, about = "Build, inspect and evaluate matrix trees")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum nesting depth allowed during collapse
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the built-in walkthrough of every operation
    Demo,

    /// Print a tree's structure
    Show {
        /// JSON tree description
        file: PathBuf,
    },

    /// Print the collapsed matrix of a tree
    Collapse {
        /// JSON tree description
        file: PathBuf,
    },

    /// Multiply the collapsed matrix by a vector
    Multiply {
        /// JSON tree description
        file: PathBuf,

        /// Comma-separated vector, one entry per column
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        x: Vec<f64>,
    },

    /// Scale every leaf by a scalar
    Scale {
        /// JSON tree description
        file: PathBuf,

        /// Scalar to multiply every leaf element by
        #[arg(long, allow_hyphen_values = true)]
        by: f64,

        /// Write the scaled description here instead of printing the tree
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let ctx = TreeContext::with_max_depth(cli.max_depth);
    debug!(?ctx, command = ?cli.command, "dispatching");

    match cli.command {
        Command::Demo => demo::run(&ctx, out),
        Command::Show { file } => commands::show(&commands::load(&file)?, out),
        Command::Collapse { file } => commands::collapse(&commands::load(&file)?, &ctx, out),
        Command::Multiply { file, x } => {
            commands::multiply(&commands::load(&file)?, &x, &ctx, out)
        }
        Command::Scale { file, by, output } => {
            commands::scale(commands::load(&file)?, by, output.as_deref(), out)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_tracing(logging::level_for(cli.verbose)) {
        eprintln!("warning: {err}");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_multiply_vector() {
        let cli = Cli::try_parse_from([
            "matrix-tree",
            "multiply",
            "tree.json",
            "--x",
            "1,-2.5,3",
        ])
        .unwrap();
        match cli.command {
            Command::Multiply { x, .. } => assert_eq!(x, vec![1.0, -2.5, 3.0]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["matrix-tree", "demo", "-vv", "--max-depth", "3"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.max_depth, 3);
    }

    #[test]
    fn test_run_demo() {
        let cli = Cli::try_parse_from(["matrix-tree", "demo"]).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        assert!(!out.is_empty());
    }
}
