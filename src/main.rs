//! dirscribe - directory tree listings and source concatenation.
//!
//! Usage:
//!   dirscribe                       Interactive menu
//!   dirscribe tree [PATH]           Write folder_structure.txt
//!   dirscribe tree -f json [PATH]   Write folder_structure.json
//!   dirscribe concat [PATH]         Write combined_code.txt
//!   dirscribe --help                Show help

mod menu;
mod tasks;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};

use dirscribe_core::{CONCAT_OUTPUT_NAME, ensure_exists};

use crate::tasks::TreeFormat;

#[derive(Parser)]
#[command(
    name = "dirscribe",
    version,
    about = "Directory tree listings, JSON structure export and source concatenation",
    long_about = "dirscribe writes a folder's structure as a text tree or JSON document, \
                  or concatenates its source files into one text file.\n\n\
                  Run without a subcommand for the interactive menu."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the folder structure as a text tree or JSON document
    Tree {
        /// Folder to describe
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Maximum depth below the folder (0 = direct children only)
        #[arg(short, long)]
        depth: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: TreeFormat,

        /// Exclude paths matched by the folder's .gitignore
        #[arg(short, long)]
        gitignore: bool,

        /// Output file (defaults to folder_structure.txt/.json in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Concatenate source files into one text file
    Concat {
        /// Folder to collect source files from
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Exclude paths matched by the folder's .gitignore
        #[arg(short, long)]
        gitignore: bool,

        /// Output file (defaults to combined_code.txt in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Some(Command::Tree {
            path,
            depth,
            format,
            gitignore,
            output,
        }) => {
            let path = ensure_exists(path).context("Invalid path")?;
            let patterns = tasks::load_patterns(&path, gitignore)?;
            let output = match output {
                Some(output) => output,
                None => std::env::current_dir()?.join(format.default_file_name()),
            };
            tasks::write_tree(&mut stdout, &path, depth, format, patterns, &output)?;
        }
        Some(Command::Concat {
            path,
            gitignore,
            output,
        }) => {
            let path = ensure_exists(path).context("Invalid path")?;
            let patterns = tasks::load_patterns(&path, gitignore)?;
            let output = match output {
                Some(output) => output,
                None => std::env::current_dir()?.join(CONCAT_OUTPUT_NAME),
            };
            tasks::concatenate(&mut stdout, &path, patterns, &output)?;
        }
        None => {
            let stdin = std::io::stdin().lock();
            let output_dir = std::env::current_dir().context("Cannot read current directory")?;
            menu::Menu::new(stdin, stdout, output_dir).run()?;
        }
    }

    Ok(())
}

/// Install a stderr fmt subscriber; warnings only unless verbose.
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
