//! `claripy` — command-line front end for the ClariPy/PyLite
//! translator, evaluator, and display-tree builder.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "claripy", version, about = "Translate, run, and inspect ClariPy/PyLite programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a source file (either dialect) into PyLite text.
    ToPylite { path: PathBuf },
    /// Translate a source file (either dialect) into ClariPy text.
    ToClarypy { path: PathBuf },
    /// Parse and run a source file, printing its output.
    Run {
        path: PathBuf,
        /// Also print the final variable bindings after the program halts.
        #[arg(long)]
        show_env: bool,
    },
    /// Parse a source file and print its display tree as an indented
    /// ASCII tree.
    Tree { path: PathBuf },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::ToPylite { path } => {
            let text = claripy_lang::translate_to_pylite(&path)
                .with_context(|| format!("translating {} to PyLite", path.display()))?;
            print!("{text}");
        }
        Command::ToClarypy { path } => {
            let text = claripy_lang::translate_to_clarypy(&path)
                .with_context(|| format!("translating {} to ClariPy", path.display()))?;
            print!("{text}");
        }
        Command::Run { path, show_env } => {
            let outcome = claripy_lang::run_file(&path)
                .with_context(|| format!("running {}", path.display()))?;
            for line in &outcome.output {
                println!("{line}");
            }
            if show_env {
                println!("--- environment ---");
                for (name, value) in outcome.env.iter() {
                    println!("{name} = {value}");
                }
            }
        }
        Command::Tree { path } => {
            let tree = claripy_lang::display_tree_of(&path)
                .with_context(|| format!("building display tree for {}", path.display()))?;
            print!("{}", claripy_lang::display_tree::render_ascii(&tree));
        }
    }

    Ok(())
}
