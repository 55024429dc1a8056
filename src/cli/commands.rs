// src/cli/commands.rs
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Args, Subcommand};
use colored::*;

use crate::rewriter::EsmRewriter;

/// Main command enum
#[derive(Subcommand)]
pub enum Command {
    /// Rewrite a generated module to ES6 (default when input is piped)
    Fix(FixArgs),

    /// Show version information
    Version,
}

/// Fix command arguments
#[derive(Args)]
pub struct FixArgs {
    /// Input JavaScript file (use '-' for stdin)
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print a rewrite summary as JSON to stderr
    #[arg(long)]
    pub stats: bool,

    /// Show rewrite progress on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command executor trait
pub trait CommandExecutor {
    fn execute(&self) -> Result<(), String>;
}

impl CommandExecutor for Command {
    fn execute(&self) -> Result<(), String> {
        match self {
            Command::Fix(args) => args.execute(),
            Command::Version => {
                crate::cli::print_version();
                Ok(())
            }
        }
    }
}

impl FixArgs {
    /// The bare-invocation mode: stdin to stdout, no progress output
    pub fn stdin_filter() -> Self {
        Self {
            input: PathBuf::from("-"),
            output: None,
            stats: false,
            verbose: false,
        }
    }

    fn reads_stdin(&self) -> bool {
        self.input.to_string_lossy() == "-"
    }
}

impl CommandExecutor for FixArgs {
    fn execute(&self) -> Result<(), String> {
        // Read the whole input up front; the rewrite is a batch transform
        let source = if self.reads_stdin() {
            let mut code = String::new();
            io::stdin()
                .read_to_string(&mut code)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            code
        } else {
            fs::read_to_string(&self.input)
                .map_err(|e| format!("Failed to read {}: {}", self.input.display(), e))?
        };

        if self.verbose {
            let name = if self.reads_stdin() {
                "stdin".to_string()
            } else {
                self.input.display().to_string()
            };
            eprintln!("{}: {}", "Input".blue(), name.white());
        }

        let rewrite = EsmRewriter::new().rewrite(&source)?;

        // The rewrite completed in memory, safe to start writing
        match &self.output {
            Some(path) => {
                fs::write(path, rewrite.output.as_bytes())
                    .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
                if self.verbose {
                    eprintln!(
                        "{}: {}",
                        "Output".blue(),
                        path.display().to_string().white()
                    );
                }
            }
            None => {
                let mut stdout = io::stdout();
                stdout
                    .write_all(rewrite.output.as_bytes())
                    .map_err(|e| format!("Failed to write stdout: {}", e))?;
                stdout
                    .flush()
                    .map_err(|e| format!("Failed to flush stdout: {}", e))?;
            }
        }

        if self.stats {
            eprintln!("{}", rewrite.report.to_json()?);
        }

        if self.verbose {
            let report = &rewrite.report;
            eprintln!(
                "  {} {} imports rewritten, {} exports synthesized",
                "✓".green(),
                report.imports_rewritten,
                report.exports_collected
            );
            if let Some(parent) = &report.parent_package {
                eprintln!("  {} parent package: {}", "✓".green(), parent.yellow());
            }
        }

        Ok(())
    }
}
