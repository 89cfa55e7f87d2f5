//! quarry CLI
//!
//! Command-line driver for the SQL front end: scans, parses and compiles
//! SQL, and generates golden scanner fixtures.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use quarry_ir::{compile, Command, Executor, SimpleExecutor};
use quarry_sql_core::ast::SqlStmt;
use quarry_sql_core::{CollectingReporter, Diagnostic, Fixture, RuleSet, Scanner};

/// SQL front end for a SQLite-dialect engine.
#[derive(Parser)]
#[command(name = "quarry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format.
    #[arg(short, long, env = "QUARRY_FORMAT", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of the input.
    Tokens {
        /// Input file (stdin if not specified).
        file: Option<PathBuf>,
    },

    /// Parse every statement of the input and print its diagnostics.
    Parse {
        /// Input file (stdin if not specified).
        file: Option<PathBuf>,

        /// Stop after the first statement with diagnostics.
        #[arg(long)]
        fail_fast: bool,
    },

    /// Compile every well-formed statement of the input into commands.
    Compile {
        /// Input file (stdin if not specified).
        file: Option<PathBuf>,

        /// Hand each command to the executor.
        #[arg(long)]
        execute: bool,
    },

    /// Generate a golden scanner fixture.
    Fixture {
        /// Input file.
        file: PathBuf,

        /// Where to write the fixture.
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// A statement together with the diagnostics reported while parsing it.
#[derive(Serialize)]
struct ParsedStatement {
    statement: SqlStmt,
    diagnostics: Vec<Diagnostic>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Tokens { file } => {
            let input = read_input(file.as_deref())?;
            print_tokens(&input, cli.format)?;
        }

        Commands::Parse { file, fail_fast } => {
            let input = read_input(file.as_deref())?;
            let mut failed = 0;
            for parsed in parse_all(&input) {
                print_statement(&parsed, cli.format)?;
                if !parsed.diagnostics.is_empty() {
                    failed += 1;
                    if fail_fast {
                        break;
                    }
                }
            }
            if failed > 0 {
                bail!("{failed} statement(s) with diagnostics");
            }
        }

        Commands::Compile { file, execute } => {
            let input = read_input(file.as_deref())?;
            let executor = SimpleExecutor::new();
            for parsed in parse_all(&input) {
                if !parsed.diagnostics.is_empty() {
                    warn!(
                        statement = %parsed.statement,
                        diagnostics = parsed.diagnostics.len(),
                        "Skipping statement with diagnostics"
                    );
                    continue;
                }
                match compile(&parsed.statement) {
                    Ok(command) => {
                        print_command(&command, cli.format)?;
                        if execute {
                            if let Err(e) = executor.execute(&command) {
                                warn!(id = %command.id, "Execution failed: {e}");
                            }
                        }
                    }
                    Err(e) => warn!(statement = %parsed.statement, "Cannot compile: {e}"),
                }
            }
        }

        Commands::Fixture { file, out } => {
            let input = read_input(Some(&file))?;
            let fixture = Fixture::generate(&input, &RuleSet::default());
            fixture
                .save(&out)
                .with_context(|| format!("Failed to write fixture to {}", out.display()))?;
            info!(
                "Wrote {} tokens from {} to {}",
                fixture.output.len(),
                file.display(),
                out.display()
            );
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Parses statements until the input is exhausted.
fn parse_all(input: &str) -> Vec<ParsedStatement> {
    let mut parser = quarry_sql_core::Parser::from_sql(input, CollectingReporter::new());
    let mut statements = Vec::new();
    while !parser.is_exhausted() {
        let statement = parser.parse_statement();
        let diagnostics = parser.reporter_mut().take();
        statements.push(ParsedStatement {
            statement,
            diagnostics,
        });
    }
    statements
}

fn print_tokens(input: &str, format: Format) -> anyhow::Result<()> {
    let tokens = Scanner::new(input, RuleSet::default()).tokenize();
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
        Format::Text => {
            for token in &tokens {
                println!(
                    "{}:{}\t{}+{}\t{}\t{:?}",
                    token.line(),
                    token.column(),
                    token.offset(),
                    token.length(),
                    token.kind(),
                    token.value()
                );
            }
        }
    }
    Ok(())
}

fn print_statement(parsed: &ParsedStatement, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(parsed)?),
        Format::Text => {
            match &parsed.statement.statement {
                Some(statement) => println!("{}: {}", statement.name(), parsed.statement),
                None => println!("(no statement): {}", parsed.statement),
            }
            for diagnostic in &parsed.diagnostics {
                println!("  error: {diagnostic}");
            }
        }
    }
    Ok(())
}

fn print_command(command: &Command, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(command)?),
        Format::Text => {
            let sources: Vec<&str> = command
                .data_sources
                .iter()
                .map(|s| s.name.as_str())
                .collect();
            println!(
                "{} {} target={:?} sources={:?} dependencies={}",
                command.id,
                command.kind,
                command.data_target.name,
                sources,
                command.dependencies.len()
            );
        }
    }
    Ok(())
}
