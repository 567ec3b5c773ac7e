use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use estmt_export::{CsvSectionWriter, WriteSummary, load_pages};
use estmt_ingest::{ParseOptions, Statement, parse_statement_pages};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

mod config;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "estmt",
    version = env!("ESTMT_VERSION"),
    about = "Convert Bank of America eStmt PDFs into per-account, per-section CSV files"
)]
struct Cli {
    /// Debug logging for the parser (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.estmt/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statements and append their sections to CSV files
    Convert {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory for CSV files (default: [output] dir from config)
        #[arg(long, alias = "out_dir")]
        out_dir: Option<PathBuf>,

        /// Fail on a table that has no Total row instead of dropping it
        #[arg(long)]
        strict: bool,

        /// Keep processing the directory when a statement fails
        #[arg(long)]
        keep_going: bool,
    },

    /// Parse one statement and print what was recovered
    Inspect {
        /// Statement PDF (or form-feed separated text dump)
        #[arg(long)]
        statement: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[arg(long)]
        strict: bool,
    },

    /// Manage ~/.estmt/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Path to a single statement to process
    #[arg(long)]
    statement: Option<PathBuf>,

    /// Directory containing statements to process
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file (never overwrites)
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let config_path = config::config_path(cli.config.as_deref())?;

    match cli.command {
        Command::Convert {
            input,
            out_dir,
            strict,
            keep_going,
        } => {
            let cfg = config::load_config(&config_path)?;
            let out_dir = out_dir.or(cfg.output.dir.clone()).context(
                "no output directory: pass --out-dir or set [output] dir in the config",
            )?;
            let inputs = match (input.statement, input.dir) {
                (Some(statement), _) => {
                    if !statement.exists() {
                        bail!("statement not found: {}", statement.display());
                    }
                    vec![statement]
                }
                (None, Some(dir)) => list_statements(&dir, &cfg.batch.extension)?,
                (None, None) => bail!("pass --statement <file> or --dir <dir>"),
            };

            let writer = CsvSectionWriter::new(out_dir)
                .with_account_suffix_len(cfg.output.account_suffix_len);
            let options = ParseOptions {
                strict: strict || cfg.parse.strict,
            };
            convert(&inputs, &writer, options, keep_going || cfg.batch.keep_going)?;
        }

        Command::Inspect {
            statement,
            json,
            strict,
        } => {
            let cfg = config::load_config(&config_path)?;
            let options = ParseOptions {
                strict: strict || cfg.parse.strict,
            };
            let stmt = parse_file(&statement, options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stmt)?);
            } else {
                print_statement(&stmt);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&config_path)?,
            ConfigCommand::Show => {
                let cfg = config::load_config(&config_path)?;
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn parse_file(path: &Path, options: ParseOptions) -> Result<Statement> {
    let pages = load_pages(path)?;
    let source = path.display().to_string();
    parse_statement_pages(&source, pages, options).with_context(|| format!("parsing {}", path.display()))
}

fn convert_one(path: &Path, writer: &CsvSectionWriter, options: ParseOptions) -> Result<WriteSummary> {
    let stmt = parse_file(path, options)?;
    writer
        .append_statement(&stmt)
        .with_context(|| format!("writing sections of {}", path.display()))
}

/// Statements are processed one after another; rows land in the CSV files
/// in input order.
fn convert(inputs: &[PathBuf], writer: &CsvSectionWriter, options: ParseOptions, keep_going: bool) -> Result<()> {
    let mut failed = 0usize;

    for path in inputs {
        match convert_one(path, writer, options) {
            Ok(summary) => {
                println!(
                    "{}: {} rows into {} files",
                    path.display(),
                    summary.rows,
                    summary.files.len()
                );
            }
            Err(e) if keep_going => {
                error!(path = %path.display(), "{e:#}");
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        statements = inputs.len(),
        failed,
        out_dir = %writer.out_dir().display(),
        "conversion finished"
    );
    if failed > 0 {
        bail!("{} of {} statements failed", failed, inputs.len());
    }
    Ok(())
}

/// Files in `dir` (not recursive) with the given extension, sorted by name.
fn list_statements(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if path.is_file() && matches {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        bail!("no *.{} statements found in {}", extension, dir.display());
    }
    paths.sort();
    Ok(paths)
}

fn print_statement(stmt: &Statement) {
    println!("Statement {}", stmt.date);
    for section in &stmt.sections {
        println!(
            "\n## {} (account {}, {} transactions)",
            section.name,
            section.account,
            section.transactions.len()
        );
        for t in &section.transactions {
            println!("  {t}");
        }
    }
}
