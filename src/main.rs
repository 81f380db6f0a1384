//! table-engine: filter, sort and expand tabular JSON data from the command line.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use table_engine::{
    cli::{self, exit_codes},
    config::{self, ViewConfig},
    reports::ReportFormat,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "table-engine")]
#[command(version)]
#[command(about = "Filter, sort and expand tabular JSON data", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  At least one row shown
    1  No rows match the filters
    3  Error occurred

EXAMPLES:
    # Print a dataset using the discovered .table-engine.yaml
    table-engine view transactions.json

    # Filter, sort descending by issuer, and expand the first row
    table-engine view transactions.json --filter status=pend --sort issuer --sort issuer --click 0

    # Export the filtered view as CSV
    table-engine view transactions.json --filter currency=usd -o csv -O usd.csv")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Dataset file: a JSON array of objects
    dataset: PathBuf,

    /// Filter a column, as KEY=TEXT (repeatable, applied in order)
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// Activate a column's sort control (repeatable; twice for descending)
    #[arg(short, long = "sort")]
    sort: Vec<String>,

    /// Click the row shown at this position (repeatable)
    #[arg(long = "click")]
    clicks: Vec<usize>,

    /// Output format (overrides the config file)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Truncate cells wider than this in table output
    #[arg(long)]
    max_width: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a dataset as a filtered, sorted table
    View(ViewArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective table configuration
    Show,
    /// Print config file search paths and the discovered config file
    Path,
    /// Generate an example .table-engine.yaml in the current directory
    Init,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .ok_or_else(|| format!("expected KEY=TEXT, got '{s}'"))
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::View(args) => {
            let (mut table, loaded_from) = config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                tracing::debug!("Using config {}", path.display());
            } else if let Some(path) = &cli.config {
                anyhow::bail!("Config file {} could not be loaded", path.display());
            }

            if let Some(format) = args.output {
                table.output.format = format;
            }
            if let Some(width) = args.max_width {
                table.output.max_column_width = width;
            }
            table.output.no_color |= cli.no_color;

            let config = ViewConfig {
                dataset: args.dataset,
                table,
                filters: args.filters,
                sort_toggles: args.sort,
                clicks: args.clicks,
                output_file: args.output_file,
                quiet: cli.quiet,
            };
            cli::run_view(config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "table-engine", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else if let Some(path) = &cli.config {
                    anyhow::bail!("Config file {} could not be loaded", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("table-engine").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in config::file::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".table-engine.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
