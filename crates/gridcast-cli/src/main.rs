mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(
    name = "gridcast",
    version,
    about = "Rebuild tables from PDF word positions and lay them out on a spreadsheet canvas"
)]
struct Cli {
    /// Log pipeline decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild a grid per page from word positions (PDF or JSON token stream)
    Reconstruct {
        /// Path to PDF or JSON token file
        input_file: PathBuf,

        /// Custom JSON layout config
        #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Predefined layout config (default: layout)
        #[arg(short, long, value_name = "NAME")]
        preset: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table", value_parser = ["table", "json"])]
        output: String,

        /// Write the result as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Place pre-segmented tables into zones (JSON table stream)
    Place {
        /// Path to JSON table file
        input_file: PathBuf,

        /// Custom JSON layout config
        #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Predefined layout config (default: auto-zone)
        #[arg(short, long, value_name = "NAME")]
        preset: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table", value_parser = ["table", "json"])]
        output: String,

        /// Write the result as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Print each table as header/value pairs instead of the canvas
        #[arg(long)]
        key_values: bool,
    },
    /// Inspect and validate layout configs
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// List predefined layout configs
    List,
    /// Explain a layout config in plain language
    Explain {
        /// Preset name (e.g., "three-zone")
        preset: String,
    },
    /// Print the config format with field descriptions and example
    Schema,
    /// Validate a custom layout config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn default_log_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(cli.verbose)));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let result = match cli.command {
        Commands::Reconstruct {
            input_file,
            config,
            preset,
            output,
            out,
        } => commands::reconstruct::run(input_file, config, preset, &output, out),
        Commands::Place {
            input_file,
            config,
            preset,
            output,
            out,
            key_values,
        } => commands::place::run(input_file, config, preset, &output, out, key_values),
        Commands::Config { action } => match action {
            ConfigAction::List => commands::config::list(),
            ConfigAction::Explain { preset } => commands::config::explain(&preset),
            ConfigAction::Schema => commands::config::schema(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
