//! kohya-tweaks - Kohya LoRA config tweaking tool
//!
//! Load a training config, change the handful of fields that differ between
//! runs, compare against another config and save the result.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use kohya_tweaks::{commands, session};

#[derive(Parser)]
#[command(name = "kohya-tweaks")]
#[command(author, version, about = "Edit, compare and save Kohya LoRA training configs")]
struct Cli {
    /// Log level: trace, debug, info, warn, error (overrides config.toml)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Directory saved configs are written to (overrides config.toml)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default settings file
    Init,

    /// Summarize a config
    Show {
        /// Path to a config JSON file
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change daily tweaks on a config
    Tweak {
        /// Path to the base config JSON file
        path: PathBuf,

        /// Field assignment, e.g. --set epoch=15 (repeatable)
        #[arg(short, long = "set", value_parser = commands::parse_assignment)]
        set: Vec<(String, String)>,

        /// Save the result, optionally under a given name (default: suggested name)
        #[arg(long)]
        save: Option<Option<String>>,
    },

    /// Compare two configs
    Compare {
        /// Base config
        base: PathBuf,

        /// Config to compare against the base
        other: PathBuf,
    },

    /// Suggest a filename for a config
    Suggest {
        /// Path to a config JSON file
        path: PathBuf,
    },

    /// Interactive editing session
    Edit {
        /// Base config to edit
        path: PathBuf,
    },
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = commands::settings()?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.logging.level);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let output_dir = cli.output_dir.unwrap_or(settings.output.dir);
    debug!(output_dir = %output_dir.display(), "resolved output directory");

    match cli.command {
        Commands::Init => {
            commands::init()?;
        }
        Commands::Show { path, json } => {
            let format = if json {
                commands::OutputFormat::Json
            } else {
                commands::OutputFormat::Summary
            };
            commands::show(&path, format)?;
        }
        Commands::Tweak { path, set, save } => {
            commands::tweak(&path, &set, save, &output_dir)?;
        }
        Commands::Compare { base, other } => {
            commands::compare(&base, &other)?;
        }
        Commands::Suggest { path } => {
            commands::suggest(&path)?;
        }
        Commands::Edit { path } => {
            let mut session = session::EditSession::new(output_dir);
            session.run(&path)?;
        }
    }

    Ok(())
}
