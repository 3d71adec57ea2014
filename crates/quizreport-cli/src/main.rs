//! quizreport CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizreport", version, about = "Connector quiz result reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose and export a report from a graded quiz result file
    Render {
        /// Quiz result file (.json or .toml)
        #[arg(long)]
        input: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Output format: pdf, json, txt, all (comma-separated)
        #[arg(long, default_value = "pdf")]
        format: String,

        /// Use English labels instead of the configured ones
        #[arg(long)]
        english: bool,
    },

    /// Validate a quiz result file and count its mistakes
    Check {
        /// Quiz result file (.json or .toml)
        #[arg(long)]
        input: PathBuf,
    },

    /// Create a starter config and a sample result file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizreport=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            config,
            output,
            format,
            english,
        } => commands::render::execute(input, config, output, format, english),
        Commands::Check { input } => commands::check::execute(input),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
