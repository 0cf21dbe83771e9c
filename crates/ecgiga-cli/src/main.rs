//! ecgiga CLI: interactive ECG course in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use ecgiga_core::Sex;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "ecgiga", version, about = "Interactive ECG course: modules, quizzes, calculators")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List course modules
    Modules,

    /// Show one module
    Module {
        /// Module id (e.g. "ischemia")
        id: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List clinical cases
    Cases,

    /// Show one clinical case
    Case {
        /// Case id (e.g. "iam_inferior")
        id: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Take a quiz
    Quiz {
        /// Quiz topic (e.g. "basics")
        topic: String,

        /// Scripted answers instead of prompting (e.g. "B,C"; "-" submits nothing)
        #[arg(long)]
        answers: Option<String>,
    },

    /// Sokolow-Lyon index for left ventricular hypertrophy
    Sokolow {
        /// S wave depth in V1, mm
        #[arg(long)]
        sv1: Option<String>,

        /// R wave height in V5, mm
        #[arg(long)]
        rv5: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Corrected QT interval (Bazett)
    Qtc {
        /// QT interval, ms
        #[arg(long)]
        qt: Option<String>,

        /// RR interval, ms
        #[arg(long)]
        rr: Option<String>,

        /// Patient sex: male, female (default from config)
        #[arg(long)]
        sex: Option<Sex>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config_from(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!("ecgiga={}", config.log_level))
            }),
        )
        .init();

    match cli.command {
        Commands::Modules => commands::modules::list(&config),
        Commands::Module { id, format } => commands::modules::show(&config, &id, &format),
        Commands::Cases => commands::cases::list(&config),
        Commands::Case { id, format } => commands::cases::show(&config, &id, &format),
        Commands::Quiz { topic, answers } => commands::quiz::execute(&config, &topic, answers),
        Commands::Sokolow { sv1, rv5, format } => {
            commands::calc::sokolow(sv1.as_deref(), rv5.as_deref(), &format)
        }
        Commands::Qtc {
            qt,
            rr,
            sex,
            format,
        } => commands::calc::qtc(&config, qt.as_deref(), rr.as_deref(), sex, &format),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    }
}
