use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use churnguard::cli::OutputFormat;
use churnguard::cli::commands;

#[derive(Parser)]
#[command(name = "churnguard")]
#[command(
    version,
    about = "Customer churn KPIs and an analyst assistant for telecom retention"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show headline retention KPIs
    Kpis {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
    },

    /// Churn and revenue by customer segment
    Segments {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
    },

    /// Churn and revenue by region
    Regions {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
    },

    /// Top stated churn reasons
    Reasons {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
    },

    /// Revenue by acquisition channel
    Revenue {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
    },

    /// Ask the retention analyst a question
    Ask {
        #[arg(help = "Question in plain language")]
        question: String,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
    },

    /// List suggested questions
    Suggest,

    /// Manage the analytics database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Create tables at the configured path
    Init {
        #[arg(long, help = "Load the demo dataset")]
        seed: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: OutputFormat,
    },
    /// Show configuration file paths
    Path,
    /// Write a project configuration file
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mChurnGuard encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Kpis { format } => commands::metrics::kpis(format)?,
        Commands::Segments { format } => commands::metrics::segments(format)?,
        Commands::Regions { format } => commands::metrics::regions(format)?,
        Commands::Reasons { format } => commands::metrics::reasons(format)?,
        Commands::Revenue { format } => commands::metrics::revenue(format)?,
        Commands::Ask { question, format } => {
            let rt = Runtime::new()?;
            rt.block_on(commands::ask::run(&question, format))?;
        }
        Commands::Suggest => commands::ask::suggest()?,
        Commands::Db { action } => match action {
            DbAction::Init { seed } => commands::db::init(seed)?,
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => commands::config::show(format)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init { force } => commands::config::init(force)?,
        },
    }

    Ok(())
}
