use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cogniflow::cli::{CommandContext, commands};

#[derive(Parser)]
#[command(name = "cogniflow")]
#[command(
    version,
    about = "Multi-provider research orchestrator with graceful degradation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, help = "Config file (default: .cogniflow/config.toml)")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the research HTTP API
    Serve {
        #[arg(long, short, help = "Address to bind (overrides server.bind)")]
        bind: Option<String>,
    },

    /// Answer a single query and print the JSON response
    Ask {
        #[arg(help = "Research query")]
        query: String,
        #[arg(long, help = "Pretty-print the JSON response")]
        pretty: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
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
        eprintln!("\x1b[31mCogniFlow encountered an unexpected error:\x1b[0m");
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
        Commands::Serve { bind } => {
            let ctx = CommandContext::load(cli.config.as_deref())?;
            let rt = Runtime::new()?;
            rt.block_on(commands::serve::run(ctx, bind))?;
        }
        Commands::Ask { query, pretty } => {
            let ctx = CommandContext::load(cli.config.as_deref())?;
            let rt = Runtime::new()?;
            rt.block_on(commands::ask::run(ctx, &query, pretty))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                let ctx = CommandContext::load(cli.config.as_deref())?;
                commands::config::show(&ctx.config, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path()?;
            }
        },
    }

    Ok(())
}
