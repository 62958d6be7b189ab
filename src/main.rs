//! Docket CLI - track legal cases through their lifecycle with a full audit trail

use clap::Parser;
use docket::cli::commands::transition::TransitionArgs;
use docket::cli::{Cli, Commands};
use docket::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG wins over the verbosity flags
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> docket::Result<()> {
    let cwd = cli.cwd.as_deref();
    match cli.command {
        Some(Commands::Init { force }) => docket::cli::commands::init::run(cwd, force).await,
        Some(Commands::Open {
            id,
            title,
            matter_type,
            assign,
        }) => {
            docket::cli::commands::open::run(cwd, &id, &title, matter_type.as_deref(), &assign)
                .await
        }
        Some(Commands::List { json, status }) => {
            docket::cli::commands::list::run(cwd, json, status.as_deref()).await
        }
        Some(Commands::Show { id, json }) => docket::cli::commands::show::run(cwd, &id, json).await,
        Some(Commands::Next { id }) => docket::cli::commands::next::run(cwd, &id).await,
        Some(Commands::Transition {
            id,
            status,
            expected_version,
            outcome,
            note,
            json,
        }) => {
            let args = TransitionArgs {
                id: &id,
                status: &status,
                expected_version,
                outcome: outcome.as_deref(),
                note: note.as_deref(),
                json,
            };
            docket::cli::commands::transition::run(cwd, cli.actor.as_deref(), args).await
        }
        Some(Commands::History { id, json }) => {
            docket::cli::commands::history::run(cwd, &id, json).await
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
