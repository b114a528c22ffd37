//! Uniplan CLI — the main entry point.
//!
//! Commands:
//! - `serve`  — Start the HTTP gateway
//! - `plan`   — Run the offline planner against local fixtures
//! - `status` — Show config and catalog status

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "uniplan",
    about = "Uniplan — AI academic advisor with an offline fallback planner",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Plan a schedule offline and print the result as JSON
    Plan {
        /// Path to a student setup JSON file ({"student": {...}})
        #[arg(short, long)]
        user: Option<std::path::PathBuf>,

        /// The student question to echo into the result
        #[arg(short, long, default_value = "Plan my next term")]
        message: String,
    },

    /// Show config and catalog status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // .env first, so GEMINI_API_KEY reaches the config loader
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Plan { user, message } => commands::plan::run(user, message).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
