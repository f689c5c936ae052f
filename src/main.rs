//! CLI for vessel-tracker
//!
//! Subcommands:
//! - `track`: connect to the broker and print position reports (default)
//! - `topics`: print the topics that `track` would subscribe to

use clap::{Parser, Subcommand};
use tracing::error;
use vessel_tracker::app;
use vessel_tracker::config::{load_config, load_offline_config};
use vessel_tracker::tracking::SubscriptionMode;
use vessel_tracker::utils::logging;

#[derive(Parser)]
#[command(name = "vessel-tracker", version, about)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); overrides LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Subscription mode; overrides SUBSCRIPTION_MODE
    #[arg(long, value_enum, global = true)]
    mode: Option<SubscriptionMode>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Subscribe and print position reports until signalled
    Track,
    /// Print the derived subscription topics and exit
    Topics,
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env: {e}");
        }
    }

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Track);

    // `topics` never connects and works without a broker url.
    let loaded = match command {
        Command::Topics => load_offline_config(),
        Command::Track => load_config(),
    };
    let mut settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            logging::init(cli.log_level.as_deref().unwrap_or("info"));
            error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    if let Some(mode) = cli.mode {
        settings.tracking.mode = mode;
    }
    logging::init(&settings.log_level);

    match command {
        Command::Topics => {
            let mut topics: Vec<_> = app::topics_for(&settings).into_keys().collect();
            topics.sort();
            for topic in topics {
                println!("{topic}");
            }
        }
        Command::Track => {
            if let Err(e) = app::track(settings).await {
                error!("Tracker failed: {e}");
                std::process::exit(1);
            }
            println!("Bye bye!");
            std::process::exit(0);
        }
    }
}
