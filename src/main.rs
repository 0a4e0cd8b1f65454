use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info, instrument};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hawkeye::config::Config;
use hawkeye::handlers::Analytics;
use hawkeye::util::display::{render_error, render_sniper_report, render_token_report, render_wallet_report};

#[derive(Debug, Parser)]
#[command(name = "hawkeye", about = "Solana token and wallet analytics on Birdeye data")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "HAWKEYE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for the JSON log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List early buyers of a token
    Check {
        address: String,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show a token's market overview
    Token { address: String },
    /// Show a wallet's holdings ranked by value
    Wallet { address: String },
}

fn init_tracing(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "hawkeye.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // Reports go to stdout, so console logs stay on stderr
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .json()
        .with_current_span(false)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    Ok(guard)
}

#[instrument(skip(analytics))]
async fn run(analytics: &Analytics, command: Command) -> String {
    match command {
        Command::Check { address, page } => render_sniper_report(&analytics.snipers.check(&address, page).await),
        Command::Token { address } => match analytics.tokens.lookup(&address).await {
            Ok(report) => render_token_report(&report),
            Err(e) => render_error("token data", &e),
        },
        Command::Wallet { address } => match analytics.wallets.check(&address).await {
            Ok(report) => render_wallet_report(&report),
            Err(e) => render_error("wallet data", &e),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let _guard = init_tracing(&cli.log_dir)?;
    info!("🦅 Hawkeye - Birdeye analytics");

    let config = Config::load(cli.config.as_deref())?;
    let analytics = Analytics::init(&config).map_err(|e| {
        error!("Failed to initialize analytics: {:#}", e);
        e
    })?;

    tokio::select! {
        output = run(&analytics, cli.command) => {
            println!("{}", output);
        }
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => info!("🛑 Interrupted, abandoning request"),
                Err(e) => error!("Failed to listen for shutdown signal: {}", e),
            }
        }
    }

    Ok(())
}
