//! Swapdesk - Terminal Token Swap Demo
//!
//! Run with: cargo run
//!
//! Connects a wallet over JSON-RPC, quotes swaps from a local simulator
//! and settles them as native value transfers.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use console::style;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod config;
mod simulator;
mod swap;
mod terminal;
mod tokens;
mod wallet;

use app::SwapApp;
use config::Config;
use simulator::QuoteSimulator;
use tokens::{find_token, format_amount};
use wallet::RpcConnector;

const DEFAULT_LOG_FILTER: &str = "swapdesk=info";

#[derive(Parser, Debug)]
#[command(name = "swapdesk", version, about = "Terminal token swap demo")]
struct Cli {
    /// TOML config file (defaults to environment / .env)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive swap terminal (default)
    Run,
    /// List supported tokens
    Tokens,
    /// Print one simulated quote and exit
    Quote {
        from: String,
        to: String,
        amount: String,
    },
    /// Write a default TOML config to start from
    InitConfig {
        #[arg(default_value = "swapdesk.toml")]
        path: PathBuf,
    },
}

fn print_banner(app_name: &str) {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!(
        "{}",
        style(format!(" 🔄 {} - Token Swap Terminal", app_name.to_uppercase())).cyan().bold()
    );
    println!(
        "{}",
        style("    Simulated Quotes | Native Transfers | Local Devnet").cyan()
    );
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!();
}

/// `RUST_LOG` when set and valid, else `swapdesk=info`
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        error!("Please check your .env file or --config");
        return Err(e);
    }

    Ok(config)
}

async fn one_shot_quote(config: &Config, from: &str, to: &str, amount: &str) -> Result<()> {
    let from = find_token(from).ok_or_else(|| eyre!("Unknown token: {}", from))?;
    let to = find_token(to).ok_or_else(|| eyre!("Unknown token: {}", to))?;

    let mut simulator = QuoteSimulator::from_config(config);
    let quote = simulator.quote(from, to, amount).await?;

    println!(
        "  {} {} -> {} {}",
        amount.trim(),
        from.symbol,
        format_amount(quote.to_amount, to),
        to.symbol
    );
    terminal::print_quote(&quote, from, to);
    println!();
    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(eyre!("{} already exists", path.display()));
    }

    Config::default().save_to_file(path)?;
    println!("{} Wrote default config to {}", style("✓").green(), path.display());
    println!("   Run with: swapdesk --config {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();

    // Needs no loaded config
    if let Some(Command::InitConfig { path }) = &cli.command {
        return init_config(path);
    }

    let config = load_config(cli.config.as_ref())?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Tokens => {
            terminal::print_tokens();
            Ok(())
        }
        Command::Quote { from, to, amount } => one_shot_quote(&config, &from, &to, &amount).await,
        Command::InitConfig { path } => init_config(&path),
        Command::Run => {
            print_banner(&config.app_name);
            config.print_summary();
            println!();

            let connector = Arc::new(RpcConnector::from_config(&config)?);
            let mut app = SwapApp::from_config(connector, &config);

            info!("{} ready", config.app_name);
            terminal::run(&mut app, &config).await
        }
    }
}
