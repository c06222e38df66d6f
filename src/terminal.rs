//! Terminal front end
//!
//! Reads one command per line and renders the app state. No business
//! logic lives here: every command forwards to `SwapApp`.

use console::style;
use eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::app::SwapApp;
use crate::config::Config;
use crate::simulator::SwapQuote;
use crate::swap::ActionStatus;
use crate::tokens::{format_address, format_amount, format_balance, Token, COMMON_TOKENS};

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Connect,
    Disconnect,
    Balance,
    Tokens,
    From(String),
    To(String),
    Amount(String),
    Flip,
    Swap,
    Status,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err("empty command".to_string());
        };
        let arg = parts.next().map(str::to_string);

        let command = match (head.to_lowercase().as_str(), arg) {
            ("connect", None) => Command::Connect,
            ("disconnect", None) => Command::Disconnect,
            ("balance", None) => Command::Balance,
            ("tokens", None) => Command::Tokens,
            ("from", Some(symbol)) => Command::From(symbol),
            ("to", Some(symbol)) => Command::To(symbol),
            ("amount", Some(value)) => Command::Amount(value),
            // Bare "amount" clears the input
            ("amount", None) => Command::Amount(String::new()),
            ("flip", None) => Command::Flip,
            ("swap", None) => Command::Swap,
            ("status", None) => Command::Status,
            ("help", None) | ("?", None) => Command::Help,
            ("quit", None) | ("exit", None) => Command::Quit,
            ("from", None) | ("to", None) => return Err(format!("usage: {head} <SYMBOL>")),
            (other, _) => return Err(format!("unknown command '{other}' (try 'help')")),
        };

        if parts.next().is_some() {
            return Err(format!("too many arguments for '{head}'"));
        }
        Ok(command)
    }
}

// ============================================
// EVENT LOOP
// ============================================

pub async fn run(app: &mut SwapApp, config: &Config) -> Result<()> {
    print_help();

    if config.auto_connect {
        with_spinner("Connecting...", app.connect()).await;
    }
    render(app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Idle ticker when polling is off
    let poll_every = config.balance_poll_interval().unwrap_or(Duration::from_secs(3600));
    let mut poll = tokio::time::interval(poll_every);
    poll.tick().await;

    let mut show_prompt = true;
    loop {
        if show_prompt {
            prompt();
        }
        show_prompt = true;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = poll.tick() => {
                if config.balance_poll_interval().is_some() && app.wallet().connected {
                    debug!("Polling balance");
                    app.refresh_balance().await;
                }
                show_prompt = false;
                continue;
            }
        };

        // EOF
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                execute(app, command).await;
                render(app);
            }
            Err(message) => println!("{} {}", style("✗").red(), message),
        }
    }

    if app.wallet().connected {
        app.disconnect().await;
    }
    println!("{}", style("Bye.").cyan());
    Ok(())
}

async fn execute(app: &mut SwapApp, command: Command) {
    match command {
        Command::Connect => with_spinner("Connecting...", app.connect()).await,
        Command::Disconnect => app.disconnect().await,
        Command::Balance => with_spinner("Refreshing balance...", app.refresh_balance()).await,
        Command::Tokens => print_tokens(),
        Command::From(symbol) => report_selection(app.select_from(&symbol)),
        Command::To(symbol) => report_selection(app.select_to(&symbol)),
        Command::Amount(value) => {
            if !app.wallet().connected {
                println!("{} Connect a wallet first", style("✗").red());
                return;
            }
            with_spinner("Getting best price...", app.set_amount(&value)).await;
        }
        Command::Flip => app.flip(),
        Command::Swap => {
            let result = with_spinner("Processing transaction...", app.swap()).await;
            if let Some(hash) = result {
                println!(
                    "{} Swap successful! Transaction hash: {:?}",
                    style("✓").green().bold(),
                    hash
                );
            }
        }
        Command::Status => {
            println!("  Quotes served   {}", app.quotes_served());
            match app.last_tx() {
                Some(hash) => println!("  Last swap tx    {:?}", hash),
                None => println!("  Last swap tx    {}", style("none").dim()),
            }
        }
        Command::Help => print_help(),
        Command::Quit => {}
    }
}

fn report_selection(result: Result<(), crate::swap::FormError>) {
    if let Err(e) = result {
        println!("{} {}", style("✗").red(), e);
    }
}

async fn with_spinner<F: std::future::Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = future.await;
    spinner.finish_and_clear();
    output
}

// ============================================
// RENDERING
// ============================================

fn prompt() {
    use std::io::Write;
    print!("{} ", style("swap>").cyan().bold());
    let _ = std::io::stdout().flush();
}

pub fn render(app: &SwapApp) {
    println!();

    let wallet = app.wallet();
    match wallet.address {
        Some(address) if wallet.connected => {
            println!(
                "  {} {}   {} ETH",
                style("●").green(),
                style(format_address(&address)).bold(),
                format_balance(&wallet.balance_ether(), 4)
            );
        }
        _ => println!("  {} {}", style("○").dim(), style("Wallet not connected - type 'connect'").dim()),
    }

    if let ActionStatus::Error(message) = app.status() {
        println!("  {} {}", style("✗").red(), style(message).red());
    }

    if !wallet.connected {
        println!();
        return;
    }

    let form = app.form();
    println!();
    println!("  {:<6} {:>24}  {}", style("FROM").dim(), display_input(form.from_amount()), form.from_token().symbol);
    println!("  {:<6} {:>24}  {}", style("TO").dim(), display_input(form.to_amount()), form.to_token().symbol);

    if let Some(quote) = form.quote() {
        print_quote(quote, form.from_token(), form.to_token());
    }

    if let Some(message) = form.status().error() {
        println!("  {} {}", style("✗").red(), style(message).red());
    }

    let swap_hint = if form.can_submit() { style("ready - type 'swap'").green() } else { style("enter an amount").dim() };
    println!("  {}", swap_hint);
    println!();
}

fn display_input(value: &str) -> String {
    if value.is_empty() {
        "0.0".to_string()
    } else {
        value.to_string()
    }
}

pub fn print_quote(quote: &SwapQuote, from: &Token, to: &Token) {
    println!();
    println!(
        "  Exchange Rate   1 {} = {} {}",
        from.symbol,
        quote.exchange_rate_display(),
        to.symbol
    );
    let impact = format!("{}%", quote.price_impact_display());
    let impact = if quote.is_high_impact() { style(impact).red() } else { style(impact) };
    println!("  Price Impact    {}", impact);
    println!("  Gas Estimate    {} ETH", quote.gas_estimate_display());
    println!("  You Receive     {} {}", format_amount(quote.to_amount, to), to.symbol);
}

pub fn print_tokens() {
    println!();
    println!("  {}", style("Select Token").bold());
    for token in COMMON_TOKENS.iter() {
        let address = if token.is_native() {
            "native".to_string()
        } else {
            format_address(&token.address)
        };
        println!(
            "  {:<6} {:<18} {:>3} decimals  {}",
            style(token.symbol).bold(),
            token.name,
            token.decimals,
            style(address).dim()
        );
    }
    println!();
}

fn print_help() {
    println!();
    println!("  {}", style("Commands").bold());
    println!("    connect | disconnect | balance");
    println!("    tokens | from <SYM> | to <SYM>");
    println!("    amount <X> | flip | swap");
    println!("    status | help | quit");
    println!();
}
