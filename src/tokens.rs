//! Token definitions for Swapdesk
//!
//! The selectable token list is fixed: native ETH plus four ERC-20s.
//! Formatting helpers for addresses, balances and amounts live here too.

use alloy_primitives::{address, Address};

/// A token the user can select on either side of a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub symbol: &'static str,
    pub name: &'static str,
    pub address: Address,
    pub decimals: u8,
}

impl Token {
    /// The chain's base currency is listed under the zero address
    pub fn is_native(&self) -> bool {
        self.address == Address::ZERO
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.symbol, self.name)
    }
}

// ============================================
// TOKEN LIST
// ============================================

pub static COMMON_TOKENS: [Token; 5] = [
    Token {
        symbol: "ETH",
        name: "Ethereum",
        address: Address::ZERO,
        decimals: 18,
    },
    Token {
        symbol: "USDC",
        name: "USD Coin",
        address: address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
        decimals: 6,
    },
    Token {
        symbol: "USDT",
        name: "Tether USD",
        address: address!("dAC17F958D2ee523a2206206994597C13D831ec7"),
        decimals: 6,
    },
    Token {
        symbol: "DAI",
        name: "Dai Stablecoin",
        address: address!("6B175474E89094C44Da98b954EedeAC495271d0F"),
        decimals: 18,
    },
    Token {
        symbol: "WBTC",
        name: "Wrapped Bitcoin",
        address: address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
        decimals: 8,
    },
];

/// Default "from" side (ETH)
pub fn default_from_token() -> &'static Token {
    &COMMON_TOKENS[0]
}

/// Default "to" side (USDC)
pub fn default_to_token() -> &'static Token {
    &COMMON_TOKENS[1]
}

/// Look up a token by symbol, ignoring case
pub fn find_token(symbol: &str) -> Option<&'static Token> {
    let symbol = symbol.trim();
    COMMON_TOKENS
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
}

// ============================================
// FORMATTING
// ============================================

/// Shorten an address to `0x1234...abcd`
pub fn format_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Format a decimal balance string with a fixed number of places.
/// Unparseable input renders as "0".
pub fn format_balance(balance: &str, decimals: usize) -> String {
    match balance.trim().parse::<f64>() {
        Ok(num) if num.is_finite() => format!("{:.*}", decimals, num),
        _ => "0".to_string(),
    }
}

/// Format an amount for display, capped at 6 places
pub fn format_amount(amount: f64, token: &Token) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    let places = (token.decimals as usize).min(6);
    format!("{:.*}", places, amount)
}

/// Units of output per unit of input; 0 when undefined
pub fn calculate_exchange_rate(from_amount: f64, to_amount: f64) -> f64 {
    if !from_amount.is_finite() || !to_amount.is_finite() || from_amount == 0.0 {
        return 0.0;
    }
    to_amount / from_amount
}
