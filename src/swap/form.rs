//! Swap form state: the "from"/"to" inputs and the current quote

use alloy_primitives::utils::{format_ether, parse_ether};
use alloy_primitives::U256;
use thiserror::Error;
use tracing::{debug, warn};

use super::validation::{parse_amount, validate_amount};
use super::ActionStatus;
use crate::simulator::{QuoteSimulator, SwapQuote};
use crate::tokens::{default_from_token, default_to_token, find_token, Token};

pub const QUOTE_FAILED: &str = "Failed to get quote";
pub const INVALID_ORDER: &str = "Invalid amount or insufficient balance";
pub const SWAP_FAILED: &str = "Swap failed. Please try again.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown token: {0}")]
    UnknownToken(String),
}

/// A validated submission handed to the wallet
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOrder {
    pub from: &'static Token,
    pub to: &'static Token,
    pub from_amount: String,
    pub to_amount: String,
}

#[derive(Debug, Clone)]
pub struct SwapForm {
    from_token: &'static Token,
    to_token: &'static Token,
    from_amount: String,
    to_amount: String,
    quote: Option<SwapQuote>,
    status: ActionStatus,
}

impl Default for SwapForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapForm {
    /// ETH -> USDC, empty amounts
    pub fn new() -> Self {
        Self {
            from_token: default_from_token(),
            to_token: default_to_token(),
            from_amount: String::new(),
            to_amount: String::new(),
            quote: None,
            status: ActionStatus::Idle,
        }
    }

    pub fn from_token(&self) -> &'static Token {
        self.from_token
    }

    pub fn to_token(&self) -> &'static Token {
        self.to_token
    }

    pub fn from_amount(&self) -> &str {
        &self.from_amount
    }

    pub fn to_amount(&self) -> &str {
        &self.to_amount
    }

    pub fn quote(&self) -> Option<&SwapQuote> {
        self.quote.as_ref()
    }

    pub fn status(&self) -> &ActionStatus {
        &self.status
    }

    /// Submission is possible with both amounts filled
    pub fn can_submit(&self) -> bool {
        !self.from_amount.is_empty() && !self.to_amount.is_empty()
    }

    /// Amount entry: validate against `balance`, then request a quote
    pub async fn set_from_amount(&mut self, value: &str, balance: &str, simulator: &mut QuoteSimulator) {
        self.from_amount = value.trim().to_string();
        self.status = ActionStatus::Idle;

        // Empty or non-positive input just clears the output
        if self.from_amount.is_empty() || parse_amount(&self.from_amount).is_some_and(|v| v <= 0.0) {
            self.clear_output();
            return;
        }

        if let Err(e) = validate_amount(&self.from_amount, balance) {
            self.status = ActionStatus::Error(e.to_string());
            self.clear_output();
            return;
        }

        let result = simulator.quote(self.from_token, self.to_token, &self.from_amount).await;
        match result {
            Ok(quote) => {
                self.to_amount = quote.to_amount_display();
                self.quote = Some(quote);
                self.status = ActionStatus::Idle;
            }
            Err(e) => {
                warn!("Quote failed for {} {}: {}", self.from_amount, self.from_token.symbol, e);
                self.status = ActionStatus::Error(QUOTE_FAILED.to_string());
                self.clear_output();
            }
        }
    }

    /// Exchange tokens and displayed amounts; no new quote is requested
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.from_token, &mut self.to_token);
        std::mem::swap(&mut self.from_amount, &mut self.to_amount);
        self.quote = None;
        self.status = ActionStatus::Idle;
        debug!("Flipped to {} -> {}", self.from_token.symbol, self.to_token.symbol);
    }

    pub fn select_from_token(&mut self, symbol: &str) -> Result<&'static Token, FormError> {
        let token = lookup(symbol)?;
        self.from_token = token;
        self.clear_output();
        Ok(token)
    }

    pub fn select_to_token(&mut self, symbol: &str) -> Result<&'static Token, FormError> {
        let token = lookup(symbol)?;
        self.to_token = token;
        self.clear_output();
        Ok(token)
    }

    /// Validate for submission against the balance in wei; on failure the
    /// form shows the reason
    pub fn prepare_order(&mut self, balance: U256) -> Option<SwapOrder> {
        let within_balance = validate_amount(&self.from_amount, &format_ether(balance)).is_ok()
            && parse_ether(self.from_amount.trim()).is_ok_and(|wei| wei <= balance);

        if self.from_amount.is_empty() || self.to_amount.is_empty() || !within_balance {
            self.status = ActionStatus::Error(INVALID_ORDER.to_string());
            return None;
        }

        Some(SwapOrder {
            from: self.from_token,
            to: self.to_token,
            from_amount: self.from_amount.clone(),
            to_amount: self.to_amount.clone(),
        })
    }

    /// Swap went through: reset the inputs
    pub fn complete_submission(&mut self) {
        self.from_amount.clear();
        self.clear_output();
        self.status = ActionStatus::Idle;
    }

    pub fn fail_submission(&mut self) {
        self.status = ActionStatus::Error(SWAP_FAILED.to_string());
    }

    fn clear_output(&mut self) {
        self.to_amount.clear();
        self.quote = None;
    }
}

fn lookup(symbol: &str) -> Result<&'static Token, FormError> {
    find_token(symbol).ok_or_else(|| FormError::UnknownToken(symbol.trim().to_string()))
}
