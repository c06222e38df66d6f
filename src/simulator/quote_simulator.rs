//! Quote Simulator - Symbolic Rates + Jitter
//!
//! Only ETH <-> USDC has a modeled rate. Every other pair gets a uniform
//! multiplier in [0.95, 1.05). Gas and price impact are pure noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::tokens::{calculate_exchange_rate, Token};

// ============================================
// CONSTANTS
// ============================================

/// Relative spread of the ETH <-> USDC jitter (±2.5%), same both ways
const ETH_USDC_SPREAD: f64 = 0.05;

/// Multiplier range for pairs without a modeled rate
const GENERIC_MULTIPLIER_MIN: f64 = 0.95;
const GENERIC_MULTIPLIER_MAX: f64 = 1.05;

/// Gas estimate = BASE + U(0, SPREAD), in ETH
const GAS_BASE_ETH: f64 = 0.001;
const GAS_SPREAD_ETH: f64 = 0.005;

/// Price impact = U(0, MAX), in percent
const MAX_PRICE_IMPACT_PCT: f64 = 0.5;

/// Impact above this is flagged when rendered
const HIGH_IMPACT_PCT: f64 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Quote overflowed")]
    Overflow,
}

/// A simulated quote. Ephemeral: recomputed on every amount edit.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapQuote {
    pub to_amount: f64,
    /// Precision of the output token, for display
    pub to_decimals: u8,
    pub exchange_rate: f64,
    /// Gas cost in ETH
    pub gas_estimate: f64,
    /// Price impact in percent
    pub price_impact: f64,
}

impl SwapQuote {
    /// Output amount at the output token's full precision
    pub fn to_amount_display(&self) -> String {
        format!("{:.*}", self.to_decimals as usize, self.to_amount)
    }

    pub fn exchange_rate_display(&self) -> String {
        format!("{:.6}", self.exchange_rate)
    }

    pub fn gas_estimate_display(&self) -> String {
        format!("{:.6}", self.gas_estimate)
    }

    pub fn price_impact_display(&self) -> String {
        format!("{:.2}", self.price_impact)
    }

    pub fn is_high_impact(&self) -> bool {
        self.price_impact > HIGH_IMPACT_PCT
    }
}

/// Quote simulator with a seedable RNG
pub struct QuoteSimulator {
    rng: StdRng,
    delay: Duration,
    eth_usdc_rate: f64,
    quotes_served: u64,
}

impl QuoteSimulator {
    pub fn new(delay: Duration, eth_usdc_rate: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            delay,
            eth_usdc_rate,
            quotes_served: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quote_delay(), config.eth_usdc_rate, config.quote_seed)
    }

    /// Number of quotes priced so far
    pub fn quotes_served(&self) -> u64 {
        self.quotes_served
    }

    /// Quote `amount` of `from` into `to`, after the artificial delay
    pub async fn quote(
        &mut self,
        from: &Token,
        to: &Token,
        amount: &str,
    ) -> Result<SwapQuote, QuoteError> {
        let amount = parse_positive(amount)?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.price(from, to, amount)
    }

    /// Price a validated amount (no delay)
    pub fn price(&mut self, from: &Token, to: &Token, amount: f64) -> Result<SwapQuote, QuoteError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(QuoteError::InvalidAmount);
        }

        let to_amount = match (from.symbol, to.symbol) {
            ("ETH", "USDC") => {
                let base = amount * self.eth_usdc_rate;
                base + base * self.jitter(ETH_USDC_SPREAD)
            }
            ("USDC", "ETH") => {
                let base = amount / self.eth_usdc_rate;
                base + base * self.jitter(ETH_USDC_SPREAD)
            }
            _ => amount * self.rng.gen_range(GENERIC_MULTIPLIER_MIN..GENERIC_MULTIPLIER_MAX),
        };

        let exchange_rate = calculate_exchange_rate(amount, to_amount);
        if !to_amount.is_finite() || !exchange_rate.is_finite() {
            return Err(QuoteError::Overflow);
        }

        let gas_estimate = GAS_BASE_ETH + self.rng.gen::<f64>() * GAS_SPREAD_ETH;
        let price_impact = self.rng.gen::<f64>() * MAX_PRICE_IMPACT_PCT;

        self.quotes_served += 1;

        debug!(
            "Quote {} {} -> {:.6} {} (rate {:.6}, gas {:.6} ETH, impact {:.2}%)",
            amount, from.symbol, to_amount, to.symbol, exchange_rate, gas_estimate, price_impact
        );

        Ok(SwapQuote {
            to_amount: to_amount.max(0.0),
            to_decimals: to.decimals,
            exchange_rate,
            gas_estimate,
            price_impact,
        })
    }

    /// Symmetric noise in [-spread/2, spread/2)
    fn jitter(&mut self, spread: f64) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * spread
    }
}

fn parse_positive(amount: &str) -> Result<f64, QuoteError> {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(QuoteError::InvalidAmount),
    }
}
