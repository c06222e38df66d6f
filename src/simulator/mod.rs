//! Quote Simulator
//!
//! Fabricates swap quotes from a symbolic rate table plus random jitter.
//! This is a stand-in for a pricing oracle: no liquidity model, no
//! slippage curve, no order book.

mod quote_simulator;

pub use quote_simulator::{QuoteError, QuoteSimulator, SwapQuote};
