//! App controller
//!
//! Owns the long-lived wallet session, the swap form and the simulator.
//! Each user action catches its own failure and reduces it to one message.

use alloy_primitives::B256;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::simulator::QuoteSimulator;
use crate::swap::{ActionStatus, FormError, SwapForm, SwapRecord};
use crate::wallet::{WalletConnector, WalletSession, WalletState};

pub const CONNECT_FAILED: &str = "Failed to connect wallet";
pub const DISCONNECT_FAILED: &str = "Failed to disconnect wallet";
pub const NOT_CONNECTED: &str = "Wallet not connected";
pub const SWAP_FAILED: &str = "Swap failed";

pub struct SwapApp {
    session: WalletSession,
    form: SwapForm,
    simulator: QuoteSimulator,
    status: ActionStatus,
    last_tx: Option<B256>,
    swap_log: Option<PathBuf>,
}

impl SwapApp {
    pub fn new(connector: Arc<dyn WalletConnector>, simulator: QuoteSimulator) -> Self {
        Self {
            session: WalletSession::new(connector),
            form: SwapForm::new(),
            simulator,
            status: ActionStatus::Idle,
            last_tx: None,
            swap_log: None,
        }
    }

    pub fn from_config(connector: Arc<dyn WalletConnector>, config: &Config) -> Self {
        let mut app = Self::new(connector, QuoteSimulator::from_config(config));
        app.swap_log = config.swap_log_path.as_ref().map(PathBuf::from);
        app
    }

    pub fn wallet(&self) -> &WalletState {
        self.session.state()
    }

    pub fn form(&self) -> &SwapForm {
        &self.form
    }

    pub fn status(&self) -> &ActionStatus {
        &self.status
    }

    pub fn last_tx(&self) -> Option<B256> {
        self.last_tx
    }

    pub fn quotes_served(&self) -> u64 {
        self.simulator.quotes_served()
    }

    // ============================================
    // WALLET ACTIONS
    // ============================================

    pub async fn connect(&mut self) {
        self.status = match self.session.connect().await {
            Ok(_) => ActionStatus::Idle,
            Err(e) => ActionStatus::Error(with_reason(CONNECT_FAILED, &e.to_string())),
        };
    }

    pub async fn disconnect(&mut self) {
        self.status = match self.session.disconnect().await {
            Ok(()) => ActionStatus::Idle,
            Err(e) => ActionStatus::Error(with_reason(DISCONNECT_FAILED, &e.to_string())),
        };
        self.form = SwapForm::new();
    }

    /// Balance poll. Failures are logged, not shown.
    pub async fn refresh_balance(&mut self) {
        if !self.session.is_connected() {
            return;
        }
        if let Err(e) = self.session.refresh_balance().await {
            warn!("Balance refresh failed: {}", e);
        }
    }

    // ============================================
    // FORM ACTIONS
    // ============================================

    pub async fn set_amount(&mut self, value: &str) {
        let balance = self.session.state().balance_ether();
        self.form.set_from_amount(value, &balance, &mut self.simulator).await;
    }

    pub fn flip(&mut self) {
        self.form.flip();
    }

    pub fn select_from(&mut self, symbol: &str) -> Result<(), FormError> {
        self.form.select_from_token(symbol).map(|_| ())
    }

    pub fn select_to(&mut self, symbol: &str) -> Result<(), FormError> {
        self.form.select_to_token(symbol).map(|_| ())
    }

    /// Submit the form: transfer the from amount to the to-token's address.
    /// Returns the confirmed hash on success.
    pub async fn swap(&mut self) -> Option<B256> {
        let order = self.form.prepare_order(self.session.state().balance)?;

        if !self.session.is_connected() {
            self.status = ActionStatus::Error(NOT_CONNECTED.to_string());
            return None;
        }

        let result = self
            .session
            .send_value_transfer(order.to.address, &order.from_amount)
            .await;

        match result {
            Ok(hash) => {
                info!(
                    "Swap successful! {} {} -> {} {} (tx {:?})",
                    order.from_amount, order.from.symbol, order.to_amount, order.to.symbol, hash
                );
                self.form.complete_submission();
                self.last_tx = Some(hash);
                self.status = ActionStatus::Idle;

                if let Some(path) = &self.swap_log {
                    if let Err(e) = SwapRecord::from_order(&order, hash).append_to_file(path) {
                        warn!("Failed to write swap log {}: {}", path.display(), e);
                    }
                }

                self.refresh_balance().await;
                Some(hash)
            }
            Err(e) => {
                self.form.fail_submission();
                self.status = ActionStatus::Error(with_reason(SWAP_FAILED, &e.to_string()));
                None
            }
        }
    }
}

fn with_reason(fallback: &str, reason: &str) -> String {
    if reason.trim().is_empty() {
        fallback.to_string()
    } else {
        format!("{fallback}: {reason}")
    }
}
