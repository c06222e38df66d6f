//! Wallet session: connection lifecycle and state

use alloy_primitives::utils::{format_ether, parse_ether};
use alloy_primitives::{Address, B256, U256};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::WalletConnector;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("No accounts found")]
    NoAccounts,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("{0}")]
    Backend(eyre::Report),
}

impl From<eyre::Report> for WalletError {
    fn from(report: eyre::Report) -> Self {
        WalletError::Backend(report)
    }
}

/// Replaced wholesale on connect/disconnect; only `balance` is refreshed in place
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletState {
    pub address: Option<Address>,
    /// Native balance in wei
    pub balance: U256,
    pub connected: bool,
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Balance as a decimal ether string
    pub fn balance_ether(&self) -> String {
        format_ether(self.balance)
    }
}

/// Long-lived wallet session owning the connector (the connection handle)
pub struct WalletSession {
    connector: Arc<dyn WalletConnector>,
    state: WalletState,
}

impl WalletSession {
    pub fn new(connector: Arc<dyn WalletConnector>) -> Self {
        Self {
            connector,
            state: WalletState::disconnected(),
        }
    }

    pub fn state(&self) -> &WalletState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    /// Request accounts and load the first one's balance
    pub async fn connect(&mut self) -> Result<&WalletState, WalletError> {
        let accounts = self.connector.request_accounts().await.map_err(|e| {
            error!("Error connecting wallet via {}: {}", self.connector.name(), e);
            WalletError::Backend(e)
        })?;

        let address = *accounts.first().ok_or(WalletError::NoAccounts)?;
        let balance = self.connector.balance_of(address).await?;

        self.state = WalletState {
            address: Some(address),
            balance,
            connected: true,
        };

        info!(
            "✓ Wallet connected via {}: {:?} ({} ETH)",
            self.connector.name(),
            address,
            format_ether(balance)
        );

        Ok(&self.state)
    }

    /// Release the connection. The state is reset even if the connector fails.
    pub async fn disconnect(&mut self) -> Result<(), WalletError> {
        let result = self.connector.disconnect().await;
        self.state = WalletState::disconnected();

        match result {
            Ok(()) => {
                info!("Wallet disconnected");
                Ok(())
            }
            Err(e) => {
                warn!("Error disconnecting wallet: {}", e);
                Err(WalletError::Backend(e))
            }
        }
    }

    /// Balance of `address`, or of the connected account
    pub async fn get_balance(&self, address: Option<Address>) -> Result<U256, WalletError> {
        let own = self.connected_address()?;
        let target = address.unwrap_or(own);

        let balance = self.connector.balance_of(target).await.map_err(|e| {
            error!("Error getting balance: {}", e);
            WalletError::Backend(e)
        })?;

        debug!("Balance of {:?}: {} ETH", target, format_ether(balance));
        Ok(balance)
    }

    /// Re-query the connected account's balance and store it
    pub async fn refresh_balance(&mut self) -> Result<U256, WalletError> {
        let balance = self.get_balance(None).await?;
        self.state.balance = balance;
        Ok(balance)
    }

    /// Transfer `amount` ether to `to`; returns the confirmed tx hash
    pub async fn send_value_transfer(&self, to: Address, amount: &str) -> Result<B256, WalletError> {
        let from = self.connected_address()?;
        let value = parse_transfer_amount(amount)?;

        info!("Sending {} ETH to {:?}", amount.trim(), to);

        let hash = self.connector.send_value(from, to, value).await.map_err(|e| {
            error!("Error sending transaction: {}", e);
            WalletError::Backend(e)
        })?;

        info!("✓ Transaction confirmed: {:?}", hash);
        Ok(hash)
    }

    fn connected_address(&self) -> Result<Address, WalletError> {
        match (self.state.connected, self.state.address) {
            (true, Some(address)) => Ok(address),
            _ => Err(WalletError::NotConnected),
        }
    }
}

/// Ether string to wei; must be a positive decimal
fn parse_transfer_amount(amount: &str) -> Result<U256, WalletError> {
    let trimmed = amount.trim();

    let positive = trimmed
        .parse::<f64>()
        .map(|v| v.is_finite() && v > 0.0)
        .unwrap_or(false);
    if !positive {
        return Err(WalletError::InvalidAmount(trimmed.to_string()));
    }

    let value = parse_ether(trimmed).map_err(|e| WalletError::InvalidAmount(format!("{trimmed} ({e})")))?;
    if value.is_zero() {
        return Err(WalletError::InvalidAmount(trimmed.to_string()));
    }
    Ok(value)
}
