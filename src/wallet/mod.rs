//! Wallet Adapter
//!
//! A `WalletSession` is created once at startup and lives for the whole
//! process. It talks to the chain through a `WalletConnector`:
//! - `RpcConnector`: alloy JSON-RPC, local keys or node-managed accounts
//! - test builds add an in-memory mock

mod rpc;
mod session;

pub use rpc::RpcConnector;
pub use session::{WalletError, WalletSession, WalletState};

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use eyre::Result;

/// The external wallet capability: account authorization, balance reads,
/// signing and broadcasting. Errors are the backend's own.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Open the connection and return the authorized accounts
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Native balance in wei
    async fn balance_of(&self, address: Address) -> Result<U256>;

    /// Sign and broadcast a native transfer; resolves once confirmed
    async fn send_value(&self, from: Address, to: Address, value: U256) -> Result<B256>;

    /// Release the connection
    async fn disconnect(&self) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory connector. Transfers debit the sender's balance.
    #[derive(Default)]
    pub struct MockConnector {
        pub accounts: Vec<Address>,
        pub balance: Mutex<U256>,
        pub fail_accounts: bool,
        pub fail_balance: bool,
        pub fail_send: bool,
        pub fail_disconnect: bool,
        pub sent: Mutex<Vec<(Address, Address, U256)>>,
        pub disconnects: AtomicUsize,
    }

    impl MockConnector {
        pub fn with_balance(account: Address, wei: U256) -> Self {
            Self {
                accounts: vec![account],
                balance: Mutex::new(wei),
                ..Default::default()
            }
        }

        pub fn sent(&self) -> Vec<(Address, Address, U256)> {
            self.sent.lock().unwrap().clone()
        }

        pub fn disconnect_count(&self) -> usize {
            self.disconnects.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WalletConnector for MockConnector {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn request_accounts(&self) -> Result<Vec<Address>> {
            if self.fail_accounts {
                eyre::bail!("user rejected the request");
            }
            Ok(self.accounts.clone())
        }

        async fn balance_of(&self, _address: Address) -> Result<U256> {
            if self.fail_balance {
                eyre::bail!("rpc unavailable");
            }
            Ok(*self.balance.lock().unwrap())
        }

        async fn send_value(&self, from: Address, to: Address, value: U256) -> Result<B256> {
            if self.fail_send {
                eyre::bail!("insufficient funds for gas * price + value");
            }
            let mut balance = self.balance.lock().unwrap();
            *balance = balance.saturating_sub(value);
            let mut sent = self.sent.lock().unwrap();
            sent.push((from, to, value));
            Ok(B256::with_last_byte(sent.len() as u8))
        }

        async fn disconnect(&self) -> Result<()> {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
            if self.fail_disconnect {
                eyre::bail!("connector already closed");
            }
            Ok(())
        }
    }
}
