//! RPC Connector - alloy JSON-RPC wallet backend
//!
//! Two account sources:
//! - local private keys (signed here, via the provider's wallet filler)
//! - the node's own unlocked accounts (`eth_accounts`, signed by the node)
//!
//! ⚠️  SECURITY WARNING:
//! - Never log or expose private keys
//! - Use environment variables, not hardcoded keys

use alloy_network::EthereumWallet;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use eyre::{eyre, Result};
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::WalletConnector;
use crate::config::Config;

pub struct RpcConnector {
    rpc_url: String,
    chain_id: u64,
    confirmations: u64,
    signers: Vec<PrivateKeySigner>,
    /// Used on connect instead of dialing `rpc_url`
    preset: Option<DynProvider>,
    /// Present only between connect and disconnect
    provider: RwLock<Option<DynProvider>>,
}

impl RpcConnector {
    /// Create with explicit keys (hex, with or without 0x)
    pub fn new(rpc_url: &str, chain_id: u64, confirmations: u64, keys: &[String]) -> Result<Self> {
        let signers = keys
            .iter()
            .map(|k| {
                PrivateKeySigner::from_str(k.trim().trim_start_matches("0x"))
                    .map(|s| s.with_chain_id(Some(chain_id)))
                    .map_err(|e| eyre!("Failed to parse wallet private key: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        for signer in &signers {
            info!("✓ Local signer loaded: {:?}", signer.address());
        }

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            chain_id,
            confirmations: confirmations.max(1),
            signers,
            preset: None,
            provider: RwLock::new(None),
        })
    }

    /// Connect through an already-built provider (e.g. a mocked transport)
    #[cfg(test)]
    pub(crate) fn with_provider(mut self, provider: DynProvider) -> Self {
        self.preset = Some(provider);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.rpc_url,
            config.chain_id,
            config.confirmations,
            &config.wallet_private_keys,
        )
    }

    /// Addresses of the configured local signers
    pub fn local_accounts(&self) -> Vec<Address> {
        self.signers.iter().map(|s| s.address()).collect()
    }

    fn build_provider(&self) -> Result<DynProvider> {
        if let Some(provider) = &self.preset {
            return Ok(provider.clone());
        }

        let url = self.rpc_url.parse()?;

        let provider = match self.signers.split_first() {
            Some((first, rest)) => {
                let mut wallet = EthereumWallet::from(first.clone());
                for signer in rest {
                    wallet.register_signer(signer.clone());
                }
                ProviderBuilder::new().wallet(wallet).connect_http(url).erased()
            }
            None => ProviderBuilder::new().connect_http(url).erased(),
        };

        Ok(provider)
    }

    async fn provider(&self) -> Result<DynProvider> {
        self.provider
            .read()
            .await
            .clone()
            .ok_or_else(|| eyre!("Wallet not connected"))
    }
}

#[async_trait]
impl WalletConnector for RpcConnector {
    fn name(&self) -> &'static str {
        if self.signers.is_empty() {
            "rpc (node accounts)"
        } else {
            "rpc (local keys)"
        }
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        let provider = self.build_provider()?;

        let remote_chain_id = provider.get_chain_id().await?;
        if remote_chain_id != self.chain_id {
            return Err(eyre!(
                "Chain ID mismatch: node reports {}, expected {}",
                remote_chain_id,
                self.chain_id
            ));
        }

        let accounts = if self.signers.is_empty() {
            provider.get_accounts().await?
        } else {
            self.local_accounts()
        };

        debug!("{} account(s) authorized on chain {}", accounts.len(), remote_chain_id);

        *self.provider.write().await = Some(provider);
        Ok(accounts)
    }

    async fn balance_of(&self, address: Address) -> Result<U256> {
        let provider = self.provider().await?;
        Ok(provider.get_balance(address).await?)
    }

    async fn send_value(&self, from: Address, to: Address, value: U256) -> Result<B256> {
        let provider = self.provider().await?;

        let tx = TransactionRequest::default().from(from).to(to).value(value);

        let pending = provider.send_transaction(tx).await?;
        debug!("Broadcast {:?}, waiting for {} confirmation(s)", pending.tx_hash(), self.confirmations);

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await?;

        Ok(receipt.transaction_hash)
    }

    async fn disconnect(&self) -> Result<()> {
        if self.provider.write().await.take().is_some() {
            debug!("Released RPC provider for {}", self.rpc_url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Anvil's first dev account (DO NOT USE WITH REAL FUNDS)
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_loads_local_signer() {
        let connector = RpcConnector::new("http://127.0.0.1:8545", 31337, 1, &[TEST_KEY.to_string()]).unwrap();
        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(connector.local_accounts(), vec![expected]);
        assert_eq!(connector.name(), "rpc (local keys)");
    }

    #[test]
    fn test_rejects_bad_key() {
        let result = RpcConnector::new("http://127.0.0.1:8545", 31337, 1, &["0x1234".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_node_accounts_mode() {
        let connector = RpcConnector::new("http://127.0.0.1:8545", 31337, 0, &[]).unwrap();
        assert!(connector.local_accounts().is_empty());
        assert_eq!(connector.name(), "rpc (node accounts)");
        // At least one confirmation is always awaited
        assert_eq!(connector.confirmations, 1);
    }

    #[test]
    fn test_invalid_url_fails_to_build() {
        let connector = RpcConnector::new("not a url", 31337, 1, &[]).unwrap();
        assert!(connector.build_provider().is_err());
    }

    #[tokio::test]
    async fn test_requires_connection() {
        let connector = RpcConnector::new("http://127.0.0.1:8545", 31337, 1, &[]).unwrap();
        let err = connector.balance_of(Address::ZERO).await.unwrap_err();
        assert!(err.to_string().contains("not connected"));

        // Disconnect without a connection is a no-op
        tokio_test::assert_ok!(connector.disconnect().await);
    }

    // ============================================
    // MOCKED NODE
    // ============================================

    use crate::wallet::{WalletError, WalletSession};
    use alloy_primitives::{address, U64};
    use alloy_transport::mock::Asserter;
    use std::sync::Arc;

    const ALICE: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const BOB: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    fn mocked(keys: &[String]) -> (RpcConnector, Asserter) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased();
        let connector = RpcConnector::new("http://127.0.0.1:8545", 31337, 1, keys)
            .unwrap()
            .with_provider(provider);
        (connector, asserter)
    }

    #[tokio::test]
    async fn test_chain_id_mismatch_is_rejected() {
        let (connector, asserter) = mocked(&[]);
        asserter.push_success(&U64::from(1));

        let err = connector.request_accounts().await.unwrap_err();
        assert!(err.to_string().contains("Chain ID mismatch"), "{err}");

        // No provider is kept after a failed connect
        assert!(connector.balance_of(ALICE).await.is_err());
    }

    #[tokio::test]
    async fn test_node_accounts_are_requested_without_keys() {
        let (connector, asserter) = mocked(&[]);
        asserter.push_success(&U64::from(31337));
        asserter.push_success(&vec![ALICE, BOB]);

        let accounts = connector.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![ALICE, BOB]);

        asserter.push_success(&U256::from(1_500_000_000_000_000_000u128));
        let balance = connector.balance_of(ALICE).await.unwrap();
        assert_eq!(balance, U256::from(1_500_000_000_000_000_000u128));
    }

    #[tokio::test]
    async fn test_local_keys_skip_eth_accounts() {
        let (connector, asserter) = mocked(&[TEST_KEY.to_string()]);
        // Only eth_chainId is answered; an eth_accounts call would fail
        asserter.push_success(&U64::from(31337));

        let accounts = connector.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![ALICE]);
    }

    #[tokio::test]
    async fn test_empty_node_accounts_fail_session_connect() {
        let (connector, asserter) = mocked(&[]);
        asserter.push_success(&U64::from(31337));
        asserter.push_success(&Vec::<Address>::new());

        let mut session = WalletSession::new(Arc::new(connector));
        let err = session.connect().await.unwrap_err();
        assert!(matches!(err, WalletError::NoAccounts));
        assert_eq!(err.to_string(), "No accounts found");
        assert!(!session.is_connected());
    }
}
