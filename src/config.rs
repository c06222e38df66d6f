//! Configuration for Swapdesk
//!
//! Loaded from environment variables (and `.env`) or from a TOML file.
//! Private keys are accepted here but never printed.

use alloy_signer_local::PrivateKeySigner;
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

// ============================================
// MAIN CONFIGURATION
// ============================================

/// Main configuration struct for Swapdesk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name shown in the banner
    pub app_name: String,

    // ========== Network Settings ==========
    /// JSON-RPC endpoint (a local Anvil node by default)
    pub rpc_url: String,

    /// Expected chain ID; checked against the node on connect
    pub chain_id: u64,

    // ========== Wallet Settings ==========
    /// Local signing keys (KEEP SECRET!)
    /// Empty = use the node's own unlocked accounts
    pub wallet_private_keys: Vec<String>,

    /// Confirmations to wait for before a transfer counts as done
    pub confirmations: u64,

    /// Connect as soon as the terminal starts
    pub auto_connect: bool,

    /// Seconds between balance polls while connected (0 = off)
    pub balance_poll_secs: u64,

    // ========== Quote Simulator ==========
    /// Artificial latency for each quote
    pub quote_delay_ms: u64,

    /// Symbolic ETH/USDC rate
    pub eth_usdc_rate: f64,

    /// Fixed RNG seed for reproducible quotes
    pub quote_seed: Option<u64>,

    // ========== Swap Log ==========
    /// Append one JSON line per confirmed swap (off when unset)
    pub swap_log_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            app_name: env::var("SWAPDESK_APP_NAME").unwrap_or(defaults.app_name),

            // Network
            rpc_url: env::var("RPC_URL").unwrap_or(defaults.rpc_url),
            chain_id: env::var("CHAIN_ID")
                .unwrap_or_else(|_| "31337".to_string())
                .parse()
                .unwrap_or(defaults.chain_id),

            // Wallet
            wallet_private_keys: env::var("WALLET_PRIVATE_KEYS")
                .map(|s| {
                    s.split(',')
                        .map(|k| k.trim().to_string())
                        .filter(|k| !k.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            confirmations: env::var("CONFIRMATIONS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(defaults.confirmations),
            auto_connect: env::var("AUTO_CONNECT")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            balance_poll_secs: env::var("BALANCE_POLL_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(defaults.balance_poll_secs),

            // Quote simulator
            quote_delay_ms: env::var("QUOTE_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap_or(defaults.quote_delay_ms),
            eth_usdc_rate: env::var("ETH_USDC_RATE")
                .unwrap_or_else(|_| "2000.0".to_string())
                .parse()
                .unwrap_or(defaults.eth_usdc_rate),
            quote_seed: env::var("QUOTE_SEED").ok().and_then(|s| s.parse().ok()),

            // Swap log
            swap_log_path: env::var("SWAP_LOG_PATH").ok().filter(|p| !p.is_empty()),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration before anything touches the network
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(eyre::eyre!("Invalid RPC_URL - it must not be empty"));
        }

        if self.confirmations == 0 {
            return Err(eyre::eyre!("CONFIRMATIONS must be at least 1"));
        }

        if !self.eth_usdc_rate.is_finite() || self.eth_usdc_rate <= 0.0 {
            return Err(eyre::eyre!(
                "ETH_USDC_RATE must be a positive number (currently {})",
                self.eth_usdc_rate
            ));
        }

        for (i, key) in self.wallet_private_keys.iter().enumerate() {
            if PrivateKeySigner::from_str(key.trim_start_matches("0x")).is_err() {
                return Err(eyre::eyre!(
                    "WALLET_PRIVATE_KEYS entry #{} is not a valid private key",
                    i + 1
                ));
            }
        }

        Ok(())
    }

    pub fn quote_delay(&self) -> Duration {
        Duration::from_millis(self.quote_delay_ms)
    }

    /// None when polling is disabled
    pub fn balance_poll_interval(&self) -> Option<Duration> {
        (self.balance_poll_secs > 0).then(|| Duration::from_secs(self.balance_poll_secs))
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════╗");
        println!("║              SWAPDESK - CONFIGURATION                      ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ RPC URL:           {:^40} ║", truncate(&self.rpc_url, 40));
        println!("║ Chain ID:          {:^40} ║", self.chain_id);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ WALLET                                                     ║");
        println!("║ • Signer:          {:^40} ║",
            if self.wallet_private_keys.is_empty() {
                "Node accounts".to_string()
            } else {
                format!("✓ {} local key(s)", self.wallet_private_keys.len())
            }
        );
        println!("║ • Confirmations:   {:^40} ║", self.confirmations);
        println!("║ • Balance Poll:    {:^40} ║",
            match self.balance_poll_interval() {
                Some(interval) => format!("every {}s", interval.as_secs()),
                None => "✗ Disabled".to_string(),
            }
        );
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ QUOTES                                                     ║");
        println!("║ • Delay:           {:>37} ms ║", self.quote_delay_ms);
        println!("║ • ETH/USDC Rate:   {:<40.2} ║", self.eth_usdc_rate);
        println!("║ • Seed:            {:^40} ║",
            self.quote_seed.map(|s| s.to_string()).unwrap_or_else(|| "random".to_string())
        );
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ • Swap Log:        {:^40} ║",
            self.swap_log_path.as_deref().map(|p| truncate(p, 40)).unwrap_or_else(|| "✗ Disabled".to_string())
        );
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Swapdesk".to_string(),
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: 31337,
            wallet_private_keys: vec![],
            confirmations: 1,
            auto_connect: false,
            balance_poll_secs: 15,
            quote_delay_ms: 1000,
            eth_usdc_rate: 2000.0,
            quote_seed: None,
            swap_log_path: None,
        }
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    // Anvil's first dev account (DO NOT USE WITH REAL FUNDS)
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.confirmations, 1);
        assert_eq!(config.quote_delay(), Duration::from_secs(1));
        assert!(config.wallet_private_keys.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.rpc_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.confirmations = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.eth_usdc_rate = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.wallet_private_keys = vec!["0xnothex".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_key() {
        let mut config = Config::default();
        config.wallet_private_keys = vec![TEST_KEY.to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_poll_interval() {
        let mut config = Config::default();
        assert_eq!(config.balance_poll_interval(), Some(Duration::from_secs(15)));
        config.balance_poll_secs = 0;
        assert_eq!(config.balance_poll_interval(), None);
    }

    #[test]
    fn test_toml_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "http://localhost:9545"
            quote_seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:9545");
        assert_eq!(config.quote_seed, Some(7));
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.balance_poll_secs, 15);
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!("swapdesk-config-{}.toml", std::process::id()));
        let mut config = Config::default();
        config.swap_log_path = Some("./logs/swaps.jsonl".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.swap_log_path.as_deref(), Some("./logs/swaps.jsonl"));
        assert_eq!(loaded.eth_usdc_rate, 2000.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 40), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
    }
}
