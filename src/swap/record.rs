// ============================================
// SWAP LOG
// ============================================

use alloy_primitives::B256;
use chrono::{DateTime, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

use super::SwapOrder;

/// One confirmed swap, written as a JSON line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwapRecord {
    pub timestamp: DateTime<Utc>,
    pub from_symbol: String,
    pub to_symbol: String,
    pub from_amount: String,
    pub to_amount: String,
    pub recipient: String,
    pub tx_hash: String,
}

impl SwapRecord {
    pub fn from_order(order: &SwapOrder, tx_hash: B256) -> Self {
        Self {
            timestamp: Utc::now(),
            from_symbol: order.from.symbol.to_string(),
            to_symbol: order.to.symbol.to_string(),
            from_amount: order.from_amount.clone(),
            to_amount: order.to_amount.clone(),
            recipient: order.to.address.to_checksum(None),
            tx_hash: format!("{:?}", tx_hash),
        }
    }

    /// Append this record to a file
    pub fn append_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        let json = serde_json::to_string(self)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::find_token;

    #[test]
    fn test_append_writes_json_lines() {
        let dir = std::env::temp_dir().join(format!("swapdesk-log-{}", std::process::id()));
        let path = dir.join("nested").join("swaps.jsonl");

        let order = SwapOrder {
            from: find_token("ETH").unwrap(),
            to: find_token("USDC").unwrap(),
            from_amount: "0.5".to_string(),
            to_amount: "1000.000000".to_string(),
        };
        let record = SwapRecord::from_order(&order, B256::with_last_byte(0xab));

        record.append_to_file(&path).unwrap();
        record.append_to_file(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: SwapRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.recipient, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
        assert!(parsed.tx_hash.ends_with("ab"));

        let _ = fs::remove_dir_all(&dir);
    }
}
