//! Demo Wallet Generator
//!
//! Run with: cargo run --bin generate-wallet
//!
//! Prints a fresh key in `.env` form for the swap terminal. Fund it on the
//! devnet before connecting (e.g. `cast send --value 10ether <ADDRESS>`).

use alloy_signer_local::PrivateKeySigner;

fn main() {
    println!();
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║          SWAPDESK DEMO WALLET                              ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    let signer = PrivateKeySigner::random();
    let address = signer.address();
    let private_key = format!("0x{}", hex::encode(signer.credential().to_bytes()));

    println!("🔑 NEW WALLET GENERATED");
    println!();
    println!("   Address:     {}", address.to_checksum(None));
    println!("   Private Key: {}", private_key);
    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("⚠️  This key is for local devnets only. Never send real funds to it.");
    println!();
    println!("📝 TO USE THIS WALLET (add to .env):");
    println!();
    println!("   WALLET_PRIVATE_KEYS={}", private_key);
    println!();
    println!("   Several keys can be comma separated; the first one is used.");
    println!();
}
