use crate::entity::BotError;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use anyhow::Result;
use std::str::FromStr;

/// Restore a signer from a hex private key, with or without the `0x` prefix.
pub fn signer_from_hex(private_key: &str) -> Result<PrivateKeySigner> {
    let key = private_key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);

    if key.len() != 64 {
        return Err(BotError::InvalidPrivateKey(format!(
            "expected 64 hex chars, got {}",
            key.len()
        ))
        .into());
    }

    PrivateKeySigner::from_str(key).map_err(|e| BotError::InvalidPrivateKey(e.to_string()).into())
}

/// EIP-55 checksummed representation
pub fn checksum(address: &Address) -> String {
    address.to_checksum(None)
}
