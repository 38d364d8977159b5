// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key loading for the local wallet.
//!
//! Keys are secp256k1, stored either as PEM (PKCS#8 or SEC1) or as a raw
//! hex string. Both end up as a [`cosmrs`] signing key.

use cosmrs::crypto::secp256k1::SigningKey;
use k256::SecretKey;

use crate::error::ClientError;

/// Parse a private key from PEM format to hex string.
///
/// # Returns
/// * `Ok(String)` - Hex-encoded private key (64 characters, no 0x prefix)
/// * `Err(ClientError)` - If PEM parsing fails
pub fn pem_to_hex(pem_bytes: &[u8]) -> Result<String, ClientError> {
    Ok(hex::encode(secret_key_from_pem(pem_bytes)?.to_bytes()))
}

fn secret_key_from_pem(pem_bytes: &[u8]) -> Result<SecretKey, ClientError> {
    let pem_str = std::str::from_utf8(pem_bytes)
        .map_err(|e| ClientError::WalletUnavailable(format!("Invalid UTF-8 in key: {e}")))?;

    let pem = pem::parse(pem_str)
        .map_err(|e| ClientError::WalletUnavailable(format!("Invalid PEM: {e}")))?;

    SecretKey::from_sec1_der(pem.contents())
        .or_else(|_| parse_pkcs8_to_secret_key(pem.contents()))
        .map_err(|e| ClientError::WalletUnavailable(format!("Invalid key format: {e}")))
}

fn parse_pkcs8_to_secret_key(der: &[u8]) -> Result<SecretKey, String> {
    use k256::pkcs8::DecodePrivateKey;
    SecretKey::from_pkcs8_der(der).map_err(|e| e.to_string())
}

/// Create a signing key from a hex string (optional `0x` prefix).
pub fn signing_key_from_hex(private_key_hex: &str) -> Result<SigningKey, ClientError> {
    let trimmed = private_key_hex.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(trimmed).map_err(|e| {
        ClientError::WalletUnavailable(format!("Private key is not valid hex: {e}"))
    })?;
    if bytes.len() != 32 {
        return Err(ClientError::WalletUnavailable(format!(
            "Private key must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    SigningKey::from_slice(&bytes)
        .map_err(|e| ClientError::WalletUnavailable(format!("Invalid private key: {e}")))
}

/// Create a signing key from PEM-encoded key bytes.
pub fn signing_key_from_pem(pem_bytes: &[u8]) -> Result<SigningKey, ClientError> {
    let secret_key = secret_key_from_pem(pem_bytes)?;
    SigningKey::from_slice(&secret_key.to_bytes())
        .map_err(|e| ClientError::WalletUnavailable(format!("Invalid private key: {e}")))
}

/// Bech32 account address of a key under the given prefix.
pub fn account_address(key: &SigningKey, prefix: &str) -> Result<String, ClientError> {
    key.public_key()
        .account_id(prefix)
        .map(|id| id.to_string())
        .map_err(|e| ClientError::WalletUnavailable(format!("Cannot derive address: {e}")))
}
