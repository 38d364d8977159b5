// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local keyring wallet holding a single secp256k1 key.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use cosmrs::crypto::secp256k1::SigningKey;
use cosmrs::tx::{Raw, SignDoc};

use super::{AccountData, OfflineSigner, WalletProvider};
use crate::blockchain::signing::{account_address, signing_key_from_hex, signing_key_from_pem};
use crate::blockchain::ChainConfig;
use crate::config::WalletKeySource;
use crate::error::ClientError;

/// Wallet provider backed by a key loaded at startup.
///
/// Chains must be suggested before they can be enabled, and enabled before a
/// signer is handed out.
pub struct LocalKeyring {
    key: Arc<SigningKey>,
    chains: RwLock<HashMap<String, ChainConfig>>,
    enabled: RwLock<HashSet<String>>,
}

impl LocalKeyring {
    pub fn new(key: SigningKey) -> Self {
        Self {
            key: Arc::new(key),
            chains: RwLock::new(HashMap::new()),
            enabled: RwLock::new(HashSet::new()),
        }
    }

    /// Load the key from a PEM file or a hex string.
    pub fn from_source(source: &WalletKeySource) -> Result<Self, ClientError> {
        let key = match source {
            WalletKeySource::PemFile(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    ClientError::WalletUnavailable(format!(
                        "cannot read key file {}: {e}",
                        path.display()
                    ))
                })?;
                signing_key_from_pem(&bytes)?
            }
            WalletKeySource::Hex(hex) => signing_key_from_hex(hex)?,
        };
        Ok(Self::new(key))
    }

    fn lock_poisoned() -> ClientError {
        ClientError::WalletUnavailable("keyring lock poisoned".to_string())
    }
}

#[async_trait]
impl WalletProvider for LocalKeyring {
    async fn suggest_chain(&self, chain: &ChainConfig) -> Result<(), ClientError> {
        chain.validate()?;
        let mut chains = self.chains.write().map_err(|_| Self::lock_poisoned())?;
        chains.insert(chain.chain_id.clone(), chain.clone());
        tracing::debug!(chain_id = %chain.chain_id, "Chain registered with keyring");
        Ok(())
    }

    async fn enable(&self, chain_id: &str) -> Result<(), ClientError> {
        let known = self
            .chains
            .read()
            .map_err(|_| Self::lock_poisoned())?
            .contains_key(chain_id);
        if !known {
            return Err(ClientError::WalletUnavailable(format!(
                "chain {chain_id} is not registered with the wallet"
            )));
        }
        self.enabled
            .write()
            .map_err(|_| Self::lock_poisoned())?
            .insert(chain_id.to_string());
        Ok(())
    }

    fn offline_signer(&self, chain_id: &str) -> Result<Arc<dyn OfflineSigner>, ClientError> {
        if !self
            .enabled
            .read()
            .map_err(|_| Self::lock_poisoned())?
            .contains(chain_id)
        {
            return Err(ClientError::WalletUnavailable(format!(
                "chain {chain_id} is not enabled"
            )));
        }
        let chains = self.chains.read().map_err(|_| Self::lock_poisoned())?;
        let chain = chains.get(chain_id).ok_or_else(|| {
            ClientError::WalletUnavailable(format!("chain {chain_id} is not registered"))
        })?;

        let address = account_address(&self.key, chain.account_prefix())?;
        Ok(Arc::new(KeyringSigner {
            key: Arc::clone(&self.key),
            address,
        }))
    }
}

/// Signer for one chain, derived from the keyring key.
struct KeyringSigner {
    key: Arc<SigningKey>,
    address: String,
}

#[async_trait]
impl OfflineSigner for KeyringSigner {
    async fn accounts(&self) -> Result<Vec<AccountData>, ClientError> {
        Ok(vec![AccountData {
            address: self.address.clone(),
            public_key: self.key.public_key(),
        }])
    }

    async fn sign_direct(&self, signer_address: &str, doc: SignDoc) -> Result<Raw, ClientError> {
        if signer_address != self.address {
            return Err(ClientError::WalletUnavailable(format!(
                "no key for {signer_address}"
            )));
        }
        doc.sign(&self.key)
            .map_err(|e| ClientError::WalletUnavailable(format!("signing failed: {e}")))
    }
}
