// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet provider seam and session management.
//!
//! A [`WalletProvider`] stands in for a browser wallet extension: it accepts
//! a chain suggestion, enables a chain and hands out an [`OfflineSigner`].
//! [`ChainConnector`] opens the query and signing clients for a session.

pub mod keyring;
pub mod session;

use std::sync::Arc;

use async_trait::async_trait;
use cosmrs::crypto::PublicKey;
use cosmrs::tx::{Raw, SignDoc};

use crate::blockchain::{
    ChainConfig, ContractExecutor, ContractQuerier, GasPrice, LcdClient, SigningClient,
};
use crate::error::ClientError;

pub use keyring::LocalKeyring;
pub use session::{Session, SessionManager, SessionStatus, SessionView};

/// An account exposed by a signer.
#[derive(Debug, Clone)]
pub struct AccountData {
    pub address: String,
    pub public_key: PublicKey,
}

/// Signs transactions without network access.
#[async_trait]
pub trait OfflineSigner: Send + Sync {
    async fn accounts(&self) -> Result<Vec<AccountData>, ClientError>;

    /// Sign `doc` in direct mode with the key behind `signer_address`.
    async fn sign_direct(&self, signer_address: &str, doc: SignDoc) -> Result<Raw, ClientError>;
}

/// Wallet capable of managing chains and producing signers.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Register a chain definition with the wallet.
    async fn suggest_chain(&self, chain: &ChainConfig) -> Result<(), ClientError>;

    /// Request account access for a registered chain.
    async fn enable(&self, chain_id: &str) -> Result<(), ClientError>;

    /// Signer for an enabled chain.
    fn offline_signer(&self, chain_id: &str) -> Result<Arc<dyn OfflineSigner>, ClientError>;
}

/// Query and signing handles sharing one transport.
#[derive(Clone)]
pub struct ChainClients {
    pub query: Arc<dyn ContractQuerier>,
    pub signing: Arc<dyn ContractExecutor>,
}

/// Opens chain clients for a connected wallet.
#[async_trait]
pub trait ChainConnector: Send + Sync {
    async fn connect(
        &self,
        chain: &ChainConfig,
        signer: Arc<dyn OfflineSigner>,
    ) -> Result<ChainClients, ClientError>;
}

/// Connector backed by the LCD REST gateway.
pub struct LcdConnector {
    gas_price: GasPrice,
    gas_limit: u64,
}

impl LcdConnector {
    pub fn new(gas_price: GasPrice, gas_limit: u64) -> Self {
        Self {
            gas_price,
            gas_limit,
        }
    }
}

#[async_trait]
impl ChainConnector for LcdConnector {
    async fn connect(
        &self,
        chain: &ChainConfig,
        signer: Arc<dyn OfflineSigner>,
    ) -> Result<ChainClients, ClientError> {
        let lcd = LcdClient::connect(chain).await?;
        let signing = SigningClient::new(
            lcd.clone(),
            signer,
            self.gas_price.clone(),
            self.gas_limit,
        );
        Ok(ChainClients {
            query: Arc::new(lcd),
            signing: Arc::new(signing),
        })
    }
}
