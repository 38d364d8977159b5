// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory stand-ins for the wallet, chain and HTTP collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cosmrs::crypto::secp256k1::SigningKey;
use cosmrs::tx::{Raw, SignDoc};
use serde_json::{json, Value};

use crate::blockchain::signing::tests::{TEST_ADDRESS, TEST_KEY_HEX};
use crate::blockchain::signing::signing_key_from_hex;
use crate::blockchain::{ChainConfig, ContractExecutor, ContractQuerier, TxOutcome};
use crate::error::ClientError;
use crate::exchange::{OrderIntake, OrderRecord, PriceSource, SwapToken};
use crate::wallet::{AccountData, ChainClients, ChainConnector, OfflineSigner, Session, WalletProvider};

pub const TEST_SIGNER: &str = TEST_ADDRESS;

fn test_key() -> SigningKey {
    signing_key_from_hex(TEST_KEY_HEX).unwrap()
}

pub struct MockSigner {
    key: SigningKey,
}

impl MockSigner {
    pub fn shared() -> Arc<dyn OfflineSigner> {
        Arc::new(Self { key: test_key() })
    }
}

#[async_trait]
impl OfflineSigner for MockSigner {
    async fn accounts(&self) -> Result<Vec<AccountData>, ClientError> {
        Ok(vec![AccountData {
            address: TEST_SIGNER.to_string(),
            public_key: self.key.public_key(),
        }])
    }

    async fn sign_direct(&self, _signer_address: &str, doc: SignDoc) -> Result<Raw, ClientError> {
        doc.sign(&self.key)
            .map_err(|e| ClientError::WalletUnavailable(e.to_string()))
    }
}

#[derive(Default)]
pub struct MockWallet {
    fail_suggest: bool,
}

impl MockWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_suggest(mut self) -> Self {
        self.fail_suggest = true;
        self
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn suggest_chain(&self, _chain: &ChainConfig) -> Result<(), ClientError> {
        if self.fail_suggest {
            return Err(ClientError::WalletUnavailable("suggestion refused".into()));
        }
        Ok(())
    }

    async fn enable(&self, _chain_id: &str) -> Result<(), ClientError> {
        Ok(())
    }

    fn offline_signer(&self, _chain_id: &str) -> Result<Arc<dyn OfflineSigner>, ClientError> {
        Ok(MockSigner::shared())
    }
}

/// Answers smart queries from the query shape and records every call.
#[derive(Clone, Default)]
pub struct MockQuerier {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
    fail_at: Option<usize>,
}

impl MockQuerier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the call with this zero-based index.
    pub fn fail_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn orders_response() -> Value {
        json!([{"order_id": 1, "status": "open"}])
    }

    pub fn listed_tokens_response() -> Value {
        json!(["osmo", "osmo1usdc"])
    }
}

#[async_trait]
impl ContractQuerier for MockQuerier {
    async fn query_smart(&self, contract: &str, msg: &Value) -> Result<Value, ClientError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((contract.to_string(), msg.clone()));
            calls.len() - 1
        };
        if self.fail_at == Some(index) {
            return Err(ClientError::ContractRejected("query failed".into()));
        }

        let (method, body) = msg
            .as_object()
            .and_then(|o| o.iter().next())
            .ok_or_else(|| ClientError::ContractRejected("empty query".into()))?;
        Ok(match method.as_str() {
            "user_orders" => Self::orders_response(),
            "listed_tokens" => Self::listed_tokens_response(),
            _ => json!(format!(
                "{method}:{}",
                body["token_address"].as_str().unwrap_or_default()
            )),
        })
    }
}

/// Records executions; optionally rejects them.
#[derive(Clone, Default)]
pub struct MockExecutor {
    executed: Arc<Mutex<Vec<(String, String, Value)>>>,
    reject: bool,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn executed(&self) -> Vec<(String, String, Value)> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractExecutor for MockExecutor {
    async fn execute(
        &self,
        sender: &str,
        contract: &str,
        msg: &Value,
    ) -> Result<TxOutcome, ClientError> {
        if self.reject {
            return Err(ClientError::ContractRejected("out of gas".into()));
        }
        let mut executed = self.executed.lock().unwrap();
        executed.push((sender.to_string(), contract.to_string(), msg.clone()));
        Ok(TxOutcome {
            tx_hash: format!("MOCKTX{}", executed.len()),
            height: 0,
            code: 0,
        })
    }
}

pub struct MockConnector {
    querier: MockQuerier,
    executor: MockExecutor,
    fail: bool,
}

impl MockConnector {
    pub fn ok() -> Self {
        Self::with(MockQuerier::new(), MockExecutor::new())
    }

    pub fn with(querier: MockQuerier, executor: MockExecutor) -> Self {
        Self {
            querier,
            executor,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }
}

#[async_trait]
impl ChainConnector for MockConnector {
    async fn connect(
        &self,
        _chain: &ChainConfig,
        _signer: Arc<dyn OfflineSigner>,
    ) -> Result<ChainClients, ClientError> {
        if self.fail {
            return Err(ClientError::Network("connection refused".into()));
        }
        Ok(ChainClients {
            query: Arc::new(self.querier.clone()),
            signing: Arc::new(self.executor.clone()),
        })
    }
}

pub fn mock_session(querier: MockQuerier, executor: MockExecutor) -> Session {
    Session {
        signer: TEST_SIGNER.to_string(),
        chain_name: "Osmosis Testnet".to_string(),
        query_client: Arc::new(querier),
        signing_client: Arc::new(executor),
    }
}

/// Fixed rate, or a network failure when `None`.
#[derive(Clone)]
pub struct MockPrices {
    rate: Option<f64>,
    requests: Arc<Mutex<Vec<(SwapToken, SwapToken)>>>,
}

impl MockPrices {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: Some(rate),
            requests: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            rate: None,
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<(SwapToken, SwapToken)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for MockPrices {
    async fn rate(&self, sell: SwapToken, buy: SwapToken) -> Result<f64, ClientError> {
        self.requests.lock().unwrap().push((sell, buy));
        self.rate
            .ok_or_else(|| ClientError::Network("price endpoint unreachable".into()))
    }
}

#[derive(Clone, Default)]
pub struct MockIntake {
    submitted: Arc<Mutex<Vec<OrderRecord>>>,
    fail: bool,
}

impl MockIntake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn submitted(&self) -> Vec<OrderRecord> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderIntake for MockIntake {
    async fn submit(&self, order: &OrderRecord) -> Result<(), ClientError> {
        if self.fail {
            return Err(ClientError::Network("order endpoint unreachable".into()));
        }
        self.submitted.lock().unwrap().push(order.clone());
        Ok(())
    }
}

/// Application state wired to mocks, with storage in a temp directory.
pub struct TestApp {
    pub state: crate::state::AppState,
    pub querier: MockQuerier,
    pub executor: MockExecutor,
    pub prices: MockPrices,
    pub intake: MockIntake,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(true, MockPrices::new(2.0), MockIntake::new())
    }

    pub fn without_wallet() -> Self {
        Self::build(false, MockPrices::new(2.0), MockIntake::new())
    }

    pub fn failing_prices() -> Self {
        Self::build(true, MockPrices::failing(), MockIntake::new())
    }

    pub fn failing_intake() -> Self {
        Self::build(true, MockPrices::new(2.0), MockIntake::failing())
    }

    fn build(wallet: bool, prices: MockPrices, intake: MockIntake) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::config::AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let querier = MockQuerier::new();
        let executor = MockExecutor::new();

        let provider: Option<Arc<dyn WalletProvider>> = if wallet {
            Some(Arc::new(MockWallet::new()))
        } else {
            None
        };
        let sessions = crate::wallet::SessionManager::new(
            provider,
            Arc::new(MockConnector::with(querier.clone(), executor.clone())),
            config.chain.clone(),
        );
        let storage = crate::storage::LocalStorage::open(&config.data_dir).unwrap();
        let orders = crate::storage::OrderHistory::load(storage).unwrap();

        let state = crate::state::AppState::new(
            config,
            sessions,
            orders,
            Arc::new(prices.clone()),
            Arc::new(intake.clone()),
            crate::exchange::PaillierPublicKey::order_book().unwrap(),
        );

        Self {
            state,
            querier,
            executor,
            prices,
            intake,
            _dir: dir,
        }
    }
}
