// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only chain access over the Cosmos LCD REST gateway.

use std::time::Duration;

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::transactions::TxOutcome;
use super::types::ChainConfig;
use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything that can run a CosmWasm smart query.
#[async_trait]
pub trait ContractQuerier: Send + Sync {
    async fn query_smart(&self, contract: &str, msg: &Value) -> Result<Value, ClientError>;
}

/// Client for one chain's LCD endpoint.
#[derive(Debug, Clone)]
pub struct LcdClient {
    http: reqwest::Client,
    base: Url,
    chain_id: String,
}

#[derive(Debug, Deserialize)]
struct NodeInfoResponse {
    default_node_info: NodeInfo,
}

#[derive(Debug, Deserialize)]
struct NodeInfo {
    network: String,
}

#[derive(Debug, Deserialize)]
struct SmartQueryResponse {
    data: Value,
}

impl LcdClient {
    /// Build a client without touching the network.
    pub fn new(chain: &ChainConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&chain.rest_url)
            .map_err(|e| ClientError::Validation(format!("invalid rest url: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base,
            chain_id: chain.chain_id.clone(),
        })
    }

    /// Build a client and check the endpoint serves the expected chain.
    pub async fn connect(chain: &ChainConfig) -> Result<Self, ClientError> {
        let client = Self::new(chain)?;
        let url = client.endpoint(&["cosmos", "base", "tendermint", "v1beta1", "node_info"])?;
        let info: NodeInfoResponse = client.get_json(url).await?;

        if info.default_node_info.network != client.chain_id {
            return Err(ClientError::Network(format!(
                "endpoint serves chain {}, expected {}",
                info.default_node_info.network, client.chain_id
            )));
        }

        tracing::debug!(chain_id = %client.chain_id, rest = %client.base, "LCD endpoint connected");
        Ok(client)
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Account number and sequence of an on-chain account.
    pub async fn account_info(&self, address: &str) -> Result<(u64, u64), ClientError> {
        let url = self.endpoint(&["cosmos", "auth", "v1beta1", "accounts", address])?;
        let body: Value = self.get_json(url).await?;
        parse_account_response(&body)
    }

    /// Broadcast signed transaction bytes in sync mode.
    pub async fn broadcast_tx(&self, tx_bytes: &[u8]) -> Result<TxOutcome, ClientError> {
        let url = self.endpoint(&["cosmos", "tx", "v1beta1", "txs"])?;
        let request = serde_json::json!({
            "tx_bytes": Base64::encode_string(tx_bytes),
            "mode": "BROADCAST_MODE_SYNC",
        });

        let response = self.http.post(url).json(&request).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            return Err(rejection_from_body(status, &body));
        }
        parse_broadcast_response(&body)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation("rest url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Err(rejection_from_body(status, &body))
    }
}

#[async_trait]
impl ContractQuerier for LcdClient {
    async fn query_smart(&self, contract: &str, msg: &Value) -> Result<Value, ClientError> {
        let url = smart_query_url(&self.base, contract, msg)?;
        let response: SmartQueryResponse = self.get_json(url).await?;
        Ok(response.data)
    }
}

/// `/cosmwasm/wasm/v1/contract/{addr}/smart/{base64(msg)}`.
pub fn smart_query_url(base: &Url, contract: &str, msg: &Value) -> Result<Url, ClientError> {
    let encoded = Base64::encode_string(msg.to_string().as_bytes());
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::Validation("rest url cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["cosmwasm", "wasm", "v1", "contract", contract, "smart"])
        .push(&encoded);
    Ok(url)
}

/// 4xx answers carry the contract's own message; 5xx means the node failed.
fn rejection_from_body(status: reqwest::StatusCode, body: &Value) -> ClientError {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"));
    if status.is_client_error() {
        ClientError::ContractRejected(message)
    } else {
        ClientError::Network(message)
    }
}

pub(crate) fn parse_account_response(body: &Value) -> Result<(u64, u64), ClientError> {
    let account = body
        .get("account")
        .ok_or_else(|| ClientError::Network("account response has no account".to_string()))?;
    // Vesting accounts nest the base account one level down.
    let base = account
        .get("base_account")
        .or_else(|| account.get("base_vesting_account").and_then(|v| v.get("base_account")))
        .unwrap_or(account);

    let field = |name: &str| -> Result<u64, ClientError> {
        match base.get(name) {
            Some(Value::String(s)) => s
                .parse()
                .map_err(|_| ClientError::Network(format!("invalid {name}: {s}"))),
            Some(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| ClientError::Network(format!("invalid {name}: {n}"))),
            None | Some(Value::Null) => Ok(0),
            Some(other) => Err(ClientError::Network(format!("invalid {name}: {other}"))),
        }
    };

    Ok((field("account_number")?, field("sequence")?))
}

pub(crate) fn parse_broadcast_response(body: &Value) -> Result<TxOutcome, ClientError> {
    let tx = body
        .get("tx_response")
        .ok_or_else(|| ClientError::Network("broadcast response has no tx_response".to_string()))?;

    let code = tx.get("code").and_then(Value::as_u64).unwrap_or(0);
    let tx_hash = tx
        .get("txhash")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // Codes outside u32 are not valid ABCI codes; they are rejections too.
    if u32::try_from(code) != Ok(0) {
        let raw_log = tx.get("raw_log").and_then(Value::as_str).unwrap_or_default();
        return Err(ClientError::ContractRejected(format!(
            "tx {tx_hash} failed with code {code}: {raw_log}"
        )));
    }

    let height = match tx.get("height") {
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    };

    Ok(TxOutcome {
        tx_hash,
        height,
        code: 0,
    })
}
