// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! once at startup into [`AppConfig`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `127.0.0.1` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Root directory for local storage (order history) | `./data` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `CHAIN_REST_URL` | LCD REST endpoint | Osmosis testnet LCD |
//! | `CHAIN_RPC_URL` | Tendermint RPC endpoint (advertised to the wallet) | Osmosis testnet RPC |
//! | `LEVERAGE_CONTRACT_ADDRESS` | Leverage contract address | testnet deployment |
//! | `USDC_CONTRACT_ADDRESS` | Stable token CW20 address | testnet deployment |
//! | `NATIVE_TOKEN_NAME` | Native token identifier passed to the contract | `osmo` |
//! | `GAS_PRICE` | Gas price used by the signing client | `0.250uosmo` |
//! | `GAS_LIMIT` | Gas limit for contract executions | `500000` |
//! | `PRICE_API_URL` | Price conversion endpoint | `http://localhost:3000/api/price-conversion` |
//! | `ORDER_API_URL` | Order intake endpoint | `http://localhost:5000/add_order` |
//! | `WALLET_KEY_PATH` | PEM file holding the wallet secp256k1 key | unset |
//! | `WALLET_PRIVATE_KEY` | Hex-encoded wallet key (used when no PEM path) | unset |

use std::env;
use std::path::PathBuf;

use crate::blockchain::{osmosis_testnet, ChainConfig, GasPrice, TokenConfig};
use crate::error::ClientError;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the local storage directory.
///
/// The order history (`orders.json`) lives directly under this directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const RUST_LOG_ENV: &str = "RUST_LOG";
pub const CHAIN_REST_URL_ENV: &str = "CHAIN_REST_URL";
pub const CHAIN_RPC_URL_ENV: &str = "CHAIN_RPC_URL";
pub const LEVERAGE_CONTRACT_ENV: &str = "LEVERAGE_CONTRACT_ADDRESS";
pub const USDC_CONTRACT_ENV: &str = "USDC_CONTRACT_ADDRESS";
pub const NATIVE_TOKEN_ENV: &str = "NATIVE_TOKEN_NAME";
pub const GAS_PRICE_ENV: &str = "GAS_PRICE";
pub const GAS_LIMIT_ENV: &str = "GAS_LIMIT";
pub const PRICE_API_URL_ENV: &str = "PRICE_API_URL";
pub const ORDER_API_URL_ENV: &str = "ORDER_API_URL";
pub const WALLET_KEY_PATH_ENV: &str = "WALLET_KEY_PATH";
pub const WALLET_PRIVATE_KEY_ENV: &str = "WALLET_PRIVATE_KEY";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Leverage contract on osmo-test-5.
pub const DEFAULT_LEVERAGE_CONTRACT: &str =
    "osmo1fcl97gj3z4yu4cma4zdr4yr2av8n9rywjg3vmt2afmcz3cy2zqhsqajwmy";

/// Stable token (CW20) on osmo-test-5.
pub const DEFAULT_USDC_CONTRACT: &str =
    "osmo1dqyj3mnewh46fqa9h05xekepjy0fsg64etfhwt0tjldw3x2he40qx3n8nl";

pub const DEFAULT_NATIVE_TOKEN: &str = "osmo";
pub const DEFAULT_GAS_PRICE: &str = "0.250uosmo";
pub const DEFAULT_GAS_LIMIT: u64 = 500_000;
pub const DEFAULT_PRICE_API_URL: &str = "http://localhost:3000/api/price-conversion";
pub const DEFAULT_ORDER_API_URL: &str = "http://localhost:5000/add_order";

/// Where the wallet key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletKeySource {
    PemFile(PathBuf),
    Hex(String),
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub chain: ChainConfig,
    pub leverage_contract: String,
    /// Tokens queried by the balance aggregator, in query order.
    pub tokens: Vec<TokenConfig>,
    pub gas_price: GasPrice,
    pub gas_limit: u64,
    pub price_api_url: String,
    pub order_api_url: String,
    pub wallet_key: Option<WalletKeySource>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            chain: osmosis_testnet(),
            leverage_contract: DEFAULT_LEVERAGE_CONTRACT.to_string(),
            tokens: default_tokens(DEFAULT_USDC_CONTRACT, DEFAULT_NATIVE_TOKEN),
            gas_price: GasPrice {
                amount: 250,
                scale: 3,
                denom: "uosmo".to_string(),
            },
            gas_limit: DEFAULT_GAS_LIMIT,
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            order_api_url: DEFAULT_ORDER_API_URL.to_string(),
            wallet_key: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get(PORT_ENV) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ClientError::Validation(format!("{PORT_ENV} must be a port number")))?,
            None => DEFAULT_PORT,
        };

        let mut chain = osmosis_testnet();
        if let Some(rest) = get(CHAIN_REST_URL_ENV) {
            chain.rest_url = rest;
        }
        if let Some(rpc) = get(CHAIN_RPC_URL_ENV) {
            chain.rpc_url = rpc;
        }
        chain.validate()?;

        let gas_price = get(GAS_PRICE_ENV)
            .unwrap_or_else(|| DEFAULT_GAS_PRICE.to_string())
            .parse::<GasPrice>()?;

        let gas_limit = match get(GAS_LIMIT_ENV) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                ClientError::Validation(format!("{GAS_LIMIT_ENV} must be an integer"))
            })?,
            None => DEFAULT_GAS_LIMIT,
        };

        let wallet_key = match (get(WALLET_KEY_PATH_ENV), get(WALLET_PRIVATE_KEY_ENV)) {
            (Some(path), _) => Some(WalletKeySource::PemFile(PathBuf::from(path))),
            (None, Some(hex)) => Some(WalletKeySource::Hex(hex)),
            (None, None) => None,
        };

        let usdc = get(USDC_CONTRACT_ENV).unwrap_or_else(|| DEFAULT_USDC_CONTRACT.to_string());
        let native = get(NATIVE_TOKEN_ENV).unwrap_or_else(|| DEFAULT_NATIVE_TOKEN.to_string());

        Ok(Self {
            host: get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            data_dir: PathBuf::from(get(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())),
            chain,
            leverage_contract: get(LEVERAGE_CONTRACT_ENV)
                .unwrap_or_else(|| DEFAULT_LEVERAGE_CONTRACT.to_string()),
            tokens: default_tokens(&usdc, &native),
            gas_price,
            gas_limit,
            price_api_url: get(PRICE_API_URL_ENV)
                .unwrap_or_else(|| DEFAULT_PRICE_API_URL.to_string()),
            order_api_url: get(ORDER_API_URL_ENV)
                .unwrap_or_else(|| DEFAULT_ORDER_API_URL.to_string()),
            wallet_key,
        })
    }

    /// Bind address as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Stable token first, native second.
fn default_tokens(usdc_address: &str, native_name: &str) -> Vec<TokenConfig> {
    vec![
        TokenConfig {
            name: "usdc".to_string(),
            address: usdc_address.to_string(),
        },
        TokenConfig {
            name: "native".to_string(),
            address: native_name.to_string(),
        },
    ]
}
