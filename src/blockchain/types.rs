// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain types and constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ClientError;

/// Chain id of the Osmosis testnet the leverage contract is deployed on.
pub const OSMOSIS_TESTNET_CHAIN_ID: &str = "osmo-test-5";

/// Bech32 prefix for Osmosis account addresses.
pub const OSMOSIS_BECH32_PREFIX: &str = "osmo";

/// Cosmos SDK coin type (BIP-44).
pub const COSMOS_COIN_TYPE: u32 = 118;

/// A currency as described to the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
    #[serde(rename = "coinGeckoId", skip_serializing_if = "Option::is_none")]
    pub coingecko_id: Option<String>,
}

/// Gas price steps advertised for a fee currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

/// A fee currency with its gas price steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeCurrency {
    #[serde(flatten)]
    pub currency: Currency,
    pub gas_price_step: GasPriceStep,
}

/// Bech32 prefixes for every address kind on the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    /// Derive the standard Cosmos SDK prefix family from an account prefix.
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            bech32_prefix_acc_addr: prefix.to_string(),
            bech32_prefix_acc_pub: format!("{prefix}pub"),
            bech32_prefix_val_addr: format!("{prefix}valoper"),
            bech32_prefix_val_pub: format!("{prefix}valoperpub"),
            bech32_prefix_cons_addr: format!("{prefix}valcons"),
            bech32_prefix_cons_pub: format!("{prefix}valconspub"),
        }
    }
}

/// BIP-44 derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

/// Chain definition suggested to the wallet before enabling it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: String,
    pub chain_name: String,
    /// Short name shown once a session is connected.
    #[serde(skip)]
    pub display_name: String,
    #[serde(rename = "rpc")]
    pub rpc_url: String,
    #[serde(rename = "rest")]
    pub rest_url: String,
    pub bip44: Bip44,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub fee_currencies: Vec<FeeCurrency>,
    pub stake_currency: Currency,
}

impl ChainConfig {
    /// Account address prefix.
    pub fn account_prefix(&self) -> &str {
        &self.bech32_config.bech32_prefix_acc_addr
    }

    /// Check the definition is usable before handing it to a wallet.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.chain_id.trim().is_empty() {
            return Err(ClientError::Validation("chain id is empty".to_string()));
        }
        if self.account_prefix().is_empty() {
            return Err(ClientError::Validation("bech32 prefix is empty".to_string()));
        }
        for (label, raw) in [("rpc", &self.rpc_url), ("rest", &self.rest_url)] {
            url::Url::parse(raw)
                .map_err(|e| ClientError::Validation(format!("invalid {label} url {raw}: {e}")))?;
        }
        if self.fee_currencies.is_empty() {
            return Err(ClientError::Validation("no fee currency".to_string()));
        }
        Ok(())
    }
}

fn osmo_currency() -> Currency {
    Currency {
        coin_denom: "OSMO".to_string(),
        coin_minimal_denom: "uosmo".to_string(),
        coin_decimals: 6,
        coingecko_id: Some("osmosis".to_string()),
    }
}

/// Osmosis Testnet 5 definition.
pub fn osmosis_testnet() -> ChainConfig {
    ChainConfig {
        chain_id: OSMOSIS_TESTNET_CHAIN_ID.to_string(),
        chain_name: "Osmosis Testnet 5".to_string(),
        display_name: "Osmosis Testnet".to_string(),
        rpc_url: "https://rpc.osmotest5.osmosis.zone:443".to_string(),
        rest_url: "https://lcd.osmotest5.osmosis.zone:1317".to_string(),
        bip44: Bip44 {
            coin_type: COSMOS_COIN_TYPE,
        },
        bech32_config: Bech32Config::from_prefix(OSMOSIS_BECH32_PREFIX),
        currencies: vec![osmo_currency()],
        fee_currencies: vec![FeeCurrency {
            currency: osmo_currency(),
            gas_price_step: GasPriceStep {
                low: 0.01,
                average: 0.025,
                high: 0.04,
            },
        }],
        stake_currency: osmo_currency(),
    }
}

/// Most fractional digits a gas price may carry; `10^38` is the largest power of ten in a `u128`.
pub const MAX_GAS_PRICE_SCALE: u32 = 38;

/// Gas price as an exact decimal amount of a denom, e.g. `0.250uosmo`.
///
/// Stored as `amount / 10^scale` to keep fee arithmetic integral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasPrice {
    pub amount: u128,
    pub scale: u32,
    pub denom: String,
}

impl GasPrice {
    /// Fee for `gas_limit` units of gas, rounded up.
    pub fn fee_amount(&self, gas_limit: u64) -> Result<u128, ClientError> {
        let divisor = 10u128
            .checked_pow(self.scale)
            .ok_or_else(|| ClientError::Validation("gas price scale overflow".to_string()))?;
        let product = self
            .amount
            .checked_mul(gas_limit as u128)
            .ok_or_else(|| ClientError::Validation("fee overflow".to_string()))?;
        Ok(product.div_ceil(divisor))
    }
}

impl FromStr for GasPrice {
    type Err = ClientError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let split = raw
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| ClientError::Validation(format!("gas price {raw} has no denom")))?;
        let (number, denom) = raw.split_at(split);

        if number.is_empty() {
            return Err(ClientError::Validation(format!("gas price {raw} has no amount")));
        }
        let valid_denom = denom.starts_with(|c: char| c.is_ascii_alphabetic())
            && denom.chars().all(|c| c.is_ascii_alphanumeric() || c == '/');
        if !valid_denom {
            return Err(ClientError::Validation(format!("invalid gas denom {denom}")));
        }

        let (whole, frac) = match number.split_once('.') {
            Some((w, f)) => (w, f),
            None => (number, ""),
        };
        if frac.contains('.') {
            return Err(ClientError::Validation(format!("invalid gas amount {number}")));
        }
        if frac.len() > MAX_GAS_PRICE_SCALE as usize {
            return Err(ClientError::Validation(format!(
                "gas amount {number} has more than {MAX_GAS_PRICE_SCALE} decimals"
            )));
        }
        let digits = format!("{whole}{frac}");
        let amount = digits
            .parse::<u128>()
            .map_err(|_| ClientError::Validation(format!("invalid gas amount {number}")))?;

        Ok(Self {
            amount,
            scale: frac.len() as u32,
            denom: denom.to_string(),
        })
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}{}", self.amount, self.denom);
        }
        let scale = self.scale as usize;
        let digits = format!("{:0>width$}", self.amount, width = scale + 1);
        let (whole, frac) = digits.split_at(digits.len() - scale);
        write!(f, "{whole}.{frac}{}", self.denom)
    }
}

/// A token tracked by the balance aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenConfig {
    /// Key in the balance snapshot (`usdc`, `native`).
    pub name: String,
    /// Contract address or native token identifier sent to the contract.
    pub address: String,
}

/// A balance metric and the contract query method backing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceMetric {
    pub method: &'static str,
    pub key: &'static str,
}

/// Metrics queried for every token, in query order.
pub const BALANCE_METRICS: [BalanceMetric; 4] = [
    BalanceMetric {
        method: "user_collateral_token_balance",
        key: "collateral_balance",
    },
    BalanceMetric {
        method: "user_wrapped_token_balance",
        key: "wrapped_leverage_balance",
    },
    BalanceMetric {
        method: "user_borrow_token_balance",
        key: "borrow_balance",
    },
    BalanceMetric {
        method: "user_v_token_balance",
        key: "v_token_balance",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_price_parses_and_displays() {
        let price: GasPrice = "0.250uosmo".parse().unwrap();
        assert_eq!(price.amount, 250);
        assert_eq!(price.scale, 3);
        assert_eq!(price.denom, "uosmo");
        assert_eq!(price.to_string(), "0.250uosmo");

        let whole: GasPrice = "2uatom".parse().unwrap();
        assert_eq!(whole.scale, 0);
        assert_eq!(whole.to_string(), "2uatom");

        let ibc: GasPrice = "0.1ibc/27394FB092D2ECCD".parse().unwrap();
        assert_eq!(ibc.denom, "ibc/27394FB092D2ECCD");
    }

    #[test]
    fn gas_price_rejects_garbage() {
        assert!("uosmo".parse::<GasPrice>().is_err());
        assert!("0.25".parse::<GasPrice>().is_err());
        assert!("0.2.5uosmo".parse::<GasPrice>().is_err());
        assert!("0.25 uosmo".parse::<GasPrice>().is_err());
    }

    #[test]
    fn gas_price_scale_is_capped() {
        let finest = format!("0.{}1uosmo", "0".repeat(37));
        let price: GasPrice = finest.parse().unwrap();
        assert_eq!(price.scale, MAX_GAS_PRICE_SCALE);
        assert_eq!(price.to_string(), finest);
        assert_eq!(price.fee_amount(200_000).unwrap(), 1);

        let too_fine = format!("0.{}1uosmo", "0".repeat(38));
        let err = too_fine.parse::<GasPrice>().unwrap_err();
        assert!(err.to_string().contains("decimals"));

        let built = GasPrice {
            amount: 5,
            scale: 40,
            denom: "uosmo".to_string(),
        };
        assert_eq!(built.to_string(), format!("0.{}5uosmo", "0".repeat(39)));
        assert!(built.fee_amount(1).is_err());
    }

    #[test]
    fn fee_rounds_up() {
        let price: GasPrice = "0.250uosmo".parse().unwrap();
        assert_eq!(price.fee_amount(500_000).unwrap(), 125_000);
        assert_eq!(price.fee_amount(3).unwrap(), 1);
        assert_eq!(price.fee_amount(0).unwrap(), 0);

        let price: GasPrice = "0.025uosmo".parse().unwrap();
        assert_eq!(price.fee_amount(201).unwrap(), 6);
    }

    #[test]
    fn testnet_definition_is_valid() {
        let chain = osmosis_testnet();
        chain.validate().unwrap();
        assert_eq!(chain.account_prefix(), "osmo");
        assert_eq!(chain.bech32_config.bech32_prefix_val_pub, "osmovaloperpub");
        assert_eq!(chain.bip44.coin_type, 118);
    }

    #[test]
    fn chain_definition_serializes_in_wallet_format() {
        let json = serde_json::to_value(osmosis_testnet()).unwrap();
        assert_eq!(json["chainId"], "osmo-test-5");
        assert_eq!(json["rpc"], "https://rpc.osmotest5.osmosis.zone:443");
        assert_eq!(json["bech32Config"]["bech32PrefixAccAddr"], "osmo");
        assert_eq!(json["feeCurrencies"][0]["coinMinimalDenom"], "uosmo");
        assert_eq!(json["feeCurrencies"][0]["gasPriceStep"]["average"], 0.025);
        assert_eq!(json["stakeCurrency"]["coinGeckoId"], "osmosis");
        assert!(json.get("displayName").is_none());
    }

    #[test]
    fn metrics_are_in_query_order() {
        let keys: Vec<&str> = BALANCE_METRICS.iter().map(|m| m.key).collect();
        assert_eq!(
            keys,
            [
                "collateral_balance",
                "wrapped_leverage_balance",
                "borrow_balance",
                "v_token_balance"
            ]
        );
    }
}
