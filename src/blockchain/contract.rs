// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Leverage contract and CW20 message shapes.
//!
//! Amounts are `Uint128` on the contract side and travel as decimal strings.

use base64ct::{Base64, Encoding};
use serde::Serialize;
use serde_json::{json, Value};

use super::types::BalanceMetric;

/// Read-only queries accepted by the leverage contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeverageQuery {
    UserOrders { user_address: String },
    ListedTokens {},
}

/// Build the per-token balance query for one metric.
///
/// The method name is the outer key, so this cannot be a plain enum variant.
pub fn balance_query(metric: &BalanceMetric, token_address: &str, user_address: &str) -> Value {
    json!({
        metric.method: {
            "token_address": token_address,
            "user_address": user_address,
        }
    })
}

/// Executions accepted by the leverage contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeverageExecute {
    Borrow {
        borrow_amount: String,
    },
    Repay {
        repay_amount: String,
    },
    WithdrawToken {
        token_address: String,
        amount: String,
    },
    Burn {
        token_address: String,
        v_token_amount: String,
    },
}

/// CW20 executions used for deposits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cw20Execute {
    /// Transfer `amount` to `contract` and invoke its receive hook with `msg`.
    Send {
        contract: String,
        amount: String,
        msg: String,
    },
}

impl Cw20Execute {
    /// `send` with an empty JSON object as the hook payload.
    pub fn send(contract: &str, amount: u128) -> Self {
        Cw20Execute::Send {
            contract: contract.to_string(),
            amount: amount.to_string(),
            msg: Base64::encode_string(b"{}"),
        }
    }
}
