// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Leverage contract actions.
//!
//! Every action is validated, signed with the session's signing client and
//! broadcast. A successful broadcast triggers a snapshot refresh.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::blockchain::contract::{Cw20Execute, LeverageExecute};
use crate::blockchain::{parse_uint_amount, TokenConfig, TxOutcome};
use crate::error::ClientError;
use crate::portfolio::{Portfolio, PortfolioView};
use crate::wallet::Session;

/// A user action against the leverage contract. Amounts are base units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LeverageAction {
    /// Send CW20 collateral to the leverage contract
    Deposit { token_address: String, amount: String },
    Borrow { amount: String },
    Withdraw { token_address: String, amount: String },
    Repay { amount: String },
    /// Burn derivative tokens for the underlying
    Burn { token_address: String, amount: String },
}

impl LeverageAction {
    pub fn name(&self) -> &'static str {
        match self {
            LeverageAction::Deposit { .. } => "deposit",
            LeverageAction::Borrow { .. } => "borrow",
            LeverageAction::Withdraw { .. } => "withdraw",
            LeverageAction::Repay { .. } => "repay",
            LeverageAction::Burn { .. } => "burn",
        }
    }

    /// Validate the inputs and build `(target contract, message)`.
    pub fn message(&self, leverage_contract: &str) -> Result<(String, Value), ClientError> {
        let (target, msg) = match self {
            LeverageAction::Deposit {
                token_address,
                amount,
            } => {
                let token = require_address(token_address)?;
                let amount = parse_uint_amount(amount)?;
                (token, to_value(&Cw20Execute::send(leverage_contract, amount))?)
            }
            LeverageAction::Borrow { amount } => {
                let amount = parse_uint_amount(amount)?;
                let msg = LeverageExecute::Borrow {
                    borrow_amount: amount.to_string(),
                };
                (leverage_contract.to_string(), to_value(&msg)?)
            }
            LeverageAction::Withdraw {
                token_address,
                amount,
            } => {
                let msg = LeverageExecute::WithdrawToken {
                    token_address: require_address(token_address)?,
                    amount: parse_uint_amount(amount)?.to_string(),
                };
                (leverage_contract.to_string(), to_value(&msg)?)
            }
            LeverageAction::Repay { amount } => {
                let msg = LeverageExecute::Repay {
                    repay_amount: parse_uint_amount(amount)?.to_string(),
                };
                (leverage_contract.to_string(), to_value(&msg)?)
            }
            LeverageAction::Burn {
                token_address,
                amount,
            } => {
                let msg = LeverageExecute::Burn {
                    token_address: require_address(token_address)?,
                    v_token_amount: parse_uint_amount(amount)?.to_string(),
                };
                (leverage_contract.to_string(), to_value(&msg)?)
            }
        };
        Ok((target, msg))
    }
}

fn require_address(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation("token address is empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn to_value<T: Serialize>(msg: &T) -> Result<Value, ClientError> {
    serde_json::to_value(msg)
        .map_err(|e| ClientError::Validation(format!("cannot encode message: {e}")))
}

/// Broadcast result plus the snapshot after the follow-up refresh.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActionOutcome {
    pub action: String,
    pub tx: TxOutcome,
    pub portfolio: PortfolioView,
}

/// Execute `action` for the session and refresh the snapshot on success.
///
/// A failed refresh does not fail the action; it shows up in the returned
/// portfolio state.
pub async fn execute_action(
    session: &Session,
    portfolio: &Portfolio,
    leverage_contract: &str,
    tokens: &[TokenConfig],
    action: &LeverageAction,
) -> Result<ActionOutcome, ClientError> {
    let (target, msg) = action.message(leverage_contract)?;

    let tx = session
        .signing_client
        .execute(&session.signer, &target, &msg)
        .await
        .inspect_err(|e| {
            tracing::warn!(action = action.name(), error = %e, "Leverage action failed");
        })?;

    let portfolio = match portfolio
        .refresh(
            session.query_client.as_ref(),
            leverage_contract,
            &session.signer,
            tokens,
        )
        .await
    {
        Ok(view) => view,
        Err(_) => portfolio.view().await,
    };

    Ok(ActionOutcome {
        action: action.name().to_string(),
        tx,
        portfolio,
    })
}
