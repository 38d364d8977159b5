// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Contract execution: build, sign and broadcast `MsgExecuteContract`.
//!
//! Transactions are signed in direct mode by the wallet's offline signer.
//! The fee is `ceil(gas_limit * gas_price)` in the gas price denom.

use std::sync::Arc;

use async_trait::async_trait;
use cosmrs::{
    cosmwasm::MsgExecuteContract,
    tendermint::chain,
    tx::{self, Fee, Msg, SignDoc, SignerInfo},
    AccountId, Coin,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::client::LcdClient;
use super::types::GasPrice;
use crate::error::ClientError;
use crate::wallet::OfflineSigner;

/// Result of a broadcast accepted by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TxOutcome {
    /// Transaction hash (hex, upper case as returned by the node)
    pub tx_hash: String,
    /// Block height; `0` for sync broadcasts that are not yet included
    pub height: u64,
    /// ABCI result code (always `0` here, non-zero codes are errors)
    pub code: u32,
}

/// Anything that can execute a contract message on behalf of `sender`.
#[async_trait]
pub trait ContractExecutor: Send + Sync {
    async fn execute(
        &self,
        sender: &str,
        contract: &str,
        msg: &Value,
    ) -> Result<TxOutcome, ClientError>;
}

/// Signing client bound to one LCD transport and one offline signer.
pub struct SigningClient {
    lcd: LcdClient,
    signer: Arc<dyn OfflineSigner>,
    gas_price: GasPrice,
    gas_limit: u64,
}

impl SigningClient {
    pub fn new(
        lcd: LcdClient,
        signer: Arc<dyn OfflineSigner>,
        gas_price: GasPrice,
        gas_limit: u64,
    ) -> Self {
        Self {
            lcd,
            signer,
            gas_price,
            gas_limit,
        }
    }

    fn fee(&self) -> Result<Fee, ClientError> {
        let amount = self.gas_price.fee_amount(self.gas_limit)?;
        let denom = self
            .gas_price
            .denom
            .parse()
            .map_err(|e| ClientError::Validation(format!("invalid fee denom: {e}")))?;
        Ok(Fee::from_amount_and_gas(Coin { denom, amount }, self.gas_limit))
    }
}

#[async_trait]
impl ContractExecutor for SigningClient {
    async fn execute(
        &self,
        sender: &str,
        contract: &str,
        msg: &Value,
    ) -> Result<TxOutcome, ClientError> {
        let accounts = self.signer.accounts().await?;
        let account = accounts
            .into_iter()
            .find(|a| a.address == sender)
            .ok_or_else(|| {
                ClientError::WalletUnavailable(format!("signer has no account {sender}"))
            })?;

        let body = execute_body(sender, contract, msg)?;
        let (account_number, sequence) = self.lcd.account_info(sender).await?;

        let auth_info =
            SignerInfo::single_direct(Some(account.public_key), sequence).auth_info(self.fee()?);
        let chain_id: chain::Id = self
            .lcd
            .chain_id()
            .parse()
            .map_err(|e| ClientError::Validation(format!("invalid chain id: {e}")))?;
        let sign_doc = SignDoc::new(&body, &auth_info, &chain_id, account_number)
            .map_err(|e| ClientError::Validation(format!("cannot build sign doc: {e}")))?;

        let raw = self.signer.sign_direct(sender, sign_doc).await?;
        let tx_bytes = raw
            .to_bytes()
            .map_err(|e| ClientError::Validation(format!("cannot encode tx: {e}")))?;

        let outcome = self.lcd.broadcast_tx(&tx_bytes).await?;
        tracing::info!(
            sender = %sender,
            contract = %contract,
            tx_hash = %outcome.tx_hash,
            "Contract execution broadcast"
        );
        Ok(outcome)
    }
}

/// Transaction body carrying a single `MsgExecuteContract` with no funds.
pub(crate) fn execute_body(sender: &str, contract: &str, msg: &Value) -> Result<tx::Body, ClientError> {
    let sender_id: AccountId = sender
        .parse()
        .map_err(|e| ClientError::Validation(format!("invalid sender address {sender}: {e}")))?;
    let contract_id: AccountId = contract
        .parse()
        .map_err(|e| ClientError::Validation(format!("invalid contract address {contract}: {e}")))?;

    let execute = MsgExecuteContract {
        sender: sender_id,
        contract: contract_id,
        msg: serde_json::to_vec(msg)
            .map_err(|e| ClientError::Validation(format!("cannot encode message: {e}")))?,
        funds: vec![],
    };
    let any = execute
        .to_any()
        .map_err(|e| ClientError::Validation(format!("cannot encode message: {e}")))?;

    Ok(tx::Body::new(vec![any], "", 0u32))
}

/// Parse a user-supplied amount in base units. Zero is rejected.
pub fn parse_uint_amount(raw: &str) -> Result<u128, ClientError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::Validation(format!(
            "amount must be a positive integer, got {raw:?}"
        )));
    }
    let amount = trimmed
        .parse::<u128>()
        .map_err(|_| ClientError::Validation(format!("amount {raw} is out of range")))?;
    if amount == 0 {
        return Err(ClientError::Validation("amount must be greater than zero".to_string()));
    }
    Ok(amount)
}
