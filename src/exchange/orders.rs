// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Off-chain order records and their submission.
//!
//! An order is posted to the intake endpoint first. Only once the endpoint
//! accepts it is it appended to the local history; the two copies are not
//! reconciled afterwards.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::paillier::{plaintext_from_amount, PaillierPublicKey};
use super::pair::SwapToken;
use super::quote::SwapForm;
use crate::error::ClientError;
use crate::storage::{OrderHistory, StorageError};

pub const ORDER_MARKET: &str = "LeviFi";
pub const ORDER_CHAIN: &str = "osmosis";
pub const ORDER_STATUS_CREATED: u8 = 1;
pub const ZERO_TRADER_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Order as sent to the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderRecord {
    pub order_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_address: Option<String>,
    #[serde(rename = "selectedMarket")]
    pub selected_market: String,
    pub status: u8,
    /// Unix seconds
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Paillier ciphertext of the amount, decimal
    pub encrypted_order_value: String,
    #[serde(rename = "buyToken")]
    pub buy_token: SwapToken,
    #[serde(rename = "sellToken")]
    pub sell_token: SwapToken,
    pub trader_address: String,
    pub chain: String,
}

impl OrderRecord {
    /// Build a record for the current form, encrypting the amount.
    pub fn from_form(
        form: &SwapForm,
        user_address: Option<String>,
        key: &PaillierPublicKey,
    ) -> Result<Self, ClientError> {
        let plaintext = plaintext_from_amount(&form.amount)?;
        let ciphertext = key.encrypt(&plaintext)?;

        Ok(Self {
            order_id: Uuid::new_v4(),
            user_address,
            selected_market: ORDER_MARKET.to_string(),
            status: ORDER_STATUS_CREATED,
            created_at: chrono::Utc::now().timestamp(),
            encrypted_order_value: ciphertext.to_string(),
            buy_token: form.pair.second,
            sell_token: form.pair.first,
            trader_address: ZERO_TRADER_ADDRESS.to_string(),
            chain: ORDER_CHAIN.to_string(),
        })
    }
}

/// Order as kept in the local history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocalOrder {
    #[serde(flatten)]
    pub record: OrderRecord,
    /// Amount as entered
    pub amount: String,
    /// Quoted output at submission time
    pub result: f64,
}

/// Remote order book intake.
#[async_trait]
pub trait OrderIntake: Send + Sync {
    async fn submit(&self, order: &OrderRecord) -> Result<(), ClientError>;
}

pub struct HttpOrderIntake {
    http: reqwest::Client,
    url: String,
}

impl HttpOrderIntake {
    pub fn new(url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl OrderIntake for HttpOrderIntake {
    async fn submit(&self, order: &OrderRecord) -> Result<(), ClientError> {
        let response = self.http.post(&self.url).json(order).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Network(format!(
                "order endpoint returned HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("order accepted remotely but not saved locally: {0}")]
    Storage(#[from] StorageError),
}

/// Encrypt, post and record an order for the given form.
pub async fn submit_order(
    intake: &dyn OrderIntake,
    history: &OrderHistory,
    form: &SwapForm,
    user_address: Option<String>,
    key: &PaillierPublicKey,
) -> Result<LocalOrder, OrderError> {
    let record = OrderRecord::from_form(form, user_address, key)?;

    intake.submit(&record).await.inspect_err(|e| {
        tracing::warn!(order_id = %record.order_id, error = %e, "Order intake failed");
    })?;

    let local = LocalOrder {
        record,
        amount: form.amount.clone(),
        result: form.result,
    };
    history.append(local.clone()).await?;

    tracing::info!(
        order_id = %local.record.order_id,
        sell = local.record.sell_token.symbol(),
        buy = local.record.buy_token.symbol(),
        "Order submitted"
    );
    Ok(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use crate::testing::MockIntake;

    fn history() -> (tempfile::TempDir, OrderHistory) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();
        (dir, OrderHistory::load(storage).unwrap())
    }

    fn quoted_form() -> SwapForm {
        let mut form = SwapForm::default();
        form.set_amount("4").unwrap();
        form.apply_rate(2.5);
        form
    }

    #[test]
    fn record_carries_fixed_fields() {
        let key = PaillierPublicKey::order_book().unwrap();
        let record =
            OrderRecord::from_form(&quoted_form(), Some("osmo1user".into()), &key).unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["selectedMarket"], "LeviFi");
        assert_eq!(json["status"], 1);
        assert_eq!(json["sellToken"], "USDC");
        assert_eq!(json["buyToken"], "OSMO");
        assert_eq!(json["trader_address"], ZERO_TRADER_ADDRESS);
        assert_eq!(json["chain"], "osmosis");
        assert_eq!(json["user_address"], "osmo1user");
        assert!(json["createdAt"].as_i64().unwrap() > 1_600_000_000);
        assert_eq!(record.order_id.get_version_num(), 4);
        assert!(record
            .encrypted_order_value
            .chars()
            .all(|c| c.is_ascii_digit()));

        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn missing_user_address_is_omitted() {
        let key = PaillierPublicKey::order_book().unwrap();
        let record = OrderRecord::from_form(&SwapForm::default(), None, &key).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("user_address").is_none());
    }

    #[test]
    fn fractional_amount_fails_validation() {
        let key = PaillierPublicKey::order_book().unwrap();
        let mut form = SwapForm::default();
        form.set_amount("1.5").unwrap();
        let err = OrderRecord::from_form(&form, None, &key).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn submit_posts_then_appends() {
        let (_dir, history) = history();
        let intake = MockIntake::new();
        let key = PaillierPublicKey::order_book().unwrap();

        let order = submit_order(&intake, &history, &quoted_form(), None, &key)
            .await
            .unwrap();

        assert_eq!(order.amount, "4");
        assert_eq!(order.result, 10.0);
        assert_eq!(intake.submitted(), vec![order.record.clone()]);

        let stored = history.list().await;
        assert_eq!(stored, vec![order]);
    }

    #[tokio::test]
    async fn remote_failure_skips_local_append() {
        let (_dir, history) = history();
        let intake = MockIntake::failing();
        let key = PaillierPublicKey::order_book().unwrap();

        let err = submit_order(&intake, &history, &quoted_form(), None, &key)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Client(ClientError::Network(_))));
        assert!(history.list().await.is_empty());
    }

    #[test]
    fn local_order_round_trips_flat() {
        let key = PaillierPublicKey::order_book().unwrap();
        let local = LocalOrder {
            record: OrderRecord::from_form(&quoted_form(), None, &key).unwrap(),
            amount: "4".to_string(),
            result: 10.0,
        };
        let json = serde_json::to_value(&local).unwrap();
        assert_eq!(json["amount"], "4");
        assert_eq!(json["sellToken"], "USDC");

        let back: LocalOrder = serde_json::from_value(json).unwrap();
        assert_eq!(back, local);
    }
}
