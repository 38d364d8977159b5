// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Balance aggregation for the connected account.
//!
//! One smart query is issued per (token, metric) pair, token-major, each
//! awaited before the next. The user's orders are fetched last. A failure
//! anywhere discards the partial result.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::blockchain::contract::{balance_query, LeverageQuery};
use crate::blockchain::{ContractQuerier, TokenConfig, BALANCE_METRICS};
use crate::error::ClientError;

/// State error recorded when any balance query fails.
pub const USER_QUERY_FAILED: &str = "User Query Failed!";

/// Contract answers keyed by metric, in metric order.
pub type TokenBalances = IndexMap<String, Value>;

/// Balances as `token -> metric -> value`, in configured token order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BalanceSnapshot {
    tokens: IndexMap<String, TokenBalances>,
}

impl BalanceSnapshot {
    pub fn get(&self, token: &str, metric: &str) -> Option<&Value> {
        self.tokens.get(token)?.get(metric)
    }

    pub fn token(&self, token: &str) -> Option<&TokenBalances> {
        self.tokens.get(token)
    }

    pub fn token_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Result of one full fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct UserData {
    pub balances: BalanceSnapshot,
    pub orders: Value,
}

/// Query every balance metric for every token, then the user's orders.
pub async fn fetch_user_data(
    querier: &dyn ContractQuerier,
    contract: &str,
    signer: &str,
    tokens: &[TokenConfig],
) -> Result<UserData, ClientError> {
    let mut balances = BalanceSnapshot::default();

    for token in tokens {
        let mut metrics = TokenBalances::with_capacity(BALANCE_METRICS.len());
        for metric in &BALANCE_METRICS {
            let query = balance_query(metric, &token.address, signer);
            let value = querier.query_smart(contract, &query).await?;
            metrics.insert(metric.key.to_string(), value);
        }
        balances.tokens.insert(token.name.clone(), metrics);
    }

    let orders_query = serde_json::to_value(LeverageQuery::UserOrders {
        user_address: signer.to_string(),
    })
    .map_err(|e| ClientError::Validation(format!("cannot encode query: {e}")))?;
    let orders = querier.query_smart(contract, &orders_query).await?;

    Ok(UserData { balances, orders })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    Empty,
    Loading,
    Populated,
    Error,
}

/// Serializable view of the portfolio state.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PortfolioView {
    pub status: SnapshotStatus,
    pub loading: bool,
    /// `{token: {metric: value}}`
    #[schema(value_type = Object)]
    pub balances: BalanceSnapshot,
    #[schema(value_type = Object)]
    pub orders: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
struct PortfolioInner {
    status: SnapshotStatus,
    loading: bool,
    balances: BalanceSnapshot,
    orders: Value,
    error: Option<String>,
    /// Set once a fetch has succeeded since the last reset
    populated: bool,
}

impl PortfolioInner {
    fn initial() -> Self {
        Self {
            status: SnapshotStatus::Empty,
            loading: false,
            balances: BalanceSnapshot::default(),
            orders: Value::Array(Vec::new()),
            error: None,
            populated: false,
        }
    }
}

/// Shared balance snapshot with its loading flag.
pub struct Portfolio {
    inner: RwLock<PortfolioInner>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}

impl Portfolio {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(PortfolioInner::initial()),
        }
    }

    pub async fn view(&self) -> PortfolioView {
        let inner = self.inner.read().await;
        PortfolioView {
            status: inner.status,
            loading: inner.loading,
            balances: inner.balances.clone(),
            orders: inner.orders.clone(),
            error: inner.error.clone(),
        }
    }

    /// Orders from the last successful fetch, if any.
    pub async fn contract_orders(&self) -> Option<Value> {
        let inner = self.inner.read().await;
        inner.populated.then(|| inner.orders.clone())
    }

    /// Fetch and replace the snapshot.
    ///
    /// On failure the previous balances stay in place and the state error is
    /// the fixed [`USER_QUERY_FAILED`] message; the typed error is returned.
    pub async fn refresh(
        &self,
        querier: &dyn ContractQuerier,
        contract: &str,
        signer: &str,
        tokens: &[TokenConfig],
    ) -> Result<PortfolioView, ClientError> {
        {
            let mut inner = self.inner.write().await;
            inner.loading = true;
            inner.status = SnapshotStatus::Loading;
        }

        let result = fetch_user_data(querier, contract, signer, tokens).await;

        let mut inner = self.inner.write().await;
        inner.loading = false;
        match result {
            Ok(data) => {
                inner.balances = data.balances;
                inner.orders = data.orders;
                inner.status = SnapshotStatus::Populated;
                inner.error = None;
                inner.populated = true;
                tracing::debug!(signer = %signer, "Balance snapshot refreshed");
                drop(inner);
                Ok(self.view().await)
            }
            Err(e) => {
                tracing::warn!(signer = %signer, error = %e, "Balance query failed");
                inner.status = SnapshotStatus::Error;
                inner.error = Some(USER_QUERY_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Forget everything, back to the empty snapshot.
    pub async fn reset(&self) {
        *self.inner.write().await = PortfolioInner::initial();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::testing::{MockQuerier, TEST_SIGNER};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    const CONTRACT: &str = "osmo1leverage";

    fn tokens() -> Vec<TokenConfig> {
        AppConfig::default().tokens
    }

    /// Holds the first query until released; reports when it is reached.
    struct GatedQuerier {
        reached: Mutex<Option<oneshot::Sender<()>>>,
        release: Mutex<Option<oneshot::Receiver<()>>>,
        inner: MockQuerier,
    }

    impl GatedQuerier {
        fn new(reached: oneshot::Sender<()>, release: oneshot::Receiver<()>) -> Self {
            Self {
                reached: Mutex::new(Some(reached)),
                release: Mutex::new(Some(release)),
                inner: MockQuerier::new(),
            }
        }
    }

    #[async_trait]
    impl ContractQuerier for GatedQuerier {
        async fn query_smart(&self, contract: &str, msg: &Value) -> Result<Value, ClientError> {
            let reached = self.reached.lock().unwrap().take();
            if let Some(reached) = reached {
                let _ = reached.send(());
            }
            let release = self.release.lock().unwrap().take();
            if let Some(release) = release {
                let _ = release.await;
            }
            self.inner.query_smart(contract, msg).await
        }
    }

    #[tokio::test]
    async fn one_value_per_token_metric_in_order() {
        let querier = MockQuerier::new();
        let data = fetch_user_data(&querier, CONTRACT, TEST_SIGNER, &tokens())
            .await
            .unwrap();

        let token_names: Vec<&str> = data.balances.token_names().collect();
        assert_eq!(token_names, ["usdc", "native"]);
        for name in token_names {
            let metrics = data.balances.token(name).unwrap();
            let keys: Vec<&str> = metrics.keys().map(String::as_str).collect();
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

        let calls = querier.calls();
        assert_eq!(calls.len(), 9);
        assert!(calls.iter().all(|(contract, _)| contract == CONTRACT));
        assert_eq!(
            calls[0].1,
            json!({"user_collateral_token_balance": {
                "token_address": tokens()[0].address,
                "user_address": TEST_SIGNER
            }})
        );
        assert_eq!(
            calls[7].1,
            json!({"user_v_token_balance": {"token_address": "osmo", "user_address": TEST_SIGNER}})
        );
        assert_eq!(calls[8].1, json!({"user_orders": {"user_address": TEST_SIGNER}}));

        assert_eq!(
            data.balances.get("native", "borrow_balance"),
            Some(&json!("user_borrow_token_balance:osmo"))
        );
        assert_eq!(data.orders, MockQuerier::orders_response());
    }

    #[tokio::test]
    async fn failure_stops_remaining_queries() {
        let querier = MockQuerier::new().fail_at(2);
        let err = fetch_user_data(&querier, CONTRACT, TEST_SIGNER, &tokens())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ContractRejected);
        assert_eq!(querier.calls().len(), 3);
    }

    #[tokio::test]
    async fn refresh_populates_snapshot() {
        let portfolio = Portfolio::new();
        assert_eq!(portfolio.view().await.status, SnapshotStatus::Empty);
        assert!(portfolio.contract_orders().await.is_none());

        let view = portfolio
            .refresh(&MockQuerier::new(), CONTRACT, TEST_SIGNER, &tokens())
            .await
            .unwrap();
        assert_eq!(view.status, SnapshotStatus::Populated);
        assert!(!view.loading);
        assert_eq!(
            view.balances.token_names().collect::<Vec<_>>(),
            vec!["usdc", "native"]
        );
        let text = serde_json::to_string(&view.balances).unwrap();
        assert!(text.find("\"usdc\"").unwrap() < text.find("\"native\"").unwrap());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json["balances"]["usdc"]["collateral_balance"],
            json!(format!("user_collateral_token_balance:{}", tokens()[0].address))
        );
        assert_eq!(
            json["balances"]["native"]["v_token_balance"],
            json!("user_v_token_balance:osmo")
        );
        assert!(view.error.is_none());
        assert_eq!(
            portfolio.contract_orders().await,
            Some(MockQuerier::orders_response())
        );
    }

    #[tokio::test]
    async fn loading_is_visible_while_fetching() {
        let (reached_tx, reached_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let querier = GatedQuerier::new(reached_tx, release_rx);
        let portfolio = Portfolio::new();
        let tokens = tokens();

        let fetch = portfolio.refresh(&querier, CONTRACT, TEST_SIGNER, &tokens);
        let observe = async {
            reached_rx.await.unwrap();
            let during = portfolio.view().await;
            release_tx.send(()).unwrap();
            during
        };
        let (result, during) = tokio::join!(fetch, observe);

        assert!(during.loading);
        assert_eq!(during.status, SnapshotStatus::Loading);

        let after = result.unwrap();
        assert!(!after.loading);
        assert_eq!(after.status, SnapshotStatus::Populated);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_balances() {
        let portfolio = Portfolio::new();
        portfolio
            .refresh(&MockQuerier::new(), CONTRACT, TEST_SIGNER, &tokens())
            .await
            .unwrap();
        let before = portfolio.view().await.balances;

        let err = portfolio
            .refresh(&MockQuerier::new().fail_at(5), CONTRACT, TEST_SIGNER, &tokens())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ContractRejected);

        let view = portfolio.view().await;
        assert_eq!(view.status, SnapshotStatus::Error);
        assert_eq!(view.error.as_deref(), Some(USER_QUERY_FAILED));
        assert!(!view.loading);
        assert_eq!(view.balances, before);
    }

    #[tokio::test]
    async fn reset_empties_snapshot() {
        let portfolio = Portfolio::new();
        portfolio
            .refresh(&MockQuerier::new(), CONTRACT, TEST_SIGNER, &tokens())
            .await
            .unwrap();
        portfolio.reset().await;

        let view = portfolio.view().await;
        assert_eq!(view.status, SnapshotStatus::Empty);
        assert!(view.balances.is_empty());
        assert!(portfolio.contract_orders().await.is_none());
    }
}
