// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::exchange::{OrderIntake, PaillierPublicKey, PriceSource, SwapForm};
use crate::portfolio::Portfolio;
use crate::storage::OrderHistory;
use crate::wallet::SessionManager;

/// Everything the handlers share. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<SessionManager>,
    pub portfolio: Arc<Portfolio>,
    pub swap: Arc<RwLock<SwapForm>>,
    pub orders: Arc<OrderHistory>,
    pub prices: Arc<dyn PriceSource>,
    pub intake: Arc<dyn OrderIntake>,
    pub order_key: Arc<PaillierPublicKey>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        sessions: SessionManager,
        orders: OrderHistory,
        prices: Arc<dyn PriceSource>,
        intake: Arc<dyn OrderIntake>,
        order_key: PaillierPublicKey,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            portfolio: Arc::new(Portfolio::new()),
            swap: Arc::new(RwLock::new(SwapForm::default())),
            orders: Arc::new(orders),
            prices,
            intake,
            order_key: Arc::new(order_key),
        }
    }
}
