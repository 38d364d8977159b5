// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persisted order history.

use tokio::sync::RwLock;

use super::local::{LocalStorage, StorageResult};
use crate::exchange::LocalOrder;

/// Storage key holding the serialized order list.
pub const ORDERS_KEY: &str = "orders";

/// In-memory order list mirrored to [`LocalStorage`] under [`ORDERS_KEY`].
pub struct OrderHistory {
    storage: LocalStorage,
    orders: RwLock<Vec<LocalOrder>>,
}

impl OrderHistory {
    /// Load the persisted list, or start empty when none exists.
    pub fn load(storage: LocalStorage) -> StorageResult<Self> {
        let orders: Vec<LocalOrder> = storage.get_item(ORDERS_KEY)?.unwrap_or_default();
        tracing::debug!(count = orders.len(), "Order history loaded");
        Ok(Self {
            storage,
            orders: RwLock::new(orders),
        })
    }

    pub async fn list(&self) -> Vec<LocalOrder> {
        self.orders.read().await.clone()
    }

    /// Append one order and overwrite the persisted list.
    ///
    /// The in-memory list only changes once the write succeeded.
    pub async fn append(&self, order: LocalOrder) -> StorageResult<usize> {
        let mut orders = self.orders.write().await;
        let mut updated = orders.clone();
        updated.push(order);
        self.storage.set_item(ORDERS_KEY, &updated)?;
        *orders = updated;
        Ok(orders.len())
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}
