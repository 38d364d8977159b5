// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! LeviFi Client - Leveraged Trading Client for Osmosis
//!
//! Local backend for the LeviFi leverage contract on Osmosis testnet. It
//! holds the wallet session, aggregates per-token balances from the
//! contract, signs leverage transactions and submits Paillier-encrypted
//! swap orders to an off-chain order book.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Osmosis chain definition, LCD client and signing
//! - `wallet` - Wallet provider seam, local keyring and session lifecycle
//! - `portfolio` - Balance snapshot aggregation
//! - `leverage` - Deposit, borrow, withdraw, repay and burn
//! - `exchange` - Swap form, quotes, Paillier encryption and orders
//! - `storage` - JSON file store for the order history

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod exchange;
pub mod leverage;
pub mod logging;
pub mod portfolio;
pub mod state;
pub mod storage;
pub mod wallet;

#[cfg(test)]
mod testing;
