// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Osmosis chain integration.
//!
//! This module provides functionality for:
//! - Describing the target chain to a wallet
//! - Smart queries against CosmWasm contracts over the LCD gateway
//! - Building, signing and broadcasting contract executions
//! - Leverage contract and CW20 message shapes

pub mod client;
pub mod contract;
pub mod signing;
pub mod transactions;
pub mod types;

pub use client::{ContractQuerier, LcdClient};
pub use transactions::{parse_uint_amount, ContractExecutor, SigningClient, TxOutcome};
pub use types::*;
