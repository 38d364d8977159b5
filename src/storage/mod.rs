// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Local Storage Module
//!
//! Small key-value store over plain JSON files, standing in for browser
//! local storage. Each key maps to one file under the data directory.
//!
//! ## Storage Layout
//!
//! ```text
//! <DATA_DIR>/
//!   orders.json       # Submitted order history (JSON array)
//!   .health_check     # Written and removed by the readiness probe
//! ```
//!
//! ## Important Notes
//!
//! - Writes go to `<key>.json.tmp` first and are renamed into place
//! - A corrupt `orders.json` is a startup error, never silently reset

pub mod local;
pub mod orders;

pub use local::{LocalStorage, StorageError, StorageResult};
pub use orders::{OrderHistory, ORDERS_KEY};
