// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Swap form and off-chain order submission.

pub mod orders;
pub mod paillier;
pub mod pair;
pub mod quote;

pub use orders::{
    submit_order, HttpOrderIntake, LocalOrder, OrderError, OrderIntake, OrderRecord,
};
pub use paillier::PaillierPublicKey;
pub use pair::{SwapToken, TokenPair};
pub use quote::{requote, HttpPriceSource, PriceSource, SwapForm};
