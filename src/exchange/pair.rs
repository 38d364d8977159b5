// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Swap token pair selection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tokens offered by the swap form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SwapToken {
    Usdc,
    Osmo,
}

impl SwapToken {
    pub const ALL: [SwapToken; 2] = [SwapToken::Usdc, SwapToken::Osmo];

    /// Symbol as sent to the price and order endpoints.
    pub fn symbol(&self) -> &'static str {
        match self {
            SwapToken::Usdc => "USDC",
            SwapToken::Osmo => "OSMO",
        }
    }

    /// The remaining token.
    pub fn other(&self) -> SwapToken {
        match self {
            SwapToken::Usdc => SwapToken::Osmo,
            SwapToken::Osmo => SwapToken::Usdc,
        }
    }
}

/// Sell (`first`) and buy (`second`) tokens. The two never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TokenPair {
    pub first: SwapToken,
    pub second: SwapToken,
}

impl Default for TokenPair {
    fn default() -> Self {
        Self {
            first: SwapToken::Usdc,
            second: SwapToken::Osmo,
        }
    }
}

impl TokenPair {
    pub fn select_first(&mut self, token: SwapToken) {
        self.first = token;
        if self.second == token {
            self.second = token.other();
        }
    }

    pub fn select_second(&mut self, token: SwapToken) {
        self.second = token;
        if self.first == token {
            self.first = token.other();
        }
    }

    pub fn flip(&mut self) {
        std::mem::swap(&mut self.first, &mut self.second);
    }
}
