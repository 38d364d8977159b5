// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Swap form endpoints.
//!
//! Every change is applied to the form first, then a fresh rate is fetched.
//! If the rate request fails the change stays and the previous rate is kept.

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    exchange::{requote, SwapForm, SwapToken},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectTokenRequest {
    pub token: SwapToken,
}

/// Amount as a JSON number or a decimal string.
///
/// Integers are taken exactly; use a string for values beyond `u64`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Integer(u64),
    Number(f64),
    Text(String),
}

impl AmountValue {
    fn into_text(self) -> String {
        match self {
            AmountValue::Integer(n) => n.to_string(),
            AmountValue::Number(n) => n.to_string(),
            AmountValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AmountInput {
    #[schema(value_type = String, example = "1000")]
    pub amount: AmountValue,
}

async fn update_and_requote(
    state: &AppState,
    change: impl FnOnce(&mut SwapForm),
) -> Result<Json<SwapForm>, ApiError> {
    change(&mut *state.swap.write().await);
    let form = requote(&state.swap, state.prices.as_ref()).await?;
    Ok(Json(form))
}

#[utoipa::path(
    get,
    path = "/v1/swap",
    tag = "Swap",
    responses((status = 200, body = SwapForm))
)]
pub async fn get_swap(State(state): State<AppState>) -> Json<SwapForm> {
    Json(state.swap.read().await.clone())
}

/// Select the token to sell. Picking the current buy token swaps the pair.
#[utoipa::path(
    put,
    path = "/v1/swap/first",
    tag = "Swap",
    request_body = SelectTokenRequest,
    responses(
        (status = 200, body = SwapForm),
        (status = 502, description = "Rate unavailable", body = crate::error::ErrorBody)
    )
)]
pub async fn select_first(
    State(state): State<AppState>,
    Json(req): Json<SelectTokenRequest>,
) -> Result<Json<SwapForm>, ApiError> {
    update_and_requote(&state, |form| form.pair.select_first(req.token)).await
}

/// Select the token to buy. Picking the current sell token swaps the pair.
#[utoipa::path(
    put,
    path = "/v1/swap/second",
    tag = "Swap",
    request_body = SelectTokenRequest,
    responses(
        (status = 200, body = SwapForm),
        (status = 502, description = "Rate unavailable", body = crate::error::ErrorBody)
    )
)]
pub async fn select_second(
    State(state): State<AppState>,
    Json(req): Json<SelectTokenRequest>,
) -> Result<Json<SwapForm>, ApiError> {
    update_and_requote(&state, |form| form.pair.select_second(req.token)).await
}

#[utoipa::path(
    post,
    path = "/v1/swap/flip",
    tag = "Swap",
    responses(
        (status = 200, body = SwapForm),
        (status = 502, description = "Rate unavailable", body = crate::error::ErrorBody)
    )
)]
pub async fn flip(State(state): State<AppState>) -> Result<Json<SwapForm>, ApiError> {
    update_and_requote(&state, |form| form.pair.flip()).await
}

#[utoipa::path(
    put,
    path = "/v1/swap/amount",
    tag = "Swap",
    request_body = AmountInput,
    responses(
        (status = 200, body = SwapForm),
        (status = 400, description = "Amount is not a number", body = crate::error::ErrorBody),
        (status = 502, description = "Rate unavailable", body = crate::error::ErrorBody)
    )
)]
pub async fn set_amount(
    State(state): State<AppState>,
    Json(req): Json<AmountInput>,
) -> Result<Json<SwapForm>, ApiError> {
    state.swap.write().await.set_amount(&req.amount.into_text())?;
    let form = requote(&state.swap, state.prices.as_ref()).await?;
    Ok(Json(form))
}
