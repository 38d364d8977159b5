// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    leverage::{execute_action, ActionOutcome, LeverageAction},
    state::AppState,
};

/// Amount in base units, as a decimal string.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AmountRequest {
    #[schema(example = "1000000")]
    pub amount: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenAmountRequest {
    pub token_address: String,
    #[schema(example = "1000000")]
    pub amount: String,
}

async fn run(state: &AppState, action: LeverageAction) -> Result<Json<ActionOutcome>, ApiError> {
    let session = state.sessions.require().await?;
    let outcome = execute_action(
        &session,
        &state.portfolio,
        &state.config.leverage_contract,
        &state.config.tokens,
        &action,
    )
    .await?;
    Ok(Json(outcome))
}

#[utoipa::path(
    post,
    path = "/v1/leverage/deposit",
    tag = "Leverage",
    request_body = TokenAmountRequest,
    responses(
        (status = 200, body = ActionOutcome),
        (status = 400, description = "Invalid amount or token", body = crate::error::ErrorBody),
        (status = 503, description = "No wallet session", body = crate::error::ErrorBody)
    )
)]
pub async fn deposit(
    State(state): State<AppState>,
    Json(req): Json<TokenAmountRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    run(
        &state,
        LeverageAction::Deposit {
            token_address: req.token_address,
            amount: req.amount,
        },
    )
    .await
}

#[utoipa::path(
    post,
    path = "/v1/leverage/borrow",
    tag = "Leverage",
    request_body = AmountRequest,
    responses(
        (status = 200, body = ActionOutcome),
        (status = 400, description = "Invalid amount", body = crate::error::ErrorBody),
        (status = 503, description = "No wallet session", body = crate::error::ErrorBody)
    )
)]
pub async fn borrow(
    State(state): State<AppState>,
    Json(req): Json<AmountRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    run(&state, LeverageAction::Borrow { amount: req.amount }).await
}

#[utoipa::path(
    post,
    path = "/v1/leverage/withdraw",
    tag = "Leverage",
    request_body = TokenAmountRequest,
    responses(
        (status = 200, body = ActionOutcome),
        (status = 400, description = "Invalid amount or token", body = crate::error::ErrorBody),
        (status = 503, description = "No wallet session", body = crate::error::ErrorBody)
    )
)]
pub async fn withdraw(
    State(state): State<AppState>,
    Json(req): Json<TokenAmountRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    run(
        &state,
        LeverageAction::Withdraw {
            token_address: req.token_address,
            amount: req.amount,
        },
    )
    .await
}

#[utoipa::path(
    post,
    path = "/v1/leverage/repay",
    tag = "Leverage",
    request_body = AmountRequest,
    responses(
        (status = 200, body = ActionOutcome),
        (status = 400, description = "Invalid amount", body = crate::error::ErrorBody),
        (status = 503, description = "No wallet session", body = crate::error::ErrorBody)
    )
)]
pub async fn repay(
    State(state): State<AppState>,
    Json(req): Json<AmountRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    run(&state, LeverageAction::Repay { amount: req.amount }).await
}

#[utoipa::path(
    post,
    path = "/v1/leverage/burn",
    tag = "Leverage",
    request_body = TokenAmountRequest,
    responses(
        (status = 200, body = ActionOutcome),
        (status = 400, description = "Invalid amount or token", body = crate::error::ErrorBody),
        (status = 503, description = "No wallet session", body = crate::error::ErrorBody)
    )
)]
pub async fn burn(
    State(state): State<AppState>,
    Json(req): Json<TokenAmountRequest>,
) -> Result<Json<ActionOutcome>, ApiError> {
    run(
        &state,
        LeverageAction::Burn {
            token_address: req.token_address,
            amount: req.amount,
        },
    )
    .await
}
