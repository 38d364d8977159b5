// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    exchange::{submit_order, LocalOrder},
    state::AppState,
};

/// Where the listed orders came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    /// `user_orders` answer from the last snapshot
    Contract,
    /// Locally persisted history
    Local,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersResponse {
    pub source: OrderSource,
    #[schema(value_type = Object)]
    pub orders: Value,
}

/// Contract orders while connected, otherwise the local history.
#[utoipa::path(
    get,
    path = "/v1/orders",
    tag = "Orders",
    responses((status = 200, body = OrdersResponse))
)]
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<OrdersResponse>, ApiError> {
    if state.sessions.current().await.is_some() {
        if let Some(orders) = state.portfolio.contract_orders().await {
            return Ok(Json(OrdersResponse {
                source: OrderSource::Contract,
                orders,
            }));
        }
    }

    let local = state.orders.list().await;
    let orders = serde_json::to_value(local)
        .map_err(|e| ApiError::internal(format!("Failed to encode orders: {e}")))?;
    Ok(Json(OrdersResponse {
        source: OrderSource::Local,
        orders,
    }))
}

/// Submit the current swap form as an encrypted order.
#[utoipa::path(
    post,
    path = "/v1/orders",
    tag = "Orders",
    responses(
        (status = 201, description = "Order accepted and recorded", body = LocalOrder),
        (status = 400, description = "Amount cannot be encrypted", body = crate::error::ErrorBody),
        (status = 502, description = "Order endpoint failed", body = crate::error::ErrorBody),
        (status = 500, description = "Order accepted but not saved locally", body = crate::error::ErrorBody)
    )
)]
pub async fn create_order(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<LocalOrder>), ApiError> {
    let form = state.swap.read().await.clone();
    let user_address = state.sessions.current().await.map(|s| s.signer);

    let order = submit_order(
        state.intake.as_ref(),
        &state.orders,
        &form,
        user_address,
        &state.order_key,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order)))
}
