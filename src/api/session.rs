// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    portfolio::PortfolioView,
    state::AppState,
    wallet::SessionView,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectResponse {
    pub session: SessionView,
    /// Snapshot after the initial fetch; carries the error if the fetch failed.
    pub portfolio: PortfolioView,
}

#[utoipa::path(
    get,
    path = "/v1/session",
    tag = "Session",
    responses((status = 200, body = SessionView))
)]
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.sessions.view().await)
}

/// Connect the wallet, then fetch the balance snapshot.
#[utoipa::path(
    post,
    path = "/v1/session/connect",
    tag = "Session",
    responses(
        (status = 200, body = ConnectResponse),
        (status = 503, description = "No wallet available", body = crate::error::ErrorBody),
        (status = 502, description = "Chain endpoint unreachable", body = crate::error::ErrorBody)
    )
)]
pub async fn connect(State(state): State<AppState>) -> Result<Json<ConnectResponse>, ApiError> {
    let session = state.sessions.connect().await?;

    let portfolio = match state
        .portfolio
        .refresh(
            session.query_client.as_ref(),
            &state.config.leverage_contract,
            &session.signer,
            &state.config.tokens,
        )
        .await
    {
        Ok(view) => view,
        Err(_) => state.portfolio.view().await,
    };

    Ok(Json(ConnectResponse {
        session: state.sessions.view().await,
        portfolio,
    }))
}

/// Drop the session and the snapshot.
#[utoipa::path(
    post,
    path = "/v1/session/disconnect",
    tag = "Session",
    responses((status = 200, body = SessionView))
)]
pub async fn disconnect(State(state): State<AppState>) -> Json<SessionView> {
    state.sessions.disconnect().await;
    state.portfolio.reset().await;
    Json(state.sessions.view().await)
}
