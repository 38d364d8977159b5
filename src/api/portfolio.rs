// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    blockchain::contract::LeverageQuery,
    error::{ApiError, ClientError},
    portfolio::PortfolioView,
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ListedTokensResponse {
    /// Contract response to `listed_tokens`, passed through unchanged.
    #[schema(value_type = Object)]
    pub tokens: Value,
}

#[utoipa::path(
    get,
    path = "/v1/portfolio",
    tag = "Portfolio",
    responses((status = 200, body = PortfolioView))
)]
pub async fn get_portfolio(State(state): State<AppState>) -> Json<PortfolioView> {
    Json(state.portfolio.view().await)
}

#[utoipa::path(
    post,
    path = "/v1/portfolio/refresh",
    tag = "Portfolio",
    responses(
        (status = 200, body = PortfolioView),
        (status = 503, description = "No wallet session", body = crate::error::ErrorBody),
        (status = 422, description = "Contract rejected a query", body = crate::error::ErrorBody)
    )
)]
pub async fn refresh_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioView>, ApiError> {
    let session = state.sessions.require().await?;
    let view = state
        .portfolio
        .refresh(
            session.query_client.as_ref(),
            &state.config.leverage_contract,
            &session.signer,
            &state.config.tokens,
        )
        .await?;
    Ok(Json(view))
}

/// Tokens the leverage contract accepts.
#[utoipa::path(
    get,
    path = "/v1/tokens/listed",
    tag = "Portfolio",
    responses(
        (status = 200, body = ListedTokensResponse),
        (status = 503, description = "No wallet session", body = crate::error::ErrorBody)
    )
)]
pub async fn listed_tokens(
    State(state): State<AppState>,
) -> Result<Json<ListedTokensResponse>, ApiError> {
    let session = state.sessions.require().await?;
    let query = serde_json::to_value(LeverageQuery::ListedTokens {})
        .map_err(|e| ClientError::Validation(e.to_string()))?;
    let tokens = session
        .query_client
        .query_smart(&state.config.leverage_contract, &query)
        .await?;
    Ok(Json(ListedTokensResponse { tokens }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::connect;
    use crate::portfolio::SnapshotStatus;
    use crate::testing::{MockQuerier, TestApp};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn refresh_requires_session() {
        let app = TestApp::new();
        let err = refresh_portfolio(State(app.state.clone())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(app.querier.calls().is_empty());
    }

    #[tokio::test]
    async fn refresh_after_connect_requeries() {
        let app = TestApp::new();
        connect(State(app.state.clone())).await.unwrap();

        let Json(view) = refresh_portfolio(State(app.state.clone())).await.unwrap();
        assert_eq!(view.status, SnapshotStatus::Populated);
        assert_eq!(app.querier.calls().len(), 18);

        let Json(current) = get_portfolio(State(app.state.clone())).await;
        assert_eq!(current, view);
    }

    #[tokio::test]
    async fn listed_tokens_passes_contract_answer() {
        let app = TestApp::new();
        connect(State(app.state.clone())).await.unwrap();

        let Json(response) = listed_tokens(State(app.state.clone())).await.unwrap();
        assert_eq!(response.tokens, MockQuerier::listed_tokens_response());

        let last = app.querier.calls().pop().unwrap();
        assert_eq!(last.0, app.state.config.leverage_contract);
        assert_eq!(last.1, json!({"listed_tokens": {}}));
    }
}
