// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP API for the LeviFi client.
//!
//! ## Route layout
//!
//! - `/health`, `/health/live`, `/health/ready` - probes
//! - `/v1/session` - wallet session
//! - `/v1/portfolio`, `/v1/tokens/listed` - balance snapshot and listed tokens
//! - `/v1/leverage/*` - leverage contract transactions
//! - `/v1/swap` - swap form with live quotes
//! - `/v1/orders` - encrypted order submission and history
//! - `/docs` - Swagger UI over `/api-doc/openapi.json`

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::TxOutcome,
    error::{ErrorBody, ErrorKind},
    exchange::{LocalOrder, OrderRecord, SwapForm, SwapToken, TokenPair},
    leverage::ActionOutcome,
    portfolio::{PortfolioView, SnapshotStatus},
    state::AppState,
    wallet::{SessionStatus, SessionView},
};

pub mod health;
pub mod leverage;
pub mod orders;
pub mod portfolio;
pub mod session;
pub mod swap;

pub fn router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state.clone());

    let v1_routes = Router::new()
        .route("/session", get(session::get_session))
        .route("/session/connect", post(session::connect))
        .route("/session/disconnect", post(session::disconnect))
        .route("/portfolio", get(portfolio::get_portfolio))
        .route("/portfolio/refresh", post(portfolio::refresh_portfolio))
        .route("/tokens/listed", get(portfolio::listed_tokens))
        .route("/leverage/deposit", post(leverage::deposit))
        .route("/leverage/borrow", post(leverage::borrow))
        .route("/leverage/withdraw", post(leverage::withdraw))
        .route("/leverage/repay", post(leverage::repay))
        .route("/leverage/burn", post(leverage::burn))
        .route("/swap", get(swap::get_swap))
        .route("/swap/first", put(swap::select_first))
        .route("/swap/second", put(swap::select_second))
        .route("/swap/flip", post(swap::flip))
        .route("/swap/amount", put(swap::set_amount))
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        session::get_session,
        session::connect,
        session::disconnect,
        portfolio::get_portfolio,
        portfolio::refresh_portfolio,
        portfolio::listed_tokens,
        leverage::deposit,
        leverage::borrow,
        leverage::withdraw,
        leverage::repay,
        leverage::burn,
        swap::get_swap,
        swap::select_first,
        swap::select_second,
        swap::flip,
        swap::set_amount,
        orders::list_orders,
        orders::create_order
    ),
    components(
        schemas(
            ErrorBody,
            ErrorKind,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse,
            SessionStatus,
            SessionView,
            session::ConnectResponse,
            SnapshotStatus,
            PortfolioView,
            portfolio::ListedTokensResponse,
            leverage::AmountRequest,
            leverage::TokenAmountRequest,
            TxOutcome,
            ActionOutcome,
            SwapToken,
            TokenPair,
            SwapForm,
            swap::SelectTokenRequest,
            swap::AmountInput,
            OrderRecord,
            LocalOrder,
            orders::OrderSource,
            orders::OrdersResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Session", description = "Wallet connection to Osmosis testnet"),
        (name = "Portfolio", description = "Leverage contract balances and orders"),
        (name = "Leverage", description = "Deposit, borrow, withdraw, repay and burn"),
        (name = "Swap", description = "Swap form and rate quotes"),
        (name = "Orders", description = "Encrypted order submission")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestApp;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn call(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header("content-type", "application/json");
        }
        let request = request
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn liveness_is_routed() {
        let app = TestApp::new();
        let (status, body) = call(router(app.state.clone()), "GET", "/health/live", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn swap_amount_is_routed() {
        let app = TestApp::new();
        let (status, body) = call(
            router(app.state.clone()),
            "PUT",
            "/v1/swap/amount",
            Some(r#"{"amount": 2}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["first"], "USDC");
        assert_eq!(body["second"], "OSMO");
        assert_eq!(body["amount"], "2");
        assert_eq!(body["result"], 4.0);
    }

    #[tokio::test]
    async fn errors_carry_kind() {
        let app = TestApp::without_wallet();
        let (status, body) =
            call(router(app.state.clone()), "POST", "/v1/portfolio/refresh", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error_code"], "wallet_unavailable");
    }

    #[test]
    fn openapi_lists_v1_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/v1/session/connect"));
        assert!(doc.paths.paths.contains_key("/v1/orders"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
