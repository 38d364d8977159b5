// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, sync::Arc};

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use levifi_client::{
    api::router,
    config::{AppConfig, LOG_FORMAT_ENV, RUST_LOG_ENV},
    exchange::{HttpOrderIntake, HttpPriceSource, PaillierPublicKey},
    logging::{setup_logging, LogFormat},
    state::AppState,
    storage::{LocalStorage, OrderHistory},
    wallet::{LcdConnector, LocalKeyring, SessionManager, WalletProvider},
};

#[tokio::main]
async fn main() {
    let log_filter = env::var(RUST_LOG_ENV).ok();
    let log_format = LogFormat::parse(env::var(LOG_FORMAT_ENV).ok().as_deref());
    setup_logging(log_filter.as_deref(), log_format);

    let config = AppConfig::from_env().expect("Invalid configuration");

    let storage = LocalStorage::open(&config.data_dir).expect("Failed to open data directory");
    let orders = OrderHistory::load(storage).expect("Failed to load order history");
    tracing::info!(
        data_dir = %config.data_dir.display(),
        orders = orders.list().await.len(),
        "Local storage ready"
    );

    // Without a key the service still serves quotes and local orders.
    let provider: Option<Arc<dyn WalletProvider>> = match &config.wallet_key {
        Some(source) => {
            let keyring = LocalKeyring::from_source(source).expect("Failed to load wallet key");
            Some(Arc::new(keyring))
        }
        None => {
            tracing::warn!("No wallet key configured; connect will report wallet unavailable");
            None
        }
    };

    let sessions = SessionManager::new(
        provider,
        Arc::new(LcdConnector::new(config.gas_price.clone(), config.gas_limit)),
        config.chain.clone(),
    );
    let prices =
        HttpPriceSource::new(&config.price_api_url).expect("Failed to build price client");
    let intake =
        HttpOrderIntake::new(&config.order_api_url).expect("Failed to build order client");
    let order_key = PaillierPublicKey::order_book().expect("Invalid order book key");

    let addr = config.bind_addr();
    let chain_id = config.chain.chain_id.clone();
    let state = AppState::new(
        config,
        sessions,
        orders,
        Arc::new(prices),
        Arc::new(intake),
        order_key,
    );
    let app = router(state);

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        });
    }

    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(%addr, chain_id = %chain_id, "LeviFi client listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .expect("HTTP server failed");
}
