// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet session state.
//!
//! A session is created by [`SessionManager::connect`] and dropped on
//! disconnect or on a failed connect. Writes are not sequenced: a connect
//! that resolves after a disconnect still installs its result.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::{ChainConnector, WalletProvider};
use crate::blockchain::{ChainConfig, ContractExecutor, ContractQuerier};
use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// An active wallet session.
#[derive(Clone)]
pub struct Session {
    /// Address of the first wallet account
    pub signer: String,
    /// Display name of the connected chain
    pub chain_name: String,
    pub query_client: Arc<dyn ContractQuerier>,
    pub signing_client: Arc<dyn ContractExecutor>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("signer", &self.signer)
            .field("chain_name", &self.chain_name)
            .finish_non_exhaustive()
    }
}

/// Serializable view of the session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SessionView {
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
struct SessionState {
    status: SessionStatus,
    session: Option<Session>,
    error: Option<String>,
}

impl SessionState {
    fn initial() -> Self {
        Self {
            status: SessionStatus::Disconnected,
            session: None,
            error: None,
        }
    }
}

pub struct SessionManager {
    provider: Option<Arc<dyn WalletProvider>>,
    connector: Arc<dyn ChainConnector>,
    chain: ChainConfig,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// `provider` is `None` when no wallet is installed.
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        connector: Arc<dyn ChainConnector>,
        chain: ChainConfig,
    ) -> Self {
        Self {
            provider,
            connector,
            chain,
            state: RwLock::new(SessionState::initial()),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn view(&self) -> SessionView {
        let state = self.state.read().await;
        SessionView {
            status: state.status,
            signer: state.session.as_ref().map(|s| s.signer.clone()),
            chain_name: state.session.as_ref().map(|s| s.chain_name.clone()),
            error: state.error.clone(),
        }
    }

    /// Active session, if connected.
    pub async fn current(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    /// Active session or a `WalletUnavailable` error.
    pub async fn require(&self) -> Result<Session, ClientError> {
        self.current().await.ok_or_else(|| {
            ClientError::WalletUnavailable("no wallet session is connected".to_string())
        })
    }

    /// Connect the wallet and open chain clients.
    pub async fn connect(&self) -> Result<Session, ClientError> {
        {
            let mut state = self.state.write().await;
            state.status = SessionStatus::Connecting;
            state.error = None;
        }

        match self.open_session().await {
            Ok(session) => {
                tracing::info!(
                    signer = %session.signer,
                    chain = %session.chain_name,
                    "Wallet session connected"
                );
                let mut state = self.state.write().await;
                state.status = SessionStatus::Connected;
                state.session = Some(session.clone());
                state.error = None;
                Ok(session)
            }
            Err(e) => {
                tracing::error!(error = %e, "Wallet connection failed");
                let mut state = self.state.write().await;
                state.status = SessionStatus::Error;
                state.session = None;
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Reset to the initial empty state.
    pub async fn disconnect(&self) {
        *self.state.write().await = SessionState::initial();
        tracing::info!("Wallet session disconnected");
    }

    async fn open_session(&self) -> Result<Session, ClientError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            ClientError::WalletUnavailable("no wallet provider is installed".to_string())
        })?;

        if let Err(e) = provider.suggest_chain(&self.chain).await {
            tracing::warn!(chain_id = %self.chain.chain_id, error = %e, "Chain suggestion failed");
        }

        provider.enable(&self.chain.chain_id).await?;
        let signer = provider.offline_signer(&self.chain.chain_id)?;

        let accounts = signer.accounts().await?;
        let address = accounts
            .first()
            .map(|a| a.address.clone())
            .ok_or_else(|| ClientError::WalletUnavailable("wallet has no accounts".to_string()))?;

        let clients = self.connector.connect(&self.chain, signer).await?;

        Ok(Session {
            signer: address,
            chain_name: self.chain.display_name.clone(),
            query_client: clients.query,
            signing_client: clients.signing,
        })
    }
}
