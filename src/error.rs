// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error types shared by the client services and the HTTP layer.
//!
//! [`ClientError`] is what every wallet, chain, pricing and order operation
//! returns. Its [`ErrorKind`] lets callers tell a missing wallet apart from
//! a network failure or a rejected contract call. [`ApiError`] is the HTTP
//! boundary representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::exchange::OrderError;
use crate::storage::StorageError;

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    WalletUnavailable,
    Network,
    ContractRejected,
    Validation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::WalletUnavailable => "wallet_unavailable",
            ErrorKind::Network => "network",
            ErrorKind::ContractRejected => "contract_rejected",
            ErrorKind::Validation => "validation",
        }
    }
}

/// Errors returned by wallet, chain, pricing and order operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Contract rejected request: {0}")]
    ContractRejected(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::WalletUnavailable(_) => ErrorKind::WalletUnavailable,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::ContractRejected(_) => ErrorKind::ContractRejected,
            ClientError::Validation(_) => ErrorKind::Validation,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: Option<ErrorKind>,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            kind: None,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        let kind = e.kind();
        let status = match kind {
            ErrorKind::WalletUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Network => StatusCode::BAD_GATEWAY,
            ErrorKind::ContractRejected => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            kind: Some(kind),
            message: e.to_string(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::internal(format!("Storage failure: {e}"))
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Client(e) => e.into(),
            OrderError::Storage(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.kind.map(|k| k.as_str().to_string()),
        });
        (self.status, body).into_response()
    }
}
