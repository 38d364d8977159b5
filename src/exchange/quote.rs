// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion rates and the swap form.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use super::pair::{SwapToken, TokenPair};
use crate::error::ClientError;

/// Source of sell-to-buy conversion rates.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn rate(&self, sell: SwapToken, buy: SwapToken) -> Result<f64, ClientError>;
}

/// Price conversion endpoint client.
pub struct HttpPriceSource {
    http: reqwest::Client,
    url: String,
}

impl HttpPriceSource {
    pub fn new(url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn rate(&self, sell: SwapToken, buy: SwapToken) -> Result<f64, ClientError> {
        let response = self
            .http
            .post(&self.url)
            .json(&json!({
                "sell_token_price": sell.symbol(),
                "buy_token_price": buy.symbol(),
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Network(format!(
                "price endpoint returned HTTP {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        extract_rate(&body, buy)
    }
}

/// Read `data.quote[<buy>].price`.
pub(crate) fn extract_rate(body: &Value, buy: SwapToken) -> Result<f64, ClientError> {
    let pointer = format!("/data/quote/{}/price", buy.symbol());
    body.pointer(&pointer)
        .and_then(Value::as_f64)
        .ok_or_else(|| ClientError::Network(format!("price response has no {pointer}")))
}

/// State of the swap form.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SwapForm {
    #[serde(flatten)]
    pub pair: TokenPair,
    /// Amount as entered, decimal text. Encrypted verbatim on submission.
    #[schema(example = "1")]
    pub amount: String,
    /// `amount` as a float, only for the quoted result
    #[serde(skip)]
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    pub result: f64,
}

impl Default for SwapForm {
    fn default() -> Self {
        Self {
            pair: TokenPair::default(),
            amount: "1".to_string(),
            value: 1.0,
            rate: None,
            result: 0.0,
        }
    }
}

impl SwapForm {
    pub fn amount_value(&self) -> f64 {
        self.value
    }

    /// Whether a rate should be requested for the current amount.
    pub fn wants_quote(&self) -> bool {
        self.value > 0.0
    }

    /// Set the amount; recomputes immediately when a rate is already known.
    ///
    /// The text is kept exactly as given. It must parse as a finite number.
    pub fn set_amount(&mut self, input: &str) -> Result<(), ClientError> {
        let text = input.trim();
        let value = text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ClientError::Validation(format!("amount must be a finite number, got {input:?}"))
            })?;
        self.amount = text.to_string();
        self.value = value;
        if self.rate.is_some() {
            self.recompute();
        }
        Ok(())
    }

    pub fn apply_rate(&mut self, rate: f64) {
        self.rate = Some(rate);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.result = match self.rate {
            Some(rate) if rate != 0.0 && self.value > 0.0 => self.value * rate,
            _ => 0.0,
        };
    }
}

/// Fetch a fresh rate for the form's pair when the amount is positive.
///
/// The form lock is released while the request is in flight; the rate is
/// applied to whatever the form holds when it resolves.
pub async fn requote(
    form: &RwLock<SwapForm>,
    prices: &dyn PriceSource,
) -> Result<SwapForm, ClientError> {
    let (pair, wants_quote) = {
        let form = form.read().await;
        (form.pair, form.wants_quote())
    };

    if wants_quote {
        let rate = prices
            .rate(pair.first, pair.second)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error fetching rate"))?;
        form.write().await.apply_rate(rate);
    }

    Ok(form.read().await.clone())
}
