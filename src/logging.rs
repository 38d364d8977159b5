// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup.
//!
//! `RUST_LOG` selects the filter and `LOG_FORMAT=json` switches to
//! structured output.

use std::str::FromStr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::DEFAULT_LOG_FILTER;

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Anything other than `json` (case-insensitive) is pretty.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Build the filter; a bare level gets quieter defaults for the HTTP stack.
pub fn filter_spec(raw: Option<&str>) -> String {
    let normalized = raw.map(str::trim).filter(|s| !s.is_empty());
    match normalized {
        None => DEFAULT_LOG_FILTER.to_string(),
        Some(spec) if spec.contains(',') || spec.contains('=') => spec.to_string(),
        Some(level) => format!("{level},h2=info,hyper=info,hyper_util=info,reqwest=info"),
    }
}

/// Install the global subscriber. Call once at startup.
pub fn setup_logging(filter: Option<&str>, format: LogFormat) {
    let spec = filter_spec(filter);
    let env_filter = EnvFilter::from_str(&spec).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(false)
                .with_current_span(false);
            subscriber.with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer().with_target(true).compact();
            subscriber.with(layer).init();
        }
    }

    tracing::info!(filter = %spec, format = ?format, "Logging initialized");
}
