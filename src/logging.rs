//! Structured logging utilities for the behavior harness.
//!
//! This module provides helper functions for consistent, structured logging
//! across the harness using the `tracing` crate, and the subscriber setup
//! used by test binaries.

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber honouring `RUST_LOG`, falling back to the
/// configured level. Repeated calls are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let level = config.level.as_deref().unwrap_or("warn");
    let fallback_filter = format!("exchanger_behaviors={level},contract_mock={level}");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback_filter.into());

    let result = if config.json.unwrap_or(false) {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Log a before-each hook being attached to a scope.
pub fn log_hook_registered(scope: &str, hook: &str) {
    tracing::debug!(scope, hook, "Hook registered");
}

/// Log a before-each hook about to run.
pub fn log_hook_run(case: &str, hook: &str) {
    tracing::trace!(case, hook, "Running hook");
}

pub fn log_hook_failed(case: &str, hook: &str, error: &str) {
    tracing::warn!(case, hook, error, "Hook failed");
}

/// Log a synth mock created for an issuer lookup.
pub fn log_companion_materialized(key: &str, address: &str) {
    tracing::debug!(key, address, "Synth mock materialized");
}

/// Log a cached synth mock reused under a different key.
pub fn log_companion_rebound(previous: &str, key: &str) {
    tracing::debug!(previous, key, "Synth mock rebound to new currency key");
}

pub fn log_suite_start(suite: &str, cases: usize) {
    tracing::info!(suite, cases, "Running suite");
}

pub fn log_case_complete(case: &str, passed: bool) {
    if passed {
        tracing::debug!(case, "Case passed");
    } else {
        tracing::info!(case, "Case failed");
    }
}

pub fn log_suite_complete(suite: &str, passed: usize, failed: usize) {
    tracing::info!(suite, passed, failed, "Suite completed");
}
