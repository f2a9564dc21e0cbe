//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use std::sync::Once;

pub const EPSILON: f64 = 1e-10;

static TRACING: Once = Once::new();

/// Install a test subscriber once; `RUST_LOG` selects the level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A deterministic, roughly normal sample built from evenly spaced quantiles
pub fn normal_sample(n: usize, mean: f64, std: f64) -> Vec<f64> {
    (1..=n)
        .map(|i| {
            let p = i as f64 / (n + 1) as f64;
            mean + std * dataplot::Distribution::Normal.ppf(p).unwrap_or(0.0)
        })
        .collect()
}

/// Special floating-point values for edge case testing
pub fn special_values() -> Vec<f64> {
    vec![0.0, -0.0, 1.0, -1.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN]
}
