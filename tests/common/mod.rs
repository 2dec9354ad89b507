#![allow(dead_code)]

use sieve::{Document, MockOracle};

/// Routes `RUST_LOG`-filtered pipeline logs to the test output. Safe to call twice.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Marker embedded in document `i`, unique against every other index.
pub fn marker(i: usize) -> String {
    format!("<doc-{i}>")
}

pub fn marked_documents(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| Document::new(format!("passage {}", marker(i))))
        .collect()
}

/// Oracle grading document `i` with `scores[i]`.
pub fn scripted_oracle(scores: &[u32]) -> MockOracle {
    MockOracle::by_marker(
        scores.iter().enumerate().map(|(i, s)| (marker(i), *s)),
        "0",
    )
}

pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(future)
}
