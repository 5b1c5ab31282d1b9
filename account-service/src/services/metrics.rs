//! Domain metrics for account-service.
//!
//! Recorded through the `metrics` facade and exposed by the shared Prometheus
//! recorder in `service_core::observability`.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

pub const ACCOUNTS_CREATED_TOTAL: &str = "accounts_created_total";
pub const TOKENS_ISSUED_TOTAL: &str = "access_tokens_issued_total";
pub const ACCESS_DECISIONS_TOTAL: &str = "access_decisions_total";
pub const DB_QUERY_DURATION: &str = "account_db_query_duration_seconds";

/// Register metric descriptions (call once at startup).
pub fn init_metrics() {
    describe_counter!(ACCOUNTS_CREATED_TOTAL, "Total number of accounts created");
    describe_counter!(TOKENS_ISSUED_TOTAL, "Total number of access tokens issued");
    describe_counter!(
        ACCESS_DECISIONS_TOTAL,
        "Access gate decisions by outcome (allowed or the denial reason)"
    );
    describe_histogram!(DB_QUERY_DURATION, "Account store query duration in seconds");
}

pub fn record_account_created() {
    counter!(ACCOUNTS_CREATED_TOTAL).increment(1);
}

pub fn record_token_issued() {
    counter!(TOKENS_ISSUED_TOTAL).increment(1);
}

pub fn record_access_decision(outcome: &'static str) {
    counter!(ACCESS_DECISIONS_TOTAL, "outcome" => outcome).increment(1);
}

pub fn record_db_query(operation: &'static str, started: Instant) {
    histogram!(DB_QUERY_DURATION, "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}
