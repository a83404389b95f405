//! Prometheus metrics for store activity.
//!
//! Counters are always recorded through the `metrics` facade; they are only
//! scraped when [`install_exporter`] has been called with a listen address.

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{debug, info};

use crate::error::Result;

// === Metric Name Constants ===

/// Users created counter metric name.
pub const METRIC_USERS_CREATED: &str = "users_created_total";
/// Users updated counter metric name.
pub const METRIC_USERS_UPDATED: &str = "users_updated_total";
/// Users deleted counter metric name.
pub const METRIC_USERS_DELETED: &str = "users_deleted_total";
/// Lookups that matched no user.
pub const METRIC_USERS_NOT_FOUND: &str = "users_not_found_total";
/// Rejected request bodies.
pub const METRIC_BAD_REQUESTS: &str = "bad_requests_total";
/// Current number of users in the store.
pub const METRIC_STORE_SIZE: &str = "store_size";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_USERS_CREATED, "Total number of users created");
    describe_counter!(METRIC_USERS_UPDATED, "Total number of users updated");
    describe_counter!(METRIC_USERS_DELETED, "Total number of users deleted");
    describe_counter!(
        METRIC_USERS_NOT_FOUND,
        "Total number of requests for a user id that does not exist"
    );
    describe_counter!(
        METRIC_BAD_REQUESTS,
        "Total number of request bodies that failed to deserialize"
    );
    describe_gauge!(METRIC_STORE_SIZE, "Number of users currently in the store");

    debug!("Metrics initialized");
}

/// Serve `/metrics` in Prometheus text format on its own listener.
pub fn install_exporter(addr: SocketAddr) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Increment users created counter.
pub fn inc_users_created() {
    counter!(METRIC_USERS_CREATED).increment(1);
}

/// Increment users updated counter.
pub fn inc_users_updated() {
    counter!(METRIC_USERS_UPDATED).increment(1);
}

/// Increment users deleted counter.
pub fn inc_users_deleted() {
    counter!(METRIC_USERS_DELETED).increment(1);
}

/// Increment not-found counter.
pub fn inc_users_not_found() {
    counter!(METRIC_USERS_NOT_FOUND).increment(1);
}

/// Increment bad request counter.
pub fn inc_bad_requests() {
    counter!(METRIC_BAD_REQUESTS).increment(1);
}

/// Record the current store size.
pub fn set_store_size(len: usize) {
    gauge!(METRIC_STORE_SIZE).set(len as f64);
}
