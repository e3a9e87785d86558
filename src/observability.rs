use std::net::SocketAddr;

use crate::engine::EngineError;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: reservations accepted and persisted.
pub const RESERVATIONS_CREATED_TOTAL: &str = "tablebook_reservations_created_total";

/// Counter: reservations rejected by validation. Labels: reason.
pub const RESERVATIONS_REJECTED_TOTAL: &str = "tablebook_reservations_rejected_total";

/// Counter: tables created.
pub const TABLES_CREATED_TOTAL: &str = "tablebook_tables_created_total";

/// Counter: availability computations served.
pub const AVAILABILITY_QUERIES_TOTAL: &str = "tablebook_availability_queries_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a rejection to a short label for metrics.
pub fn reason_label(err: &EngineError) -> &'static str {
    match err {
        EngineError::InvalidRange => "invalid_range",
        EngineError::SizeMismatch { .. } => "size_mismatch",
        EngineError::NoMatchingSlot => "no_matching_slot",
        EngineError::NoTableFits(_) => "no_table_fits",
        EngineError::NotFound(_) => "not_found",
        EngineError::PastDate => "past_date",
        EngineError::PastTime => "past_time",
        EngineError::SeatsOutOfRange(_) => "seats_out_of_range",
        EngineError::ForbiddenDelete(_) => "forbidden_delete",
        EngineError::Storage(_) => "storage",
    }
}
