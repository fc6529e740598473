use std::time::Duration;

/// Prefix of every media route.
pub const API_PREFIX: &str = "/api";

/// Per-dependency timeout for readiness checks.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Blob name probed by the readiness check. It never exists; only the round-trip matters.
pub const HEALTH_CHECK_BLOB_NAME: &str = "health-check-non-existent-key";
