//! DTOs for the health endpoint.

use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

impl HealthResponse {
    /// Builds the response around the store check; the overall status follows it.
    pub fn from_store(store: CheckStatus) -> Self {
        Self {
            status: if store.is_ok() { "healthy" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { store },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.checks.store.is_ok()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: CheckStatus,
}

/// Outcome of probing one dependency.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    /// `ok` or `error`.
    pub status: &'static str,
    pub message: &'static str,
    /// Time the readiness call took.
    pub latency_ms: u64,
}

impl CheckStatus {
    pub fn ok(message: &'static str, latency_ms: u64) -> Self {
        Self {
            status: "ok",
            message,
            latency_ms,
        }
    }

    pub fn error(message: &'static str, latency_ms: u64) -> Self {
        Self {
            status: "error",
            message,
            latency_ms,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_store_check() {
        let healthy = HealthResponse::from_store(CheckStatus::ok("up", 1));
        assert!(healthy.is_healthy());
        assert_eq!(healthy.status, "healthy");

        let degraded = HealthResponse::from_store(CheckStatus::error("down", 1));
        assert!(!degraded.is_healthy());
        assert_eq!(degraded.status, "degraded");
    }

    #[test]
    fn test_serializes_check_fields() {
        let value =
            serde_json::to_value(HealthResponse::from_store(CheckStatus::ok("up", 7))).unwrap();
        assert_eq!(value["checks"]["store"]["status"], "ok");
        assert_eq!(value["checks"]["store"]["latency_ms"], 7);
    }
}
